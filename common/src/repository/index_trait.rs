use mongodb::IndexModel;

/// Index declarations of a persisted entity, usually derived with
/// `#[derive(MongoIndexModelProvider)]`.
pub trait MongoIndexModelProvider {
    fn index_models() -> Vec<IndexModel>;
}
