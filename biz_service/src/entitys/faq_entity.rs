use mongo_macro::MongoIndexModelProvider as MongoDeriveMongoIndex;
use serde::{Deserialize, Serialize};

/// Question/answer pair shown on a program page, deleted with its program.
#[derive(Debug, Clone, Serialize, Deserialize, MongoDeriveMongoIndex)]
#[mongo_index(fields("program_id"))]
pub struct FaqEntity {
    #[serde(rename = "_id")]
    pub id: i64,
    pub program_id: i64,
    pub question: String,
    pub answer: String,
}
