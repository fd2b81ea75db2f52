use mongo_macro::MongoIndexModelProvider as MongoDeriveMongoIndex;
use serde::{Deserialize, Serialize};

/// Admin note attached to a user.
#[derive(Debug, Clone, Serialize, Deserialize, MongoDeriveMongoIndex)]
#[mongo_index(fields("user_id"))]
pub struct MemoEntity {
    #[serde(rename = "_id")]
    pub id: i64,
    pub user_id: i64,
    pub contents: String,
    pub create_time: i64,
}
