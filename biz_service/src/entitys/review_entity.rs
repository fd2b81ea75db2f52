use mongo_macro::MongoIndexModelProvider as MongoDeriveMongoIndex;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, MongoDeriveMongoIndex)]
#[mongo_index(fields("program_id"))]
pub struct ReviewEntity {
    #[serde(rename = "_id")]
    pub id: i64,
    pub program_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    /// 1..=5
    pub grade: i32,
    pub review_contents: String,
    pub is_visible: bool,
    pub create_time: i64,
}
