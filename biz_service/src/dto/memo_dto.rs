use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MemoRequest {
    #[validate(length(min = 1, max = 5000))]
    pub contents: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MemoResponse {
    pub id: i64,
    pub user_id: i64,
    pub contents: String,
    pub create_time: String,
}
