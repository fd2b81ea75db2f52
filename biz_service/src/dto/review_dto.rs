use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewCreateRequest {
    #[validate(range(min = 1, max = 5))]
    pub grade: i32,
    #[validate(length(min = 1, max = 2000))]
    pub review_contents: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewVisibilityRequest {
    pub is_visible: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResponse {
    pub id: i64,
    pub program_id: i64,
    pub grade: i32,
    pub review_contents: String,
    pub is_visible: bool,
    pub create_time: String,
}
