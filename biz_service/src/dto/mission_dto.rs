use crate::entitys::mission_entity::{MissionStatus, MissionType};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MissionCreateRequest {
    #[validate(range(min = 0))]
    pub th: i32,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub contents: String,
    pub guide: Option<String>,
    pub template_link: Option<String>,
    #[serde(default)]
    pub mission_type: MissionType,
    #[serde(default)]
    pub refund: i32,
    pub start_date: String,
    pub end_date: String,
    #[serde(default)]
    pub is_visible: bool,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MissionUpdateRequest {
    pub th: Option<i32>,
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    pub contents: Option<String>,
    pub guide: Option<String>,
    pub template_link: Option<String>,
    pub mission_type: Option<MissionType>,
    pub status: Option<MissionStatus>,
    pub refund: Option<i32>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub is_visible: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MissionResponse {
    pub id: i64,
    pub program_id: i64,
    pub th: i32,
    pub title: String,
    pub contents: String,
    pub guide: Option<String>,
    pub template_link: Option<String>,
    pub mission_type: MissionType,
    pub status: MissionStatus,
    pub refund: i32,
    pub start_date: String,
    pub end_date: String,
    pub is_visible: bool,
}
