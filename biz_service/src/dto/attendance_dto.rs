use crate::entitys::attendance_entity::{AttendanceResult, AttendanceStatus};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Member submission or re-submission of a mission link.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceLinkRequest {
    #[validate(length(min = 1, max = 1000))]
    pub link: String,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceAdminUpdateRequest {
    pub status: Option<AttendanceStatus>,
    pub result: Option<AttendanceResult>,
    pub is_refunded: Option<bool>,
    pub comments: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceResponse {
    pub id: i64,
    pub mission_id: i64,
    pub user_id: i64,
    pub link: String,
    pub status: AttendanceStatus,
    pub result: AttendanceResult,
    pub is_refunded: bool,
    pub comments: Option<String>,
    pub create_time: String,
}
