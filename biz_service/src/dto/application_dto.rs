use crate::entitys::application_entity::{ApplicationGrade, ApplicationStatus, ApprovalState};
use crate::entitys::attendance_entity::{AttendanceResult, AttendanceStatus};
use crate::entitys::mission_entity::{MissionStatus, MissionType};
use crate::entitys::program_entity::{ProgramStatus, ProgramType};
use crate::entitys::user_entity::AccountType;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Submission body. Guests fill the `guest*` fields; members may complete
/// their profile (`university`, `major`, account) in the same request.
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationCreateRequest {
    pub grade: Option<ApplicationGrade>,
    pub wish_company: Option<String>,
    pub wish_job: Option<String>,
    #[validate(length(max = 2000))]
    pub apply_motive: Option<String>,
    pub guest_name: Option<String>,
    pub guest_phone_num: Option<String>,
    #[validate(email)]
    pub guest_email: Option<String>,
    pub university: Option<String>,
    pub major: Option<String>,
    pub account_type: Option<AccountType>,
    pub account_number: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationUpdateRequest {
    pub is_approved: Option<bool>,
    pub status: Option<ApplicationStatus>,
    pub grade: Option<ApplicationGrade>,
    pub wish_company: Option<String>,
    pub wish_job: Option<String>,
    pub apply_motive: Option<String>,
    pub attendance: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationIntroductionRequest {
    #[validate(length(max = 2000))]
    pub introduction: String,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ApprovalQuery {
    pub approval: Option<ApprovalState>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationAdminResponse {
    pub id: i64,
    pub program_id: i64,
    pub user_id: Option<i64>,
    pub is_guest: bool,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone_num: Option<String>,
    pub status: ApplicationStatus,
    pub approval: ApprovalState,
    pub grade: Option<ApplicationGrade>,
    pub wish_company: Option<String>,
    pub wish_job: Option<String>,
    pub apply_motive: Option<String>,
    pub introduction: Option<String>,
    pub attendance: Option<bool>,
    pub create_time: String,
}

/// A member's application with a summary of its program.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserApplicationResponse {
    pub id: i64,
    pub status: ApplicationStatus,
    pub approval: ApprovalState,
    pub program_id: i64,
    pub program_title: Option<String>,
    pub program_type: Option<ProgramType>,
    pub program_th: Option<i32>,
    pub program_status: Option<ProgramStatus>,
    pub program_start_date: Option<String>,
    pub program_end_date: Option<String>,
    pub create_time: String,
}

/// Contact emails of a program split by the admin decision.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmailListResponse {
    pub approved: Vec<String>,
    /// undecided and rejected
    pub not_approved: Vec<String>,
}

/// A challenge participant with their attendance tally.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeApplicationAdminResponse {
    #[serde(flatten)]
    pub application: ApplicationAdminResponse,
    pub mission_count: usize,
    pub attendance_count: usize,
    pub pass_count: usize,
}

/// One mission of the program and what the participant handed in for it.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MissionProgressResponse {
    pub mission_id: i64,
    pub th: i32,
    pub title: String,
    pub mission_type: MissionType,
    pub mission_status: MissionStatus,
    pub attendance_id: Option<i64>,
    pub link: Option<String>,
    pub attendance_status: Option<AttendanceStatus>,
    pub attendance_result: Option<AttendanceResult>,
    pub is_refunded: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeApplicationDetailResponse {
    pub application_id: i64,
    pub apply_motive: Option<String>,
    pub missions: Vec<MissionProgressResponse>,
}
