use crate::dto::review_dto::ReviewResponse;
use crate::entitys::mail_entity::MailType;
use crate::entitys::program_entity::{FeeType, MailStatus, MeetingInfo, ProgramStatus, ProgramTopic, ProgramType, ProgramWay};
use crate::entitys::user_entity::AccountType;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FaqRequest {
    #[validate(length(min = 1))]
    pub question: String,
    #[validate(length(min = 1))]
    pub answer: String,
}

/// Dates use `YYYY-MM-DD HH:MM` in server local time.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProgramCreateRequest {
    #[serde(rename = "type")]
    pub program_type: ProgramType,
    #[validate(range(min = 1))]
    pub th: i32,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub max_headcount: i32,
    #[serde(default)]
    pub fee_type: FeeType,
    pub fee_charge: Option<i32>,
    pub fee_refund: Option<i32>,
    pub fee_due_date: Option<String>,
    pub account_type: Option<AccountType>,
    pub account_number: Option<String>,
    pub discount_value: Option<i32>,
    pub due_date: String,
    pub announcement_date: String,
    pub start_date: String,
    pub end_date: String,
    pub contents: String,
    pub notice: Option<String>,
    #[serde(default)]
    pub way: ProgramWay,
    pub location: Option<String>,
    pub link: Option<String>,
    #[serde(default)]
    pub topic: ProgramTopic,
    #[serde(default)]
    pub is_visible: bool,
    pub open_kakao_link: Option<String>,
    pub open_kakao_password: Option<String>,
    #[serde(default)]
    #[validate(nested)]
    pub faq_list: Vec<FaqRequest>,
}

/// Partial update; absent fields keep their value.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProgramUpdateRequest {
    #[serde(rename = "type")]
    pub program_type: Option<ProgramType>,
    pub th: Option<i32>,
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[validate(range(min = 0))]
    pub max_headcount: Option<i32>,
    pub fee_type: Option<FeeType>,
    pub fee_charge: Option<i32>,
    pub fee_refund: Option<i32>,
    pub fee_due_date: Option<String>,
    pub account_type: Option<AccountType>,
    pub account_number: Option<String>,
    pub discount_value: Option<i32>,
    pub due_date: Option<String>,
    pub announcement_date: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub contents: Option<String>,
    pub notice: Option<String>,
    pub way: Option<ProgramWay>,
    pub location: Option<String>,
    pub link: Option<String>,
    pub topic: Option<ProgramTopic>,
    pub status: Option<ProgramStatus>,
    pub is_visible: Option<bool>,
    pub open_kakao_link: Option<String>,
    pub open_kakao_password: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProgramTypeQuery {
    #[serde(rename = "type")]
    pub program_type: Option<ProgramType>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AdminProgramQuery {
    #[serde(rename = "type")]
    pub program_type: Option<ProgramType>,
    pub th: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProgramThumbnailResponse {
    pub id: i64,
    pub status: ProgramStatus,
    #[serde(rename = "type")]
    pub program_type: ProgramType,
    pub th: i32,
    pub title: String,
    pub due_date: String,
    pub start_date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FaqResponse {
    pub id: i64,
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProgramDetailResponse {
    pub id: i64,
    pub status: ProgramStatus,
    #[serde(rename = "type")]
    pub program_type: ProgramType,
    pub th: i32,
    pub title: String,
    pub contents: String,
    pub notice: Option<String>,
    pub way: ProgramWay,
    pub location: Option<String>,
    pub topic: ProgramTopic,
    pub fee_type: FeeType,
    pub fee_charge: Option<i32>,
    pub fee_refund: Option<i32>,
    pub discount_value: Option<i32>,
    pub due_date: String,
    pub announcement_date: String,
    pub start_date: String,
    pub end_date: String,
    pub faq_list: Vec<FaqResponse>,
    pub review_list: Vec<ReviewResponse>,
    /// whether the requesting member already applied
    pub is_applied: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProgramAdminResponse {
    pub id: i64,
    #[serde(rename = "type")]
    pub program_type: ProgramType,
    pub status: ProgramStatus,
    pub th: i32,
    pub title: String,
    pub headcount: i32,
    pub max_headcount: i32,
    pub final_head_count: i32,
    pub fee_type: FeeType,
    pub fee_charge: Option<i32>,
    pub fee_refund: Option<i32>,
    pub fee_due_date: Option<String>,
    pub account_type: Option<AccountType>,
    pub account_number: Option<String>,
    pub discount_value: Option<i32>,
    pub due_date: String,
    pub announcement_date: String,
    pub start_date: String,
    pub end_date: String,
    pub contents: String,
    pub notice: Option<String>,
    pub way: ProgramWay,
    pub location: Option<String>,
    pub link: Option<String>,
    pub topic: ProgramTopic,
    pub is_visible: bool,
    pub open_kakao_link: Option<String>,
    pub open_kakao_password: Option<String>,
    pub meeting: Option<MeetingInfo>,
    pub mail_status: MailStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProgramCountResponse {
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FinalHeadcountResponse {
    pub final_head_count: i32,
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MentorPasswordRequest {
    pub mentor_password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MentorPasswordResponse {
    pub mentor_password: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LetsChatPriorNoticeResponse {
    pub title: String,
    pub start_date: String,
    pub end_date: String,
    pub way: ProgramWay,
    pub location: Option<String>,
    pub join_url: Option<String>,
    /// motives of approved applicants, for the mentor to prepare
    pub apply_motives: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LetsChatAfterNoticeResponse {
    pub title: String,
    pub review_link: String,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(rename_all = "camelCase")]
pub struct MailTypeQuery {
    pub mail_type: MailType,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmailTemplateResponse {
    pub email_list: Vec<String>,
    pub subject: String,
    pub contents: String,
}
