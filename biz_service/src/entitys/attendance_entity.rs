use mongo_macro::MongoIndexModelProvider as MongoDeriveMongoIndex;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, ToSchema, AsRefStr, Display, EnumString)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum AttendanceStatus {
    #[default]
    Present,
    Updated,
    Late,
    Absent,
}

impl AttendanceStatus {
    /// On time up to and including the mission end.
    pub fn for_submission(submitted_at: i64, mission_end: i64) -> Self {
        if submitted_at <= mission_end { AttendanceStatus::Present } else { AttendanceStatus::Late }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, ToSchema, AsRefStr, Display, EnumString)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum AttendanceResult {
    #[default]
    Waiting,
    Pass,
    Wrong,
}

#[derive(Debug, Clone, Serialize, Deserialize, MongoDeriveMongoIndex)]
#[mongo_index(fields("mission_id", "user_id"), unique, name = "uk_attendance_mission_user")]
pub struct AttendanceEntity {
    #[serde(rename = "_id")]
    pub id: i64,
    pub mission_id: i64,
    pub user_id: i64,
    pub link: String,
    pub status: AttendanceStatus,
    pub result: AttendanceResult,
    pub is_refunded: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    pub create_time: i64,
}
