use mongo_macro::MongoIndexModelProvider as MongoDeriveMongoIndex;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, ToSchema, AsRefStr, Display, EnumString)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum MissionType {
    #[default]
    General,
    Refund,
    Additional,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, ToSchema, AsRefStr, Display, EnumString)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum MissionStatus {
    #[default]
    Waiting,
    CheckDone,
    RefundDone,
}

/// Daily task of a challenge program.
#[derive(Debug, Clone, Serialize, Deserialize, MongoDeriveMongoIndex)]
#[mongo_index(fields("program_id", "th"))]
pub struct MissionEntity {
    #[serde(rename = "_id")]
    pub id: i64,
    pub program_id: i64,
    /// day number inside the program
    pub th: i32,
    pub title: String,
    pub contents: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guide: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_link: Option<String>,
    pub mission_type: MissionType,
    pub status: MissionStatus,
    pub refund: i32,
    pub start_date: i64,
    pub end_date: i64,
    pub is_visible: bool,
}
