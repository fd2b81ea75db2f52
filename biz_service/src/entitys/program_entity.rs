use mongo_macro::MongoIndexModelProvider as MongoDeriveMongoIndex;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use utoipa::ToSchema;

use crate::entitys::user_entity::AccountType;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema, AsRefStr, Display, EnumString)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ProgramType {
    ChallengeHalf,
    ChallengeFull,
    LetsChat,
    Bootcamp,
}

impl ProgramType {
    pub fn is_challenge(self) -> bool {
        matches!(self, ProgramType::ChallengeHalf | ProgramType::ChallengeFull)
    }

    /// Programs that run their sessions in an online meeting room.
    pub fn needs_meeting(self) -> bool {
        self.is_challenge() || self == ProgramType::LetsChat
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, ToSchema, AsRefStr, Display, EnumString)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ProgramStatus {
    #[default]
    Open,
    Closed,
    Done,
}

impl ProgramStatus {
    /// Status once `headcount` applicants are registered: a full program closes,
    /// anything else keeps its status.
    pub fn on_headcount(self, headcount: i32, max_headcount: i32) -> Self {
        if max_headcount > 0 && headcount >= max_headcount { ProgramStatus::Closed } else { self }
    }

    /// Status derived from the application due date.
    pub fn for_due_date(due_date: i64, now: i64) -> Self {
        if due_date > now { ProgramStatus::Open } else { ProgramStatus::Closed }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, ToSchema, AsRefStr, Display, EnumString)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum FeeType {
    #[default]
    Free,
    Charge,
    Refund,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, ToSchema, AsRefStr, Display, EnumString)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ProgramWay {
    #[default]
    Online,
    Offline,
    All,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, ToSchema, AsRefStr, Display, EnumString)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ProgramTopic {
    #[default]
    All,
    Marketing,
    Development,
    Design,
    Planning,
    Finance,
}

/// Last lifecycle mail sent for a program.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, ToSchema, AsRefStr, Display, EnumString)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum MailStatus {
    #[default]
    None,
    Approved,
    Remind,
    Review,
}

/// Meeting room attached to LETS_CHAT and challenge programs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MeetingInfo {
    pub join_url: String,
    pub meeting_id: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, MongoDeriveMongoIndex)]
#[mongo_index(fields("program_type", "th"))]
#[mongo_index(fields("status"))]
pub struct ProgramEntity {
    #[serde(rename = "_id")]
    pub id: i64,
    pub program_type: ProgramType,
    pub status: ProgramStatus,
    pub th: i32,
    pub title: String,
    pub headcount: i32,
    /// 0 means unlimited
    pub max_headcount: i32,
    pub final_head_count: i32,
    pub fee_type: FeeType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fee_charge: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fee_refund: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fee_due_date: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_type: Option<AccountType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_value: Option<i32>,
    pub due_date: i64,
    pub announcement_date: i64,
    pub start_date: i64,
    pub end_date: i64,
    pub contents: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
    pub way: ProgramWay,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    pub topic: ProgramTopic,
    pub is_visible: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_kakao_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_kakao_password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meeting: Option<MeetingInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mentor_password: Option<String>,
    pub mail_status: MailStatus,
    pub create_time: i64,
    pub update_time: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(ProgramStatus::Open, 4, 5, ProgramStatus::Open)]
    #[case(ProgramStatus::Open, 5, 5, ProgramStatus::Closed)]
    #[case(ProgramStatus::Open, 6, 5, ProgramStatus::Closed)]
    #[case(ProgramStatus::Open, 100, 0, ProgramStatus::Open)]
    #[case(ProgramStatus::Done, 1, 10, ProgramStatus::Done)]
    fn headcount_closes_full_programs(#[case] current: ProgramStatus, #[case] headcount: i32, #[case] max: i32, #[case] expected: ProgramStatus) {
        assert_eq!(current.on_headcount(headcount, max), expected);
    }

    #[rstest]
    #[case(200, 100, ProgramStatus::Open)]
    #[case(100, 100, ProgramStatus::Closed)]
    #[case(50, 100, ProgramStatus::Closed)]
    fn due_date_derives_status(#[case] due: i64, #[case] now: i64, #[case] expected: ProgramStatus) {
        assert_eq!(ProgramStatus::for_due_date(due, now), expected);
    }

    #[test]
    fn wire_names_are_screaming_snake_case() {
        assert_eq!(ProgramType::LetsChat.as_ref(), "LETS_CHAT");
        assert_eq!(serde_json::to_string(&ProgramType::ChallengeHalf).unwrap(), "\"CHALLENGE_HALF\"");
    }
}
