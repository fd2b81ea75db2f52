use mongo_macro::MongoIndexModelProvider as MongoDeriveMongoIndex;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, ToSchema, AsRefStr, Display, EnumString)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationStatus {
    #[default]
    Applied,
    AppliedNotApproved,
    InProgress,
    Done,
}

/// Admin decision on an application. `Undecided` until an admin acts.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, ToSchema, AsRefStr, Display, EnumString)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ApprovalState {
    #[default]
    Undecided,
    Approved,
    Rejected,
}

impl From<bool> for ApprovalState {
    fn from(is_approved: bool) -> Self {
        if is_approved { ApprovalState::Approved } else { ApprovalState::Rejected }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApprovalEvent {
    Decided(bool),
    /// Bulk rejection of everyone still waiting.
    RemainingRejected,
}

impl ApplicationStatus {
    /// Only a pending (`Applied`) application moves on an approval event.
    pub fn on_event(self, event: ApprovalEvent) -> Self {
        match (self, event) {
            (ApplicationStatus::Applied, ApprovalEvent::Decided(true)) => ApplicationStatus::InProgress,
            (ApplicationStatus::Applied, ApprovalEvent::Decided(false) | ApprovalEvent::RemainingRejected) => ApplicationStatus::AppliedNotApproved,
            (current, _) => current,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema, AsRefStr, Display, EnumString)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationGrade {
    First,
    Second,
    Third,
    Fourth,
    Graduate,
    Etc,
}

/// One submission to a program, from a member (`user_id`) or a guest (`guest_*`).
///
/// The partial unique indexes keep one application per member and per guest
/// email in a program; rows only enter an index when they carry its key.
#[derive(Debug, Clone, Serialize, Deserialize, MongoDeriveMongoIndex)]
#[mongo_index(fields("program_id", "user_id"), unique, name = "uk_application_program_user", partial = "user_id")]
#[mongo_index(fields("program_id", "guest_email"), unique, name = "uk_application_program_guest_email", partial = "guest_email")]
#[mongo_index(fields("user_id"))]
pub struct ApplicationEntity {
    #[serde(rename = "_id")]
    pub id: i64,
    pub program_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guest_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guest_phone_num: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guest_email: Option<String>,
    pub status: ApplicationStatus,
    pub approval: ApprovalState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<ApplicationGrade>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wish_company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wish_job: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apply_motive: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub introduction: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attendance: Option<bool>,
    pub create_time: i64,
}

impl ApplicationEntity {
    pub fn is_guest(&self) -> bool {
        self.user_id.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use ApplicationStatus::*;

    #[rstest]
    #[case(Applied, ApprovalEvent::Decided(true), InProgress)]
    #[case(Applied, ApprovalEvent::Decided(false), AppliedNotApproved)]
    #[case(Applied, ApprovalEvent::RemainingRejected, AppliedNotApproved)]
    #[case(InProgress, ApprovalEvent::Decided(false), InProgress)]
    #[case(AppliedNotApproved, ApprovalEvent::Decided(true), AppliedNotApproved)]
    #[case(Done, ApprovalEvent::Decided(true), Done)]
    #[case(Done, ApprovalEvent::RemainingRejected, Done)]
    fn approval_transitions(#[case] current: ApplicationStatus, #[case] event: ApprovalEvent, #[case] expected: ApplicationStatus) {
        assert_eq!(current.on_event(event), expected);
    }

    #[test]
    fn approval_state_from_decision() {
        assert_eq!(ApprovalState::from(true), ApprovalState::Approved);
        assert_eq!(ApprovalState::from(false), ApprovalState::Rejected);
        assert_eq!(ApprovalState::default(), ApprovalState::Undecided);
    }
}
