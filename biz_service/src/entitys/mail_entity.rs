use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema, AsRefStr, Display, EnumString)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum MailType {
    Approved,
    Remind,
    Review,
}

/// Outbox record. Delivery happens outside this service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailEntity {
    #[serde(rename = "_id")]
    pub id: i64,
    pub program_id: i64,
    pub mail_type: MailType,
    pub sender: String,
    pub recipients: Vec<String>,
    pub subject: String,
    pub contents: String,
    pub create_time: i64,
}
