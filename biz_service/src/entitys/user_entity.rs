use mongo_macro::MongoIndexModelProvider as MongoDeriveMongoIndex;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, ToSchema, AsRefStr, Display, EnumString)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    #[default]
    Member,
    Admin,
}

/// Bank of a refund/charge account.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema, AsRefStr, Display, EnumString)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountType {
    Kb,
    Shinhan,
    Woori,
    Hana,
    Nh,
    Ibk,
    Kakao,
    Toss,
    Sc,
    Etc,
}

/// Platform account. Users are never hard-deleted.
#[derive(Debug, Clone, Serialize, Deserialize, MongoDeriveMongoIndex)]
#[mongo_index(fields("email"), unique, name = "uk_user_email")]
#[mongo_index(fields("phone_num"), unique, name = "uk_user_phone_num")]
pub struct UserEntity {
    #[serde(rename = "_id")]
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone_num: String,
    /// argon2 PHC string
    pub password: String,
    pub role: UserRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub university: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub major: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_type: Option<AccountType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_number: Option<String>,
    pub create_time: i64,
    pub update_time: i64,
}

impl UserEntity {
    pub fn has_detail_info(&self) -> bool {
        self.university.is_some() && self.major.is_some()
    }

    pub fn has_account_info(&self) -> bool {
        self.account_type.is_some() && self.account_number.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}
