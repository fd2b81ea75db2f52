use crate::entitys::user_entity::{AccountType, UserRole};
use common::util::validate::{validate_password, validate_phone};
use mongo_macro::QueryFilter;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserSignUpRequest {
    #[validate(length(min = 1, max = 50))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(custom(function = "validate_phone"))]
    pub phone_num: String,
    #[validate(custom(function = "validate_password"))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserSignInRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignInResponse {
    pub access_token: String,
    pub user_id: i64,
    pub role: UserRole,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdateRequest {
    #[validate(length(min = 1, max = 50))]
    pub name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(custom(function = "validate_phone"))]
    pub phone_num: Option<String>,
    pub university: Option<String>,
    pub major: Option<String>,
    pub account_type: Option<AccountType>,
    pub account_number: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserInfoResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone_num: String,
    pub role: UserRole,
    pub university: Option<String>,
    pub major: Option<String>,
    pub account_type: Option<AccountType>,
    pub account_number: Option<String>,
    pub create_time: String,
}

#[derive(Debug, Clone, Copy, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum UserSearchType {
    Name,
    Email,
    PhoneNum,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UserSearchParams {
    #[serde(rename = "type")]
    pub search_type: UserSearchType,
    pub keyword: String,
}

/// Case-insensitive substring search on one user column.
#[derive(Debug, Default, Clone, Serialize, QueryFilter)]
pub struct UserSearchQuery {
    #[query(like)]
    pub name: Option<String>,
    #[query(like)]
    pub email: Option<String>,
    #[query(like)]
    pub phone_num: Option<String>,
}

impl UserSearchQuery {
    pub fn new(search_type: UserSearchType, keyword: &str) -> Self {
        let keyword = Some(keyword.trim().to_string());
        match search_type {
            UserSearchType::Name => Self { name: keyword, ..Default::default() },
            UserSearchType::Email => Self { email: keyword, ..Default::default() },
            UserSearchType::PhoneNum => Self { phone_num: keyword, ..Default::default() },
        }
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserRoleUpdateRequest {
    pub role: UserRole,
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    #[test]
    fn search_query_escapes_keyword() {
        let filter = UserSearchQuery::new(UserSearchType::Email, "a.b@").to_query_doc().unwrap();
        assert_eq!(filter, doc! { "email": { "$regex": "a\\.b@", "$options": "i" } });
    }

    #[test]
    fn sign_up_validation() {
        let req = UserSignUpRequest {
            name: "Kim".into(),
            email: "not-an-email".into(),
            phone_num: "010-1234-5678".into(),
            password: "abcd1234".into(),
        };
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
    }
}
