use crate::dto::user_dto::{UserInfoResponse, UserSignUpRequest};
use crate::entitys::user_entity::{UserEntity, UserRole};
use common::util::date_util::time_to_str;

pub fn to_entity(id: i64, req: &UserSignUpRequest, password_hash: String, role: UserRole, now: i64) -> UserEntity {
    UserEntity {
        id,
        name: req.name.trim().to_string(),
        email: req.email.trim().to_lowercase(),
        phone_num: req.phone_num.trim().to_string(),
        password: password_hash,
        role,
        university: None,
        major: None,
        account_type: None,
        account_number: None,
        create_time: now,
        update_time: now,
    }
}

pub fn to_info_response(user: UserEntity) -> UserInfoResponse {
    UserInfoResponse {
        id: user.id,
        name: user.name,
        email: user.email,
        phone_num: user.phone_num,
        role: user.role,
        university: user.university,
        major: user.major,
        account_type: user.account_type,
        account_number: user.account_number,
        create_time: time_to_str(user.create_time),
    }
}
