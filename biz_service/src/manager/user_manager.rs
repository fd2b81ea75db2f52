use crate::dto::application_dto::ApplicationCreateRequest;
use crate::dto::user_dto::{UserSearchQuery, UserSearchType, UserSignUpRequest, UserUpdateRequest};
use crate::entitys::user_entity::{UserEntity, UserRole};
use crate::error_code::{on_duplicate, ErrorCode};
use crate::mapper::user_mapper;
use crate::repos::Repos;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use common::config::AuthConfig;
use common::errors::AppError;
use common::query_builder::{newest_first, PageRequest, PageResult, QueryBuilder};
use common::util::common_utils::build_snow_id;
use common::util::date_util::now;
use log::{info, warn};
use mongodb::bson::doc;
use rand::RngCore;
use std::collections::HashMap;

// === password hashing ===

pub fn hash_password(raw: &str) -> Result<String, AppError> {
    let mut salt_bytes = [0u8; 16];
    rand::rng().fill_bytes(&mut salt_bytes);
    let salt = SaltString::encode_b64(&salt_bytes).map_err(|e| AppError::Internal(format!("salt encoding failed: {}", e)))?;
    let hash = Argon2::default()
        .hash_password(raw.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(format!("password hashing failed: {}", e)))?;
    Ok(hash.to_string())
}

pub fn verify_password(raw: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default().verify_password(raw.as_bytes(), &parsed).is_ok(),
        Err(_) => false,
    }
}

// === user rules ===

pub struct UserManager {
    repos: Repos,
}

impl UserManager {
    pub fn new(repos: Repos) -> Self {
        Self { repos }
    }

    pub async fn find_user(&self, user_id: i64) -> Result<UserEntity, AppError> {
        self.repos.user.find_by_id(user_id).await?.ok_or_else(|| ErrorCode::UserNotFound.into())
    }

    pub async fn find_by_ids(&self, ids: Vec<i64>) -> Result<HashMap<i64, UserEntity>, AppError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let users = self.repos.user.find_all(QueryBuilder::new().in_array("_id", ids).build(), None).await?;
        Ok(users.into_iter().map(|u| (u.id, u)).collect())
    }

    pub async fn sign_up(&self, req: &UserSignUpRequest) -> Result<UserEntity, AppError> {
        self.create_user(req, UserRole::Member).await
    }

    async fn create_user(&self, req: &UserSignUpRequest, role: UserRole) -> Result<UserEntity, AppError> {
        let email = req.email.trim().to_lowercase();
        let phone_num = req.phone_num.trim().to_string();
        let existing = self.repos.user.count(QueryBuilder::new().eq("email", email).or().eq("phone_num", phone_num).build()).await?;
        if existing > 0 {
            warn!("sign up rejected, duplicate email or phone");
            return Err(ErrorCode::DuplicateUser.into());
        }

        let user = user_mapper::to_entity(build_snow_id(), req, hash_password(&req.password)?, role, now());
        self.repos.user.insert(&user).await.map_err(on_duplicate(ErrorCode::DuplicateUser))?;
        info!("user {} signed up as {}", user.id, user.role);
        Ok(user)
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<UserEntity, AppError> {
        let user = self
            .repos
            .user
            .find_one(doc! { "email": email.trim().to_lowercase() })
            .await?
            .ok_or(AppError::from(ErrorCode::UserNotFound))?;
        if !verify_password(password, &user.password) {
            warn!("sign in rejected for user {}, password mismatch", user.id);
            return Err(ErrorCode::MismatchPassword.into());
        }
        Ok(user)
    }

    /// Partial update of the caller's own profile.
    pub async fn update_user(&self, user_id: i64, req: &UserUpdateRequest) -> Result<i64, AppError> {
        let mut user = self.find_user(user_id).await?;

        if let Some(email) = &req.email {
            let email = email.trim().to_lowercase();
            if email != user.email && self.repos.user.count(doc! { "email": &email }).await? > 0 {
                return Err(ErrorCode::DuplicateUser.into());
            }
            user.email = email;
        }
        if let Some(phone_num) = &req.phone_num {
            let phone_num = phone_num.trim().to_string();
            if phone_num != user.phone_num && self.repos.user.count(doc! { "phone_num": &phone_num }).await? > 0 {
                return Err(ErrorCode::DuplicateUser.into());
            }
            user.phone_num = phone_num;
        }
        common::merge_fields!(user, req; name);
        common::merge_opt_fields!(user, req; university, major, account_type, account_number);
        user.update_time = now();

        self.repos.user.save(user.id, &user).await.map_err(on_duplicate(ErrorCode::DuplicateUser))?;
        Ok(user.id)
    }

    /// Fills missing profile data from an application before a member applies.
    pub async fn complete_profile(&self, user_id: i64, req: &ApplicationCreateRequest) -> Result<UserEntity, AppError> {
        let mut user = self.find_user(user_id).await?;
        let mut changed = false;

        if !user.has_detail_info() {
            let (Some(university), Some(major)) = (&req.university, &req.major) else {
                return Err(ErrorCode::ApplicationUserBadRequest.into());
            };
            user.university = Some(university.clone());
            user.major = Some(major.clone());
            changed = true;
        }
        if !user.has_account_info() {
            let (Some(account_type), Some(account_number)) = (req.account_type, &req.account_number) else {
                return Err(ErrorCode::ApplicationUserBadRequestAccount.into());
            };
            user.account_type = Some(account_type);
            user.account_number = Some(account_number.clone());
            changed = true;
        }

        if changed {
            user.update_time = now();
            self.repos.user.save(user.id, &user).await?;
            info!("profile of user {} completed from application", user.id);
        }
        Ok(user)
    }

    pub async fn list(&self, page: &PageRequest) -> Result<PageResult<UserEntity>, AppError> {
        self.repos.user.query_by_page(doc! {}, Some(newest_first()), page).await
    }

    pub async fn search(&self, search_type: UserSearchType, keyword: &str) -> Result<Vec<UserEntity>, AppError> {
        let filter = UserSearchQuery::new(search_type, keyword).to_query_doc()?;
        self.repos.user.find_all(filter, Some(newest_first())).await
    }

    pub async fn change_role(&self, user_id: i64, role: UserRole) -> Result<i64, AppError> {
        let modified = self
            .repos
            .user
            .update_one(doc! { "_id": user_id }, doc! { "$set": { "role": role.as_ref(), "update_time": now() } })
            .await?;
        if modified == 0 {
            self.find_user(user_id).await?;
        }
        info!("user {} role set to {}", user_id, role);
        Ok(user_id)
    }

    /// Creates the configured admin account when no user owns its email.
    pub async fn ensure_admin(&self, auth: &AuthConfig) -> Result<Option<i64>, AppError> {
        let (Some(email), Some(password)) = (&auth.admin_email, &auth.admin_password) else {
            return Ok(None);
        };
        if let Some(existing) = self.repos.user.find_one(doc! { "email": email.trim().to_lowercase() }).await? {
            return Ok(Some(existing.id));
        }
        let req = UserSignUpRequest {
            name: auth.admin_name.clone(),
            email: email.clone(),
            phone_num: auth.admin_phone.clone(),
            password: password.clone(),
        };
        let admin = self.create_user(&req, UserRole::Admin).await?;
        Ok(Some(admin.id))
    }
}
