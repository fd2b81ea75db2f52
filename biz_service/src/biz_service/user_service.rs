use crate::dto::user_dto::{SignInResponse, UserInfoResponse, UserSearchParams, UserSignInRequest, UserSignUpRequest, UserUpdateRequest};
use crate::dto::IdResponse;
use crate::entitys::user_entity::UserRole;
use crate::manager::session_manager::{Principal, SessionManager};
use crate::manager::user_manager::UserManager;
use crate::mapper::user_mapper;
use common::config::AuthConfig;
use common::errors::AppError;
use common::query_builder::{PageRequest, PageResult};
use log::info;
use std::sync::Arc;

pub struct UserService {
    users: Arc<UserManager>,
    sessions: Arc<SessionManager>,
}

impl UserService {
    pub fn new(users: Arc<UserManager>, sessions: Arc<SessionManager>) -> Self {
        Self { users, sessions }
    }

    pub async fn sign_up(&self, req: &UserSignUpRequest) -> Result<IdResponse, AppError> {
        Ok(self.users.sign_up(req).await?.id.into())
    }

    pub async fn sign_in(&self, req: &UserSignInRequest) -> Result<SignInResponse, AppError> {
        let user = self.users.sign_in(&req.email, &req.password).await?;
        let access_token = self.sessions.open(Principal { user_id: user.id, role: user.role });
        info!("user {} signed in", user.id);
        Ok(SignInResponse { access_token, user_id: user.id, role: user.role })
    }

    pub fn sign_out(&self, token: &str) {
        self.sessions.close(token);
    }

    /// Principal behind a bearer token, if the session is alive.
    pub fn authenticate(&self, token: &str) -> Option<Principal> {
        self.sessions.resolve(token)
    }

    pub async fn my_info(&self, principal: Principal) -> Result<UserInfoResponse, AppError> {
        Ok(user_mapper::to_info_response(self.users.find_user(principal.user_id).await?))
    }

    pub async fn update_my_info(&self, principal: Principal, req: &UserUpdateRequest) -> Result<IdResponse, AppError> {
        Ok(self.users.update_user(principal.user_id, req).await?.into())
    }

    pub async fn admin_list(&self, page: &PageRequest) -> Result<PageResult<UserInfoResponse>, AppError> {
        Ok(self.users.list(page).await?.map(user_mapper::to_info_response))
    }

    pub async fn admin_search(&self, params: &UserSearchParams) -> Result<Vec<UserInfoResponse>, AppError> {
        let users = self.users.search(params.search_type, &params.keyword).await?;
        Ok(users.into_iter().map(user_mapper::to_info_response).collect())
    }

    /// Existing sessions keep their role until the user signs in again.
    pub async fn change_role(&self, user_id: i64, role: UserRole) -> Result<IdResponse, AppError> {
        Ok(self.users.change_role(user_id, role).await?.into())
    }

    pub async fn bootstrap_admin(&self, auth: &AuthConfig) -> Result<(), AppError> {
        if let Some(admin_id) = self.users.ensure_admin(auth).await? {
            info!("admin account ready: {}", admin_id);
        }
        Ok(())
    }
}
