use crate::AppState;
use actix_web::dev::Payload;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest};
use biz_service::error_code::ErrorCode;
use biz_service::manager::session_manager::Principal;
use common::errors::AppError;
use futures::future::{ready, Ready};

/// Token of `Authorization: Bearer <token>`.
pub fn bearer_token(req: &HttpRequest) -> Option<String> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    (!token.is_empty()).then(|| token.to_string())
}

fn resolve(req: &HttpRequest) -> Result<Option<Principal>, AppError> {
    let state = req.app_data::<AppState>().ok_or_else(|| AppError::Internal("service state not registered".to_string()))?;
    Ok(bearer_token(req).and_then(|token| state.user.authenticate(&token)))
}

/// Signed-in caller; 401 without a live session.
#[derive(Debug, Clone, Copy)]
pub struct LoginUser(pub Principal);

impl FromRequest for LoginUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(resolve(req).and_then(|p| p.map(LoginUser).ok_or_else(|| AppError::Unauthorized("sign in required".to_string()))))
    }
}

/// Caller if signed in; requests without a token pass through as `None`.
/// A token that resolves to no session is 401, never a guest.
#[derive(Debug, Clone, Copy)]
pub struct MaybeUser(pub Option<Principal>);

impl FromRequest for MaybeUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let caller = resolve(req).and_then(|p| match p {
            None if bearer_token(req).is_some() => Err(AppError::Unauthorized("session expired or unknown".to_string())),
            p => Ok(MaybeUser(p)),
        });
        ready(caller)
    }
}

/// Signed-in caller with the ADMIN role.
#[derive(Debug, Clone, Copy)]
pub struct AdminPrincipal(pub Principal);

impl FromRequest for AdminPrincipal {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let admin = resolve(req).and_then(|p| match p {
            Some(p) if p.is_admin() => Ok(AdminPrincipal(p)),
            Some(_) => Err(ErrorCode::AdminRequired.into()),
            None => Err(AppError::Unauthorized("sign in required".to_string())),
        });
        ready(admin)
    }
}
