use crate::auth::{bearer_token, AdminPrincipal, LoginUser};
use crate::result::{result, result_created, result_data, ApiResponse};
use crate::AppState;
use actix_web::{get, patch, post, web, HttpRequest, Responder};
use biz_service::dto::user_dto::{
    SignInResponse, UserInfoResponse, UserRoleUpdateRequest, UserSearchParams, UserSignInRequest, UserSignUpRequest, UserUpdateRequest,
};
use biz_service::dto::{IdResponse, PageQuery};
use common::errors::AppError;
use validator::Validate;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(user_sign_up)
        .service(user_sign_in)
        .service(user_sign_out)
        .service(user_admin_search)
        .service(user_admin_list)
        .service(user_change_role)
        .service(user_info)
        .service(user_update);
}

#[utoipa::path(
    post,
    path = "/user/signup",
    tag = "user",
    request_body = UserSignUpRequest,
    responses((status = 201, body = ApiResponse<IdResponse>), (status = 409, description = "email or phone already used"))
)]
#[post("/user/signup")]
pub async fn user_sign_up(state: AppState, dto: web::Json<UserSignUpRequest>) -> Result<impl Responder, AppError> {
    dto.validate()?;
    Ok(result_created(state.user.sign_up(&dto).await?))
}

#[utoipa::path(
    post,
    path = "/user/signin",
    tag = "user",
    request_body = UserSignInRequest,
    responses((status = 200, body = ApiResponse<SignInResponse>))
)]
#[post("/user/signin")]
pub async fn user_sign_in(state: AppState, dto: web::Json<UserSignInRequest>) -> Result<impl Responder, AppError> {
    dto.validate()?;
    Ok(result_data(state.user.sign_in(&dto).await?))
}

#[utoipa::path(get, path = "/user/signout", tag = "user", responses((status = 200)))]
#[get("/user/signout")]
pub async fn user_sign_out(state: AppState, req: HttpRequest) -> Result<impl Responder, AppError> {
    if let Some(token) = bearer_token(&req) {
        state.user.sign_out(&token);
    }
    Ok(result())
}

#[utoipa::path(get, path = "/user", tag = "user", responses((status = 200, body = ApiResponse<UserInfoResponse>)))]
#[get("/user")]
pub async fn user_info(state: AppState, user: LoginUser) -> Result<impl Responder, AppError> {
    Ok(result_data(state.user.my_info(user.0).await?))
}

#[utoipa::path(
    patch,
    path = "/user",
    tag = "user",
    request_body = UserUpdateRequest,
    responses((status = 200, body = ApiResponse<IdResponse>))
)]
#[patch("/user")]
pub async fn user_update(state: AppState, user: LoginUser, dto: web::Json<UserUpdateRequest>) -> Result<impl Responder, AppError> {
    dto.validate()?;
    Ok(result_data(state.user.update_my_info(user.0, &dto).await?))
}

#[utoipa::path(get, path = "/user/admin", tag = "user", params(PageQuery), responses((status = 200)))]
#[get("/user/admin")]
pub async fn user_admin_list(state: AppState, _admin: AdminPrincipal, page: web::Query<PageQuery>) -> Result<impl Responder, AppError> {
    Ok(result_data(state.user.admin_list(&page.to_page()).await?))
}

#[utoipa::path(get, path = "/user/admin/search", tag = "user", params(UserSearchParams), responses((status = 200)))]
#[get("/user/admin/search")]
pub async fn user_admin_search(state: AppState, _admin: AdminPrincipal, params: web::Query<UserSearchParams>) -> Result<impl Responder, AppError> {
    Ok(result_data(state.user.admin_search(&params).await?))
}

#[utoipa::path(
    patch,
    path = "/user/admin/{id}/role",
    tag = "user",
    request_body = UserRoleUpdateRequest,
    responses((status = 200, body = ApiResponse<IdResponse>))
)]
#[patch("/user/admin/{id}/role")]
pub async fn user_change_role(
    state: AppState,
    _admin: AdminPrincipal,
    id: web::Path<i64>,
    dto: web::Json<UserRoleUpdateRequest>,
) -> Result<impl Responder, AppError> {
    Ok(result_data(state.user.change_role(id.into_inner(), dto.role).await?))
}
