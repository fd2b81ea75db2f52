use crate::auth::{AdminPrincipal, LoginUser, MaybeUser};
use crate::result::{result_created, result_data, ApiResponse};
use crate::AppState;
use actix_web::{delete, get, patch, post, web, Responder};
use biz_service::dto::application_dto::{
    ApplicationCreateRequest, ApplicationIntroductionRequest, ApplicationUpdateRequest, ApprovalQuery, ChallengeApplicationDetailResponse,
    EmailListResponse,
};
use biz_service::dto::{IdResponse, PageQuery};
use common::errors::AppError;
use validator::Validate;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(application_admin_by_user)
        .service(application_challenge_list)
        .service(application_challenge_detail)
        .service(application_email_list)
        .service(application_admin_list)
        .service(application_reject_remaining)
        .service(application_my_list)
        .service(application_submit)
        .service(application_update)
        .service(application_update_introduction)
        .service(application_delete);
}

/// Apply to a program. Signed-in members apply with their account, anyone else as a guest.
#[utoipa::path(
    post,
    path = "/application/{program_id}",
    tag = "application",
    request_body = ApplicationCreateRequest,
    responses(
        (status = 201, body = ApiResponse<IdResponse>),
        (status = 400, description = "guest or profile fields missing, program closed"),
        (status = 409, description = "already applied or program full"),
    )
)]
#[post("/application/{program_id}")]
pub async fn application_submit(
    state: AppState,
    user: MaybeUser,
    program_id: web::Path<i64>,
    dto: web::Json<ApplicationCreateRequest>,
) -> Result<impl Responder, AppError> {
    dto.validate()?;
    Ok(result_created(state.application.submit(program_id.into_inner(), &dto, user.0).await?))
}

#[utoipa::path(get, path = "/application/admin/{program_id}", tag = "application", params(ApprovalQuery, PageQuery), responses((status = 200)))]
#[get("/application/admin/{program_id}")]
pub async fn application_admin_list(
    state: AppState,
    _admin: AdminPrincipal,
    program_id: web::Path<i64>,
    query: web::Query<ApprovalQuery>,
    page: web::Query<PageQuery>,
) -> Result<impl Responder, AppError> {
    Ok(result_data(state.application.list_by_program(program_id.into_inner(), query.approval, &page.to_page()).await?))
}

/// Contact emails of approved and not approved applicants.
#[utoipa::path(get, path = "/application/admin/{program_id}/email", tag = "application", responses((status = 200, body = ApiResponse<EmailListResponse>)))]
#[get("/application/admin/{program_id}/email")]
pub async fn application_email_list(state: AppState, _admin: AdminPrincipal, program_id: web::Path<i64>) -> Result<impl Responder, AppError> {
    Ok(result_data(state.application.email_lists(program_id.into_inner()).await?))
}

/// Approved challenge participants with their mission tally.
#[utoipa::path(get, path = "/application/admin/challenge/{program_id}", tag = "application", params(PageQuery), responses((status = 200)))]
#[get("/application/admin/challenge/{program_id}")]
pub async fn application_challenge_list(
    state: AppState,
    _admin: AdminPrincipal,
    program_id: web::Path<i64>,
    page: web::Query<PageQuery>,
) -> Result<impl Responder, AppError> {
    Ok(result_data(state.application.challenge_admin_list(program_id.into_inner(), &page.to_page()).await?))
}

#[utoipa::path(
    get,
    path = "/application/admin/challenge/{program_id}/{application_id}",
    tag = "application",
    responses((status = 200, body = ApiResponse<ChallengeApplicationDetailResponse>), (status = 404, description = "no such application in the program"))
)]
#[get("/application/admin/challenge/{program_id}/{application_id}")]
pub async fn application_challenge_detail(
    state: AppState,
    _admin: AdminPrincipal,
    path: web::Path<(i64, i64)>,
) -> Result<impl Responder, AppError> {
    let (program_id, application_id) = path.into_inner();
    Ok(result_data(state.application.challenge_admin_detail(program_id, application_id).await?))
}

#[utoipa::path(get, path = "/application", tag = "application", params(PageQuery), responses((status = 200)))]
#[get("/application")]
pub async fn application_my_list(state: AppState, user: LoginUser, page: web::Query<PageQuery>) -> Result<impl Responder, AppError> {
    Ok(result_data(state.application.my_list(user.0, &page.to_page()).await?))
}

#[utoipa::path(get, path = "/application/admin/user/{user_id}", tag = "application", params(PageQuery), responses((status = 200)))]
#[get("/application/admin/user/{user_id}")]
pub async fn application_admin_by_user(
    state: AppState,
    _admin: AdminPrincipal,
    user_id: web::Path<i64>,
    page: web::Query<PageQuery>,
) -> Result<impl Responder, AppError> {
    Ok(result_data(state.application.list_for_user(user_id.into_inner(), &page.to_page()).await?))
}

#[utoipa::path(patch, path = "/application/{id}", tag = "application", request_body = ApplicationUpdateRequest, responses((status = 200, body = ApiResponse<IdResponse>)))]
#[patch("/application/{id}")]
pub async fn application_update(
    state: AppState,
    _admin: AdminPrincipal,
    id: web::Path<i64>,
    dto: web::Json<ApplicationUpdateRequest>,
) -> Result<impl Responder, AppError> {
    Ok(result_data(state.application.update(id.into_inner(), &dto).await?))
}

#[utoipa::path(
    patch,
    path = "/application/{id}/introduction",
    tag = "application",
    request_body = ApplicationIntroductionRequest,
    responses((status = 200, body = ApiResponse<IdResponse>), (status = 403, description = "not the owner"))
)]
#[patch("/application/{id}/introduction")]
pub async fn application_update_introduction(
    state: AppState,
    user: LoginUser,
    id: web::Path<i64>,
    dto: web::Json<ApplicationIntroductionRequest>,
) -> Result<impl Responder, AppError> {
    dto.validate()?;
    Ok(result_data(state.application.update_introduction(id.into_inner(), user.0, &dto).await?))
}

#[utoipa::path(
    delete,
    path = "/application/{id}",
    tag = "application",
    responses((status = 200, body = ApiResponse<IdResponse>), (status = 400, description = "program no longer open"))
)]
#[delete("/application/{id}")]
pub async fn application_delete(state: AppState, user: LoginUser, id: web::Path<i64>) -> Result<impl Responder, AppError> {
    Ok(result_data(state.application.remove(id.into_inner(), user.0).await?))
}

#[utoipa::path(patch, path = "/application/admin/{program_id}/reject-remaining", tag = "application", responses((status = 200, body = ApiResponse<u64>)))]
#[patch("/application/admin/{program_id}/reject-remaining")]
pub async fn application_reject_remaining(state: AppState, _admin: AdminPrincipal, program_id: web::Path<i64>) -> Result<impl Responder, AppError> {
    Ok(result_data(state.application.reject_remaining(program_id.into_inner()).await?))
}
