use crate::auth::{AdminPrincipal, LoginUser};
use crate::result::{result_created, result_data, ApiResponse};
use crate::AppState;
use actix_web::{get, patch, post, web, Responder};
use biz_service::dto::review_dto::{ReviewCreateRequest, ReviewVisibilityRequest};
use biz_service::dto::{IdResponse, PageQuery};
use common::errors::AppError;
use validator::Validate;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(review_admin_list).service(review_create).service(review_visibility);
}

#[utoipa::path(post, path = "/review/{program_id}", tag = "review", request_body = ReviewCreateRequest, responses((status = 201, body = ApiResponse<IdResponse>)))]
#[post("/review/{program_id}")]
pub async fn review_create(
    state: AppState,
    user: LoginUser,
    program_id: web::Path<i64>,
    dto: web::Json<ReviewCreateRequest>,
) -> Result<impl Responder, AppError> {
    dto.validate()?;
    Ok(result_created(state.review.create(program_id.into_inner(), user.0, &dto).await?))
}

#[utoipa::path(patch, path = "/review/{id}/visibility", tag = "review", request_body = ReviewVisibilityRequest, responses((status = 200, body = ApiResponse<IdResponse>)))]
#[patch("/review/{id}/visibility")]
pub async fn review_visibility(
    state: AppState,
    _admin: AdminPrincipal,
    id: web::Path<i64>,
    dto: web::Json<ReviewVisibilityRequest>,
) -> Result<impl Responder, AppError> {
    Ok(result_data(state.review.set_visible(id.into_inner(), dto.is_visible).await?))
}

#[utoipa::path(get, path = "/review/admin/{program_id}", tag = "review", params(PageQuery), responses((status = 200)))]
#[get("/review/admin/{program_id}")]
pub async fn review_admin_list(
    state: AppState,
    _admin: AdminPrincipal,
    program_id: web::Path<i64>,
    page: web::Query<PageQuery>,
) -> Result<impl Responder, AppError> {
    Ok(result_data(state.review.admin_list(program_id.into_inner(), &page.to_page()).await?))
}
