use crate::auth::{AdminPrincipal, LoginUser};
use crate::result::{result_created, result_data, ApiResponse};
use crate::AppState;
use actix_web::{delete, get, patch, post, web, Responder};
use biz_service::dto::coupon_dto::{CouponApplyResponse, CouponCreateRequest, CouponResponse, CouponUpdateRequest};
use biz_service::dto::{IdResponse, PageQuery};
use biz_service::manager::coupon_manager::COUPON_PAGE_SIZE;
use common::errors::AppError;
use validator::Validate;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(coupon_admin_list)
        .service(coupon_admin_get)
        .service(coupon_apply)
        .service(coupon_create)
        .service(coupon_update)
        .service(coupon_delete);
}

#[utoipa::path(post, path = "/coupon", tag = "coupon", request_body = CouponCreateRequest, responses((status = 201, body = ApiResponse<IdResponse>)))]
#[post("/coupon")]
pub async fn coupon_create(state: AppState, _admin: AdminPrincipal, dto: web::Json<CouponCreateRequest>) -> Result<impl Responder, AppError> {
    dto.validate()?;
    Ok(result_created(state.coupon.create(&dto).await?))
}

#[utoipa::path(patch, path = "/coupon/{id}", tag = "coupon", request_body = CouponUpdateRequest, responses((status = 200, body = ApiResponse<IdResponse>)))]
#[patch("/coupon/{id}")]
pub async fn coupon_update(
    state: AppState,
    _admin: AdminPrincipal,
    id: web::Path<i64>,
    dto: web::Json<CouponUpdateRequest>,
) -> Result<impl Responder, AppError> {
    dto.validate()?;
    Ok(result_data(state.coupon.update(id.into_inner(), &dto).await?))
}

#[utoipa::path(delete, path = "/coupon/{id}", tag = "coupon", responses((status = 200, body = ApiResponse<IdResponse>)))]
#[delete("/coupon/{id}")]
pub async fn coupon_delete(state: AppState, _admin: AdminPrincipal, id: web::Path<i64>) -> Result<impl Responder, AppError> {
    Ok(result_data(state.coupon.delete(id.into_inner()).await?))
}

#[utoipa::path(get, path = "/coupon/admin", tag = "coupon", params(PageQuery), responses((status = 200)))]
#[get("/coupon/admin")]
pub async fn coupon_admin_list(state: AppState, _admin: AdminPrincipal, page: web::Query<PageQuery>) -> Result<impl Responder, AppError> {
    Ok(result_data(state.coupon.list(&page.to_page_with(COUPON_PAGE_SIZE)).await?))
}

#[utoipa::path(get, path = "/coupon/admin/{id}", tag = "coupon", responses((status = 200, body = ApiResponse<CouponResponse>)))]
#[get("/coupon/admin/{id}")]
pub async fn coupon_admin_get(state: AppState, _admin: AdminPrincipal, id: web::Path<i64>) -> Result<impl Responder, AppError> {
    Ok(result_data(state.coupon.get_one(id.into_inner()).await?))
}

/// Checks a code at checkout and returns its discount.
#[utoipa::path(
    get,
    path = "/coupon/{code}",
    tag = "coupon",
    responses((status = 200, body = ApiResponse<CouponApplyResponse>), (status = 400, description = "outside the validity window"))
)]
#[get("/coupon/{code}")]
pub async fn coupon_apply(state: AppState, _user: LoginUser, code: web::Path<String>) -> Result<impl Responder, AppError> {
    Ok(result_data(state.coupon.apply(&code).await?))
}
