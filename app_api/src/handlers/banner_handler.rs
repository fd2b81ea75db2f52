use crate::auth::AdminPrincipal;
use crate::result::{result_created, result_data, ApiResponse};
use crate::AppState;
use actix_web::{delete, get, patch, post, web, Responder};
use biz_service::dto::banner_dto::{BannerCreateRequest, BannerResponse, BannerTypeQuery, BannerUpdateRequest};
use biz_service::dto::{IdResponse, PageQuery};
use common::errors::AppError;
use validator::Validate;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(banner_admin_list)
        .service(banner_admin_get)
        .service(banner_shown_now)
        .service(banner_create)
        .service(banner_update)
        .service(banner_delete);
}

#[utoipa::path(post, path = "/banner", tag = "banner", request_body = BannerCreateRequest, responses((status = 201, body = ApiResponse<IdResponse>)))]
#[post("/banner")]
pub async fn banner_create(state: AppState, _admin: AdminPrincipal, dto: web::Json<BannerCreateRequest>) -> Result<impl Responder, AppError> {
    dto.validate()?;
    Ok(result_created(state.banner.create(&dto).await?))
}

#[utoipa::path(patch, path = "/banner/{id}", tag = "banner", request_body = BannerUpdateRequest, responses((status = 200, body = ApiResponse<IdResponse>)))]
#[patch("/banner/{id}")]
pub async fn banner_update(
    state: AppState,
    _admin: AdminPrincipal,
    id: web::Path<i64>,
    dto: web::Json<BannerUpdateRequest>,
) -> Result<impl Responder, AppError> {
    dto.validate()?;
    Ok(result_data(state.banner.update(id.into_inner(), &dto).await?))
}

/// Also removes the stored image.
#[utoipa::path(delete, path = "/banner/{id}", tag = "banner", responses((status = 200, body = ApiResponse<IdResponse>)))]
#[delete("/banner/{id}")]
pub async fn banner_delete(state: AppState, _admin: AdminPrincipal, id: web::Path<i64>) -> Result<impl Responder, AppError> {
    Ok(result_data(state.banner.delete(id.into_inner()).await?))
}

#[utoipa::path(get, path = "/banner/admin", tag = "banner", params(BannerTypeQuery, PageQuery), responses((status = 200)))]
#[get("/banner/admin")]
pub async fn banner_admin_list(
    state: AppState,
    _admin: AdminPrincipal,
    query: web::Query<BannerTypeQuery>,
    page: web::Query<PageQuery>,
) -> Result<impl Responder, AppError> {
    Ok(result_data(state.banner.admin_list(query.banner_type, &page.to_page()).await?))
}

#[utoipa::path(get, path = "/banner/admin/{id}", tag = "banner", responses((status = 200, body = ApiResponse<BannerResponse>)))]
#[get("/banner/admin/{id}")]
pub async fn banner_admin_get(state: AppState, _admin: AdminPrincipal, id: web::Path<i64>) -> Result<impl Responder, AppError> {
    Ok(result_data(state.banner.get_one(id.into_inner()).await?))
}

#[utoipa::path(get, path = "/banner", tag = "banner", params(BannerTypeQuery), responses((status = 200, body = ApiResponse<Vec<BannerResponse>>)))]
#[get("/banner")]
pub async fn banner_shown_now(state: AppState, query: web::Query<BannerTypeQuery>) -> Result<impl Responder, AppError> {
    Ok(result_data(state.banner.shown_now(query.banner_type).await?))
}
