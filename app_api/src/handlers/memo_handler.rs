use crate::auth::AdminPrincipal;
use crate::result::{result_created, result_data, ApiResponse};
use crate::AppState;
use actix_web::{delete, get, patch, post, web, Responder};
use biz_service::dto::memo_dto::{MemoRequest, MemoResponse};
use biz_service::dto::IdResponse;
use common::errors::AppError;
use validator::Validate;

// admin notes about a user
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(memo_create).service(memo_list).service(memo_update).service(memo_delete);
}

#[utoipa::path(post, path = "/memo/{user_id}", tag = "memo", request_body = MemoRequest, responses((status = 201, body = ApiResponse<IdResponse>)))]
#[post("/memo/{user_id}")]
pub async fn memo_create(state: AppState, _admin: AdminPrincipal, user_id: web::Path<i64>, dto: web::Json<MemoRequest>) -> Result<impl Responder, AppError> {
    dto.validate()?;
    Ok(result_created(state.memo.create(user_id.into_inner(), &dto).await?))
}

#[utoipa::path(get, path = "/memo/{user_id}", tag = "memo", responses((status = 200, body = ApiResponse<Vec<MemoResponse>>)))]
#[get("/memo/{user_id}")]
pub async fn memo_list(state: AppState, _admin: AdminPrincipal, user_id: web::Path<i64>) -> Result<impl Responder, AppError> {
    Ok(result_data(state.memo.list_by_user(user_id.into_inner()).await?))
}

#[utoipa::path(patch, path = "/memo/{id}", tag = "memo", request_body = MemoRequest, responses((status = 200, body = ApiResponse<IdResponse>)))]
#[patch("/memo/{id}")]
pub async fn memo_update(state: AppState, _admin: AdminPrincipal, id: web::Path<i64>, dto: web::Json<MemoRequest>) -> Result<impl Responder, AppError> {
    dto.validate()?;
    Ok(result_data(state.memo.update(id.into_inner(), &dto).await?))
}

#[utoipa::path(delete, path = "/memo/{id}", tag = "memo", responses((status = 200, body = ApiResponse<IdResponse>)))]
#[delete("/memo/{id}")]
pub async fn memo_delete(state: AppState, _admin: AdminPrincipal, id: web::Path<i64>) -> Result<impl Responder, AppError> {
    Ok(result_data(state.memo.delete(id.into_inner()).await?))
}
