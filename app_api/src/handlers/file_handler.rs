use crate::auth::AdminPrincipal;
use crate::result::{result, result_created, ApiResponse};
use crate::AppState;
use actix_web::{delete, put, web, Responder};
use biz_service::biz_service::file_service::FileUploadResponse;
use common::errors::AppError;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(file_upload).service(file_delete);
}

/// Raw request body is stored under `key`; the returned url is served from `/files`.
#[utoipa::path(
    put,
    path = "/file/{key}",
    tag = "file",
    request_body(content = Vec<u8>, content_type = "application/octet-stream"),
    responses((status = 201, body = ApiResponse<FileUploadResponse>))
)]
#[put("/file/{key:.*}")]
pub async fn file_upload(state: AppState, _admin: AdminPrincipal, key: web::Path<String>, body: web::Bytes) -> Result<impl Responder, AppError> {
    Ok(result_created(state.file.upload(&key, body.to_vec()).await?))
}

#[utoipa::path(delete, path = "/file/{key}", tag = "file", responses((status = 200)))]
#[delete("/file/{key:.*}")]
pub async fn file_delete(state: AppState, _admin: AdminPrincipal, key: web::Path<String>) -> Result<impl Responder, AppError> {
    state.file.delete(&key).await?;
    Ok(result())
}
