use actix_web::HttpResponse;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use utoipa::ToSchema;

/// Success envelope: `{code, message, data}`. Errors render through `AppError`.
#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
pub struct ApiResponse<T> {
    pub code: i32,
    pub message: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self { code: 200, message: "success".to_string(), data: Some(data) }
    }
}

impl ApiResponse<()> {
    pub fn empty() -> Self {
        Self { code: 200, message: "success".to_string(), data: None }
    }
}

pub fn result_data<T: Serialize + Debug>(data: T) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::ok(data))
}

pub fn result() -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::empty())
}

pub fn result_created<T: Serialize + Debug>(data: T) -> HttpResponse {
    HttpResponse::Created().json(ApiResponse::ok(data))
}
