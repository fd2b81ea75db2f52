use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use log::error;
use mongodb::bson;
use mongodb::error::Error as MongoError;
use serde::Serialize;
use std::io;
use thiserror::Error;

/// HTTP error body
#[derive(Serialize)]
struct ErrorResponse {
    status: u16,
    code: String,
    message: String,
}

/// Application error type
#[derive(Debug, Error)]
pub enum AppError {
    // ==== business errors, `code` is stable across releases ====
    #[error("{reason}")]
    NotFound { code: &'static str, reason: String },

    #[error("{reason}")]
    BadRequest { code: &'static str, reason: String },

    #[error("{reason}")]
    Conflict { code: &'static str, reason: String },

    #[error("{reason}")]
    Forbidden { code: &'static str, reason: String },

    #[error("Bad request: {0}")]
    Validation(String),

    #[error("Unauthorized access: {0}")]
    Unauthorized(String),

    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    #[error("External API call failed: {0}")]
    ExternalApi(String),

    #[error("File storage failed: {0}")]
    FileStorage(String),

    // ==== system errors ====
    #[error("MongoDB error: {0}")]
    Mongo(#[from] MongoError),
    #[error("BSON encode error: {0}")]
    BsonSer(#[from] bson::ser::Error),
    #[error("BSON decode error: {0}")]
    BsonDe(#[from] bson::de::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<anyhow::Error> for AppError {
    fn from(e: anyhow::Error) -> Self {
        AppError::Internal(e.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        AppError::Validation(e.to_string())
    }
}

impl AppError {
    pub fn code(&self) -> &str {
        match self {
            AppError::NotFound { code, .. }
            | AppError::BadRequest { code, .. }
            | AppError::Conflict { code, .. }
            | AppError::Forbidden { code, .. } => code,
            AppError::Validation(_) => "COMMON_400_1",
            AppError::Unauthorized(_) => "COMMON_401_1",
            AppError::DuplicateKey(_) => "COMMON_409_1",
            AppError::ExternalApi(_) | AppError::FileStorage(_) => "COMMON_502_1",
            _ => "COMMON_500_1",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::BadRequest { .. } | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict { .. } | AppError::DuplicateKey(_) => StatusCode::CONFLICT,
            AppError::Forbidden { .. } => StatusCode::FORBIDDEN,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::ExternalApi(_) | AppError::FileStorage(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::NotFound { .. })
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status();
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!("{:?}", self);
            "Service error".to_string()
        } else {
            self.to_string()
        };
        HttpResponse::build(status).json(ErrorResponse { status: status.as_u16(), code: self.code().to_string(), message })
    }
}

/// MongoDB reports unique index violations as write error 11000.
pub fn is_duplicate_key(err: &MongoError) -> bool {
    use mongodb::error::{ErrorKind, WriteFailure};
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => write_error.code == 11000,
        ErrorKind::Command(command_error) => command_error.code == 11000,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn business_errors_keep_their_code_and_status() {
        let err = AppError::Conflict { code: "APPLICATION_409_1", reason: "already applied".to_string() };
        assert_eq!(err.code(), "APPLICATION_409_1");
        assert_eq!(err.status(), StatusCode::CONFLICT);
        assert_eq!(err.to_string(), "already applied");
    }

    #[test]
    fn system_errors_render_as_internal() {
        let err = AppError::Internal("lock poisoned".to_string());
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.code(), "COMMON_500_1");
    }
}
