// error.rs
use rocket::http::Status;
use rocket::request::Request;
use rocket::response::{self, status::Custom, Responder};
use rocket::serde::json::Json;
use serde_json::json;

use crate::validation::ValidationErrors;

/// Failures of the file-backed collections.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed records in {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("timestamp {0} ms cannot be represented as a date")]
    InvalidTimestamp(f64),
    #[error("write to {0} rejected")]
    WriteRejected(String),
}

/// Errors surfaced to HTTP callers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),
    #[error("request validation failed")]
    Validation(ValidationErrors),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError::Validation(errors)
    }
}

impl ApiError {
    pub fn status(&self) -> Status {
        match self {
            ApiError::NotFound(_) => Status::NotFound,
            ApiError::Validation(_) => Status::UnprocessableEntity,
            ApiError::Store(_) => Status::InternalServerError,
        }
    }
}

impl<'r> Responder<'r, 'static> for ApiError {
    fn respond_to(self, req: &'r Request<'_>) -> response::Result<'static> {
        let status = self.status();
        let body = match &self {
            ApiError::NotFound(message) => json!({ "detail": message }),
            ApiError::Validation(errors) => json!({ "detail": errors.details() }),
            ApiError::Store(e) => {
                log::error!("{} {} failed: {}", req.method(), req.uri().path(), e);
                json!({ "detail": "Internal Server Error" })
            }
        };
        Custom(status, Json(body)).respond_to(req)
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
