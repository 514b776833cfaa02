//! Errors surfaced by the HTTP layer.
//!
//! Every variant maps to a fixed status code and its message is the response
//! body, so `"Missing ID"` is part of the API contract rather than incidental
//! text.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

use crate::repository::RepositoryError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Missing ID")]
    MissingIdentifier,

    #[error("Monster not found")]
    MonsterNotFound,

    #[error("Battle not found")]
    BattleNotFound,

    #[error("{0}")]
    InvalidMonster(String),

    #[error("Incomplete data, check your file.")]
    InvalidCsv(#[source] csv::Error),

    #[error("No file uploaded")]
    MissingFile,

    #[error("No valid monsters found in the CSV file")]
    EmptyImport,

    #[error("invalid multipart payload: {0}")]
    Multipart(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl From<actix_multipart::MultipartError> for ApiError {
    fn from(err: actix_multipart::MultipartError) -> Self {
        ApiError::Multipart(err.to_string())
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingIdentifier
            | ApiError::InvalidMonster(_)
            | ApiError::InvalidCsv(_)
            | ApiError::MissingFile
            | ApiError::EmptyImport
            | ApiError::Multipart(_) => StatusCode::BAD_REQUEST,
            ApiError::MonsterNotFound | ApiError::BattleNotFound => StatusCode::NOT_FOUND,
            ApiError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
            ApiError::Io(_) | ApiError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        HttpResponse::build(status).json(self.to_string())
    }
}
