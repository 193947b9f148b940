use axum::{
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;
use validator::ValidationErrors;

use crate::dto::api_dto::FieldError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(sqlx::Error),

    #[error("Migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Flattens validator output into a stable list: named fields in
/// alphabetical order, struct-level checks last.
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut fields: Vec<_> = errors
        .field_errors()
        .into_iter()
        .map(|(name, errs)| (name.to_string(), errs))
        .collect();
    fields.sort_by(|(a, _), (b, _)| (a == "__all__", a).cmp(&(b == "__all__", b)));

    fields
        .into_iter()
        .flat_map(|(name, errs)| {
            errs.iter().map(move |err| FieldError {
                field: (name != "__all__").then(|| name.clone()),
                message: Some(
                    err.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{} is invalid", name)),
                ),
            })
        })
        .collect()
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        if let Error::Validation(errs) = &self {
            let errors = field_errors(errs);
            let message = errors
                .first()
                .and_then(|e| e.message.clone())
                .unwrap_or_else(|| "Validation failed".to_string());
            let body = Json(json!({ "success": false, "error": message, "errors": errors }));
            return (StatusCode::BAD_REQUEST, body).into_response();
        }

        let (status, error_message) = match self {
            Error::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Error::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            Error::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Error::Json(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            Error::Database(err) => {
                tracing::error!(error = ?err, "Database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "A database error occurred".to_string(),
                )
            }
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An unexpected error occurred".to_string(),
            ),
        };

        let body = Json(json!({ "success": false, "error": error_message }));
        (status, body).into_response()
    }
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => Error::NotFound("Job not found".to_string()),
            sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
                Error::BadRequest(format!("Referenced record does not exist: {}", db.message()))
            }
            sqlx::Error::Database(db) if db.is_check_violation() => {
                Error::BadRequest(format!("Invalid job data: {}", db.message()))
            }
            other => Error::Database(other),
        }
    }
}
