use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use skillswap_core::error::CoreError;
use validator::ValidationErrors;

/// Error returned by every handler.
///
/// Rendered as `{ "error": message, "code": CODE }`; DTO validation failures
/// add a `details` map keyed by field.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),
}

pub type AppResult<T> = Result<T, AppError>;

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: String,
    code: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<&'a ValidationErrors>,
}

type Parts = (StatusCode, &'static str, String);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let ((status, code, error), details) = match &self {
            AppError::Core(core) => (core_parts(core), None),
            AppError::Database(err) => (database_parts(err), None),
            AppError::Validation(errors) => (
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", first_message(errors)),
                Some(errors),
            ),
        };

        let body = ErrorBody {
            error,
            code,
            details,
        };
        (status, Json(body)).into_response()
    }
}

fn core_parts(err: &CoreError) -> Parts {
    match err {
        CoreError::NotFound { entity, id } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} with id {id} not found"),
        ),
        CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
        CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
        CoreError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone()),
        CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
        CoreError::Internal(msg) => internal(msg),
    }
}

/// Constraint names carry their kind: `uq_*` unique, `ck_*` check.
fn database_parts(err: &sqlx::Error) -> Parts {
    if matches!(err, sqlx::Error::RowNotFound) {
        return (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        );
    }
    if let sqlx::Error::Database(db_err) = err {
        let constraint = db_err.constraint().unwrap_or_default();
        match db_err.code().as_deref() {
            Some("23505") if constraint.starts_with("uq_") => {
                return (
                    StatusCode::CONFLICT,
                    "CONFLICT",
                    format!("Value already taken ({constraint})"),
                );
            }
            Some("23514") if constraint.starts_with("ck_") => {
                return (
                    StatusCode::BAD_REQUEST,
                    "VALIDATION_ERROR",
                    format!("Value rejected by {constraint}"),
                );
            }
            _ => {}
        }
    }
    internal(err)
}

/// Log the cause, hide it from the client.
fn internal(cause: &dyn std::fmt::Display) -> Parts {
    tracing::error!(error = %cause, "Request failed with an internal error");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}

fn first_message(errors: &ValidationErrors) -> String {
    errors
        .field_errors()
        .values()
        .flat_map(|errs| errs.iter())
        .find_map(|e| e.message.as_ref().map(ToString::to_string))
        .unwrap_or_else(|| "Invalid input".to_string())
}
