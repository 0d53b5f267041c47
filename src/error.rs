use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::response::ErrorResponse;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("Database error")]
    DbError(#[from] sqlx::Error),

    #[error("ORM error")]
    OrmError(#[from] sea_orm::DbErr),

    #[error("Internal Server Error")]
    Internal(#[from] anyhow::Error),
}

/// Underlying text of a 5xx error, carried in the response extensions.
#[derive(Debug, Clone)]
struct InternalDetail(String);

/// Response mapper: when `expose` is set (development), swaps the generic
/// 5xx message for the underlying error text.
pub async fn reveal_internal_details(
    State(expose): State<bool>,
    mut response: Response,
) -> Response {
    let Some(InternalDetail(detail)) = response.extensions_mut().remove::<InternalDetail>() else {
        return response;
    };
    if !expose {
        return response;
    }

    let body = ErrorResponse {
        success: false,
        error: "internal_error".to_string(),
        message: detail,
    };
    (response.status(), axum::Json(body)).into_response()
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        AppError::NotFound(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::DbError(_) | AppError::OrmError(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Stable machine-readable code placed in the `error` field.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "validation_error",
            AppError::NotFound(_) => "not_found",
            AppError::Conflict(_) => "conflict",
            AppError::Unauthorized(_) => "unauthorized",
            AppError::Forbidden(_) => "forbidden",
            AppError::DbError(_) | AppError::OrmError(_) | AppError::Internal(_) => {
                "internal_error"
            }
        }
    }

    fn internal_detail(&self) -> Option<String> {
        match self {
            AppError::DbError(err) => Some(err.to_string()),
            AppError::OrmError(err) => Some(err.to_string()),
            AppError::Internal(err) => Some(format!("{err:#}")),
            _ => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let detail = self.internal_detail();
        let message = match &detail {
            Some(detail) => {
                tracing::error!(error = %detail, "request failed");
                "Something went wrong".to_string()
            }
            None => self.to_string(),
        };

        let body = ErrorResponse {
            success: false,
            error: self.code().to_string(),
            message,
        };

        let mut response = (status, axum::Json(body)).into_response();
        if let Some(detail) = detail {
            response.extensions_mut().insert(InternalDetail(detail));
        }
        response
    }
}

pub type AppResult<T> = Result<T, AppError>;
