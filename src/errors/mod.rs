//! Error handling module for the dashboard.
//!
//! One central error type, mapped to browser-facing responses at the bottom.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};

/// Application error type.
///
/// `Duplicate` and `NotFound` are normally matched inline by the form
/// handlers and turned into messages on the form itself; the
/// `IntoResponse` impl below is the fallback for errors that escape via `?`.
#[derive(Debug)]
pub enum AppError {
    /// No usable session (or a login callback that cannot be tied to one)
    Unauthorized(String),
    /// Valid session, but the user is not an administrator
    AccessDenied(String),
    /// Insert of a topic that already exists
    Duplicate(String),
    /// Delete of a topic that does not exist
    NotFound(String),
    /// Database error
    Database(String),
    /// Identity provider call failed
    Provider(String),
    /// Chart or template rendering failed
    Render(String),
}

impl AppError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized(_) => StatusCode::SEE_OTHER,
            AppError::AccessDenied(_) => StatusCode::SEE_OTHER,
            AppError::Duplicate(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Provider(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error message.
    pub fn message(&self) -> &str {
        match self {
            AppError::Unauthorized(msg)
            | AppError::AccessDenied(msg)
            | AppError::Duplicate(msg)
            | AppError::NotFound(msg)
            | AppError::Database(msg)
            | AppError::Provider(msg)
            | AppError::Render(msg) => msg,
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self {
            AppError::Unauthorized(_) => "unauthorized",
            AppError::AccessDenied(_) => "access denied",
            AppError::Duplicate(_) => "duplicate",
            AppError::NotFound(_) => "not found",
            AppError::Database(_) => "database",
            AppError::Provider(_) => "provider",
            AppError::Render(_) => "render",
        };
        write!(f, "{}: {}", kind, self.message())
    }
}

impl std::error::Error for AppError {}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        tracing::error!("Database error: {:?}", err);
        AppError::Database(format!("Database error: {}", err))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        tracing::error!("Identity provider error: {:?}", err);
        AppError::Provider(format!("Identity provider error: {}", err))
    }
}

impl From<askama::Error> for AppError {
    fn from(err: askama::Error) -> Self {
        tracing::error!("Template error: {:?}", err);
        AppError::Render(format!("Template error: {}", err))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            // Visitors without an admin session land back on the index, which
            // shows the login prompt or the denial view as appropriate.
            AppError::Unauthorized(_) | AppError::AccessDenied(_) => {
                Redirect::to("/").into_response()
            }
            AppError::Duplicate(_) | AppError::NotFound(_) => (
                self.status_code(),
                Html(format!("<p>{}</p>", self.message())),
            )
                .into_response(),
            AppError::Database(_) | AppError::Provider(_) | AppError::Render(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html("<p>Something went wrong. Try again later.</p>".to_string()),
            )
                .into_response(),
        }
    }
}
