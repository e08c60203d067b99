//! Typed errors, HTTP mapping, and the global error-response normalizer.

use axum::{
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// Largest error body the normalizer will buffer when re-wrapping a response
/// that did not originate from [`AppError`].
const ERROR_BODY_LIMIT: usize = 64 * 1024;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),
    #[error("{}", .0.join(", "))]
    Validation(Vec<String>),
    #[error("{0}")]
    BadRequest(String),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("config: {0}")]
    Config(String),
}

impl AppError {
    /// Status for the response. Not-found conditions always map to 404, even
    /// when they surface as a database-level row miss.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Db(sqlx::Error::RowNotFound) => StatusCode::NOT_FOUND,
            AppError::Db(_) | AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing message list. Internal failure detail stays in the logs.
    pub fn messages(&self) -> Vec<String> {
        match self {
            AppError::Validation(messages) => messages.clone(),
            AppError::NotFound(message) | AppError::BadRequest(message) => vec![message.clone()],
            AppError::Db(sqlx::Error::RowNotFound) => vec!["Not Found".into()],
            AppError::Db(_) | AppError::Config(_) => vec!["Internal server error".into()],
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = Vec::new();
        for (field, field_errors) in errors.field_errors() {
            for error in field_errors.iter() {
                match &error.message {
                    Some(message) => messages.push(message.to_string()),
                    None => messages.push(format!("{field} failed {} validation", error.code)),
                }
            }
        }
        messages.sort();
        AppError::Validation(messages)
    }
}

/// Uniform error body: `{statusCode, timestamp, path, message[]}`.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorEnvelope {
    pub status_code: u16,
    /// ISO 8601, millisecond precision.
    pub timestamp: String,
    pub path: String,
    pub message: Vec<String>,
}

impl ErrorEnvelope {
    pub fn new(status: StatusCode, path: String, message: Vec<String>) -> Self {
        Self {
            status_code: status.as_u16(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            path,
            message,
        }
    }
}

/// Message list carried from [`AppError`] to the normalizer, which knows the
/// request path and builds the final envelope.
#[derive(Clone)]
pub(crate) struct ErrorMessages(pub Vec<String>);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let messages = self.messages();
        let mut response = (
            status,
            Json(ErrorEnvelope::new(status, String::new(), messages.clone())),
        )
            .into_response();
        response.extensions_mut().insert(ErrorMessages(messages));
        response
    }
}

/// Global normalizer: every error response leaves the process as the uniform
/// envelope with the request path filled in. Responses that did not come from
/// [`AppError`] (extractor rejections, the router fallback) have their body
/// text wrapped into a single-element message array.
pub async fn normalize_errors(request: Request, next: Next) -> Response {
    let path = request.uri().path().to_string();
    let response = next.run(request).await;
    let status = response.status();
    if !status.is_client_error() && !status.is_server_error() {
        return response;
    }
    if status == StatusCode::NOT_FOUND {
        tracing::debug!(%path, "not found, returning 404 envelope");
    }
    let (parts, body) = response.into_parts();
    let message = match parts.extensions.get::<ErrorMessages>() {
        Some(messages) => messages.0.clone(),
        None => {
            let bytes = axum::body::to_bytes(body, ERROR_BODY_LIMIT)
                .await
                .unwrap_or_default();
            let text = String::from_utf8_lossy(&bytes).trim().to_string();
            if text.is_empty() {
                vec![status.canonical_reason().unwrap_or("error").to_string()]
            } else {
                vec![text]
            }
        }
    };
    (status, Json(ErrorEnvelope::new(status, path, message))).into_response()
}
