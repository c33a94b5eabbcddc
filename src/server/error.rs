//! Error-to-HTTP response conversion.
//!
//! Handlers return `Result<_, AppError>`; every failure becomes a JSON body
//! with a stable `code`, except 416 which carries only `Content-Range`.

use axum::body::Body;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use serde_json::{json, Value};

use surgistream_common::Error;

/// Wrapper so we can implement `IntoResponse` for an external type.
#[derive(Debug)]
pub struct AppError {
    inner: Error,
    request_id: Option<String>,
}

impl AppError {
    pub fn new(inner: Error) -> Self {
        Self {
            inner,
            request_id: None,
        }
    }

    pub fn with_request_id(mut self, id: impl Into<String>) -> Self {
        self.request_id = Some(id.into());
        self
    }
}

impl From<Error> for AppError {
    fn from(e: Error) -> Self {
        Self::new(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.inner.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            tracing::error!(
                status = %status,
                error = %self.inner,
                request_id = self.request_id.as_deref().unwrap_or("-"),
                "Server error in media handler"
            );
        } else {
            tracing::debug!(status = %status, error = %self.inner, "Request rejected");
        }

        if let Error::UnsatisfiableRange { size, .. } = &self.inner {
            return (
                status,
                [(header::CONTENT_RANGE, format!("bytes */{size}"))],
                Body::empty(),
            )
                .into_response();
        }

        let mut body = json!({
            "error": self.inner.to_string(),
            "code": self.inner.code(),
            "request_id": self.request_id,
        });

        match &self.inner {
            Error::NotFound {
                identifier,
                searched,
            } => {
                body["identifier"] = Value::from(identifier.as_str());
                body["searched_paths"] = searched
                    .iter()
                    .map(|p| Value::from(p.display().to_string()))
                    .collect();
            }
            Error::InvalidPath { identifier, reason } => {
                body["identifier"] = Value::from(identifier.as_str());
                body["reason"] = Value::from(reason.as_str());
            }
            _ => {}
        }

        (status, axum::Json(body)).into_response()
    }
}
