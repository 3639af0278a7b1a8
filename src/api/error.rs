use axum::{
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use std::net::SocketAddr;
use tracing::error;

use crate::service::LookupError;

/// Request context echoed back in every error payload.
#[derive(Debug, Clone)]
pub struct RequestMeta {
    pub url: String,
    pub method: String,
    pub path: String,
    pub remote_addr: String,
}

impl RequestMeta {
    pub fn new(uri: &Uri, method: &Method, remote: SocketAddr) -> Self {
        Self {
            url: uri.to_string(),
            method: method.to_string(),
            path: uri.path().to_string(),
            remote_addr: remote.ip().to_string(),
        }
    }
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    kind: &'static str,
    message: String,
    meta: RequestMeta,
    detail: Option<String>,
}

impl ApiError {
    /// Map a lookup failure onto the transport surface. Internal failures get
    /// a generic message; their diagnostic detail is exposed only when the
    /// operator enabled debug mode.
    pub fn from_lookup(err: LookupError, meta: RequestMeta, debug: bool) -> Self {
        let (status, kind, message) = match &err {
            LookupError::InvalidInput(_) => (StatusCode::BAD_REQUEST, "BadRequest", err.to_string()),
            LookupError::SubjectNotFound(_) => (StatusCode::NOT_FOUND, "NotFound", err.to_string()),
            LookupError::RateLimited => (
                StatusCode::TOO_MANY_REQUESTS,
                "TooManyRequests",
                "The server is limiting the rate at which the client can send requests.".to_string(),
            ),
            LookupError::Upstream(_) | LookupError::Storage(_) => {
                error!("lookup for {} failed: {}", meta.path, err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "InternalServerError",
                    "Internal server error".to_string(),
                )
            }
        };

        let detail = if debug { Some(format!("{err:?}")) } else { None };

        Self {
            status,
            kind,
            message,
            meta,
            detail,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut body = json!({
            "error": self.kind,
            "message": self.message,
            "status_code": self.status.as_u16(),
            "url": self.meta.url,
            "method": self.meta.method,
            "path": self.meta.path,
            "remote_addr": self.meta.remote_addr,
        });

        if let Some(detail) = self.detail {
            body["detail"] = Value::String(detail);
        }

        (self.status, Json(body)).into_response()
    }
}
