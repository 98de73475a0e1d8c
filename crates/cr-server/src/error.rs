use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use cr_core::Error;
use serde::Serialize;

/// Handler error: carries a core [`Error`] and renders it as
/// `{"detail": "..."}` with the matching status code.
#[derive(Debug)]
pub struct ApiError(pub Error);

#[derive(Serialize)]
struct ErrorBody {
    detail: String,
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

pub fn status_for(err: &Error) -> StatusCode {
    match err {
        Error::Validation(_) => StatusCode::BAD_REQUEST,
        Error::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
        Error::ProviderHttp { .. } => StatusCode::BAD_GATEWAY,
        Error::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
        Error::MalformedResponse(_) => StatusCode::INTERNAL_SERVER_ERROR,
        Error::Network(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(&self.0);
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), "analysis failed: {}", self.0);
        } else {
            tracing::warn!(status = status.as_u16(), "request rejected: {}", self.0);
        }
        let body = ErrorBody {
            detail: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_maps_each_error_kind() {
        let cases = [
            (Error::Validation("Code cannot be empty".into()), 400),
            (Error::Configuration("API key not configured".into()), 500),
            (Error::ProviderHttp { status: 401, body: "nope".into() }, 502),
            (Error::ProviderHttp { status: 503, body: "busy".into() }, 502),
            (Error::Timeout(Duration::from_secs(120)), 504),
            (Error::MalformedResponse("no choices".into()), 500),
            (Error::Network("connection refused".into()), 500),
        ];
        for (err, expected) in cases {
            assert_eq!(status_for(&err).as_u16(), expected, "{err:?}");
        }
    }
}
