use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Provider API error ({status}): {body}")]
    ProviderHttp { status: u16, body: String },

    #[error("Request timeout - AI model took longer than {0:?} to respond")]
    Timeout(Duration),

    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),

    #[error("Network error: {0}")]
    Network(String),
}

impl Error {
    /// Transient failures worth another attempt: timeouts, transport errors,
    /// rate limiting and provider-side 5xx.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Timeout(_) | Error::Network(_) => true,
            Error::ProviderHttp { status, .. } => *status == 429 || *status >= 500,
            Error::Validation(_) | Error::Configuration(_) | Error::MalformedResponse(_) => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_errors_are_retryable() {
        assert!(Error::Timeout(Duration::from_secs(1)).is_retryable());
        assert!(Error::Network("connection reset".into()).is_retryable());
        assert!(Error::ProviderHttp { status: 503, body: String::new() }.is_retryable());
        assert!(Error::ProviderHttp { status: 429, body: String::new() }.is_retryable());
    }

    #[test]
    fn test_permanent_errors_are_not_retryable() {
        assert!(!Error::Configuration("no key".into()).is_retryable());
        assert!(!Error::Validation("empty".into()).is_retryable());
        assert!(!Error::MalformedResponse("no choices".into()).is_retryable());
        assert!(!Error::ProviderHttp { status: 401, body: String::new() }.is_retryable());
    }

    #[test]
    fn test_provider_http_display_keeps_body() {
        let err = Error::ProviderHttp {
            status: 402,
            body: r#"{"error":"insufficient credits"}"#.into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("402"));
        assert!(msg.contains("insufficient credits"));
    }

    #[test]
    fn test_timeout_display_mentions_bound() {
        let msg = Error::Timeout(Duration::from_secs(120)).to_string();
        assert!(msg.contains("120s"));
    }

    #[test]
    fn test_timeout_display_keeps_sub_second_bound() {
        let msg = Error::Timeout(Duration::from_millis(200)).to_string();
        assert!(msg.contains("200ms"), "{msg}");
        assert!(!msg.contains("0s "));
    }
}
