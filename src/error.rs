//! Error types for rJolokia-Input
//!
//! This module defines the error types used throughout the application.

use thiserror::Error;

/// Application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Collector error
    #[error("Collector error: {0}")]
    Collector(#[from] CollectorError),
}

/// Collector 모듈 에러 타입
#[derive(Error, Debug)]
pub enum CollectorError {
    /// HTTP 클라이언트 초기화 실패
    #[error("Failed to initialize HTTP client: {0}")]
    HttpClientInit(#[source] reqwest::Error),

    /// HTTP 요청 실패
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[source] reqwest::Error),

    /// HTTP 응답 읽기 실패
    #[error("Failed to read HTTP response: {0}")]
    HttpResponse(#[source] reqwest::Error),

    /// HTTP 상태 코드 에러 (200 이외)
    #[error("HTTP error status: {0}")]
    HttpStatus(u16),

    /// 타임아웃
    /// The value is the configured timeout in milliseconds, if known.
    #[error("Request timed out{}", .0.map(|ms| format!(" after {}ms", ms)).unwrap_or_default())]
    Timeout(Option<u64>),

    /// 연결 실패
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// JSON 파싱 에러
    #[error("JSON parse error: {0}")]
    JsonParse(String),

    /// Jolokia 에러 응답 (HTTP 200, 본문의 status가 200이 아님)
    #[error("Jolokia error (status {status}): {message}")]
    JolokiaError { status: u16, message: String },

    /// 응답에 `value` 키가 없음
    #[error("Missing key 'value' in response")]
    MissingValue,

    /// 요청 URL 생성 실패
    #[error("Invalid request URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// 잘못된 ObjectName
    #[error("Invalid ObjectName '{name}': {reason}")]
    InvalidObjectName { name: String, reason: String },
}

impl CollectorError {
    /// HTTP 상태 코드 추출
    pub fn http_status(&self) -> Option<u16> {
        match self {
            CollectorError::HttpStatus(code) => Some(*code),
            CollectorError::JolokiaError { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Create a Timeout error with known duration
    pub fn timeout_with_duration(ms: u64) -> Self {
        CollectorError::Timeout(Some(ms))
    }

    /// Short, stable label for the error class, used in reports and counters
    pub fn kind(&self) -> &'static str {
        match self {
            CollectorError::HttpClientInit(_) => "client_init",
            CollectorError::HttpRequest(_) | CollectorError::ConnectionFailed(_) => "transport",
            CollectorError::HttpResponse(_) => "response",
            CollectorError::HttpStatus(_) => "status",
            CollectorError::Timeout(_) => "timeout",
            CollectorError::JsonParse(_) => "decode",
            CollectorError::JolokiaError { .. } => "jolokia",
            CollectorError::MissingValue => "missing_value",
            CollectorError::InvalidUrl { .. } => "url",
            CollectorError::InvalidObjectName { .. } => "object_name",
        }
    }
}

impl From<reqwest::Error> for CollectorError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            // reqwest doesn't expose the configured timeout duration.
            // Use CollectorError::timeout_with_duration() when the duration is known.
            CollectorError::Timeout(None)
        } else if err.is_connect() {
            CollectorError::ConnectionFailed(err.to_string())
        } else if err.is_request() {
            CollectorError::HttpRequest(err)
        } else {
            CollectorError::HttpResponse(err)
        }
    }
}

/// Result type alias for application errors
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_display() {
        assert_eq!(CollectorError::Timeout(None).to_string(), "Request timed out");
        assert_eq!(
            CollectorError::timeout_with_duration(250).to_string(),
            "Request timed out after 250ms"
        );
    }

    #[test]
    fn test_http_status_extraction() {
        assert_eq!(CollectorError::HttpStatus(404).http_status(), Some(404));
        assert_eq!(CollectorError::MissingValue.http_status(), None);
    }

    #[test]
    fn test_error_kind() {
        assert_eq!(CollectorError::MissingValue.kind(), "missing_value");
        assert_eq!(CollectorError::JsonParse("eof".into()).kind(), "decode");
        assert_eq!(
            CollectorError::InvalidObjectName {
                name: "x".into(),
                reason: "missing ':'".into()
            }
            .kind(),
            "object_name"
        );
    }
}
