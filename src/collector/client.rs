//! Jolokia HTTP 전송 계층
//!
//! `HttpTransport` 트레이트는 GET 요청 하나를 수행하고 상태 코드와 본문을
//! 돌려줍니다. 기본 구현은 connection pooling과 타임아웃을 지원하는
//! reqwest 클라이언트입니다.

use std::future::Future;
use std::time::Duration;

use reqwest::{Client, ClientBuilder};
use tracing::{debug, instrument};
use url::Url;

use super::parser::CollectResult;
use crate::error::CollectorError;

/// GET 요청
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    /// 요청 URL
    pub url: Url,
    /// Basic Auth (username, password)
    pub auth: Option<(String, String)>,
}

/// HTTP 응답
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    /// 상태 코드
    pub status: u16,
    /// 응답 본문
    pub body: String,
}

/// HTTP 전송 계층
///
/// 타임아웃은 구현체의 책임이며 `CollectorError::Timeout`으로 보고합니다.
pub trait HttpTransport {
    /// GET 요청 수행
    fn get(&self, request: &HttpRequest) -> impl Future<Output = CollectResult<HttpResponse>> + Send;
}

/// reqwest 기반 HTTP 클라이언트
#[derive(Clone)]
pub struct ReqwestTransport {
    client: Client,
    timeout_ms: u64,
}

impl ReqwestTransport {
    /// 새 클라이언트 생성
    ///
    /// # Arguments
    /// * `timeout_ms` - 요청 타임아웃 (밀리초)
    ///
    /// # Example
    /// ```ignore
    /// let transport = ReqwestTransport::new(5000)?;
    /// ```
    pub fn new(timeout_ms: u64) -> CollectResult<Self> {
        let client = ClientBuilder::new()
            .timeout(Duration::from_millis(timeout_ms))
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(30))
            .build()
            .map_err(CollectorError::HttpClientInit)?;

        Ok(Self { client, timeout_ms })
    }

    fn classify(&self, err: reqwest::Error) -> CollectorError {
        if err.is_timeout() {
            CollectorError::timeout_with_duration(self.timeout_ms)
        } else {
            CollectorError::from(err)
        }
    }
}

impl HttpTransport for ReqwestTransport {
    #[instrument(skip(self, request), fields(url = %request.url))]
    async fn get(&self, request: &HttpRequest) -> CollectResult<HttpResponse> {
        debug!("Sending Jolokia read request");

        let mut req = self.client.get(request.url.clone());

        if let Some((username, password)) = &request.auth {
            req = req.basic_auth(username, Some(password));
        }

        let response = req.send().await.map_err(|e| self.classify(e))?;
        let status = response.status().as_u16();

        let body = response.text().await.map_err(|e| self.classify(e))?;

        Ok(HttpResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_new() {
        let transport = ReqwestTransport::new(5000);
        assert!(transport.is_ok());
        assert_eq!(transport.unwrap().timeout_ms, 5000);
    }

    #[test]
    fn test_request_carries_auth() {
        let request = HttpRequest {
            url: Url::parse("http://localhost:8778/jolokia/read/java.lang:type=Memory").unwrap(),
            auth: Some(("user".to_string(), "pass".to_string())),
        };
        assert_eq!(request.url.port(), Some(8778));
        assert_eq!(request.url.path(), "/jolokia/read/java.lang:type=Memory");
        assert!(request.auth.is_some());
    }
}
