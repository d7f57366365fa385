//! Jolokia JSON 응답 파서
//!
//! HTTP 응답 본문을 디코딩하고 `value` 키의 내용을 꺼냅니다.

use serde_json::{Map, Value};

use super::client::HttpResponse;
use crate::error::CollectorError;

/// Collector 작업 결과 타입
pub type CollectResult<T> = Result<T, CollectorError>;

/// `value` 키의 내용
#[derive(Debug, Clone, PartialEq)]
pub enum JolokiaValue {
    /// 키/값 구조 (CompositeData 또는 와일드카드 결과)
    Mapping(Map<String, Value>),
    /// 스칼라 또는 배열
    Scalar(Value),
}

impl From<Value> for JolokiaValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => JolokiaValue::Mapping(map),
            other => JolokiaValue::Scalar(other),
        }
    }
}

/// HTTP 응답을 검증하고 `value`를 추출
///
/// # Errors
/// - 상태 코드가 200이 아니면 `HttpStatus`
/// - 본문이 JSON 객체가 아니면 `JsonParse`
/// - Jolokia가 본문에 에러 상태를 담아 보낸 경우 `JolokiaError`
/// - `value` 키가 없으면 `MissingValue`
pub fn decode_response(response: &HttpResponse) -> CollectResult<JolokiaValue> {
    if response.status != 200 {
        return Err(CollectorError::HttpStatus(response.status));
    }

    parse_body(&response.body)
}

/// 응답 본문 파싱
pub fn parse_body(body: &str) -> CollectResult<JolokiaValue> {
    let mut object: Map<String, Value> =
        serde_json::from_str(body).map_err(|e| CollectorError::JsonParse(e.to_string()))?;

    // Jolokia는 MBean 조회 실패를 HTTP 200 + 본문 status로 알려줌
    if let Some(status) = object.get("status").and_then(Value::as_u64) {
        if status != 200 {
            let message = object
                .get("error")
                .and_then(Value::as_str)
                .unwrap_or("unknown error")
                .to_string();
            return Err(CollectorError::JolokiaError {
                status: u16::try_from(status).unwrap_or(u16::MAX),
                message,
            });
        }
    }

    object
        .remove("value")
        .map(JolokiaValue::from)
        .ok_or(CollectorError::MissingValue)
}
