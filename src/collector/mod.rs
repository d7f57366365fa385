//! Jolokia JMX 메트릭 수집 모듈
//!
//! 설정된 모든 서버에서 JMX 경로를 읽고 결과를 sink로 내보냅니다.
//!
//! # Example
//!
//! ```ignore
//! use rjolokia_input::collector::Gatherer;
//! use rjolokia_input::sink::MemorySink;
//!
//! let gatherer = Gatherer::from_config(&config)?;
//! let mut sink = MemorySink::new();
//! let report = gatherer.gather(&mut sink).await;
//! ```

mod client;
mod gatherer;
mod parser;

pub use client::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};
pub use gatherer::{GatherReport, Gatherer, MBeanFailure, RequestFailure, RequestTarget};
pub use parser::{decode_response, parse_body, CollectResult, JolokiaValue};
