//! 수집 오케스트레이터
//!
//! 모든 (서버 × 메트릭) 조합에 대해 Jolokia를 호출하고, 응답을 평탄화 또는
//! MBean 그룹화한 뒤 sink로 내보냅니다. 요청 단위 실패는 기록만 하고
//! 다음 조합으로 넘어갑니다.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, instrument, warn};
use url::Url;

use super::client::{HttpRequest, HttpTransport, ReqwestTransport};
use super::parser::{decode_response, CollectResult, JolokiaValue};
use crate::config::{Config, MetricConfig, ServerConfig};
use crate::error::{AppResult, CollectorError};
use crate::metrics::GatherMetrics;
use crate::sink::Sink;
use crate::transformer::{flatten, group_mbeans, FieldSet, TagSet};

/// 실패한 요청 하나
#[derive(Debug)]
pub struct RequestFailure {
    /// 서버 이름
    pub server: String,
    /// 메트릭 이름
    pub metric: String,
    /// 요청 URL
    pub url: String,
    /// 실패 원인
    pub error: CollectorError,
}

/// 이름이 잘못되어 건너뛴 MBean
#[derive(Debug)]
pub struct MBeanFailure {
    /// 서버 이름
    pub server: String,
    /// 메트릭 이름
    pub metric: String,
    /// MBean ObjectName
    pub mbean: String,
    /// 실패 원인
    pub error: CollectorError,
}

/// 한 번의 수집 결과 요약
#[derive(Debug, Default)]
pub struct GatherReport {
    /// 시도한 요청 수
    pub requests: usize,
    /// sink로 보낸 measurement 수
    pub emitted: usize,
    /// 요청 단위 실패
    pub failures: Vec<RequestFailure>,
    /// MBean 단위 실패
    pub mbean_errors: Vec<MBeanFailure>,
}

impl GatherReport {
    /// 실패 없이 끝났는지 확인
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty() && self.mbean_errors.is_empty()
    }
}

/// 요청 대상 (dry-run 출력용)
#[derive(Debug, Clone)]
pub struct RequestTarget {
    /// 서버 이름
    pub server: String,
    /// 메트릭 이름
    pub metric: String,
    /// 요청 URL
    pub url: String,
    /// Basic Auth 사용 여부
    pub authenticated: bool,
}

/// Gatherer - 설정 기반 수집기
pub struct Gatherer<T> {
    transport: T,
    scheme: String,
    context: String,
    servers: Vec<ServerConfig>,
    metrics: Vec<MetricConfig>,
    stats: Arc<GatherMetrics>,
}

impl Gatherer<ReqwestTransport> {
    /// 설정으로부터 reqwest 전송 계층을 사용하는 Gatherer 생성
    pub fn from_config(config: &Config) -> AppResult<Self> {
        config.validate()?;
        let transport = ReqwestTransport::new(config.timeout_ms)?;
        Ok(Self::new(config, transport))
    }
}

impl<T: HttpTransport> Gatherer<T> {
    /// 주어진 전송 계층으로 Gatherer 생성
    pub fn new(config: &Config, transport: T) -> Self {
        Self {
            transport,
            scheme: config.scheme.clone(),
            context: config.context.clone(),
            servers: config.servers.clone(),
            metrics: config.metrics.clone(),
            stats: Arc::new(GatherMetrics::new()),
        }
    }

    /// 누적 카운터
    pub fn stats(&self) -> Arc<GatherMetrics> {
        Arc::clone(&self.stats)
    }

    /// 요청 없이 모든 요청 대상 나열
    pub fn request_targets(&self) -> Vec<RequestTarget> {
        self.servers
            .iter()
            .flat_map(|server| {
                self.metrics.iter().map(move |metric| RequestTarget {
                    server: server.name.clone(),
                    metric: metric.name.clone(),
                    url: self.raw_url(server, metric),
                    authenticated: server.credentials().is_some(),
                })
            })
            .collect()
    }

    /// 전체 수집 1회 수행
    ///
    /// 요청 단위 실패는 반환되는 `GatherReport`에 쌓이며 수집을 중단시키지
    /// 않습니다.
    pub async fn gather<S: Sink>(&self, sink: &mut S) -> GatherReport {
        let mut report = GatherReport::default();

        for server in &self.servers {
            for metric in &self.metrics {
                report.requests += 1;
                self.stats.requests_total.inc();

                let url = self.raw_url(server, metric);
                let start = Instant::now();
                let result = self
                    .gather_one(server, metric, &url, sink, &mut report)
                    .await;
                self.stats
                    .request_duration_seconds
                    .observe(start.elapsed().as_secs_f64());

                if let Err(error) = result {
                    warn!(
                        server = %server.name,
                        metric = %metric.name,
                        url = %url,
                        error = %error,
                        "Failed to gather metric"
                    );
                    self.stats.record_failure(error.kind());
                    report.failures.push(RequestFailure {
                        server: server.name.clone(),
                        metric: metric.name.clone(),
                        url,
                        error,
                    });
                }
            }
        }

        info!(
            requests = report.requests,
            emitted = report.emitted,
            failures = report.failures.len(),
            mbean_errors = report.mbean_errors.len(),
            "Gather complete"
        );

        report
    }

    #[instrument(skip_all, fields(server = %server.name, metric = %metric.name))]
    async fn gather_one<S: Sink>(
        &self,
        server: &ServerConfig,
        metric: &MetricConfig,
        url: &str,
        sink: &mut S,
        report: &mut GatherReport,
    ) -> CollectResult<()> {
        let request = HttpRequest {
            url: Url::parse(url).map_err(|e| CollectorError::InvalidUrl {
                url: url.to_string(),
                reason: e.to_string(),
            })?,
            auth: server.credentials(),
        };

        let response = self.transport.get(&request).await?;
        let value = decode_response(&response)?;

        let series = metric.series_name();
        let tags = base_tags(server);

        match value {
            JolokiaValue::Mapping(entities) if metric.multiple_mbeans => {
                let outcome = group_mbeans(&entities, &tags);

                self.stats.mbean_errors_total.inc_by(outcome.errors.len() as u64);
                for (mbean, error) in outcome.errors {
                    report.mbean_errors.push(MBeanFailure {
                        server: server.name.clone(),
                        metric: metric.name.clone(),
                        mbean,
                        error,
                    });
                }

                debug!(groups = outcome.groups.len(), "Emitting MBean groups");
                for group in outcome.groups {
                    self.emit(sink, series, group.fields, group.tags, report);
                }
            }
            JolokiaValue::Mapping(map) => {
                let fields = flatten(&serde_json::Value::Object(map), &metric.name);
                self.emit(sink, series, fields, tags, report);
            }
            JolokiaValue::Scalar(value) => {
                let fields = flatten(&value, &metric.name);
                self.emit(sink, series, fields, tags, report);
            }
        }

        Ok(())
    }

    fn emit<S: Sink>(
        &self,
        sink: &mut S,
        series: &str,
        fields: FieldSet,
        tags: TagSet,
        report: &mut GatherReport,
    ) {
        sink.add_fields(series, fields, tags);
        report.emitted += 1;
        self.stats.measurements_total.inc();
    }

    fn raw_url(&self, server: &ServerConfig, metric: &MetricConfig) -> String {
        format!(
            "{}://{}:{}{}{}",
            self.scheme, server.host, server.port, self.context, metric.jmx
        )
    }
}

/// 서버 식별 태그 (server, host, port)
fn base_tags(server: &ServerConfig) -> TagSet {
    TagSet::from([
        ("server".to_string(), server.name.clone()),
        ("host".to_string(), server.host.clone()),
        ("port".to_string(), server.port.clone()),
    ])
}
