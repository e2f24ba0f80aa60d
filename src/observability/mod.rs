//! 可观测性模块
//!
//! 提供 Prometheus 指标、结构化日志和健康检查。

use axum::{
    Json, Router,
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::{DateTime, Utc};
use prometheus::{Encoder, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::config::LoggingConfig;
use crate::storage::store::RecordStore;

// ===== Metrics =====

/// 应用指标
#[derive(Clone)]
pub struct AppMetrics {
    registry: Registry,
    pub http_requests_total: IntCounterVec,
    pub writes_total: IntCounterVec,
    pub validation_rejections_total: IntCounterVec,
    pub errors_total: IntCounter,
}

impl AppMetrics {
    pub fn new() -> prometheus::Result<Self> {
        let registry = Registry::new_custom(Some("carte".to_string()), None)?;

        let http_requests_total = IntCounterVec::new(
            Opts::new("http_requests_total", "Total HTTP requests"),
            &["method", "status"],
        )?;
        let writes_total = IntCounterVec::new(
            Opts::new("writes_total", "Successful record writes"),
            &["entity", "operation"],
        )?;
        let validation_rejections_total = IntCounterVec::new(
            Opts::new("validation_rejections_total", "Writes rejected by the validation policy"),
            &["kind"],
        )?;
        let errors_total = IntCounter::new("errors_total", "Total server errors")?;

        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(writes_total.clone()))?;
        registry.register(Box::new(validation_rejections_total.clone()))?;
        registry.register(Box::new(errors_total.clone()))?;

        Ok(Self {
            registry,
            http_requests_total,
            writes_total,
            validation_rejections_total,
            errors_total,
        })
    }

    /// 记录 HTTP 请求
    pub fn record_http_request(&self, method: &str, status: StatusCode) {
        self.http_requests_total
            .with_label_values(&[method, status.as_str()])
            .inc();
        if status.is_server_error() {
            self.errors_total.inc();
        }
    }

    /// 记录写入
    pub fn record_write(&self, entity: &str, operation: &str) {
        self.writes_total
            .with_label_values(&[entity, operation])
            .inc();
    }

    /// 记录校验拒绝
    pub fn record_rejection(&self, kind: &str) {
        self.validation_rejections_total
            .with_label_values(&[kind])
            .inc();
    }

    /// 生成 Prometheus 文本格式指标
    pub fn gather(&self) -> String {
        let mut buffer = Vec::new();
        if let Err(e) = TextEncoder::new().encode(&self.registry.gather(), &mut buffer) {
            tracing::error!("Failed to encode metrics: {}", e);
        }
        String::from_utf8(buffer).unwrap_or_default()
    }
}

impl std::fmt::Debug for AppMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppMetrics").finish_non_exhaustive()
    }
}

// ===== Health Check =====

/// 健康检查状态
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: String,
    pub timestamp: String,
    pub version: String,
    pub uptime_seconds: f64,
    pub checks: Vec<HealthCheck>,
}

/// 单个健康检查项
#[derive(Debug, Serialize)]
pub struct HealthCheck {
    pub name: String,
    pub status: String,
    pub message: Option<String>,
    pub latency_ms: Option<u64>,
}

/// 可观测性路由状态
#[derive(Clone)]
pub struct ObservabilityState {
    pub metrics: Arc<AppMetrics>,
    pub store: RecordStore,
    pub start_time: DateTime<Utc>,
    pub version: String,
}

impl ObservabilityState {
    pub fn new(version: String, metrics: Arc<AppMetrics>, store: RecordStore) -> Self {
        Self {
            metrics,
            store,
            start_time: Utc::now(),
            version,
        }
    }

    /// 获取应用正常运行时间
    pub fn uptime_seconds(&self) -> f64 {
        (Utc::now() - self.start_time).num_seconds() as f64
    }

    /// 检查存储
    async fn check_store(&self) -> HealthCheck {
        let start = Instant::now();
        let result = self.store.health_check().await;
        let latency_ms = Some(start.elapsed().as_millis() as u64);

        match result {
            Ok(true) => HealthCheck {
                name: "store".to_string(),
                status: "healthy".to_string(),
                message: None,
                latency_ms,
            },
            Ok(false) => HealthCheck {
                name: "store".to_string(),
                status: "unhealthy".to_string(),
                message: None,
                latency_ms,
            },
            Err(e) => HealthCheck {
                name: "store".to_string(),
                status: "unhealthy".to_string(),
                message: Some(e.to_string()),
                latency_ms,
            },
        }
    }
}

/// 获取完整健康状态
pub async fn health_check(State(state): State<Arc<ObservabilityState>>) -> impl IntoResponse {
    let checks = vec![state.check_store().await];
    let all_healthy = checks.iter().all(|c| c.status == "healthy");

    let health_status = HealthStatus {
        status: if all_healthy { "healthy" } else { "unhealthy" }.to_string(),
        timestamp: Utc::now().to_rfc3339(),
        version: state.version.clone(),
        uptime_seconds: state.uptime_seconds(),
        checks,
    };

    let status_code = if all_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(health_status))
}

/// 简单存活检查
pub async fn liveness() -> impl IntoResponse {
    "OK"
}

/// 就绪检查
pub async fn readiness(State(state): State<Arc<ObservabilityState>>) -> impl IntoResponse {
    match state.store.health_check().await {
        Ok(true) => (StatusCode::OK, "Ready"),
        _ => (StatusCode::SERVICE_UNAVAILABLE, "Not Ready"),
    }
}

/// Prometheus 指标端点
pub async fn metrics(State(state): State<Arc<ObservabilityState>>) -> impl IntoResponse {
    (StatusCode::OK, state.metrics.gather())
}

/// 版本信息端点
pub async fn version(State(state): State<Arc<ObservabilityState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "version": state.version,
        "uptime_seconds": state.uptime_seconds(),
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

/// 创建可观测性路由
pub fn create_observability_router(state: Arc<ObservabilityState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/health/live", get(liveness))
        .route("/health/ready", get(readiness))
        .route("/metrics", get(metrics))
        .route("/version", get(version))
        .with_state(state)
}

// ===== Structured Logging =====

/// 初始化日志
///
/// `RUST_LOG` 优先于配置中的日志级别。配置了 `log_dir` 时额外按天滚动写入文件，
/// 返回的 guard 必须在进程退出前保持存活。
pub fn init_tracing(service_name: &str, config: &LoggingConfig) -> Option<WorkerGuard> {
    let level = if config.level.is_empty() { "info" } else { &config.level };
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{},{}={}", level, service_name, level)));

    let (file_layer, guard) = match &config.log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, format!("{}.log", service_name));
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().json().with_writer(writer).with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let (json_layer, text_layer) = if config.structured {
        (Some(fmt::layer().json().with_target(true)), None)
    } else {
        (
            None,
            Some(fmt::layer().with_target(true).with_line_number(true)),
        )
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .with(file_layer)
        .init();

    guard
}

// ===== Request Metrics Middleware =====

/// 记录请求指标的中间件
pub async fn metrics_middleware(
    State(metrics): State<Arc<AppMetrics>>,
    req: Request,
    next: Next,
) -> Response {
    let method = req.method().to_string();
    let response = next.run(req).await;
    metrics.record_http_request(&method, response.status());
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use tower::ServiceExt;

    #[test]
    fn test_metrics_gather() {
        let metrics = AppMetrics::new().unwrap();
        metrics.record_http_request("GET", StatusCode::OK);
        metrics.record_http_request("POST", StatusCode::INTERNAL_SERVER_ERROR);
        metrics.record_write("menu", "create");
        metrics.record_rejection("insufficient_items");

        let output = metrics.gather();
        assert!(output.contains(r#"carte_http_requests_total{method="GET",status="200"} 1"#));
        assert!(output.contains(r#"carte_writes_total{entity="menu",operation="create"} 1"#));
        assert!(output.contains(r#"carte_validation_rejections_total{kind="insufficient_items"} 1"#));
        assert!(output.contains("carte_errors_total 1"));
    }

    #[tokio::test]
    async fn test_health_endpoint_reports_store() {
        let metrics = Arc::new(AppMetrics::new().unwrap());
        let state = Arc::new(ObservabilityState::new(
            "0.1.0".to_string(),
            metrics,
            RecordStore::in_memory(),
        ));
        let app = create_observability_router(state);

        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["checks"][0]["name"], "store");
    }
}
