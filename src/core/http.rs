//! HTTP endpoint server using Axum

use axum::{
    extract::{Path, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{info, Level};

use crate::config::{default_profiles, ServiceConfig};
use crate::metrics::Metrics;
use crate::services::analysis::{AnalysisReport, AnalysisService, AssetReport};
use crate::services::yahoo::YahooChartProvider;

#[derive(Clone)]
pub struct AppState {
    pub health: Arc<RwLock<HealthStatus>>,
    pub metrics: Arc<Metrics>,
    pub start_time: Arc<Instant>,
    pub analysis: Arc<AnalysisService>,
}

impl AppState {
    pub fn new(analysis: Arc<AnalysisService>, metrics: Arc<Metrics>) -> Self {
        Self {
            health: Arc::new(RwLock::new(HealthStatus::default())),
            metrics,
            start_time: Arc::new(Instant::now()),
            analysis,
        }
    }
}

#[derive(Clone, Debug)]
pub struct HealthStatus {
    pub status: String,
}

impl Default for HealthStatus {
    fn default() -> Self {
        Self {
            status: "healthy".to_string(),
        }
    }
}

pub async fn health_check(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    let health = state.health.read().await;
    let uptime_seconds = state.start_time.elapsed().as_secs();
    Ok(Json(json!({
        "status": health.status,
        "uptime_seconds": uptime_seconds,
        "service": "macroscope-signal-engine"
    })))
}

pub async fn metrics_handler(State(state): State<AppState>) -> Result<String, StatusCode> {
    state
        .metrics
        .export()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// Middleware to track HTTP request metrics
async fn metrics_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    state.metrics.http_requests_in_flight.inc();

    let response = next.run(request).await;
    let status = response.status();
    let duration = start.elapsed();

    state.metrics.http_requests_in_flight.dec();

    state.metrics.http_requests_total.inc();
    state
        .metrics
        .http_request_duration_seconds
        .observe(duration.as_secs_f64());

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            path = %path,
            status = %status,
            duration_ms = duration.as_millis(),
            "HTTP request error"
        );
    }

    response
}

/// Analyse every configured asset.
async fn analyze_all(State(state): State<AppState>) -> Json<AnalysisReport> {
    Json(state.analysis.run_batch().await)
}

/// Analyse a single configured asset.
async fn analyze_symbol(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Result<Response, StatusCode> {
    let profile = state
        .analysis
        .profile(&symbol)
        .ok_or(StatusCode::NOT_FOUND)?;

    let report = state.analysis.analyze(profile).await;
    let status = match report {
        AssetReport::Ok(_) => StatusCode::OK,
        AssetReport::Failed { .. } => StatusCode::BAD_GATEWAY,
    };
    Ok((status, Json(report)).into_response())
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .route("/analyze", get(analyze_all))
        .route("/analyze/{symbol}", get(analyze_symbol))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                        .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
                )
                .layer(axum::middleware::from_fn_with_state(
                    state.clone(),
                    metrics_middleware,
                ))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn start_server(config: ServiceConfig) -> Result<(), Box<dyn std::error::Error>> {
    let metrics = Arc::new(Metrics::new()?);
    let provider = YahooChartProvider::new(&config.yahoo_base_url, config.provider_max_retries)?;
    let port = config.port;

    let analysis = AnalysisService::new(Arc::new(provider), default_profiles(), config)
        .with_metrics(metrics.clone());
    let state = AppState::new(Arc::new(analysis), metrics);

    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    info!(port = port, "HTTP server listening on port {}", port);
    info!(
        "Metrics endpoint available at http://0.0.0.0:{}/metrics",
        port
    );
    axum::serve(listener, app).await?;

    Ok(())
}
