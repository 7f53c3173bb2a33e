//! Test utilities for API server integration tests

use axum_test::TestServer;
use macroscope::config::{AssetProfile, ServiceConfig};
use macroscope::core::http::{create_router, AppState};
use macroscope::metrics::Metrics;
use macroscope::services::analysis::AnalysisService;
use std::sync::Arc;

use crate::test_utils::favourable_provider;

/// Test helper for API server integration tests
#[allow(dead_code)]
pub struct TestApiServer {
    pub server: TestServer,
    pub metrics: Arc<Metrics>,
}

impl TestApiServer {
    pub async fn new() -> Self {
        let metrics = Arc::new(Metrics::new().expect("metrics initialization"));
        let profiles = vec![
            AssetProfile::equity("GOOD", "Good Corp", "KRW", "BASE"),
            AssetProfile::equity("MISSING", "Missing Co", "KRW", "BASE"),
        ];
        let analysis = AnalysisService::new(
            Arc::new(favourable_provider()),
            profiles,
            ServiceConfig::default(),
        )
        .with_metrics(metrics.clone());

        let state = AppState::new(Arc::new(analysis), metrics.clone());
        let app = create_router(state);
        let server = TestServer::new(app).expect("start test server");

        Self { server, metrics }
    }
}
