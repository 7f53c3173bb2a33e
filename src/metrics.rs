//! Prometheus metrics for the API server and pipeline runs.

use prometheus::{Encoder, Gauge, Histogram, HistogramOpts, IntCounter, IntGauge, Registry, TextEncoder};

pub struct Metrics {
    registry: Registry,
    pub http_requests_total: IntCounter,
    pub http_request_duration_seconds: Histogram,
    pub http_requests_in_flight: IntGauge,
    pub pipeline_runs_total: IntCounter,
    pub pipeline_failures_total: IntCounter,
    pub pipeline_runs_active: IntGauge,
    pub macro_dates_skipped_total: IntCounter,
    /// 1.0 when the last market data fetch succeeded.
    pub provider_available: Gauge,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new_custom(Some("macroscope".to_string()), None)?;

        let http_requests_total =
            IntCounter::new("http_requests_total", "Total HTTP requests handled")?;
        let http_request_duration_seconds = Histogram::with_opts(HistogramOpts::new(
            "http_request_duration_seconds",
            "HTTP request latency in seconds",
        ))?;
        let http_requests_in_flight =
            IntGauge::new("http_requests_in_flight", "HTTP requests currently being served")?;
        let pipeline_runs_total =
            IntCounter::new("pipeline_runs_total", "Signal pipeline runs started")?;
        let pipeline_failures_total =
            IntCounter::new("pipeline_failures_total", "Signal pipeline runs that failed")?;
        let pipeline_runs_active =
            IntGauge::new("pipeline_runs_active", "Signal pipeline runs in progress")?;
        let macro_dates_skipped_total = IntCounter::new(
            "macro_dates_skipped_total",
            "Dates left unscored because a macro input could not be resolved",
        )?;
        let provider_available = Gauge::new(
            "provider_available",
            "Whether the last market data fetch succeeded",
        )?;

        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;
        registry.register(Box::new(http_requests_in_flight.clone()))?;
        registry.register(Box::new(pipeline_runs_total.clone()))?;
        registry.register(Box::new(pipeline_failures_total.clone()))?;
        registry.register(Box::new(pipeline_runs_active.clone()))?;
        registry.register(Box::new(macro_dates_skipped_total.clone()))?;
        registry.register(Box::new(provider_available.clone()))?;

        Ok(Self {
            registry,
            http_requests_total,
            http_request_duration_seconds,
            http_requests_in_flight,
            pipeline_runs_total,
            pipeline_failures_total,
            pipeline_runs_active,
            macro_dates_skipped_total,
            provider_available,
        })
    }

    /// Text exposition format.
    pub fn export(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
