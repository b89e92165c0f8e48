// Telemetry module for structured logging, metrics, and tracing

use anyhow::Result;
use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::{global, KeyValue};
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{
    trace::{RandomIdGenerator, Sampler, TracerProvider},
    Resource,
};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

const SERVICE_NAME: &str = "executors-dashboard";

/// Initialize structured logging with JSON formatting
///
/// `RUST_LOG` takes precedence over `log_level`. When `tracing_endpoint` is
/// set, spans are also exported over OTLP.
pub fn init_logging(log_level: &str, tracing_endpoint: Option<&str>) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .map_err(|e| anyhow::anyhow!("Failed to create env filter: {}", e))?;

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_filter(env_filter);

    let registry = tracing_subscriber::registry().with(json_layer);

    if let Some(endpoint) = tracing_endpoint {
        let tracer = init_tracer(endpoint)?;
        let telemetry_layer = tracing_opentelemetry::layer().with_tracer(tracer);
        registry
            .with(telemetry_layer)
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to initialize tracing subscriber: {}", e))?;
    } else {
        registry
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to initialize tracing subscriber: {}", e))?;
    }

    tracing::info!(
        log_level = log_level,
        tracing_endpoint = tracing_endpoint,
        "Structured logging initialized"
    );

    Ok(())
}

/// Initialize OpenTelemetry tracer with OTLP exporter
fn init_tracer(endpoint: &str) -> Result<opentelemetry_sdk::trace::Tracer> {
    use opentelemetry_sdk::runtime::Tokio;

    let exporter = opentelemetry_otlp::new_exporter()
        .tonic()
        .with_endpoint(endpoint)
        .build_span_exporter()
        .map_err(|e| anyhow::anyhow!("Failed to build span exporter: {}", e))?;

    let tracer_provider = TracerProvider::builder()
        .with_batch_exporter(exporter, Tokio)
        .with_config(
            opentelemetry_sdk::trace::Config::default()
                .with_sampler(Sampler::AlwaysOn)
                .with_id_generator(RandomIdGenerator::default())
                .with_resource(Resource::new(vec![
                    KeyValue::new("service.name", SERVICE_NAME),
                    KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
                ])),
        )
        .build();

    global::set_tracer_provider(tracer_provider.clone());
    let tracer = tracer_provider.tracer(SERVICE_NAME);

    tracing::info!(endpoint = endpoint, "OpenTelemetry OTLP exporter initialized");

    Ok(tracer)
}

/// Flush remaining spans on shutdown
pub fn shutdown_tracer() {
    global::shutdown_tracer_provider();
}

/// Install the Prometheus recorder and describe the dashboard metrics
///
/// The returned handle renders the exposition text for `/metrics`.
pub fn init_metrics() -> Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("Failed to install Prometheus recorder: {}", e))?;

    describe_metrics();

    Ok(handle)
}

/// Register help text for the dashboard metrics on the active recorder
pub fn describe_metrics() {
    describe_counter!(
        "executors_fetch_total",
        "Executor list fetches that returned rows"
    );
    describe_counter!(
        "executors_fetch_failed_total",
        "Executor list fetches that failed"
    );
    describe_histogram!(
        "executors_fetch_duration_seconds",
        "Duration of executor list fetches in seconds"
    );
    describe_gauge!("executors_rows", "Rows returned by the last executor fetch");
}

#[inline]
pub fn record_fetch_success(rows: usize) {
    counter!("executors_fetch_total").increment(1);
    gauge!("executors_rows").set(rows as f64);
}

#[inline]
pub fn record_fetch_failure(reason: &'static str) {
    counter!("executors_fetch_failed_total", "reason" => reason).increment(1);
}

#[inline]
pub fn record_fetch_duration(duration_seconds: f64) {
    histogram!("executors_fetch_duration_seconds").record(duration_seconds);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_installs_subscriber_once() {
        assert!(init_logging("info", None).is_ok());

        let err = init_logging("debug", None).unwrap_err();
        assert!(err
            .to_string()
            .contains("Failed to initialize tracing subscriber"));
    }

    #[test]
    fn test_fetch_metrics_are_rendered() {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();

        metrics::with_local_recorder(&recorder, || {
            describe_metrics();
            record_fetch_success(3);
            record_fetch_success(5);
            record_fetch_failure("status");
            record_fetch_duration(0.25);
        });

        let rendered = handle.render();
        assert!(rendered
            .contains("# HELP executors_fetch_total Executor list fetches that returned rows"));
        assert!(rendered.contains("executors_fetch_total 2"));
        assert!(rendered.contains("executors_fetch_failed_total{reason=\"status\"} 1"));
        assert!(rendered.contains("executors_rows 5"));
        assert!(rendered.contains("executors_fetch_duration_seconds_count 1"));
    }

    #[test]
    fn test_failure_reasons_are_separate_series() {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();

        metrics::with_local_recorder(&recorder, || {
            record_fetch_failure("status");
            record_fetch_failure("decode");
            record_fetch_failure("decode");
        });

        let rendered = handle.render();
        assert!(rendered.contains("executors_fetch_failed_total{reason=\"status\"} 1"));
        assert!(rendered.contains("executors_fetch_failed_total{reason=\"decode\"} 2"));
        assert!(!rendered.contains("executors_fetch_total "));
    }
}
