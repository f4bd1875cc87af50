// Telemetry module for structured logging and metrics

use anyhow::Result;
use metrics::{counter, describe_counter};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Initialize structured logging
///
/// This function sets up the tracing subscriber with:
/// - Log levels from `RUST_LOG`, falling back to the configured level
/// - JSON formatting with span context when `json` is set, compact text otherwise
pub fn init_logging(log_level: &str, json: bool) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .map_err(|e| anyhow::anyhow!("Failed to create env filter: {}", e))?;

    let fmt_layer = if json {
        fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_filter(env_filter)
            .boxed()
    } else {
        fmt::layer()
            .compact()
            .with_target(false)
            .with_filter(env_filter)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing subscriber: {}", e))?;

    tracing::info!(log_level = log_level, json = json, "Structured logging initialized");

    Ok(())
}

/// Install the Prometheus recorder and describe the booking metrics
///
/// The returned handle renders the exposition text served at `/metrics`.
pub fn init_metrics() -> Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("Failed to install Prometheus recorder: {}", e))?;

    describe_counter!(
        "booking_created_total",
        "Total number of venues, artists and shows created"
    );
    describe_counter!(
        "booking_create_failed_total",
        "Total number of rejected or failed create submissions"
    );
    describe_counter!(
        "booking_update_failed_total",
        "Total number of rejected or failed edit submissions"
    );
    describe_counter!(
        "booking_deleted_total",
        "Total number of venues and artists deleted"
    );

    tracing::info!("Prometheus metrics recorder installed");
    Ok(handle)
}

#[inline]
pub fn record_created(entity: &'static str) {
    counter!("booking_created_total", "entity" => entity).increment(1);
}

#[inline]
pub fn record_create_failure(entity: &'static str, reason: &'static str) {
    counter!(
        "booking_create_failed_total",
        "entity" => entity,
        "reason" => reason
    )
    .increment(1);
}

#[inline]
pub fn record_update_failure(entity: &'static str, reason: &'static str) {
    counter!(
        "booking_update_failed_total",
        "entity" => entity,
        "reason" => reason
    )
    .increment(1);
}

#[inline]
pub fn record_deleted(entity: &'static str) {
    counter!("booking_deleted_total", "entity" => entity).increment(1);
}
