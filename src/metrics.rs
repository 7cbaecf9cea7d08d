//! Prometheus metrics & middleware helper.

use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
use once_cell::sync::Lazy;

/// Process-wide Prometheus middleware handle, shared by every worker.
pub static METRICS: Lazy<PrometheusMetrics> = Lazy::new(|| {
    PrometheusMetricsBuilder::new("matchday")
        .endpoint("/metrics") // exposed URL
        .build()
        .expect("metrics builder")
});
