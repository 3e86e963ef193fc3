//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Board source fetches (attempts, duration)
//! - Loaded collection sizes
//! - Board views built

use once_cell::sync::Lazy;
use prometheus::{HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts};

// =============================================================================
// Source Metrics
// =============================================================================

/// Board fetches by result.
pub static SOURCE_FETCHES: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("kanban_source_fetches_total", "Total board data fetches"),
        &["source", "result"], // result: "success", "failure"
    )
    .unwrap()
});

/// Board fetch duration in seconds.
pub static SOURCE_FETCH_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "kanban_source_fetch_duration_seconds",
            "Duration of board data fetches",
        )
        .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
        &["source", "result"],
    )
    .unwrap()
});

// =============================================================================
// Board Metrics
// =============================================================================

/// Tickets currently loaded.
pub static TICKETS_LOADED: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new("kanban_tickets_loaded", "Number of tickets currently loaded").unwrap()
});

/// Users currently loaded.
pub static USERS_LOADED: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new("kanban_users_loaded", "Number of users currently loaded").unwrap()
});

/// Board views built by grouping.
pub static VIEWS_BUILT: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("kanban_views_built_total", "Board views built"),
        &["group_by"],
    )
    .unwrap()
});

/// All core metrics, for registration with a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(SOURCE_FETCHES.clone()),
        Box::new(SOURCE_FETCH_DURATION.clone()),
        Box::new(TICKETS_LOADED.clone()),
        Box::new(USERS_LOADED.clone()),
        Box::new(VIEWS_BUILT.clone()),
    ]
}
