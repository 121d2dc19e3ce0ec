// src/utils/prometheus_metrics.rs

use once_cell::sync::Lazy;
use prometheus::{
    register_counter, register_counter_vec, register_histogram_vec, Counter, CounterVec,
    HistogramVec,
};

pub static COMMENTS_RECEIVED_TOTAL: Lazy<Counter> = Lazy::new(|| {
    register_counter!(
        "sieve_comments_received_total",
        "Total number of comments handed to the filter pipeline."
    )
    .expect("Failed to register sieve_comments_received_total counter")
});

pub static COMMENTS_RETAINED_TOTAL: Lazy<Counter> = Lazy::new(|| {
    register_counter!(
        "sieve_comments_retained_total",
        "Total number of comments that survived every enabled stage."
    )
    .expect("Failed to register sieve_comments_retained_total counter")
});

pub static COMMENTS_REMOVED_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "sieve_comments_removed_total",
        "Total number of comments removed, by removal reason.",
        &["reason"]
    )
    .expect("Failed to register sieve_comments_removed_total counter")
});

pub static STAGE_DURATION_SECONDS: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "sieve_stage_duration_seconds",
        "Histogram of per-stage run time over a whole batch.",
        &["stage"]
    )
    .expect("Failed to register sieve_stage_duration_seconds histogram")
});

pub static CAPABILITY_FAILURES_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "sieve_capability_failures_total",
        "Per-comment model failures that were resolved by keeping the comment.",
        &["stage"]
    )
    .expect("Failed to register sieve_capability_failures_total counter")
});

pub static STAGES_SKIPPED_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "sieve_stages_skipped_total",
        "Enabled stages that could not run because a capability was missing.",
        &["stage"]
    )
    .expect("Failed to register sieve_stages_skipped_total counter")
});
