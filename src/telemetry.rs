//! Metric descriptions.
//!
//! Descriptions are registered once per process; recording happens at the
//! call sites in the cache facade. Installing a recorder (and a tracing
//! subscriber) is the host application's job.

use std::sync::Once;

use metrics::{Unit, describe_counter};

static METRIC_DESCRIPTIONS: Once = Once::new();

pub const METRIC_CACHE_HIT_TOTAL: &str = "sfoglia_cache_hit_total";
pub const METRIC_CACHE_MISS_TOTAL: &str = "sfoglia_cache_miss_total";
pub const METRIC_CACHE_ELEMENTS_WRITTEN_TOTAL: &str = "sfoglia_cache_elements_written_total";

/// Register metric metadata with the installed recorder.
pub fn describe_metrics() {
    METRIC_DESCRIPTIONS.call_once(|| {
        describe_counter!(
            METRIC_CACHE_HIT_TOTAL,
            Unit::Count,
            "Total number of document reads whose primary key resolved."
        );
        describe_counter!(
            METRIC_CACHE_MISS_TOTAL,
            Unit::Count,
            "Total number of document reads whose primary key was absent."
        );
        describe_counter!(
            METRIC_CACHE_ELEMENTS_WRITTEN_TOTAL,
            Unit::Count,
            "Total number of cache elements written by save operations."
        );
    });
}
