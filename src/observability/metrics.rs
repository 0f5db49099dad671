//! Metrics collection.
//!
//! # Metrics
//! - `service_wrapper_lifecycle_events_total` (counter): transitions by `event`
//! - `service_wrapper_lifecycle_failures_total` (counter): sequences ended by `kill`

pub const LIFECYCLE_EVENTS: &str = "service_wrapper_lifecycle_events_total";
pub const LIFECYCLE_FAILURES: &str = "service_wrapper_lifecycle_failures_total";

pub fn record_lifecycle_event(event: &'static str) {
    metrics::counter!(LIFECYCLE_EVENTS, "event" => event).increment(1);
}

pub fn record_lifecycle_failure() {
    metrics::counter!(LIFECYCLE_FAILURES).increment(1);
}
