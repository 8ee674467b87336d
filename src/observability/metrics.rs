//! Navigation metrics.
//!
//! # Metrics
//! - `router_navigations_total` (counter): settled navigations by outcome
//! - `router_guard_denials_total` (counter): denials by route entry (the
//!   not-found path for unknown addresses)
//! - `router_render_duration_seconds` (histogram): provider latency by result
//! - `router_hook_failures_total` (counter): hook failures by stage
//! - `router_routes` (gauge): registered routes
//!
//! Recorded through the `metrics` facade; they are no-ops until the host
//! application installs a recorder.

use std::time::Instant;

use crate::error::HookStage;
use crate::routing::NavigationStatus;

pub fn record_navigation(status: NavigationStatus) {
    metrics::counter!("router_navigations_total", "outcome" => status.as_str()).increment(1);
}

/// `route` must be a registered path, never the requested one.
pub fn record_guard_denial(route: &str) {
    metrics::counter!("router_guard_denials_total", "route" => route.to_string()).increment(1);
}

pub fn record_render(started: Instant, ok: bool) {
    let result = if ok { "ok" } else { "error" };
    metrics::histogram!("router_render_duration_seconds", "result" => result)
        .record(started.elapsed().as_secs_f64());
}

pub fn record_hook_failure(stage: HookStage) {
    metrics::counter!("router_hook_failures_total", "hook" => stage.as_str()).increment(1);
}

pub fn record_route_count(count: usize) {
    metrics::gauge!("router_routes").set(count as f64);
}
