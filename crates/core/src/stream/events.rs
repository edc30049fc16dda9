//! Synthetic event payloads for the demo streams.

use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

const LOG_LEVELS: [&str; 4] = ["INFO", "WARNING", "ERROR", "DEBUG"];
const SERVICES: [&str; 4] = [
    "auth-service",
    "user-service",
    "order-service",
    "payment-service",
];

/// One synthetic log line.
#[derive(Debug, Clone, Serialize)]
pub struct LogEvent {
    pub timestamp: String,
    pub level: String,
    pub service: String,
    pub message: String,
    pub request_id: String,
}

impl LogEvent {
    /// Build the `i`-th log event from the given entropy source.
    pub fn sample<R: Rng>(i: usize, rng: &mut R) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            level: LOG_LEVELS[rng.gen_range(0..LOG_LEVELS.len())].to_string(),
            service: SERVICES[rng.gen_range(0..SERVICES.len())].to_string(),
            message: format!("Log message {i}"),
            request_id: format!("req-{}", rng.gen_range(1000..=9999)),
        }
    }
}

/// One synthetic system metrics reading.
#[derive(Debug, Clone, Serialize)]
pub struct SystemMetrics {
    pub timestamp: String,
    pub cpu_usage: f64,
    pub memory_usage: f64,
    pub disk_usage: f64,
    pub active_connections: u32,
    pub requests_per_minute: u32,
}

impl SystemMetrics {
    pub fn sample<R: Rng>(rng: &mut R) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            cpu_usage: rng.gen_range(10.0..90.0),
            memory_usage: rng.gen_range(20.0..80.0),
            disk_usage: rng.gen_range(30.0..70.0),
            active_connections: rng.gen_range(50..=200),
            requests_per_minute: rng.gen_range(100..=1000),
        }
    }
}

/// Factory for a log stream: each call yields the next log line.
pub fn log_events() -> impl FnMut(usize) -> LogEvent {
    let mut rng = StdRng::from_entropy();
    move |i| LogEvent::sample(i, &mut rng)
}

/// Factory for a monitoring stream of system metrics readings.
pub fn system_metrics() -> impl FnMut(usize) -> SystemMetrics {
    let mut rng = StdRng::from_entropy();
    move |_| SystemMetrics::sample(&mut rng)
}
