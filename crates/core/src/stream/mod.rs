pub mod events;
pub mod producer;

pub use events::{log_events, system_metrics, LogEvent, SystemMetrics};
pub use producer::{generate, generate_for};
