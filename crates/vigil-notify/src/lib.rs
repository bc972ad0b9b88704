//! Vigil Notifications
//!
//! Two small pieces of delivery policy: a process-wide cooldown gate that
//! rate-limits user-visible alerts, and the aggregator that multiplexes all
//! status-active sessions into one persistent summary. Both are plain owned
//! objects held by the top-level supervisor; there are no hidden statics.

mod aggregator;
mod cooldown;
mod sink;

pub use aggregator::{StatusAggregator, Summary};
pub use cooldown::{NotificationCooldown, DEFAULT_COOLDOWN_MS};
pub use sink::NotificationSink;
