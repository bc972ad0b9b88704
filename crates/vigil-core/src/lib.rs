//! Vigil Core
//!
//! Top-level composition layer for the Vigil session monitor. The
//! supervisor owns every component and is the single entry point for
//! embedders: session lifecycle, rule edits, alert routing, the aggregated
//! status summary and the persistent stores all go through it.

mod config;
mod credentials;
mod error;
mod history;
mod renderer;
mod supervisor;

pub use config::Config;
pub use credentials::{Credential, CredentialStore};
pub use error::CoreError;
pub use history::{HistoryEntry, HistoryStore};
pub use renderer::{PageHandle, Renderer};
pub use supervisor::Supervisor;

// Re-export core components
pub use vigil_monitor::{AlertEvent, ContentMonitor, SampleError, TextSource, DEFAULT_SAMPLE_TIMEOUT_MS};
pub use vigil_notify::{
    NotificationCooldown, NotificationSink, StatusAggregator, Summary, DEFAULT_COOLDOWN_MS,
};
pub use vigil_rules::{MonitorRule, RuleError, RuleSet, WINDOW_LINES};
pub use vigil_sessions::{
    EditError, Session, SessionError, SessionId, SessionManager, DEFAULT_POLL_INTERVAL_MS,
};
pub use vigil_storage::{Database, StorageError};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
