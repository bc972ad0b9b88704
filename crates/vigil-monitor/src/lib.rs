//! Vigil Content Monitor
//!
//! One cancellable poll task per session, indexed by `SessionId`. Each task
//! samples the session's rendered text on its own interval, evaluates the
//! session's rule set against the trailing window, and pushes alert events
//! into a single mpsc channel drained by the supervisor.

mod error;
mod monitor;
mod source;

pub use error::SampleError;
pub use monitor::{AlertEvent, ContentMonitor, DEFAULT_SAMPLE_TIMEOUT_MS};
pub use source::TextSource;
