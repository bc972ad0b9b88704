//! Vigil Session Management
//!
//! A session is one independently monitored, addressable unit of content
//! with its own rule set. The manager owns the ordered collection: pinned
//! sessions form a contiguous prefix, exactly one session is current (or
//! none), and ids are never reused for the process lifetime.

mod error;
mod manager;
mod session;

pub use error::SessionError;
pub use manager::{EditError, SessionManager};
pub use session::{Session, SessionId, DEFAULT_POLL_INTERVAL_MS};

pub type Result<T> = std::result::Result<T, SessionError>;
