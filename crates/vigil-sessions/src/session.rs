//! Session data structure

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use vigil_rules::RuleSet;

/// Default sampling period for a new session, in milliseconds.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 30_000;

/// Process-unique session identifier.
///
/// The join key between the manager, the content monitor and the status
/// aggregator. Generated at creation, immutable, never reused.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(String);

impl SessionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Unique identifier
    pub id: SessionId,
    /// User-facing label
    pub alias: String,
    /// Normalized remote target location
    pub address: String,
    /// Label shown in aggregated notifications (defaults to `alias`)
    pub display_name: String,
    /// Monitor rules, owned exclusively by this session
    pub rules: RuleSet,
    /// Sampling period override
    pub poll_interval_ms: u64,
    /// Pinned sessions cannot be closed and sort before unpinned ones
    pub pinned: bool,
    /// Whether this session contributes to the aggregated status summary
    pub status_active: bool,
    /// When the session was created
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn new(alias: String, address: String, rules: RuleSet) -> Self {
        Self {
            id: SessionId::generate(),
            display_name: alias.clone(),
            alias,
            address,
            rules,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            pinned: false,
            status_active: false,
            created_at: Utc::now(),
        }
    }

    /// The line this session contributes to the aggregated status summary.
    pub fn status_line(&self) -> String {
        format!("{}: running", self.display_name)
    }
}
