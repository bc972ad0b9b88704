//! Multiplexed status summary

use serde::{Deserialize, Serialize};

use vigil_sessions::SessionId;

/// Rendered snapshot of the aggregated status notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    /// `"idle"` when no session is status-active, `"running"` otherwise
    pub title: String,
    /// One line per status-active session, insertion order
    pub lines: Vec<String>,
    pub count: usize,
}

/// Insertion-ordered mapping from session id to its status line.
///
/// Feeds the single persistent "ongoing" notification that multiplexes all
/// kept-alive sessions. Rendering is pure; the sink re-renders on every
/// change but must never re-alert the user for a content-only update.
#[derive(Debug, Default)]
pub struct StatusAggregator {
    entries: Vec<(SessionId, String)>,
}

impl StatusAggregator {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Insert or update the status line for `id`. An existing entry keeps
    /// its position; a new one is appended.
    pub fn upsert(&mut self, id: SessionId, line: String) {
        match self.entries.iter_mut().find(|(other, _)| *other == id) {
            Some(entry) => entry.1 = line,
            None => self.entries.push((id, line)),
        }
    }

    /// Remove the entry for `id`, if present.
    pub fn remove(&mut self, id: &SessionId) {
        self.entries.retain(|(other, _)| other != id);
    }

    pub fn contains(&self, id: &SessionId) -> bool {
        self.entries.iter().any(|(other, _)| other == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render the current summary. Idempotent: repeated calls without a
    /// mutation in between yield identical output.
    pub fn render(&self) -> Summary {
        let title = if self.entries.is_empty() {
            "idle"
        } else {
            "running"
        };

        Summary {
            title: title.to_string(),
            lines: self.entries.iter().map(|(_, line)| line.clone()).collect(),
            count: self.entries.len(),
        }
    }
}
