//! Session Manager
//!
//! Owns the ordered session collection and the current-selection pointer.
//! Pure in-memory state: persistence, monitoring and notification wiring
//! live above this layer so that a failed operation here can never leave
//! another component half-registered.
//!
//! Ordering invariant: pinned sessions occupy a contiguous prefix of the
//! list; unpinned sessions follow in creation/move order. A pin or unpin
//! moves the session to the partition boundary nearest its previous
//! position and never reshuffles unrelated sessions.

use std::collections::HashMap;

use vigil_rules::RuleSet;

use crate::error::SessionError;
use crate::session::{Session, SessionId};
use crate::Result;

pub struct SessionManager {
    /// Live sessions by id
    sessions: HashMap<SessionId, Session>,
    /// Display order; pinned prefix, then unpinned
    order: Vec<SessionId>,
    /// Currently selected session, or none when the list is empty
    current: Option<SessionId>,
    /// Default rule template cloned by value into every new session
    template: RuleSet,
}

impl SessionManager {
    pub fn new(template: RuleSet) -> Self {
        Self {
            sessions: HashMap::new(),
            order: Vec::new(),
            current: None,
            template,
        }
    }

    // === Template ===

    pub fn template(&self) -> &RuleSet {
        &self.template
    }

    pub fn set_template(&mut self, template: RuleSet) {
        self.template = template;
    }

    // === Accessors ===

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, id: &SessionId) -> bool {
        self.sessions.contains_key(id)
    }

    pub fn get(&self, id: &SessionId) -> Result<&Session> {
        self.sessions
            .get(id)
            .ok_or_else(|| SessionError::NotFound(id.clone()))
    }

    pub fn current(&self) -> Option<&Session> {
        self.current.as_ref().and_then(|id| self.sessions.get(id))
    }

    pub fn current_id(&self) -> Option<&SessionId> {
        self.current.as_ref()
    }

    /// Sessions in display order.
    pub fn ordered(&self) -> Vec<&Session> {
        self.order
            .iter()
            .filter_map(|id| self.sessions.get(id))
            .collect()
    }

    fn get_mut(&mut self, id: &SessionId) -> Result<&mut Session> {
        self.sessions
            .get_mut(id)
            .ok_or_else(|| SessionError::NotFound(id.clone()))
    }

    /// Index of the first unpinned session (== number of pinned sessions).
    fn pinned_boundary(&self) -> usize {
        self.order
            .iter()
            .take_while(|id| {
                self.sessions
                    .get(id)
                    .map(|s| s.pinned)
                    .unwrap_or(false)
            })
            .count()
    }

    // === Lifecycle ===

    /// Insert a new session immediately after the last pinned session (at
    /// the end of the list when nothing is pinned) and make it current.
    pub fn open(&mut self, session: Session) -> SessionId {
        let id = session.id.clone();

        let boundary = self.pinned_boundary();
        let insert_at = if boundary == 0 {
            self.order.len()
        } else {
            boundary
        };

        self.sessions.insert(id.clone(), session);
        self.order.insert(insert_at, id.clone());
        self.current = Some(id.clone());

        tracing::info!(session_id = %id, "Opened session");

        id
    }

    /// Make `id` the current session.
    pub fn switch_to(&mut self, id: &SessionId) -> Result<&Session> {
        if !self.sessions.contains_key(id) {
            return Err(SessionError::NotFound(id.clone()));
        }
        self.current = Some(id.clone());
        tracing::debug!(session_id = %id, "Switched session");
        Ok(&self.sessions[id])
    }

    /// Remove `id` from the collection and fix the current pointer.
    ///
    /// Pinned sessions are rejected before any mutation. When the closed
    /// session was current, the new current is the immediately preceding
    /// session in order, else the first remaining, else none.
    pub fn close(&mut self, id: &SessionId) -> Result<Session> {
        let session = self.get(id)?;
        if session.pinned {
            return Err(SessionError::Pinned(id.clone()));
        }

        let index = self
            .order
            .iter()
            .position(|other| other == id)
            .ok_or_else(|| SessionError::NotFound(id.clone()))?;

        self.order.remove(index);
        let removed = self
            .sessions
            .remove(id)
            .ok_or_else(|| SessionError::NotFound(id.clone()))?;

        if self.current.as_ref() == Some(id) {
            self.current = if self.order.is_empty() {
                None
            } else if index > 0 {
                Some(self.order[index - 1].clone())
            } else {
                Some(self.order[0].clone())
            };
        }

        tracing::info!(session_id = %id, "Closed session");

        Ok(removed)
    }

    // === Mutations ===

    /// Pin or unpin a session, moving it to the partition boundary.
    ///
    /// Pinning lands at the end of the pinned block; unpinning at the start
    /// of the unpinned block. Either way the destination index is the count
    /// of pinned sessions once this one's flag is updated, so all other
    /// sessions keep their relative order.
    pub fn set_pinned(&mut self, id: &SessionId, pinned: bool) -> Result<()> {
        {
            let session = self.get_mut(id)?;
            if session.pinned == pinned {
                return Ok(());
            }
            session.pinned = pinned;
        }

        let index = self
            .order
            .iter()
            .position(|other| other == id)
            .ok_or_else(|| SessionError::NotFound(id.clone()))?;
        let moved = self.order.remove(index);

        let boundary = self.pinned_boundary();
        self.order.insert(boundary, moved);

        tracing::debug!(session_id = %id, pinned, "Repartitioned session");

        Ok(())
    }

    /// Toggle the aggregated-status flag. Returns the previous value so the
    /// caller can tell a real transition from a no-op.
    pub fn set_status_active(&mut self, id: &SessionId, active: bool) -> Result<bool> {
        let session = self.get_mut(id)?;
        let previous = session.status_active;
        session.status_active = active;
        Ok(previous)
    }

    pub fn update_rules(&mut self, id: &SessionId, rules: RuleSet) -> Result<()> {
        self.get_mut(id)?.rules = rules;
        Ok(())
    }

    pub fn set_poll_interval(&mut self, id: &SessionId, interval_ms: u64) -> Result<()> {
        self.get_mut(id)?.poll_interval_ms = interval_ms;
        Ok(())
    }

    pub fn set_display_name(&mut self, id: &SessionId, name: String) -> Result<()> {
        self.get_mut(id)?.display_name = name;
        Ok(())
    }

    pub fn add_rule(
        &mut self,
        id: &SessionId,
        keyword: &str,
        threshold: u32,
        message: &str,
    ) -> std::result::Result<(), EditError> {
        let session = self.get_mut(id)?;
        session.rules.add(keyword, threshold, message)?;
        Ok(())
    }

    pub fn remove_rule(
        &mut self,
        id: &SessionId,
        index: usize,
    ) -> std::result::Result<(), EditError> {
        let session = self.get_mut(id)?;
        session.rules.remove(index)?;
        Ok(())
    }
}

/// Error for rule edits addressed at a session: either the session is
/// missing or the edit itself is invalid.
#[derive(Debug, thiserror::Error)]
pub enum EditError {
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Rule(#[from] vigil_rules::RuleError),
}
