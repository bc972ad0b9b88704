//! Session error types

use thiserror::Error;

use crate::session::SessionId;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Session not found: {0}")]
    NotFound(SessionId),

    #[error("Session is pinned and cannot be closed: {0}")]
    Pinned(SessionId),
}
