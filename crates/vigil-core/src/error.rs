//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Storage error: {0}")]
    Storage(#[from] vigil_storage::StorageError),

    #[error("Session error: {0}")]
    Session(#[from] vigil_sessions::SessionError),

    #[error("Rule error: {0}")]
    Rule(#[from] vigil_rules::RuleError),

    #[error("Rule edit error: {0}")]
    Edit(#[from] vigil_sessions::EditError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid address: {0}")]
    Address(String),

    #[error("Configuration error: {0}")]
    Config(String),
}
