//! Vigil Storage Layer
//!
//! SQLite-based persistence for the two pieces of state that outlive the
//! process: the visit history and the credential cache. Session state is
//! deliberately ephemeral and never touches disk.

mod database;
mod error;
mod migrations;

pub use database::Database;
pub use error::StorageError;

pub type Result<T> = std::result::Result<T, StorageError>;
