//! Credential cache for authentication challenges

use rusqlite::OptionalExtension;
use serde::{Deserialize, Serialize};

use vigil_storage::Database;

use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub host: String,
    pub username: String,
    pub password: String,
}

/// Host-keyed credential cache.
///
/// Lookup is by exact host string; "example.com" and "example.com:8080" are
/// different keys. One credential per host, last write wins.
pub struct CredentialStore {
    db: Database,
}

impl CredentialStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub fn get(&self, host: &str) -> Result<Option<Credential>> {
        Ok(self.db.with_connection(|conn| {
            let credential = conn
                .query_row(
                    "SELECT host, username, password FROM credentials WHERE host = ?1",
                    [host],
                    |row| {
                        Ok(Credential {
                            host: row.get(0)?,
                            username: row.get(1)?,
                            password: row.get(2)?,
                        })
                    },
                )
                .optional()?;
            Ok(credential)
        })?)
    }

    pub fn put(&self, host: &str, username: &str, password: &str) -> Result<()> {
        let updated_at = chrono::Utc::now().to_rfc3339();
        Ok(self.db.with_connection(|conn| {
            conn.execute(
                "INSERT OR REPLACE INTO credentials (host, username, password, updated_at)
                 VALUES (?1, ?2, ?3, ?4)",
                rusqlite::params![host, username, password, updated_at],
            )?;
            Ok(())
        })?)
    }

    /// Drop the stored credential for `host`. Returns `false` when none was
    /// stored.
    pub fn forget(&self, host: &str) -> Result<bool> {
        Ok(self.db.with_connection(|conn| {
            let rows = conn.execute("DELETE FROM credentials WHERE host = ?1", [host])?;
            Ok(rows > 0)
        })?)
    }
}
