//! Visit history store

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use vigil_storage::Database;

use crate::Result;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: i64,
    pub alias: String,
    pub address: String,
    pub visited_at: DateTime<Utc>,
}

/// Persistent record of previously opened sessions, most recent first.
///
/// Entries are keyed by the (alias, address) pair: recording an existing
/// pair refreshes its timestamp instead of inserting a duplicate, which
/// moves it to the front of the recency order.
pub struct HistoryStore {
    db: Database,
}

impl HistoryStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Record a visit to `(alias, address)`.
    pub fn record(&self, alias: &str, address: &str) -> Result<()> {
        Ok(self.db.with_connection(|conn| {
            let existing: Option<i64> = conn
                .query_row(
                    "SELECT id FROM history WHERE alias = ?1 AND address = ?2",
                    rusqlite::params![alias, address],
                    |row| row.get(0),
                )
                .ok();

            let now = Utc::now().to_rfc3339();

            if let Some(id) = existing {
                conn.execute(
                    "UPDATE history SET visited_at = ?1 WHERE id = ?2",
                    rusqlite::params![now, id],
                )?;
            } else {
                conn.execute(
                    "INSERT INTO history (alias, address, visited_at) VALUES (?1, ?2, ?3)",
                    rusqlite::params![alias, address, now],
                )?;
            }

            Ok(())
        })?)
    }

    /// Most recently visited entries, newest first.
    pub fn recent(&self, limit: usize) -> Result<Vec<HistoryEntry>> {
        Ok(self.db.with_connection(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, alias, address, visited_at FROM history
                 ORDER BY visited_at DESC, id DESC
                 LIMIT ?1",
            )?;

            let entries: Vec<HistoryEntry> = stmt
                .query_map([limit as i64], |row| {
                    let visited_str: String = row.get(3)?;
                    let visited_at = DateTime::parse_from_rfc3339(&visited_str)
                        .map(|dt| dt.with_timezone(&Utc))
                        .unwrap_or_else(|_| Utc::now());

                    Ok(HistoryEntry {
                        id: row.get(0)?,
                        alias: row.get(1)?,
                        address: row.get(2)?,
                        visited_at,
                    })
                })?
                .filter_map(|r| r.ok())
                .collect();

            Ok(entries)
        })?)
    }

    /// Delete one entry. Returns `false` when no such pair was stored.
    pub fn remove(&self, alias: &str, address: &str) -> Result<bool> {
        Ok(self.db.with_connection(|conn| {
            let rows = conn.execute(
                "DELETE FROM history WHERE alias = ?1 AND address = ?2",
                rusqlite::params![alias, address],
            )?;
            Ok(rows > 0)
        })?)
    }

    /// Delete every entry.
    pub fn clear_all(&self) -> Result<()> {
        Ok(self.db.with_connection(|conn| {
            conn.execute("DELETE FROM history", [])?;
            Ok(())
        })?)
    }
}
