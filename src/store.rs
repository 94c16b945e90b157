// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Local persistence of the budget record.

use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, warn};

use crate::error::Result;
use crate::models::BudgetRecord;

pub const RECORD_KEY: &str = "badBudgetData";

/// Where a whole budget record is kept between runs.
pub trait RecordStore {
    /// `None` when nothing has been saved yet.
    fn load(&self) -> Result<Option<BudgetRecord>>;
    fn save(&self, record: &BudgetRecord) -> Result<()>;
    fn clear(&self) -> Result<()>;
}

/// Keeps the record as a JSON document in the `kv` table.
pub struct SqliteStore<'c> {
    conn: &'c Connection,
}

impl<'c> SqliteStore<'c> {
    /// Expects the schema from [`crate::db::init_schema`].
    pub fn new(conn: &'c Connection) -> Self {
        SqliteStore { conn }
    }
}

impl RecordStore for SqliteStore<'_> {
    fn load(&self) -> Result<Option<BudgetRecord>> {
        let raw: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM kv WHERE key=?1",
                params![RECORD_KEY],
                |r| r.get(0),
            )
            .optional()?;
        let Some(raw) = raw else {
            debug!("no stored budget record");
            return Ok(None);
        };
        match serde_json::from_str::<BudgetRecord>(&raw) {
            Ok(record) => {
                debug!(user = %record.user.id, "loaded budget record");
                Ok(Some(record))
            }
            Err(err) => {
                warn!(error = %err, "stored budget record is unreadable; treating as absent");
                Ok(None)
            }
        }
    }

    fn save(&self, record: &BudgetRecord) -> Result<()> {
        let body = serde_json::to_string(record)?;
        self.conn.execute(
            "INSERT INTO kv(key, value, updated_at) VALUES(?1, ?2, datetime('now'))
             ON CONFLICT(key) DO UPDATE SET value=excluded.value, updated_at=excluded.updated_at",
            params![RECORD_KEY, body],
        )?;
        debug!(user = %record.user.id, "saved budget record");
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.conn
            .execute("DELETE FROM kv WHERE key=?1", params![RECORD_KEY])?;
        debug!("cleared budget record");
        Ok(())
    }
}
