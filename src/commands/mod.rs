// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod onboarding;
pub mod budgets;
pub mod costs;
pub mod expenses;
pub mod subcategories;
pub mod reports;
pub mod preferences;
pub mod sync;
pub mod exporter;
pub mod doctor;

use anyhow::{Context, Result};
use rusqlite::Connection;

use crate::db::{load_settings, Settings};
use crate::models::BudgetRecord;
use crate::remote::{load_with_fallback, save_everywhere, RemoteStore};
use crate::store::SqliteStore;
use crate::utils::{current_month, parse_month};

/// What every command runs against: the local store, the optional remote,
/// and the user's preferences.
pub struct Session<'c> {
    pub conn: &'c Connection,
    pub store: SqliteStore<'c>,
    pub remote: Option<Box<dyn RemoteStore>>,
    pub settings: Settings,
}

impl<'c> Session<'c> {
    pub fn new(conn: &'c Connection, remote: Option<Box<dyn RemoteStore>>) -> Result<Self> {
        let settings = load_settings(conn)?;
        Ok(Session {
            conn,
            store: SqliteStore::new(conn),
            remote,
            settings,
        })
    }

    pub fn remote(&self) -> Option<&dyn RemoteStore> {
        self.remote.as_deref()
    }

    /// The current record: the remote copy for the locally known user when
    /// sync is on, otherwise the local one.
    pub fn try_load(&self) -> Result<Option<BudgetRecord>> {
        Ok(load_with_fallback(self.remote(), &self.store)?)
    }

    pub fn load(&self) -> Result<BudgetRecord> {
        self.try_load()?
            .context("No budget found; run `badbudget init` first")
    }

    pub fn save(&self, record: &BudgetRecord) -> Result<()> {
        save_everywhere(self.remote(), &self.store, record).context("Failed to save budget")?;
        Ok(())
    }
}

pub(crate) fn month_or_current(sub: &clap::ArgMatches) -> Result<String> {
    match sub.get_one::<String>("month") {
        Some(m) => parse_month(m),
        None => Ok(current_month()),
    }
}
