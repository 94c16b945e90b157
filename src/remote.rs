// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Optional remote copy of the budget record, keyed by user id.
//!
//! The hosted backend exposes a PostgREST table `user_budgets(user_id,
//! budget_data, updated_at)`. The remote copy wins on load when it exists;
//! the local store is always written first on save.

use chrono::Utc;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::models::BudgetRecord;
use crate::store::RecordStore;

pub const TABLE: &str = "user_budgets";

pub trait RemoteStore {
    fn fetch_by_user_id(&self, user_id: &str) -> Result<Option<BudgetRecord>>;
    fn upsert(&self, user_id: &str, record: &BudgetRecord) -> Result<()>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteConfig {
    pub url: String,
    pub key: String,
}

impl RemoteConfig {
    /// Remote sync is on only when both the URL and the key are set.
    pub fn from_parts(url: Option<&str>, key: Option<&str>) -> Option<RemoteConfig> {
        let url = url.map(str::trim).filter(|s| !s.is_empty())?;
        let key = key.map(str::trim).filter(|s| !s.is_empty())?;
        Some(RemoteConfig {
            url: url.trim_end_matches('/').to_string(),
            key: key.to_string(),
        })
    }

    pub fn from_matches(m: &clap::ArgMatches) -> Option<RemoteConfig> {
        RemoteConfig::from_parts(
            m.get_one::<String>("remote_url").map(|s| s.as_str()),
            m.get_one::<String>("remote_key").map(|s| s.as_str()),
        )
    }
}

#[derive(Deserialize)]
struct Row {
    budget_data: Option<BudgetRecord>,
}

#[derive(Serialize)]
struct UpsertBody<'a> {
    user_id: &'a str,
    budget_data: &'a BudgetRecord,
    updated_at: String,
}

pub struct RestRemote {
    client: Client,
    config: RemoteConfig,
}

impl RestRemote {
    pub fn new(client: Client, config: RemoteConfig) -> Self {
        RestRemote { client, config }
    }

    fn endpoint(&self) -> String {
        format!("{}/rest/v1/{}", self.config.url, TABLE)
    }
}

impl RemoteStore for RestRemote {
    fn fetch_by_user_id(&self, user_id: &str) -> Result<Option<BudgetRecord>> {
        let resp = self
            .client
            .get(self.endpoint())
            .query(&[
                ("user_id", format!("eq.{}", user_id)),
                ("select", "budget_data".to_string()),
            ])
            .header("apikey", &self.config.key)
            .bearer_auth(&self.config.key)
            .send()?
            .error_for_status()?;
        let rows: Vec<Row> = resp.json()?;
        debug!(user = %user_id, rows = rows.len(), "fetched remote budget rows");
        Ok(rows.into_iter().next().and_then(|r| r.budget_data))
    }

    fn upsert(&self, user_id: &str, record: &BudgetRecord) -> Result<()> {
        let body = UpsertBody {
            user_id,
            budget_data: record,
            updated_at: Utc::now().to_rfc3339(),
        };
        let resp = self
            .client
            .post(self.endpoint())
            .header("apikey", &self.config.key)
            .bearer_auth(&self.config.key)
            .header("Prefer", "resolution=merge-duplicates")
            .json(&body)
            .send()?;
        let status = resp.status();
        if !status.is_success() {
            let detail = resp.text().unwrap_or_default();
            return Err(Error::Remote(format!("upsert failed with {}: {}", status, detail)));
        }
        info!(user = %user_id, "pushed budget record to remote");
        Ok(())
    }
}

/// Load the local record, then prefer the remote copy for the user it names.
/// The local record is returned when there is no remote, no local user, no
/// remote row, or the remote call fails.
pub fn load_with_fallback(
    remote: Option<&dyn RemoteStore>,
    local: &dyn RecordStore,
) -> Result<Option<BudgetRecord>> {
    Ok(prefer_remote(remote, local.load()?))
}

/// The remote copy of `local`'s user when one exists, else `local` itself.
pub fn prefer_remote(
    remote: Option<&dyn RemoteStore>,
    local: Option<BudgetRecord>,
) -> Option<BudgetRecord> {
    let (Some(remote), Some(current)) = (remote, local.as_ref()) else {
        return local;
    };
    let user_id = current.user.id.as_str();
    match remote.fetch_by_user_id(user_id) {
        Ok(Some(record)) => return Some(record),
        Ok(None) => debug!(user = %user_id, "no remote record; using local store"),
        Err(err) => warn!(user = %user_id, error = %err, "remote load failed; using local store"),
    }
    local
}

/// Save locally, then push to the remote if one is configured. A remote
/// failure is logged and reported as `false`, never as an error.
pub fn save_everywhere(
    remote: Option<&dyn RemoteStore>,
    local: &dyn RecordStore,
    record: &BudgetRecord,
) -> Result<bool> {
    local.save(record)?;
    let Some(remote) = remote else {
        return Ok(false);
    };
    match remote.upsert(&record.user.id, record) {
        Ok(()) => Ok(true),
        Err(err) => {
            warn!(user = %record.user.id, error = %err, "remote save failed");
            Ok(false)
        }
    }
}
