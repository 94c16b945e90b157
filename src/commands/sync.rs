// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};

use super::Session;
use crate::error::Error;
use crate::store::RecordStore;

pub fn handle(session: &Session, m: &clap::ArgMatches) -> Result<()> {
    let remote = session.remote().ok_or_else(|| {
        Error::NotConfigured(
            "remote sync needs --remote-url and --remote-key (or BADBUDGET_REMOTE_URL / BADBUDGET_REMOTE_KEY)"
                .into(),
        )
    })?;
    match m.subcommand() {
        Some(("push", _)) => {
            let record = session
                .store
                .load()?
                .context("No local budget to push; run `badbudget init` first")?;
            remote.upsert(&record.user.id, &record)?;
            println!("Pushed budget for {} to remote", record.user.id);
        }
        Some(("pull", _)) => {
            let local = session
                .store
                .load()?
                .context("No local budget; the user id to pull is taken from it")?;
            match remote.fetch_by_user_id(&local.user.id)? {
                Some(record) => {
                    session.store.save(&record)?;
                    println!("Pulled budget for {} from remote", record.user.id);
                }
                None => println!("No remote budget for {}; local copy kept", local.user.id),
            }
        }
        _ => {}
    }
    Ok(())
}
