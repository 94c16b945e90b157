// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::PathBuf;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use badbudget::commands::{self, Session};
use badbudget::remote::{RemoteConfig, RemoteStore, RestRemote};
use badbudget::{cli, db, utils};

fn init_logging(verbose: bool) {
    let default = if verbose { "badbudget=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();
    init_logging(matches.get_flag("verbose"));

    let db_override = matches.get_one::<String>("db").map(PathBuf::from);
    let conn = db::open_or_init(db_override.as_deref())?;
    let remote: Option<Box<dyn RemoteStore>> = match RemoteConfig::from_matches(&matches) {
        Some(cfg) => {
            let remote = RestRemote::new(utils::http_client()?, cfg);
            Some(Box::new(remote) as Box<dyn RemoteStore>)
        }
        None => None,
    };
    let session = Session::new(&conn, remote)?;

    match matches.subcommand() {
        Some(("init", sub)) => commands::onboarding::init(&session, sub)?,
        Some(("show", sub)) => commands::reports::show(&session, sub)?,
        Some(("breakdown", sub)) => commands::reports::breakdown(&session, sub)?,
        Some(("income", sub)) => commands::budgets::handle_income(&session, sub)?,
        Some(("goals", sub)) => commands::budgets::handle_goals(&session, sub)?,
        Some(("budget", sub)) => commands::budgets::handle_budget(&session, sub)?,
        Some(("cost", sub)) => commands::costs::handle(&session, sub)?,
        Some(("expense", sub)) => commands::expenses::handle(&session, sub)?,
        Some(("subcategory", sub)) => commands::subcategories::handle(&session, sub)?,
        Some(("settings", sub)) => commands::preferences::handle(&session, sub)?,
        Some(("sync", sub)) => commands::sync::handle(&session, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&session, sub)?,
        Some(("doctor", _)) => commands::doctor::handle(&session)?,
        Some(("reset", _)) => commands::onboarding::reset(&session)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
