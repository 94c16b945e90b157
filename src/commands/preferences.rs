// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use super::Session;
use crate::db::{set_setting, Theme};
use crate::utils::pretty_table;

pub fn handle(session: &Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("get", _)) => {
            let s = &session.settings;
            let rows = vec![
                vec!["currency".to_string(), s.currency.clone()],
                vec!["theme".to_string(), s.theme.as_str().to_string()],
            ];
            println!("{}", pretty_table(session.settings.theme, &["Setting", "Value"], rows));
        }
        Some(("set", sub)) => {
            let mut changed = false;
            if let Some(ccy) = sub.get_one::<String>("currency") {
                let ccy = ccy.trim().to_uppercase();
                set_setting(session.conn, "currency", &ccy)?;
                println!("Display currency set to {}", ccy);
                changed = true;
            }
            if let Some(theme) = sub.get_one::<String>("theme") {
                let theme = Theme::parse(theme)?;
                set_setting(session.conn, "theme", theme.as_str())?;
                println!("Theme set to {}", theme.as_str());
                changed = true;
            }
            if !changed {
                println!("Nothing to change; pass --currency or --theme");
            }
        }
        _ => {}
    }
    Ok(())
}
