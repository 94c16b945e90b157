// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use super::Session;
use crate::catalog::{subcategories_for, visible_subcategories, DEFAULT_ICON};
use crate::ledger::{
    add_custom_subcategory, delete_custom_subcategory, edit_custom_subcategory,
    rename_subcategory, toggle_custom_subcategory,
};
use crate::models::CostType;
use crate::utils::{maybe_print_json, pretty_table};

pub fn handle(session: &Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => {
            let json_flag = sub.get_flag("json");
            let jsonl_flag = sub.get_flag("jsonl");
            let kind = sub.get_one::<String>("type").unwrap().parse::<CostType>()?;
            let record = session.load()?;
            let subs = if sub.get_flag("all") {
                subcategories_for(kind, &record.custom_subcategories)
            } else {
                visible_subcategories(kind, &record.custom_subcategories)
            };
            if !maybe_print_json(json_flag, jsonl_flag, &subs)? {
                let rows = subs
                    .into_iter()
                    .map(|s| {
                        let id = record
                            .custom_subcategories
                            .iter()
                            .find(|c| s.is_custom && c.name == s.name && c.r#type == kind)
                            .map(|c| c.id.clone())
                            .unwrap_or_default();
                        vec![s.icon, s.name, if s.is_custom { "custom".into() } else { "built-in".into() }, id]
                    })
                    .collect();
                println!("{}", pretty_table(session.settings.theme, &["", "Subcategory", "Kind", "ID"], rows));
            }
        }
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let kind = sub.get_one::<String>("type").unwrap().parse::<CostType>()?;
            let icon = sub
                .get_one::<String>("icon")
                .map(|s| s.as_str())
                .unwrap_or(DEFAULT_ICON);
            let mut record = session.load()?;
            let id = add_custom_subcategory(&mut record, name, icon, kind)?;
            session.save(&record)?;
            println!("Added subcategory '{}' to {} (id {})", name.trim(), kind, id);
        }
        Some(("toggle", sub)) => {
            let id = sub.get_one::<String>("id").unwrap().trim();
            let mut record = session.load()?;
            let visible = toggle_custom_subcategory(&mut record, id)?;
            session.save(&record)?;
            println!(
                "Subcategory {} is now {}",
                id,
                if visible { "visible" } else { "hidden" }
            );
        }
        Some(("edit", sub)) => {
            let id = sub.get_one::<String>("id").unwrap().trim();
            let mut record = session.load()?;
            edit_custom_subcategory(
                &mut record,
                id,
                sub.get_one::<String>("name").map(|s| s.as_str()),
                sub.get_one::<String>("icon").map(|s| s.as_str()),
            )?;
            session.save(&record)?;
            println!("Updated subcategory {}", id);
        }
        Some(("rm", sub)) => {
            let id = sub.get_one::<String>("id").unwrap().trim();
            let mut record = session.load()?;
            let removed = delete_custom_subcategory(&mut record, id)?;
            session.save(&record)?;
            println!("Removed subcategory '{}'", removed.name);
        }
        Some(("rename", sub)) => {
            let old = sub.get_one::<String>("old").unwrap();
            let new = sub.get_one::<String>("new").unwrap();
            let mut record = session.load()?;
            let touched = rename_subcategory(&mut record, old, new)?;
            session.save(&record)?;
            println!("Renamed '{}' -> '{}' on {} records", old, new.trim(), touched);
        }
        _ => {}
    }
    Ok(())
}
