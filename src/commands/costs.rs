// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use serde::Serialize;

use super::Session;
use crate::ledger::{
    add_fixed_cost, find_fixed_cost, remove_fixed_cost, update_fixed_cost, NewFixedCost,
};
use crate::models::{BudgetRecord, Classification, CostType};
use crate::utils::{fmt_money, maybe_print_json, parse_decimal, pretty_table};

pub fn handle(session: &Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(session, sub)?,
        Some(("list", sub)) => list(session, sub)?,
        Some(("edit", sub)) => edit(session, sub)?,
        Some(("rm", sub)) => {
            let id = sub.get_one::<String>("id").unwrap().trim();
            let mut record = session.load()?;
            let removed = remove_fixed_cost(&mut record, id)?;
            session.save(&record)?;
            println!("Removed cost '{}' ({})", removed.name, removed.id);
        }
        _ => {}
    }
    Ok(())
}

fn add(session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let cost = NewFixedCost {
        name: sub.get_one::<String>("name").unwrap().trim().to_string(),
        amount: parse_decimal(sub.get_one::<String>("amount").unwrap())?,
        r#type: sub.get_one::<String>("type").unwrap().parse::<CostType>()?,
        classification: sub
            .get_one::<String>("class")
            .unwrap()
            .parse::<Classification>()?,
        sub_category: sub.get_one::<String>("subcategory").unwrap().to_string(),
    };
    let mut record = session.load()?;
    let id = add_fixed_cost(&mut record, cost.clone())?;
    session.save(&record)?;
    println!(
        "Added {} {} cost '{}' = {} (id {})",
        cost.classification,
        cost.r#type,
        cost.name,
        fmt_money(&cost.amount, &session.settings.currency),
        id
    );
    Ok(())
}

fn edit(session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap().trim();
    let mut record = session.load()?;
    let mut cost = find_fixed_cost(&record, id)?.clone();
    if let Some(name) = sub.get_one::<String>("name") {
        cost.name = name.trim().to_string();
    }
    if let Some(amount) = sub.get_one::<String>("amount") {
        cost.amount = parse_decimal(amount)?;
    }
    if let Some(t) = sub.get_one::<String>("type") {
        cost.r#type = t.parse()?;
    }
    if let Some(c) = sub.get_one::<String>("class") {
        cost.classification = c.parse()?;
    }
    if let Some(s) = sub.get_one::<String>("subcategory") {
        let s = s.trim();
        cost.sub_category = (!s.is_empty()).then(|| s.to_string());
    }
    update_fixed_cost(&mut record, cost)?;
    session.save(&record)?;
    println!("Updated cost {}", id);
    Ok(())
}

fn list(session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let record = session.load()?;
    let data = query_rows(&record, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let ccy = &session.settings.currency;
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.clone(),
                    r.name.clone(),
                    r.r#type.clone(),
                    r.classification.clone(),
                    r.subcategory.clone(),
                    format!("{} {}", ccy, r.amount),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                session.settings.theme,
                &["ID", "Name", "Type", "Class", "Subcategory", "Amount"],
                rows
            )
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct CostRow {
    pub id: String,
    pub name: String,
    pub r#type: String,
    pub classification: String,
    pub subcategory: String,
    pub amount: String,
}

/// Fixed costs matching the optional `type` / `class` filters, in record order.
pub fn query_rows(record: &BudgetRecord, sub: &clap::ArgMatches) -> Result<Vec<CostRow>> {
    let kind = sub
        .get_one::<String>("type")
        .map(|t| t.parse::<CostType>())
        .transpose()?;
    let class = sub
        .get_one::<String>("class")
        .map(|c| c.parse::<Classification>())
        .transpose()?;
    Ok(record
        .fixed_costs
        .iter()
        .filter(|c| kind.is_none_or(|k| c.r#type == k))
        .filter(|c| class.is_none_or(|k| c.classification == k))
        .map(|c| CostRow {
            id: c.id.clone(),
            name: c.name.clone(),
            r#type: c.r#type.to_string(),
            classification: c.classification.to_string(),
            subcategory: c.subcategory().unwrap_or_default().to_string(),
            amount: format!("{:.2}", c.amount),
        })
        .collect())
}
