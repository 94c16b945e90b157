// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{bail, Result};

use super::Session;
use crate::models::BudgetRecord;

pub fn handle(session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();
    let record = session.load()?;
    match fmt.as_str() {
        "json" => export_json(&record, out)?,
        "csv" => export_expenses_csv(&record, out)?,
        _ => bail!("Unknown format: {} (use csv|json)", fmt),
    }
    println!("Exported budget to {}", out);
    Ok(())
}

/// The whole record, in the same JSON shape it is stored in.
pub fn export_json(record: &BudgetRecord, out: &str) -> Result<()> {
    std::fs::write(out, serde_json::to_string_pretty(record)?)?;
    Ok(())
}

/// Every daily expense of every month, oldest month first.
pub fn export_expenses_csv(record: &BudgetRecord, out: &str) -> Result<()> {
    let mut months: Vec<_> = record.spending_history.iter().collect();
    months.sort_by(|a, b| a.month.cmp(&b.month));

    let mut wtr = csv::Writer::from_path(out)?;
    wtr.write_record([
        "month",
        "id",
        "date",
        "category",
        "subcategory",
        "classification",
        "amount",
    ])?;
    for h in months {
        for e in &h.daily_expenses {
            wtr.write_record([
                h.month.clone(),
                e.id.clone(),
                e.date.to_string(),
                e.category.clone(),
                e.sub_category.clone(),
                e.classification.to_string(),
                format!("{:.2}", e.amount),
            ])?;
        }
    }
    wtr.flush()?;
    Ok(())
}
