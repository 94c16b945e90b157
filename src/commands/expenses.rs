// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use serde::Serialize;

use super::{month_or_current, Session};
use crate::engine::current_month_entry;
use crate::ledger::{
    add_daily_expense, delete_daily_expense, find_daily_expense, update_daily_expense,
    NewDailyExpense,
};
use crate::models::{BudgetRecord, Classification, CostType};
use crate::utils::{fmt_money, maybe_print_json, month_of, parse_date, parse_decimal, pretty_table, today};

pub fn handle(session: &Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(session, sub)?,
        Some(("list", sub)) => list(session, sub)?,
        Some(("edit", sub)) => edit(session, sub)?,
        Some(("rm", sub)) => {
            let id = sub.get_one::<String>("id").unwrap().trim();
            let month = month_or_current(sub)?;
            let mut record = session.load()?;
            let removed = delete_daily_expense(&mut record, &month, id)?;
            session.save(&record)?;
            println!(
                "Removed expense {} ({} on {})",
                removed.id, removed.sub_category, removed.date
            );
        }
        _ => {}
    }
    Ok(())
}

/// Accepts a display label or a type name and returns the display label.
fn category_label(raw: &str) -> Result<String> {
    let raw = raw.trim();
    if let Some(t) = CostType::from_display_category(raw) {
        return Ok(t.display_category().to_string());
    }
    Ok(raw.parse::<CostType>()?.display_category().to_string())
}

fn add(session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let date = match sub.get_one::<String>("date") {
        Some(d) => parse_date(d)?,
        None => today(),
    };
    let expense = NewDailyExpense {
        date,
        category: category_label(sub.get_one::<String>("category").unwrap())?,
        sub_category: sub.get_one::<String>("subcategory").unwrap().to_string(),
        amount: parse_decimal(sub.get_one::<String>("amount").unwrap())?,
        classification: sub
            .get_one::<String>("class")
            .unwrap()
            .parse::<Classification>()?,
    };
    let mut record = session.load()?;
    let id = add_daily_expense(&mut record, expense.clone())?;
    session.save(&record)?;
    println!(
        "Recorded {} for {} / {} on {} (id {})",
        fmt_money(&expense.amount, &session.settings.currency),
        expense.category,
        expense.sub_category.trim(),
        expense.date,
        id
    );
    Ok(())
}

fn edit(session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap().trim();
    let month = month_or_current(sub)?;
    let mut record = session.load()?;
    let mut expense = find_daily_expense(&record, &month, id)?.clone();
    if let Some(a) = sub.get_one::<String>("amount") {
        expense.amount = parse_decimal(a)?;
    }
    if let Some(d) = sub.get_one::<String>("date") {
        let date = parse_date(d)?;
        if month_of(date) != month {
            anyhow::bail!(
                "Date {} is outside {}; remove the expense and add it again instead",
                date,
                month
            );
        }
        expense.date = date;
    }
    if let Some(c) = sub.get_one::<String>("category") {
        expense.category = category_label(c)?;
    }
    if let Some(s) = sub.get_one::<String>("subcategory") {
        expense.sub_category = s.trim().to_string();
    }
    if let Some(c) = sub.get_one::<String>("class") {
        expense.classification = c.parse()?;
    }
    update_daily_expense(&mut record, &month, expense)?;
    session.save(&record)?;
    println!("Updated expense {}", id);
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
                    r.date.clone(),
                    r.category.clone(),
                    r.subcategory.clone(),
                    r.classification.clone(),
                    format!("{} {}", ccy, r.amount),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                session.settings.theme,
                &["ID", "Date", "Category", "Subcategory", "Class", "Amount"],
                rows,
            )
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct ExpenseRow {
    pub id: String,
    pub date: String,
    pub category: String,
    pub subcategory: String,
    pub classification: String,
    pub amount: String,
}

/// Expenses of the chosen month, newest first.
pub fn query_rows(record: &BudgetRecord, sub: &clap::ArgMatches) -> Result<Vec<ExpenseRow>> {
    let month = month_or_current(sub)?;
    let class = sub
        .get_one::<String>("class")
        .map(|c| c.parse::<Classification>())
        .transpose()?;
    let Some(entry) = current_month_entry(&record.spending_history, &month) else {
        return Ok(Vec::new());
    };
    let mut items: Vec<_> = entry
        .daily_expenses
        .iter()
        .enumerate()
        .filter(|(_, e)| class.is_none_or(|k| e.classification == k))
        .collect();
    // Later entries win ties on the same day
    items.sort_by(|a, b| b.1.date.cmp(&a.1.date).then(b.0.cmp(&a.0)));
    Ok(items
        .into_iter()
        .map(|(_, e)| ExpenseRow {
            id: e.id.clone(),
            date: e.date.to_string(),
            category: e.category.clone(),
            subcategory: e.sub_category.clone(),
            classification: e.classification.to_string(),
            amount: format!("{:.2}", e.amount),
        })
        .collect())
}
