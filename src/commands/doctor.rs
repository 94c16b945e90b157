// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::HashSet;

use anyhow::Result;
use rust_decimal::Decimal;

use super::Session;
use crate::models::BudgetRecord;
use crate::utils::{is_month_key, month_of, pretty_table};

pub fn handle(session: &Session) -> Result<()> {
    let record = session.load()?;
    let rows = diagnose(&record);
    if rows.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        println!("{}", pretty_table(session.settings.theme, &["Issue", "Detail"], rows));
    }
    Ok(())
}

/// Problems the aggregation leaves to callers, as `[issue, detail]` rows.
pub fn diagnose(record: &BudgetRecord) -> Vec<Vec<String>> {
    let mut rows = Vec::new();

    if record.income <= Decimal::ZERO {
        rows.push(vec!["no_income".into(), format!("income is {}", record.income)]);
    }
    let goals = &record.investment_goals;
    if goals.min > goals.max {
        rows.push(vec![
            "goal_range_inverted".into(),
            format!("min {} > max {}", goals.min, goals.max),
        ]);
    }

    for c in &record.fixed_costs {
        if c.amount < Decimal::ZERO {
            rows.push(vec!["negative_cost".into(), format!("{} ({})", c.name, c.id)]);
        }
    }

    let mut seen = HashSet::new();
    for h in &record.spending_history {
        if !is_month_key(&h.month) {
            rows.push(vec!["bad_month_key".into(), h.month.clone()]);
        }
        if !seen.insert(h.month.as_str()) {
            rows.push(vec!["duplicate_month".into(), h.month.clone()]);
        }
        for e in &h.daily_expenses {
            if e.amount < Decimal::ZERO {
                rows.push(vec!["negative_expense".into(), format!("{} on {}", e.id, e.date)]);
            }
            if month_of(e.date) != h.month {
                rows.push(vec![
                    "expense_wrong_month".into(),
                    format!("{} dated {} filed under {}", e.id, e.date, h.month),
                ]);
            }
        }
    }

    if !record.current_budget.month.is_empty() && !is_month_key(&record.current_budget.month) {
        rows.push(vec![
            "bad_budget_month".into(),
            record.current_budget.month.clone(),
        ]);
    }
    rows
}
