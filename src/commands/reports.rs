// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rust_decimal::Decimal;
use serde::Serialize;

use super::{month_or_current, Session};
use crate::engine::{category_totals, dashboard_summary, GoalStatus};
use crate::models::BudgetRecord;
use crate::utils::{fmt_money, fmt_percent, maybe_print_json, pretty_table};

pub fn show(session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let month = month_or_current(sub)?;
    let record = session.load()?;
    let s = dashboard_summary(&record, &month);
    if maybe_print_json(json_flag, jsonl_flag, &s)? {
        return Ok(());
    }

    let ccy = &session.settings.currency;
    let m = |d: &Decimal| fmt_money(d, ccy);
    let allocation = if s.allocation.unallocated_amount.is_zero() {
        format!("{}% allocated", s.allocation.percent_allocated)
    } else {
        format!(
            "{}% allocated, {} unallocated",
            s.allocation.percent_allocated,
            m(&s.allocation.unallocated_amount)
        )
    };
    let rows = vec![
        vec!["Monthly income".into(), m(&s.income), allocation],
        vec![
            "Fixed living costs".into(),
            m(&s.total_fixed_living_costs),
            format!("{} of income", fmt_percent(s.shares.fixed_living)),
        ],
        vec![
            "Variable costs".into(),
            m(&s.total_variable_costs),
            format!("{} of income", fmt_percent(s.shares.variable)),
        ],
        vec![
            "Investments".into(),
            m(&s.totals.investments),
            format!("{} of income", fmt_percent(s.shares.investments)),
        ],
        vec!["Living expenses".into(), m(&s.totals.living_expenses), String::new()],
        vec!["Liabilities".into(), m(&s.totals.liabilities), String::new()],
        vec![
            "Spent this month".into(),
            m(&s.current_month_spending),
            "variable daily expenses".into(),
        ],
        vec![
            "Variable budget".into(),
            m(&s.variable_budget.allocated),
            if s.variable_budget.over_budget {
                format!("Over budget by {}", m(&-s.variable_budget.remaining))
            } else {
                format!("Under budget, {} left", m(&s.variable_budget.remaining))
            },
        ],
    ];
    println!("{}", pretty_table(session.settings.theme, &[month.as_str(), "Amount", "Notes"], rows));

    let goal_note = match s.goal_status {
        GoalStatus::BelowTarget => format!("{} more to reach the minimum", m(&s.investment_gap)),
        GoalStatus::AboveTarget => format!("{} above the maximum", m(&s.investment_gap)),
        GoalStatus::OnTarget => String::new(),
    };
    println!(
        "Investment goal {} - {}: {} {}",
        m(&s.goals.min),
        m(&s.goals.max),
        s.goal_status,
        goal_note
    );

    if !s.spending_by_subcategory.is_empty() {
        let rows = s
            .spending_by_subcategory
            .iter()
            .map(|(name, amt)| vec![name.clone(), m(amt)])
            .collect();
        println!("{}", pretty_table(session.settings.theme, &["Subcategory", "Spent"], rows));
    }
    Ok(())
}

pub fn breakdown(session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let month = month_or_current(sub)?;
    let record = session.load()?;
    let data = breakdown_rows(&record, &month);
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let hdr = format!("Total ({})", session.settings.currency);
        let rows = data
            .into_iter()
            .map(|r| vec![r.subcategory, r.total])
            .collect();
        println!("{}", pretty_table(session.settings.theme, &["Subcategory", hdr.as_str()], rows));
    }
    Ok(())
}

#[derive(Serialize)]
pub struct BreakdownRow {
    pub subcategory: String,
    pub total: String,
}

/// Subcategory totals for `month`, largest first.
pub fn breakdown_rows(record: &BudgetRecord, month: &str) -> Vec<BreakdownRow> {
    let totals = category_totals(&record.fixed_costs, &record.spending_history, month);
    let mut items: Vec<(String, Decimal)> = totals.subcategory_breakdown.into_iter().collect();
    items.sort_by(|a, b| b.1.cmp(&a.1));
    items
        .into_iter()
        .map(|(subcategory, amt)| BreakdownRow {
            subcategory,
            total: format!("{:.2}", amt),
        })
        .collect()
}
