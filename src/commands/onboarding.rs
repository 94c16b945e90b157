// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{bail, Result};
use chrono::Utc;

use super::{month_or_current, Session};
use crate::engine::{allocation_status, total_allocated};
use crate::ledger::{onboard, NewFixedCost, Onboarding};
use crate::models::{Classification, CostType, InvestmentGoals, User};
use crate::store::RecordStore;
use crate::utils::{fmt_money, new_user_id, parse_decimal};

pub fn init(session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    if !sub.get_flag("force") && session.store.load()?.is_some() {
        bail!("A budget already exists; pass --force to replace it");
    }
    let income = parse_decimal(sub.get_one::<String>("income").unwrap())?;
    let goals = InvestmentGoals {
        min: parse_decimal(sub.get_one::<String>("invest_min").unwrap())?,
        max: parse_decimal(sub.get_one::<String>("invest_max").unwrap())?,
    };
    let month = month_or_current(sub)?;
    let name = sub.get_one::<String>("name").map(|s| s.trim().to_string());
    let email = sub.get_one::<String>("email").map(|s| s.trim().to_string());
    let user = if name.is_some() || email.is_some() {
        Some(User {
            id: new_user_id(),
            email: email.unwrap_or_else(|| "demo@example.com".into()),
            name: name.unwrap_or_else(|| "Demo User".into()),
            created_at: Utc::now().to_rfc3339(),
        })
    } else {
        None
    };

    let fixed_costs = sub
        .get_many::<String>("cost")
        .unwrap_or_default()
        .map(|spec| parse_cost_spec(spec))
        .collect::<Result<Vec<_>>>()?;

    let record = onboard(Onboarding {
        income,
        goals,
        fixed_costs,
        user,
        month,
    })?;
    session.save(&record)?;
    let ccy = &session.settings.currency;
    println!(
        "Budget created for {} ({}): income {}, investment goal {} - {}",
        record.user.name,
        record.user.id,
        fmt_money(&record.income, ccy),
        fmt_money(&record.investment_goals.min, ccy),
        fmt_money(&record.investment_goals.max, ccy),
    );
    if !record.fixed_costs.is_empty() {
        println!("{} recurring costs recorded", record.fixed_costs.len());
    }
    let status = allocation_status(
        record.income,
        total_allocated(&record.fixed_costs, &record.current_budget),
    );
    println!(
        "Remaining after fixed costs: {}",
        fmt_money(&status.unallocated_amount, ccy)
    );
    Ok(())
}

/// Parse `NAME:AMOUNT:TYPE:CLASS:SUBCATEGORY`. The subcategory may itself
/// contain `:`.
pub fn parse_cost_spec(spec: &str) -> Result<NewFixedCost> {
    let parts: Vec<&str> = spec.splitn(5, ':').map(str::trim).collect();
    let [name, amount, kind, class, subcategory] = parts.as_slice() else {
        bail!(
            "Invalid cost '{}', expected NAME:AMOUNT:TYPE:CLASS:SUBCATEGORY",
            spec
        );
    };
    Ok(NewFixedCost {
        name: name.to_string(),
        amount: parse_decimal(amount)?,
        r#type: kind.parse::<CostType>()?,
        classification: class.parse::<Classification>()?,
        sub_category: subcategory.to_string(),
    })
}

pub fn reset(session: &Session) -> Result<()> {
    session.store.clear()?;
    println!("Stored budget removed");
    Ok(())
}
