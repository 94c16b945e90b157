// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use super::{month_or_current, Session};
use crate::engine::{allocation_status, total_allocated};
use crate::ledger::{set_current_budget, set_income, set_investment_goals};
use crate::models::InvestmentGoals;
use crate::utils::{fmt_money, parse_decimal};

pub fn handle_income(session: &Session, m: &clap::ArgMatches) -> Result<()> {
    if let Some(("set", sub)) = m.subcommand() {
        let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
        let mut record = session.load()?;
        set_income(&mut record, amount)?;
        session.save(&record)?;
        println!(
            "Income set to {}",
            fmt_money(&amount, &session.settings.currency)
        );
    }
    Ok(())
}

pub fn handle_goals(session: &Session, m: &clap::ArgMatches) -> Result<()> {
    if let Some(("set", sub)) = m.subcommand() {
        let goals = InvestmentGoals {
            min: parse_decimal(sub.get_one::<String>("min").unwrap())?,
            max: parse_decimal(sub.get_one::<String>("max").unwrap())?,
        };
        let mut record = session.load()?;
        set_investment_goals(&mut record, goals)?;
        session.save(&record)?;
        let ccy = &session.settings.currency;
        println!(
            "Investment goal set to {} - {}",
            fmt_money(&goals.min, ccy),
            fmt_money(&goals.max, ccy)
        );
    }
    Ok(())
}

pub fn handle_budget(session: &Session, m: &clap::ArgMatches) -> Result<()> {
    if let Some(("set", sub)) = m.subcommand() {
        let month = month_or_current(sub)?;
        let variable = parse_decimal(sub.get_one::<String>("variable").unwrap())?;
        let investment = parse_decimal(sub.get_one::<String>("investment").unwrap())?;
        let mut record = session.load()?;
        set_current_budget(&mut record, &month, variable, investment)?;
        session.save(&record)?;

        let status = allocation_status(
            record.income,
            total_allocated(&record.fixed_costs, &record.current_budget),
        );
        println!(
            "Budget for {}: variable {}, investment {} ({}% allocated, {} unallocated)",
            month,
            fmt_money(&variable, &session.settings.currency),
            fmt_money(&investment, &session.settings.currency),
            status.percent_allocated,
            fmt_money(&status.unallocated_amount, &session.settings.currency),
        );
    }
    Ok(())
}
