// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Aggregation over a budget record.
//!
//! Every function here is a pure projection of its arguments: callers pass a
//! snapshot of the record and a reference month (`YYYY-MM`) and get a fresh
//! summary back. After an edit, call again on the updated record.

use std::collections::BTreeMap;
use std::fmt;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::models::{
    BudgetRecord, CategoryTotals, Classification, CostType, CurrentBudget, FixedCost,
    InvestmentGoals, SpendingHistory,
};

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// The history bucket for `month`, if any spending has been recorded in it.
pub fn current_month_entry<'a>(
    history: &'a [SpendingHistory],
    month: &str,
) -> Option<&'a SpendingHistory> {
    history.iter().find(|h| h.month == month)
}

/// Fold fixed costs and the reference month's daily expenses into per-type
/// totals and a per-subcategory breakdown, in one pass over each source.
///
/// Fixed costs always count, whatever the month. A fixed cost without a
/// subcategory still counts toward its type total but stays out of the
/// breakdown. Daily expenses filed under "Liabilities" feed the breakdown
/// only.
pub fn category_totals(
    fixed_costs: &[FixedCost],
    history: &[SpendingHistory],
    month: &str,
) -> CategoryTotals {
    let mut totals = CategoryTotals::default();

    for cost in fixed_costs {
        match cost.r#type {
            CostType::LivingExpense => totals.living_expenses += cost.amount,
            CostType::Liability => totals.liabilities += cost.amount,
            CostType::Investment => totals.investments += cost.amount,
        }
        if let Some(sub) = cost.subcategory() {
            add_to(&mut totals.subcategory_breakdown, sub, cost.amount);
        }
    }

    if let Some(entry) = current_month_entry(history, month) {
        for expense in &entry.daily_expenses {
            match CostType::from_display_category(&expense.category) {
                Some(CostType::LivingExpense) => totals.living_expenses += expense.amount,
                Some(CostType::Investment) => totals.investments += expense.amount,
                Some(CostType::Liability) | None => {}
            }
            add_to(
                &mut totals.subcategory_breakdown,
                &expense.sub_category,
                expense.amount,
            );
        }
    }

    totals
}

fn add_to(breakdown: &mut BTreeMap<String, Decimal>, key: &str, amount: Decimal) {
    *breakdown.entry(key.to_string()).or_insert(Decimal::ZERO) += amount;
}

/// Variable-classified fixed costs plus the month's variable daily expenses.
pub fn total_variable_costs(
    fixed_costs: &[FixedCost],
    history: &[SpendingHistory],
    month: &str,
) -> Decimal {
    let fixed: Decimal = fixed_costs
        .iter()
        .filter(|c| c.classification == Classification::Variable)
        .map(|c| c.amount)
        .sum();
    fixed + current_month_spending(history, month)
}

/// Fixed-classified living-expense costs.
pub fn total_fixed_living_costs(fixed_costs: &[FixedCost]) -> Decimal {
    fixed_costs
        .iter()
        .filter(|c| {
            c.classification == Classification::Fixed && c.r#type == CostType::LivingExpense
        })
        .map(|c| c.amount)
        .sum()
}

/// Variable daily expenses recorded in `month`.
pub fn current_month_spending(history: &[SpendingHistory], month: &str) -> Decimal {
    current_month_entry(history, month)
        .map(|entry| {
            entry
                .daily_expenses
                .iter()
                .filter(|e| e.classification == Classification::Variable)
                .map(|e| e.amount)
                .sum()
        })
        .unwrap_or(Decimal::ZERO)
}

/// Variable daily expenses of `month` grouped by subcategory, largest first.
/// Ties keep subcategory name order.
pub fn spending_by_subcategory(history: &[SpendingHistory], month: &str) -> Vec<(String, Decimal)> {
    let mut agg: BTreeMap<String, Decimal> = BTreeMap::new();
    if let Some(entry) = current_month_entry(history, month) {
        for e in entry
            .daily_expenses
            .iter()
            .filter(|e| e.classification == Classification::Variable)
        {
            add_to(&mut agg, &e.sub_category, e.amount);
        }
    }
    let mut items: Vec<_> = agg.into_iter().collect();
    items.sort_by(|a, b| b.1.cmp(&a.1));
    items
}

/// Every fixed cost, whatever its classification, plus the month's declared
/// variable and investment allocations.
pub fn total_allocated(fixed_costs: &[FixedCost], budget: &CurrentBudget) -> Decimal {
    let fixed: Decimal = fixed_costs.iter().map(|c| c.amount).sum();
    fixed + budget.variable_allocated + budget.investment_allocated
}

/// `amount / whole * 100`, or `None` when the quotient does not fit a `Decimal`.
fn percent_of(amount: Decimal, whole: Decimal) -> Option<Decimal> {
    amount.checked_div(whole)?.checked_mul(HUNDRED)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationStatus {
    pub percent_allocated: u32,
    pub unallocated_amount: Decimal,
}

/// How much of `income` is spoken for. Over-allocation clamps to 100% and
/// zero remaining; no deficit is reported.
pub fn allocation_status(income: Decimal, total_allocated: Decimal) -> AllocationStatus {
    let percent = if income <= Decimal::ZERO {
        if total_allocated > Decimal::ZERO { 100 } else { 0 }
    } else {
        // Overflow only happens for a share far above 100%
        percent_of(total_allocated, income)
            .map(|p| {
                p.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
                    .max(Decimal::ZERO)
                    .min(HUNDRED)
            })
            .and_then(|p| p.to_u32())
            .unwrap_or(100)
    };
    AllocationStatus {
        percent_allocated: percent,
        unallocated_amount: (income - total_allocated).max(Decimal::ZERO),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GoalStatus {
    BelowTarget,
    OnTarget,
    AboveTarget,
}

impl fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GoalStatus::BelowTarget => "Below Target",
            GoalStatus::OnTarget => "On Target",
            GoalStatus::AboveTarget => "Above Target",
        })
    }
}

/// Both ends of the goal range count as on target.
pub fn investment_goal_status(current: Decimal, goals: &InvestmentGoals) -> GoalStatus {
    if current < goals.min {
        GoalStatus::BelowTarget
    } else if current > goals.max {
        GoalStatus::AboveTarget
    } else {
        GoalStatus::OnTarget
    }
}

/// Distance to the goal range: shortfall below `min`, excess above `max`,
/// zero inside it.
pub fn investment_gap(current: Decimal, goals: &InvestmentGoals) -> Decimal {
    match investment_goal_status(current, goals) {
        GoalStatus::BelowTarget => goals.min - current,
        GoalStatus::AboveTarget => current - goals.max,
        GoalStatus::OnTarget => Decimal::ZERO,
    }
}

/// `amount` as a percentage of income, one decimal place. `None` when income
/// is zero or the share is too large to represent.
pub fn income_share(amount: Decimal, income: Decimal) -> Option<Decimal> {
    if income.is_zero() {
        return None;
    }
    percent_of(amount, income)
        .map(|p| p.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero))
}

/// Declared variable budget minus this month's variable spending. Negative
/// when the month is over budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableBudgetStatus {
    pub allocated: Decimal,
    pub spent: Decimal,
    pub remaining: Decimal,
    pub over_budget: bool,
}

pub fn variable_budget_status(spent: Decimal, budget: &CurrentBudget) -> VariableBudgetStatus {
    VariableBudgetStatus {
        allocated: budget.variable_allocated,
        spent,
        remaining: budget.variable_allocated - spent,
        over_budget: spent > budget.variable_allocated,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeShares {
    pub fixed_living: Option<Decimal>,
    pub variable: Option<Decimal>,
    pub investments: Option<Decimal>,
}

/// Every figure the dashboard shows for one month.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub month: String,
    pub income: Decimal,
    pub totals: CategoryTotals,
    pub total_variable_costs: Decimal,
    pub total_fixed_living_costs: Decimal,
    pub current_month_spending: Decimal,
    pub variable_budget: VariableBudgetStatus,
    pub total_allocated: Decimal,
    pub allocation: AllocationStatus,
    pub goals: InvestmentGoals,
    pub goal_status: GoalStatus,
    pub investment_gap: Decimal,
    pub shares: IncomeShares,
    pub spending_by_subcategory: Vec<(String, Decimal)>,
}

pub fn dashboard_summary(record: &BudgetRecord, month: &str) -> DashboardSummary {
    let totals = category_totals(&record.fixed_costs, &record.spending_history, month);
    let total_variable = total_variable_costs(&record.fixed_costs, &record.spending_history, month);
    let fixed_living = total_fixed_living_costs(&record.fixed_costs);
    let allocated = total_allocated(&record.fixed_costs, &record.current_budget);
    let spent = current_month_spending(&record.spending_history, month);
    let goal_status = investment_goal_status(totals.investments, &record.investment_goals);
    let gap = investment_gap(totals.investments, &record.investment_goals);
    let shares = IncomeShares {
        fixed_living: income_share(fixed_living, record.income),
        variable: income_share(total_variable, record.income),
        investments: income_share(totals.investments, record.income),
    };

    DashboardSummary {
        month: month.to_string(),
        income: record.income,
        total_variable_costs: total_variable,
        total_fixed_living_costs: fixed_living,
        current_month_spending: spent,
        variable_budget: variable_budget_status(spent, &record.current_budget),
        total_allocated: allocated,
        allocation: allocation_status(record.income, allocated),
        goals: record.investment_goals,
        goal_status,
        investment_gap: gap,
        shares,
        spending_by_subcategory: spending_by_subcategory(&record.spending_history, month),
        totals,
    }
}
