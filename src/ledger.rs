// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Edits to a budget record.
//!
//! Each operation mutates the record in place and leaves persistence to the
//! caller. Nothing here recomputes totals; run the engine again afterwards.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{
    BudgetRecord, Classification, CostType, CurrentBudget, CustomSubcategory, DailyExpense,
    FixedCost, InvestmentGoals, SpendingHistory, User,
};
use crate::utils::{month_of, new_id, new_user_id};

#[derive(Debug, Clone)]
pub struct NewFixedCost {
    pub name: String,
    pub amount: Decimal,
    pub r#type: CostType,
    pub classification: Classification,
    pub sub_category: String,
}

#[derive(Debug, Clone)]
pub struct NewDailyExpense {
    pub date: NaiveDate,
    pub category: String,
    pub sub_category: String,
    pub amount: Decimal,
    pub classification: Classification,
}

/// Answers collected when a user first sets up their budget.
#[derive(Debug, Clone)]
pub struct Onboarding {
    pub income: Decimal,
    pub goals: InvestmentGoals,
    pub fixed_costs: Vec<NewFixedCost>,
    pub user: Option<User>,
    pub month: String,
}

pub fn onboard(answers: Onboarding) -> Result<BudgetRecord> {
    if answers.income < Decimal::ZERO {
        return Err(Error::InvalidData("income cannot be negative".into()));
    }
    validate_goals(&answers.goals)?;
    let user = answers.user.unwrap_or_else(|| User {
        id: new_user_id(),
        email: "demo@example.com".into(),
        name: "Demo User".into(),
        created_at: Utc::now().to_rfc3339(),
    });
    let mut record = BudgetRecord {
        user,
        income: answers.income,
        investment_goals: answers.goals,
        fixed_costs: Vec::new(),
        current_budget: CurrentBudget {
            month: answers.month,
            variable_allocated: Decimal::ZERO,
            investment_allocated: Decimal::ZERO,
        },
        spending_history: Vec::new(),
        custom_subcategories: Vec::new(),
    };
    for cost in answers.fixed_costs {
        add_fixed_cost(&mut record, cost)?;
    }
    Ok(record)
}

fn require_name(what: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::InvalidData(format!("{} cannot be empty", what)));
    }
    Ok(())
}

fn require_non_negative(what: &str, value: Decimal) -> Result<()> {
    if value < Decimal::ZERO {
        return Err(Error::InvalidData(format!(
            "{} cannot be negative (got {})",
            what, value
        )));
    }
    Ok(())
}

fn require_positive_expense(amount: Decimal) -> Result<()> {
    if amount <= Decimal::ZERO {
        return Err(Error::InvalidData(format!(
            "expense amount must be positive (got {})",
            amount
        )));
    }
    Ok(())
}

fn validate_goals(goals: &InvestmentGoals) -> Result<()> {
    require_non_negative("investment minimum", goals.min)?;
    require_non_negative("investment maximum", goals.max)?;
    if goals.min > goals.max {
        return Err(Error::InvalidData(format!(
            "investment minimum {} is above maximum {}",
            goals.min, goals.max
        )));
    }
    Ok(())
}

// ---------- fixed costs ----------

pub fn add_fixed_cost(record: &mut BudgetRecord, cost: NewFixedCost) -> Result<String> {
    require_name("name", &cost.name)?;
    require_name("subcategory", &cost.sub_category)?;
    require_non_negative("amount", cost.amount)?;
    let id = new_id(record.fixed_costs.iter().map(|c| c.id.as_str()));
    debug!(id = %id, name = %cost.name, "adding fixed cost");
    record.fixed_costs.push(FixedCost {
        id: id.clone(),
        name: cost.name.trim().to_string(),
        amount: cost.amount,
        r#type: cost.r#type,
        classification: cost.classification,
        sub_category: Some(cost.sub_category.trim().to_string()),
    });
    Ok(id)
}

pub fn find_fixed_cost<'a>(record: &'a BudgetRecord, id: &str) -> Result<&'a FixedCost> {
    record
        .fixed_costs
        .iter()
        .find(|c| c.id == id)
        .ok_or_else(|| Error::NotFound(format!("fixed cost '{}'", id)))
}

/// Replace the fixed cost carrying `updated.id`.
pub fn update_fixed_cost(record: &mut BudgetRecord, updated: FixedCost) -> Result<()> {
    require_name("name", &updated.name)?;
    require_non_negative("amount", updated.amount)?;
    let slot = record
        .fixed_costs
        .iter_mut()
        .find(|c| c.id == updated.id)
        .ok_or_else(|| Error::NotFound(format!("fixed cost '{}'", updated.id)))?;
    *slot = updated;
    Ok(())
}

pub fn remove_fixed_cost(record: &mut BudgetRecord, id: &str) -> Result<FixedCost> {
    let idx = record
        .fixed_costs
        .iter()
        .position(|c| c.id == id)
        .ok_or_else(|| Error::NotFound(format!("fixed cost '{}'", id)))?;
    Ok(record.fixed_costs.remove(idx))
}

// ---------- daily expenses ----------

/// File an expense under the month its date falls in, opening that month's
/// history bucket if needed. Returns the new expense id.
pub fn add_daily_expense(record: &mut BudgetRecord, expense: NewDailyExpense) -> Result<String> {
    require_name("subcategory", &expense.sub_category)?;
    require_positive_expense(expense.amount)?;
    let month = month_of(expense.date);
    let id = new_id(
        record
            .spending_history
            .iter()
            .flat_map(|h| h.daily_expenses.iter())
            .map(|e| e.id.as_str()),
    );
    let entry = DailyExpense {
        id: id.clone(),
        date: expense.date,
        category: expense.category,
        sub_category: expense.sub_category.trim().to_string(),
        amount: expense.amount,
        classification: expense.classification,
    };
    match record.spending_history.iter_mut().find(|h| h.month == month) {
        Some(bucket) => bucket.daily_expenses.push(entry),
        None => {
            debug!(month = %month, "opening spending history month");
            record.spending_history.push(SpendingHistory {
                month,
                daily_expenses: vec![entry],
            });
        }
    }
    Ok(id)
}

fn month_bucket<'a>(record: &'a mut BudgetRecord, month: &str) -> Result<&'a mut SpendingHistory> {
    record
        .spending_history
        .iter_mut()
        .find(|h| h.month == month)
        .ok_or_else(|| Error::NotFound(format!("no spending recorded for {}", month)))
}

pub fn find_daily_expense<'a>(
    record: &'a BudgetRecord,
    month: &str,
    id: &str,
) -> Result<&'a DailyExpense> {
    record
        .spending_history
        .iter()
        .find(|h| h.month == month)
        .ok_or_else(|| Error::NotFound(format!("no spending recorded for {}", month)))?
        .daily_expenses
        .iter()
        .find(|e| e.id == id)
        .ok_or_else(|| Error::NotFound(format!("expense '{}' in {}", id, month)))
}

/// Replace, within `month`, the expense carrying `updated.id`.
pub fn update_daily_expense(
    record: &mut BudgetRecord,
    month: &str,
    updated: DailyExpense,
) -> Result<()> {
    require_name("subcategory", &updated.sub_category)?;
    require_positive_expense(updated.amount)?;
    let bucket = month_bucket(record, month)?;
    let slot = bucket
        .daily_expenses
        .iter_mut()
        .find(|e| e.id == updated.id)
        .ok_or_else(|| Error::NotFound(format!("expense '{}' in {}", updated.id, month)))?;
    *slot = updated;
    Ok(())
}

pub fn delete_daily_expense(
    record: &mut BudgetRecord,
    month: &str,
    id: &str,
) -> Result<DailyExpense> {
    let bucket = month_bucket(record, month)?;
    let idx = bucket
        .daily_expenses
        .iter()
        .position(|e| e.id == id)
        .ok_or_else(|| Error::NotFound(format!("expense '{}' in {}", id, month)))?;
    Ok(bucket.daily_expenses.remove(idx))
}

// ---------- subcategories ----------

/// Rename a subcategory everywhere it is used: fixed costs and daily expenses
/// of every month. Returns how many records changed.
pub fn rename_subcategory(record: &mut BudgetRecord, old: &str, new: &str) -> Result<usize> {
    require_name("new subcategory name", new)?;
    let new = new.trim();
    let mut touched = 0;
    for cost in record.fixed_costs.iter_mut() {
        if cost.sub_category.as_deref() == Some(old) {
            cost.sub_category = Some(new.to_string());
            touched += 1;
        }
    }
    for expense in record
        .spending_history
        .iter_mut()
        .flat_map(|h| h.daily_expenses.iter_mut())
    {
        if expense.sub_category == old {
            expense.sub_category = new.to_string();
            touched += 1;
        }
    }
    debug!(old = %old, new = %new, touched, "renamed subcategory");
    Ok(touched)
}

pub fn add_custom_subcategory(
    record: &mut BudgetRecord,
    name: &str,
    icon: &str,
    kind: CostType,
) -> Result<String> {
    require_name("subcategory name", name)?;
    let id = new_id(record.custom_subcategories.iter().map(|c| c.id.as_str()));
    record.custom_subcategories.push(CustomSubcategory {
        id: id.clone(),
        name: name.trim().to_string(),
        icon: icon.to_string(),
        r#type: kind,
        is_visible: true,
    });
    Ok(id)
}

fn custom_mut<'a>(record: &'a mut BudgetRecord, id: &str) -> Result<&'a mut CustomSubcategory> {
    record
        .custom_subcategories
        .iter_mut()
        .find(|c| c.id == id)
        .ok_or_else(|| Error::NotFound(format!("custom subcategory '{}'", id)))
}

/// Flip visibility; returns the new state.
pub fn toggle_custom_subcategory(record: &mut BudgetRecord, id: &str) -> Result<bool> {
    let sub = custom_mut(record, id)?;
    sub.is_visible = !sub.is_visible;
    Ok(sub.is_visible)
}

pub fn edit_custom_subcategory(
    record: &mut BudgetRecord,
    id: &str,
    name: Option<&str>,
    icon: Option<&str>,
) -> Result<()> {
    if let Some(n) = name {
        require_name("subcategory name", n)?;
    }
    let sub = custom_mut(record, id)?;
    if let Some(n) = name {
        sub.name = n.trim().to_string();
    }
    if let Some(i) = icon {
        sub.icon = i.to_string();
    }
    Ok(())
}

pub fn delete_custom_subcategory(
    record: &mut BudgetRecord,
    id: &str,
) -> Result<CustomSubcategory> {
    let idx = record
        .custom_subcategories
        .iter()
        .position(|c| c.id == id)
        .ok_or_else(|| Error::NotFound(format!("custom subcategory '{}'", id)))?;
    Ok(record.custom_subcategories.remove(idx))
}

// ---------- income, goals, current budget ----------

pub fn set_income(record: &mut BudgetRecord, income: Decimal) -> Result<()> {
    require_non_negative("income", income)?;
    record.income = income;
    Ok(())
}

pub fn set_investment_goals(record: &mut BudgetRecord, goals: InvestmentGoals) -> Result<()> {
    validate_goals(&goals)?;
    record.investment_goals = goals;
    Ok(())
}

pub fn set_current_budget(
    record: &mut BudgetRecord,
    month: &str,
    variable_allocated: Decimal,
    investment_allocated: Decimal,
) -> Result<()> {
    require_non_negative("variable allocation", variable_allocated)?;
    require_non_negative("investment allocation", investment_allocated)?;
    record.current_budget = CurrentBudget {
        month: month.to_string(),
        variable_allocated,
        investment_allocated,
    };
    Ok(())
}
