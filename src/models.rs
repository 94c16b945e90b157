// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The persisted budget record.
//!
//! Field names on the wire follow the JSON record the web client stores
//! (`fixedCosts`, `subCategory`, `living-expense`, ...) so a record exported
//! there loads here unchanged. Money is `Decimal` in memory and a JSON number
//! on the wire.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::Error;

pub const LIVING_EXPENSES_LABEL: &str = "Living Expenses";
pub const LIABILITIES_LABEL: &str = "Liabilities";
pub const INVESTMENTS_LABEL: &str = "Investments";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CostType {
    LivingExpense,
    Liability,
    Investment,
}

impl CostType {
    pub const ALL: [CostType; 3] = [
        CostType::LivingExpense,
        CostType::Liability,
        CostType::Investment,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CostType::LivingExpense => "living-expense",
            CostType::Liability => "liability",
            CostType::Investment => "investment",
        }
    }

    /// Label a daily expense carries when filed under this type.
    pub fn display_category(&self) -> &'static str {
        match self {
            CostType::LivingExpense => LIVING_EXPENSES_LABEL,
            CostType::Liability => LIABILITIES_LABEL,
            CostType::Investment => INVESTMENTS_LABEL,
        }
    }

    pub fn from_display_category(label: &str) -> Option<CostType> {
        CostType::ALL
            .into_iter()
            .find(|t| t.display_category() == label)
    }
}

impl fmt::Display for CostType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CostType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "living-expense" | "living" | "living expenses" => Ok(CostType::LivingExpense),
            "liability" | "liabilities" => Ok(CostType::Liability),
            "investment" | "investments" => Ok(CostType::Investment),
            other => Err(Error::InvalidData(format!(
                "Unknown expense type '{}', expected living-expense|liability|investment",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    Fixed,
    Variable,
}

impl Classification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Fixed => "fixed",
            Classification::Variable => "variable",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Classification {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fixed" => Ok(Classification::Fixed),
            "variable" => Ok(Classification::Variable),
            other => Err(Error::InvalidData(format!(
                "Unknown classification '{}', expected fixed|variable",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixedCost {
    pub id: String,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub r#type: CostType,
    pub classification: Classification,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_category: Option<String>,
}

impl FixedCost {
    /// The subcategory, if present and non-empty.
    pub fn subcategory(&self) -> Option<&str> {
        self.sub_category.as_deref().filter(|s| !s.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyExpense {
    pub id: String,
    pub date: NaiveDate,
    pub category: String,
    pub sub_category: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub classification: Classification,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendingHistory {
    pub month: String, // YYYY-MM
    pub daily_expenses: Vec<DailyExpense>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InvestmentGoals {
    #[serde(with = "rust_decimal::serde::float")]
    pub min: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub max: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentBudget {
    pub month: String, // YYYY-MM
    #[serde(with = "rust_decimal::serde::float")]
    pub variable_allocated: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub investment_allocated: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomSubcategory {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub r#type: CostType,
    pub is_visible: bool,
}

/// Everything the application persists for one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetRecord {
    pub user: User,
    #[serde(with = "rust_decimal::serde::float")]
    pub income: Decimal,
    pub investment_goals: InvestmentGoals,
    pub fixed_costs: Vec<FixedCost>,
    pub current_budget: CurrentBudget,
    #[serde(default)]
    pub spending_history: Vec<SpendingHistory>,
    #[serde(default)]
    pub custom_subcategories: Vec<CustomSubcategory>,
}

/// Derived per-category totals; never stored.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotals {
    pub living_expenses: Decimal,
    pub liabilities: Decimal,
    pub investments: Decimal,
    pub subcategory_breakdown: std::collections::BTreeMap<String, Decimal>,
}

impl CategoryTotals {
    pub fn grand_total(&self) -> Decimal {
        self.living_expenses + self.liabilities + self.investments
    }
}
