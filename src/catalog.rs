// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use serde::Serialize;

use crate::models::{CostType, CustomSubcategory};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubCategory {
    pub name: String,
    pub icon: String,
    pub is_custom: bool,
}

pub const LIVING_EXPENSE_SUBCATEGORIES: &[(&str, &str)] = &[
    ("Groceries", "🍎"),
    ("Transportation", "🚗"),
    ("Utilities", "⚡"),
    ("Entertainment", "🎬"),
    ("Healthcare", "🏥"),
    ("Pet Supplies", "🐕"),
    ("Coffee", "☕"),
    ("Dining Out", "🍽️"),
    ("Shopping", "🛍️"),
    ("Other", "📦"),
];

pub const LIABILITY_SUBCATEGORIES: &[(&str, &str)] = &[
    ("Rent/Mortgage", "🏠"),
    ("Car Payment", "🚙"),
    ("Student Loans", "🎓"),
    ("Credit Cards", "💳"),
    ("Insurance", "🛡️"),
    ("Other Loans", "💰"),
];

pub const INVESTMENT_SUBCATEGORIES: &[(&str, &str)] = &[
    ("401(k)", "📈"),
    ("IRA", "🏦"),
    ("Stocks", "📊"),
    ("Bonds", "📋"),
    ("Real Estate", "🏘️"),
    ("Crypto", "₿"),
    ("Emergency Fund", "🛟"),
    ("Other Investments", "💎"),
];

pub const DEFAULT_ICON: &str = "📦";

pub fn built_in(kind: CostType) -> &'static [(&'static str, &'static str)] {
    match kind {
        CostType::LivingExpense => LIVING_EXPENSE_SUBCATEGORIES,
        CostType::Liability => LIABILITY_SUBCATEGORIES,
        CostType::Investment => INVESTMENT_SUBCATEGORIES,
    }
}

/// Built-ins for `kind` followed by the user's own subcategories of that kind.
pub fn subcategories_for(kind: CostType, customs: &[CustomSubcategory]) -> Vec<SubCategory> {
    let mut out: Vec<SubCategory> = built_in(kind)
        .iter()
        .map(|(name, icon)| SubCategory {
            name: name.to_string(),
            icon: icon.to_string(),
            is_custom: false,
        })
        .collect();
    out.extend(customs.iter().filter(|c| c.r#type == kind).map(|c| SubCategory {
        name: c.name.clone(),
        icon: c.icon.clone(),
        is_custom: true,
    }));
    out
}

/// Like [`subcategories_for`], minus anything shadowed by a hidden custom
/// subcategory of the same name. A hidden custom named like a built-in hides
/// the built-in too.
pub fn visible_subcategories(kind: CostType, customs: &[CustomSubcategory]) -> Vec<SubCategory> {
    let own: Vec<&CustomSubcategory> = customs.iter().filter(|c| c.r#type == kind).collect();
    subcategories_for(kind, customs)
        .into_iter()
        .filter(|sub| {
            own.iter()
                .find(|c| c.name == sub.name)
                .is_none_or(|c| c.is_visible)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn custom(name: &str, kind: CostType, visible: bool) -> CustomSubcategory {
        CustomSubcategory {
            id: name.to_lowercase(),
            name: name.into(),
            icon: DEFAULT_ICON.into(),
            r#type: kind,
            is_visible: visible,
        }
    }

    #[test]
    fn customs_follow_built_ins_of_same_type() {
        let customs = vec![
            custom("Gym", CostType::LivingExpense, true),
            custom("Gold", CostType::Investment, true),
        ];
        let subs = subcategories_for(CostType::LivingExpense, &customs);
        assert_eq!(subs.len(), LIVING_EXPENSE_SUBCATEGORIES.len() + 1);
        assert_eq!(subs.last().unwrap().name, "Gym");
        assert!(subs.last().unwrap().is_custom);
        assert!(!subs.iter().any(|s| s.name == "Gold"));
    }

    #[test]
    fn hidden_custom_is_filtered() {
        let customs = vec![
            custom("Gym", CostType::LivingExpense, false),
            custom("Books", CostType::LivingExpense, true),
        ];
        let names: Vec<String> = visible_subcategories(CostType::LivingExpense, &customs)
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert!(!names.contains(&"Gym".to_string()));
        assert!(names.contains(&"Books".to_string()));
    }

    #[test]
    fn hidden_custom_shadows_built_in_name() {
        let customs = vec![custom("Coffee", CostType::LivingExpense, false)];
        let subs = visible_subcategories(CostType::LivingExpense, &customs);
        assert!(!subs.iter().any(|s| s.name == "Coffee"));
        assert!(subs.iter().any(|s| s.name == "Groceries"));
    }
}
