// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use badbudget::engine::{
    allocation_status, category_totals, dashboard_summary, income_share, investment_gap,
    investment_goal_status, spending_by_subcategory, total_allocated, total_fixed_living_costs,
    total_variable_costs, variable_budget_status, GoalStatus,
};
use badbudget::models::{
    BudgetRecord, Classification, CostType, CurrentBudget, DailyExpense, FixedCost,
    InvestmentGoals, SpendingHistory, User,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;

fn dec(s: &str) -> Decimal {
    Decimal::from_str_exact(s).unwrap()
}

fn cost(
    id: &str,
    name: &str,
    amount: i64,
    t: CostType,
    c: Classification,
    sub: Option<&str>,
) -> FixedCost {
    FixedCost {
        id: id.into(),
        name: name.into(),
        amount: Decimal::from(amount),
        r#type: t,
        classification: c,
        sub_category: sub.map(|s| s.to_string()),
    }
}

fn expense(id: &str, date: &str, category: &str, sub: &str, amount: &str, c: Classification) -> DailyExpense {
    DailyExpense {
        id: id.into(),
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        category: category.into(),
        sub_category: sub.into(),
        amount: dec(amount),
        classification: c,
    }
}

fn sample_costs() -> Vec<FixedCost> {
    vec![
        cost("1", "Rent", 1500, CostType::Liability, Classification::Fixed, Some("Rent/Mortgage")),
        cost("2", "Groceries", 400, CostType::LivingExpense, Classification::Variable, Some("Groceries")),
    ]
}

fn record(variable: i64, investment: i64) -> BudgetRecord {
    BudgetRecord {
        user: User {
            id: "test-user".into(),
            email: "test@example.com".into(),
            name: "Test User".into(),
            created_at: "2024-01-01T00:00:00Z".into(),
        },
        income: Decimal::from(5000),
        investment_goals: InvestmentGoals {
            min: Decimal::from(500),
            max: Decimal::from(1000),
        },
        fixed_costs: sample_costs(),
        current_budget: CurrentBudget {
            month: "2024-01".into(),
            variable_allocated: Decimal::from(variable),
            investment_allocated: Decimal::from(investment),
        },
        spending_history: Vec::new(),
        custom_subcategories: Vec::new(),
    }
}

#[test]
fn fixed_costs_alone_group_by_type() {
    let costs = vec![
        cost("1", "Rent", 1500, CostType::Liability, Classification::Fixed, Some("Rent/Mortgage")),
        cost("2", "Food", 400, CostType::LivingExpense, Classification::Variable, Some("Groceries")),
        cost("3", "Bus", 60, CostType::LivingExpense, Classification::Fixed, Some("Transportation")),
        cost("4", "401k", 300, CostType::Investment, Classification::Fixed, Some("401(k)")),
    ];
    let totals = category_totals(&costs, &[], "2024-01");
    assert_eq!(totals.living_expenses, Decimal::from(460));
    assert_eq!(totals.liabilities, Decimal::from(1500));
    assert_eq!(totals.investments, Decimal::from(300));
    let breakdown_sum: Decimal = totals.subcategory_breakdown.values().copied().sum();
    assert_eq!(breakdown_sum, totals.grand_total());
    assert_eq!(totals.subcategory_breakdown["Groceries"], Decimal::from(400));
}

#[test]
fn cost_without_subcategory_counts_but_skips_breakdown() {
    let costs = vec![
        cost("1", "Gym", 50, CostType::LivingExpense, Classification::Fixed, None),
        cost("2", "Misc", 20, CostType::LivingExpense, Classification::Fixed, Some("")),
    ];
    let totals = category_totals(&costs, &[], "2024-01");
    assert_eq!(totals.living_expenses, Decimal::from(70));
    assert!(totals.subcategory_breakdown.is_empty());
}

#[test]
fn only_reference_month_expenses_count() {
    let history = vec![
        SpendingHistory {
            month: "2024-01".into(),
            daily_expenses: vec![
                expense("a", "2024-01-03", "Living Expenses", "Coffee", "4.50", Classification::Variable),
                expense("b", "2024-01-05", "Investments", "Stocks", "200", Classification::Fixed),
                expense("c", "2024-01-09", "Liabilities", "Credit Cards", "75", Classification::Variable),
            ],
        },
        SpendingHistory {
            month: "2023-12".into(),
            daily_expenses: vec![expense(
                "z",
                "2023-12-20",
                "Living Expenses",
                "Coffee",
                "100",
                Classification::Variable,
            )],
        },
    ];
    let totals = category_totals(&sample_costs(), &history, "2024-01");
    assert_eq!(totals.living_expenses, dec("404.50"));
    assert_eq!(totals.investments, Decimal::from(200));
    // Liabilities recorded as daily expenses stay out of the liabilities total
    assert_eq!(totals.liabilities, Decimal::from(1500));
    assert_eq!(totals.subcategory_breakdown["Credit Cards"], Decimal::from(75));
    assert_eq!(totals.subcategory_breakdown["Coffee"], dec("4.50"));
}

#[test]
fn missing_month_means_no_spending() {
    let totals = category_totals(&sample_costs(), &[], "2030-05");
    assert_eq!(totals.living_expenses, Decimal::from(400));
    assert_eq!(totals.subcategory_breakdown.len(), 2);
}

#[test]
fn category_totals_is_idempotent() {
    let history = vec![SpendingHistory {
        month: "2024-01".into(),
        daily_expenses: vec![expense("a", "2024-01-03", "Living Expenses", "Groceries", "12", Classification::Variable)],
    }];
    let first = category_totals(&sample_costs(), &history, "2024-01");
    let second = category_totals(&sample_costs(), &history, "2024-01");
    assert_eq!(first, second);
    assert_eq!(first.subcategory_breakdown["Groceries"], Decimal::from(412));
}

#[test]
fn allocation_leaves_unallocated_balance() {
    let r = record(800, 600);
    let allocated = total_allocated(&r.fixed_costs, &r.current_budget);
    assert_eq!(allocated, Decimal::from(3300));
    let status = allocation_status(r.income, allocated);
    assert_eq!(status.unallocated_amount, Decimal::from(1700));
    assert_eq!(status.percent_allocated, 66);
}

#[test]
fn allocation_exactly_full() {
    let r = record(2000, 1100);
    let allocated = total_allocated(&r.fixed_costs, &r.current_budget);
    assert_eq!(allocated, Decimal::from(5000));
    let status = allocation_status(r.income, allocated);
    assert_eq!(status.percent_allocated, 100);
    assert!(status.unallocated_amount.is_zero());
}

#[test]
fn over_allocation_clamps() {
    let r = record(2500, 1200);
    let allocated = total_allocated(&r.fixed_costs, &r.current_budget);
    assert_eq!(allocated, Decimal::from(5600));
    let status = allocation_status(r.income, allocated);
    assert_eq!(status.percent_allocated, 100);
    assert!(status.unallocated_amount.is_zero());
}

#[test]
fn allocation_rounds_half_up() {
    // 2025 / 3000 = 67.5%
    let status = allocation_status(Decimal::from(3000), Decimal::from(2025));
    assert_eq!(status.percent_allocated, 68);
}

#[test]
fn allocation_with_zero_income() {
    assert_eq!(allocation_status(Decimal::ZERO, Decimal::ZERO).percent_allocated, 0);
    let status = allocation_status(Decimal::ZERO, Decimal::from(10));
    assert_eq!(status.percent_allocated, 100);
    assert!(status.unallocated_amount.is_zero());
}

#[test]
fn tiny_income_does_not_overflow() {
    let income = Decimal::new(1, 20);
    let status = allocation_status(income, Decimal::from(100_000_000_000i64));
    assert_eq!(status.percent_allocated, 100);
    assert!(status.unallocated_amount.is_zero());
    assert_eq!(income_share(Decimal::from(100_000_000_000i64), income), None);
}

#[test]
fn goal_boundaries_are_inclusive() {
    let goals = InvestmentGoals {
        min: Decimal::from(500),
        max: Decimal::from(1000),
    };
    assert_eq!(investment_goal_status(dec("500"), &goals), GoalStatus::OnTarget);
    assert_eq!(investment_goal_status(dec("499.99"), &goals), GoalStatus::BelowTarget);
    assert_eq!(investment_goal_status(dec("1000"), &goals), GoalStatus::OnTarget);
    assert_eq!(investment_goal_status(dec("1000.01"), &goals), GoalStatus::AboveTarget);

    assert_eq!(investment_gap(dec("450"), &goals), Decimal::from(50));
    assert_eq!(investment_gap(dec("1200"), &goals), Decimal::from(200));
    assert!(investment_gap(dec("750"), &goals).is_zero());
}

#[test]
fn variable_total_excludes_fixed_classification() {
    let costs = vec![
        cost("1", "Rent", 1500, CostType::Liability, Classification::Fixed, None),
        cost("2", "Index fund", 300, CostType::Investment, Classification::Fixed, None),
        cost("3", "Loan top-up", 100, CostType::Liability, Classification::Variable, None),
        cost("4", "Groceries", 400, CostType::LivingExpense, Classification::Variable, None),
    ];
    let history = vec![SpendingHistory {
        month: "2024-01".into(),
        daily_expenses: vec![
            expense("a", "2024-01-02", "Investments", "Stocks", "250", Classification::Fixed),
            expense("b", "2024-01-04", "Living Expenses", "Coffee", "5", Classification::Variable),
        ],
    }];
    assert_eq!(total_variable_costs(&costs, &history, "2024-01"), Decimal::from(505));
    assert_eq!(total_variable_costs(&costs, &history, "2024-02"), Decimal::from(500));
    assert_eq!(total_fixed_living_costs(&costs), Decimal::ZERO);
}

#[test]
fn spending_chart_sorted_descending() {
    let history = vec![SpendingHistory {
        month: "2024-01".into(),
        daily_expenses: vec![
            expense("a", "2024-01-02", "Living Expenses", "Coffee", "5", Classification::Variable),
            expense("b", "2024-01-03", "Living Expenses", "Dining Out", "40", Classification::Variable),
            expense("c", "2024-01-04", "Living Expenses", "Coffee", "6", Classification::Variable),
            expense("d", "2024-01-05", "Investments", "Stocks", "900", Classification::Fixed),
        ],
    }];
    let chart = spending_by_subcategory(&history, "2024-01");
    assert_eq!(
        chart,
        vec![
            ("Dining Out".to_string(), Decimal::from(40)),
            ("Coffee".to_string(), Decimal::from(11)),
        ]
    );
}

#[test]
fn income_share_one_decimal() {
    assert_eq!(income_share(Decimal::from(1), Decimal::from(3)), Some(dec("33.3")));
    assert_eq!(income_share(Decimal::from(1), Decimal::ZERO), None);
}

#[test]
fn dashboard_summary_bundles_figures() {
    let mut r = record(800, 600);
    r.spending_history.push(SpendingHistory {
        month: "2024-01".into(),
        daily_expenses: vec![expense(
            "a",
            "2024-01-10",
            "Investments",
            "Stocks",
            "300",
            Classification::Fixed,
        )],
    });
    let s = dashboard_summary(&r, "2024-01");
    assert_eq!(s.total_allocated, Decimal::from(3300));
    assert_eq!(s.allocation.percent_allocated, 66);
    assert_eq!(s.totals.investments, Decimal::from(300));
    assert_eq!(s.goal_status, GoalStatus::BelowTarget);
    assert_eq!(s.investment_gap, Decimal::from(200));
    assert_eq!(s.total_variable_costs, Decimal::from(400));
    assert_eq!(s.shares.investments, Some(dec("6.0")));
    assert!(s.current_month_spending.is_zero());
    assert!(!s.variable_budget.over_budget);
    assert_eq!(s.variable_budget.remaining, Decimal::from(800));
}

#[test]
fn variable_spending_against_declared_budget() {
    let budget = record(100, 0).current_budget;
    let under = variable_budget_status(dec("99.50"), &budget);
    assert!(!under.over_budget);
    assert_eq!(under.remaining, dec("0.50"));

    let exact = variable_budget_status(Decimal::from(100), &budget);
    assert!(!exact.over_budget);

    let over = variable_budget_status(dec("125"), &budget);
    assert!(over.over_budget);
    assert_eq!(over.remaining, Decimal::from(-25));
}

#[test]
fn dashboard_flags_overspent_month() {
    let mut r = record(10, 0);
    r.spending_history.push(SpendingHistory {
        month: "2024-01".into(),
        daily_expenses: vec![
            expense("a", "2024-01-02", "Living Expenses", "Coffee", "6", Classification::Variable),
            expense("b", "2024-01-03", "Living Expenses", "Dining Out", "9", Classification::Variable),
        ],
    });
    let s = dashboard_summary(&r, "2024-01");
    assert_eq!(s.current_month_spending, Decimal::from(15));
    assert!(s.variable_budget.over_budget);
    assert_eq!(s.variable_budget.remaining, Decimal::from(-5));
}
