// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use badbudget::commands::{self, Session};
use badbudget::engine::{allocation_status, total_allocated};
use badbudget::{cli, db};
use rusqlite::Connection;
use rust_decimal::Decimal;
use tempfile::tempdir;

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn
}

fn run(session: &Session, args: &[&str]) {
    let mut argv = vec!["badbudget"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    match matches.subcommand() {
        Some(("init", sub)) => commands::onboarding::init(session, sub).unwrap(),
        Some(("budget", sub)) => commands::budgets::handle_budget(session, sub).unwrap(),
        Some(("goals", sub)) => commands::budgets::handle_goals(session, sub).unwrap(),
        Some(("cost", sub)) => commands::costs::handle(session, sub).unwrap(),
        Some(("expense", sub)) => commands::expenses::handle(session, sub).unwrap(),
        Some(("subcategory", sub)) => commands::subcategories::handle(session, sub).unwrap(),
        Some(("export", sub)) => commands::exporter::handle(session, sub).unwrap(),
        other => panic!("unexpected command {:?}", other.map(|(n, _)| n)),
    }
}

fn sub_matches(args: &[&str]) -> clap::ArgMatches {
    let mut argv = vec!["badbudget"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    let (_, sub) = matches.subcommand().unwrap();
    let (_, leaf) = sub.subcommand().unwrap();
    leaf.clone()
}

fn seeded(conn: &Connection) -> Session<'_> {
    let session = Session::new(conn, None).unwrap();
    run(
        &session,
        &["init", "--income", "5000", "--invest-min", "500", "--invest-max", "1000", "--month", "2024-01"],
    );
    run(
        &session,
        &[
            "cost", "add", "--name", "Rent", "--amount", "1500", "--type", "liability",
            "--subcategory", "Rent/Mortgage",
        ],
    );
    run(
        &session,
        &[
            "cost", "add", "--name", "Groceries", "--amount", "400", "--type", "living-expense",
            "--class", "variable", "--subcategory", "Groceries",
        ],
    );
    session
}

#[test]
fn init_then_costs_and_budget() {
    let conn = setup();
    let session = seeded(&conn);
    run(&session, &["budget", "set", "--variable", "800", "--investment", "600", "--month", "2024-01"]);

    let record = session.load().unwrap();
    assert_eq!(record.income, Decimal::from(5000));
    assert_eq!(record.fixed_costs.len(), 2);
    assert_eq!(record.current_budget.variable_allocated, Decimal::from(800));

    let rows = commands::costs::query_rows(&record, &sub_matches(&["cost", "list", "--class", "variable"])).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "Groceries");
    assert_eq!(rows[0].amount, "400.00");
}

#[test]
fn init_refuses_to_overwrite() {
    let conn = setup();
    let session = seeded(&conn);
    let matches = cli::build_cli().get_matches_from([
        "badbudget", "init", "--income", "1", "--invest-min", "0", "--invest-max", "0",
    ]);
    let (_, sub) = matches.subcommand().unwrap();
    assert!(commands::onboarding::init(&session, sub).is_err());
}

#[test]
fn expenses_trimmed_and_listed_newest_first() {
    let conn = setup();
    let session = seeded(&conn);
    run(
        &session,
        &["expense", "add", "--amount", " 4.50 ", "--subcategory", " Coffee ", "--date", "2024-01-03"],
    );
    run(
        &session,
        &[
            "expense", "add", "--amount", "200", "--subcategory", "Stocks", "--date", "2024-01-09",
            "--category", "investment", "--class", "fixed",
        ],
    );

    let record = session.load().unwrap();
    let rows = commands::expenses::query_rows(&record, &sub_matches(&["expense", "list", "--month", "2024-01"])).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].date, "2024-01-09");
    assert_eq!(rows[0].category, "Investments");
    assert_eq!(rows[1].subcategory, "Coffee");
    assert_eq!(rows[1].amount, "4.50");

    let variable_only = commands::expenses::query_rows(
        &record,
        &sub_matches(&["expense", "list", "--month", "2024-01", "--class", "variable"]),
    )
    .unwrap();
    assert_eq!(variable_only.len(), 1);

    let other_month = commands::expenses::query_rows(&record, &sub_matches(&["expense", "list", "--month", "2023-12"])).unwrap();
    assert!(other_month.is_empty());
}

#[test]
fn subcategory_rename_reaches_costs_and_expenses() {
    let conn = setup();
    let session = seeded(&conn);
    run(
        &session,
        &["expense", "add", "--amount", "30", "--subcategory", "Groceries", "--date", "2024-01-05"],
    );
    run(&session, &["subcategory", "rename", "Groceries", "Food"]);

    let record = session.load().unwrap();
    assert_eq!(record.fixed_costs[1].sub_category.as_deref(), Some("Food"));
    assert_eq!(record.spending_history[0].daily_expenses[0].sub_category, "Food");
}

#[test]
fn export_csv_lists_every_expense() {
    let conn = setup();
    let session = seeded(&conn);
    run(&session, &["expense", "add", "--amount", "12", "--subcategory", "Coffee", "--date", "2024-02-01"]);
    run(&session, &["expense", "add", "--amount", "7", "--subcategory", "Coffee", "--date", "2024-01-20"]);

    let dir = tempdir().unwrap();
    let out = dir.path().join("expenses.csv");
    let out_str = out.to_string_lossy().to_string();
    run(&session, &["export", "--format", "csv", "--out", &out_str]);

    let mut rdr = csv::Reader::from_path(&out).unwrap();
    let months: Vec<String> = rdr
        .records()
        .map(|r| r.unwrap().get(0).unwrap().to_string())
        .collect();
    assert_eq!(months, vec!["2024-01", "2024-02"]);
}

#[test]
fn export_json_round_trips() {
    let conn = setup();
    let session = seeded(&conn);
    let dir = tempdir().unwrap();
    let out = dir.path().join("budget.json");
    let out_str = out.to_string_lossy().to_string();
    run(&session, &["export", "--out", &out_str]);

    let text = std::fs::read_to_string(&out).unwrap();
    let parsed: badbudget::models::BudgetRecord = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed, session.load().unwrap());
}

#[test]
fn doctor_flags_misfiled_expense() {
    let conn = setup();
    let session = seeded(&conn);
    run(&session, &["expense", "add", "--amount", "12", "--subcategory", "Coffee", "--date", "2024-02-01"]);

    let mut record = session.load().unwrap();
    assert!(commands::doctor::diagnose(&record).is_empty());

    record.spending_history[0].month = "2024-03".into();
    record.investment_goals.min = Decimal::from(2000);
    let issues: Vec<String> = commands::doctor::diagnose(&record)
        .into_iter()
        .map(|r| r[0].clone())
        .collect();
    assert!(issues.contains(&"expense_wrong_month".to_string()));
    assert!(issues.contains(&"goal_range_inverted".to_string()));
}

#[test]
fn sync_without_remote_is_an_error() {
    let conn = setup();
    let session = seeded(&conn);
    let matches = cli::build_cli().get_matches_from(["badbudget", "sync", "push"]);
    let (_, sub) = matches.subcommand().unwrap();
    assert!(commands::sync::handle(&session, sub).is_err());
}

#[test]
fn json_output_flags_are_exclusive() {
    let ok = cli::build_cli().try_get_matches_from(["badbudget", "show", "--json"]);
    assert!(ok.is_ok());
    let clash = cli::build_cli().try_get_matches_from(["badbudget", "show", "--json", "--jsonl"]);
    assert!(clash.is_err());
}

#[test]
fn init_records_starting_costs() {
    let conn = setup();
    let session = Session::new(&conn, None).unwrap();
    run(
        &session,
        &[
            "init", "--income", "5000", "--invest-min", "500", "--invest-max", "1000",
            "--month", "2024-01",
            "--cost", "Rent:1500:liability:fixed:Rent/Mortgage",
            "--cost", "Groceries:400:living-expense:variable:Groceries",
        ],
    );

    let record = session.load().unwrap();
    assert_eq!(record.fixed_costs.len(), 2);
    assert_eq!(record.fixed_costs[0].sub_category.as_deref(), Some("Rent/Mortgage"));
    let remaining = allocation_status(
        record.income,
        total_allocated(&record.fixed_costs, &record.current_budget),
    )
    .unallocated_amount;
    assert_eq!(remaining, Decimal::from(3100));
}

#[test]
fn malformed_starting_cost_is_rejected() {
    assert!(commands::onboarding::parse_cost_spec("Rent:1500:liability").is_err());
    assert!(commands::onboarding::parse_cost_spec("Rent:abc:liability:fixed:Rent").is_err());
    let cost = commands::onboarding::parse_cost_spec(" Gym : 30 : living : fixed : Health: Gym ").unwrap();
    assert_eq!(cost.name, "Gym");
    assert_eq!(cost.sub_category, "Health: Gym");

    let conn = setup();
    let session = Session::new(&conn, None).unwrap();
    let matches = cli::build_cli().get_matches_from([
        "badbudget", "init", "--income", "100", "--invest-min", "0", "--invest-max", "0",
        "--cost", "Rent:1500:liability:sometimes:Rent",
    ]);
    let (_, sub) = matches.subcommand().unwrap();
    assert!(commands::onboarding::init(&session, sub).is_err());
    assert!(session.try_load().unwrap().is_none());
}

#[test]
fn breakdown_rows_are_named_and_sorted() {
    let conn = setup();
    let session = seeded(&conn);
    let record = session.load().unwrap();
    let rows = commands::reports::breakdown_rows(&record, "2024-01");
    assert_eq!(rows[0].subcategory, "Rent/Mortgage");
    assert_eq!(rows[0].total, "1500.00");

    let v = serde_json::to_value(&rows).unwrap();
    assert_eq!(v[1]["subcategory"], "Groceries");
    assert_eq!(v[1]["total"], "400.00");
}
