// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate, Utc};
use comfy_table::{Attribute, Cell, Color, Table};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;

use crate::db::Theme;

const UA: &str = concat!("badbudget/", env!("CARGO_PKG_VERSION"));

static MONTH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-(0[1-9]|1[0-2])$").expect("static month pattern"));

pub fn http_client() -> Result<reqwest::blocking::Client> {
    let c = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(15))
        .user_agent(UA)
        .build()?;
    Ok(c)
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn is_month_key(s: &str) -> bool {
    MONTH_RE.is_match(s)
}

pub fn parse_month(s: &str) -> Result<String> {
    let s = s.trim();
    if !is_month_key(s) {
        anyhow::bail!("Invalid month '{}', expected YYYY-MM", s);
    }
    Ok(s.to_string())
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.trim()
        .parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

/// `YYYY-MM` key of the month `date` falls in.
pub fn month_of(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

pub fn current_month() -> String {
    month_of(today())
}

pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

pub fn fmt_money(d: &Decimal, ccy: &str) -> String {
    format!("{} {:.2}", ccy, d.round_dp(2))
}

pub fn fmt_percent(p: Option<Decimal>) -> String {
    match p {
        Some(v) => format!("{:.1}%", v),
        None => "-".to_string(),
    }
}

pub fn pretty_table(theme: Theme, headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(theme.table_preset());
    t.set_header(headers.iter().map(|h| match theme {
        Theme::Light => Cell::new(*h).add_attribute(Attribute::Bold),
        Theme::Dark => Cell::new(*h).fg(Color::Cyan),
    }));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // Arrays stream one element per line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

/// Millisecond-timestamp id, bumped until it is not in `taken`.
pub fn new_id<'a, I>(taken: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let taken: Vec<&str> = taken.into_iter().collect();
    let mut n = Utc::now().timestamp_millis();
    loop {
        let id = n.to_string();
        if !taken.contains(&id.as_str()) {
            return id;
        }
        n += 1;
    }
}

pub fn new_user_id() -> String {
    let raw = uuid::Uuid::new_v4().simple().to_string();
    format!("user_{}", &raw[..9])
}
