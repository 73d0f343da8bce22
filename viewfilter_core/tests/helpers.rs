//! Shared fixtures for viewfilter_core tests.

#![allow(dead_code)]

use chrono::{DateTime, FixedOffset, TimeZone};
use serde_json::{Value, json};
use viewfilter_core::{Compiler, Predicate};

/// Surface `debug!` output from the library when a test fails.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Wednesday 2024-06-12 15:00:00 UTC
pub fn fixed_now() -> DateTime<FixedOffset> {
    FixedOffset::east_opt(0)
        .unwrap()
        .with_ymd_and_hms(2024, 6, 12, 15, 0, 0)
        .unwrap()
}

pub fn compiler() -> Compiler {
    Compiler::new(fixed_now())
}

/// A small people list covering the shapes filters have to cope with.
pub fn people_records() -> Vec<Value> {
    vec![
        json!({
            "name": "Ada Lovelace",
            "email": "ada@acme.com",
            "status": "active",
            "age": 30,
            "isFavorite": true,
            "social": {"linkedIn": "in/ada"},
            "createdAt": "2024-06-10T09:00:00Z"
        }),
        json!({
            "name": "Bob Stone",
            "email": "bob@example.org",
            "status": "active",
            "age": 41,
            "isFavorite": false,
            "createdAt": "2024-05-01T12:00:00Z"
        }),
        json!({
            "name": "Cy Young",
            "email": "cy@other.net",
            "status": "lead",
            "age": 35
        }),
        json!({
            "name": "Dee Park",
            "email": "",
            "status": "active",
            "age": 40,
            "createdAt": {"$date": "2024-06-12T10:00:00.000Z"}
        }),
        json!({
            "name": "Eve Moss",
            "age": null
        }),
    ]
}

/// First names of the records the predicate matches, in list order.
pub fn matching(predicate: &Predicate, records: &[Value]) -> Vec<String> {
    records
        .iter()
        .filter(|record| predicate.matches(record))
        .filter_map(|record| record["name"].as_str())
        .filter_map(|name| name.split_whitespace().next())
        .map(str::to_string)
        .collect()
}
