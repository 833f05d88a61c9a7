mod analyses_tests;
mod config_tests;

use serde_json::{json, Value};

use crate::models::Issue;

/// Build issues from JSON literals; panics on malformed fixtures.
pub(crate) fn issues(records: Value) -> Vec<Issue> {
    records
        .as_array()
        .expect("fixture must be an array")
        .iter()
        .map(|record| Issue::from_value(record).expect("fixture issue must parse"))
        .collect()
}

pub(crate) fn event(kind: &str, author: &str, date: &str) -> Value {
    json!({ "event_type": kind, "author": author, "event_date": date })
}
