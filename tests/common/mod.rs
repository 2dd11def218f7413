#![allow(dead_code)]

pub mod cli;

use serde_json::{Value, json};

/// One open, one implemented, one closed (via `state`) issue.
pub fn sample_issues() -> Value {
    json!([
        {"id": 1, "title": "First", "status": "open"},
        {"id": 2, "title": "Second", "status": "implemented"},
        {"id": 3, "title": "Third", "state": "closed"},
    ])
}
