//! Render a dashboard summary from a JSON fixture file.
//!
//! Input shape:
//! `{"user_id": "...", "emails": [StoredEmail...], "groups": [EmailGroup...]}`
//! Prints the composed summary as pretty JSON on stdout.
//!
//! Usage: `dashboard_report fixtures/inbox.json`

use std::fs;
use std::process::ExitCode;

use chrono::Utc;
use serde::Deserialize;

use jobsignal::insights::InsightsConfig;
use jobsignal::services::dashboard::dashboard_summary;
use jobsignal::store::{MemoryStore, StoredEmail};
use jobsignal::types::EmailGroup;

#[derive(Debug, Deserialize)]
struct Fixture {
    user_id: String,
    #[serde(default)]
    emails: Vec<StoredEmail>,
    #[serde(default)]
    groups: Vec<EmailGroup>,
}

fn main() -> ExitCode {
    env_logger::init();

    let Some(path) = std::env::args().nth(1) else {
        eprintln!("usage: dashboard_report <fixture.json>");
        return ExitCode::FAILURE;
    };

    match run(&path) {
        Ok(rendered) => {
            println!("{}", rendered);
            ExitCode::SUCCESS
        }
        Err(message) => {
            eprintln!("dashboard_report: {}", message);
            ExitCode::FAILURE
        }
    }
}

fn run(path: &str) -> Result<String, String> {
    let raw = fs::read_to_string(path).map_err(|e| format!("cannot read {}: {}", path, e))?;
    let fixture: Fixture =
        serde_json::from_str(&raw).map_err(|e| format!("invalid fixture {}: {}", path, e))?;

    let store = MemoryStore::new();
    for email in fixture.emails {
        store.insert_email(email);
    }
    for group in fixture.groups {
        store.insert_group(&fixture.user_id, group);
    }

    let summary = dashboard_summary(
        &store,
        &fixture.user_id,
        Utc::now(),
        &InsightsConfig::default(),
    )
    .map_err(|e| e.to_string())?;

    serde_json::to_string_pretty(&summary).map_err(|e| e.to_string())
}
