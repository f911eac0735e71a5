//! Multi-format date normalization.
//!
//! Structured timestamps format directly to their UTC calendar date. Free
//! text runs through an ordered list of independent parsers; first success
//! wins. No timezone conversion is applied — the date is taken at face value
//! from whatever representation the provider gave. A failed parse is a skip
//! signal for date-keyed aggregates, not an error.

use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::constants::MONTH_ABBREVIATIONS;
use crate::types::Timestamp;

type TextParser = fn(&str) -> Option<NaiveDate>;

/// Ordered text-format parsers. Add new formats here; callers never change.
const TEXT_PARSERS: &[(&str, TextParser)] = &[
    ("iso_ymd", parse_iso_ymd),
    ("day_month_abbrev", parse_day_month_abbrev),
];

/// Normalize a received-at value to a calendar date, or `None` when no
/// known format matches.
pub fn normalize_date(received_at: &Timestamp) -> Option<NaiveDate> {
    match received_at {
        Timestamp::Instant(dt) => Some(dt.date_naive()),
        Timestamp::Text(raw) => parse_date_text(raw),
    }
}

/// Run the parser list over free text, first success wins.
pub fn parse_date_text(raw: &str) -> Option<NaiveDate> {
    for (name, parser) in TEXT_PARSERS {
        if let Some(date) = parser(raw) {
            log::trace!("date text {:?} parsed by {}", raw, name);
            return Some(date);
        }
    }
    None
}

fn re_iso_ymd() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d{4})-(\d{2})-(\d{2})").unwrap())
}

/// Embedded `YYYY-MM-DD`, e.g. "2025-11-07T16:49:07Z".
fn parse_iso_ymd(raw: &str) -> Option<NaiveDate> {
    let caps = re_iso_ymd().captures(raw)?;
    let year = caps[1].parse().ok()?;
    let month = caps[2].parse().ok()?;
    let day = caps[3].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

fn re_day_month_year() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        let months = MONTH_ABBREVIATIONS.join("|");
        Regex::new(&format!(r"(?i)\b(\d{{1,2}})\s+({})[a-z]*\s+(\d{{4}})", months)).unwrap()
    })
}

/// Embedded `D Mon YYYY`, e.g. "Fri, 7 Nov 2025 16:49:07 +0000".
fn parse_day_month_abbrev(raw: &str) -> Option<NaiveDate> {
    let caps = re_day_month_year().captures(raw)?;
    let day: u32 = caps[1].parse().ok()?;
    let month = month_number(&caps[2])?;
    let year: i32 = caps[3].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

fn month_number(abbrev: &str) -> Option<u32> {
    let lower = abbrev.to_lowercase();
    MONTH_ABBREVIATIONS
        .iter()
        .position(|m| *m == lower)
        .map(|idx| idx as u32 + 1)
}
