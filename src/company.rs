//! Company name extraction from email sender text.
//!
//! Two heuristics, tried in order: the domain of an embedded address
//! (stoplisted infrastructure tokens skipped), then the longest run of
//! capitalized words in the raw text. Best-effort — a miss is `None`,
//! never an error.

use std::sync::OnceLock;

use regex::Regex;

use crate::constants::DOMAIN_STOPLIST;

fn re_email_address() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[A-Za-z0-9._%+\-]+@([A-Za-z0-9.\-]+)").unwrap())
}

/// Extract a company name from a "From" field.
///
/// `"John Doe <john@acme.com>"` → `Some("Acme")`;
/// `"Acme Talent Team"` → `Some("Acme Talent Team")`;
/// text with no address and no capitalized words → `None`.
pub fn extract_company(sender: &str) -> Option<String> {
    company_from_domain(sender).or_else(|| longest_capitalized_run(sender))
}

/// Domain heuristic: split the address domain on `.` and `-`, skip
/// stoplisted tokens, capitalize the first token longer than one character.
fn company_from_domain(sender: &str) -> Option<String> {
    let caps = re_email_address().captures(sender)?;
    let domain = caps[1].to_lowercase();
    domain
        .split(['.', '-'])
        .filter(|token| !DOMAIN_STOPLIST.contains(token))
        .find(|token| token.len() > 1)
        .map(capitalize)
}

/// Fallback heuristic: the longest maximal run of capitalized words.
fn longest_capitalized_run(text: &str) -> Option<String> {
    let mut best: Option<String> = None;
    let mut current: Vec<&str> = Vec::new();

    for raw in text.split_whitespace() {
        let word = raw.trim_matches(|c: char| !c.is_alphanumeric());
        if is_capitalized_word(word) {
            current.push(word);
        } else {
            flush_run(&mut current, &mut best);
        }
    }
    flush_run(&mut current, &mut best);
    best
}

fn flush_run(current: &mut Vec<&str>, best: &mut Option<String>) {
    if current.is_empty() {
        return;
    }
    let candidate = current.join(" ");
    if best.as_ref().map_or(true, |b| candidate.len() > b.len()) {
        *best = Some(candidate);
    }
    current.clear();
}

fn is_capitalized_word(word: &str) -> bool {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.is_ascii_uppercase() && chars.all(|c| c.is_alphabetic()),
        None => false,
    }
}

fn capitalize(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
