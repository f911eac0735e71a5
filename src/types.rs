use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Application status inferred from email text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Applied,
    Interview,
    Offer,
    Rejected,
}

impl ApplicationStatus {
    /// All statuses in funnel order: applied → interview → offer → rejected.
    pub const ALL: [ApplicationStatus; 4] = [
        ApplicationStatus::Applied,
        ApplicationStatus::Interview,
        ApplicationStatus::Offer,
        ApplicationStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Applied => "applied",
            Self::Interview => "interview",
            Self::Offer => "offer",
            Self::Rejected => "rejected",
        }
    }
}

/// Received-at value as delivered by the mail fetcher.
///
/// Providers hand back either an already-structured instant or a raw header
/// string (RFC 2822 style, or anything else). Deserialization tries the
/// structured form first, so RFC 3339 strings arrive as [`Timestamp::Instant`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    Instant(DateTime<Utc>),
    Text(String),
}

/// One fetched email, scoped to its owning user. Immutable to the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailRecord {
    #[serde(default)]
    pub user_id: String,
    /// Raw "From" header — may carry a display name, an address, or both.
    #[serde(rename = "from")]
    pub sender: String,
    pub subject: String,
    #[serde(default)]
    pub body: String,
    /// HTML body, kept when the plain-text part was missing or truncated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_body: Option<String>,
    pub received_at: Timestamp,
}

/// Signals derived from one record. Ephemeral: recomputed every call, never
/// persisted, never written back onto the record.
#[derive(Debug, Clone)]
pub struct ClassifiedEmail<'a> {
    pub record: &'a EmailRecord,
    pub company: Option<String>,
    pub status: ApplicationStatus,
    /// Calendar date of receipt; `None` when the timestamp was unparseable,
    /// which drops the record from every date-keyed aggregate.
    pub date: Option<NaiveDate>,
}

/// Per-day status counts for the applications-over-time view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyStatusBucket {
    pub date: NaiveDate,
    pub applied: u32,
    pub interview: u32,
    pub offer: u32,
    pub rejected: u32,
}

impl DailyStatusBucket {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            applied: 0,
            interview: 0,
            offer: 0,
            rejected: 0,
        }
    }

    pub fn increment(&mut self, status: ApplicationStatus) {
        match status {
            ApplicationStatus::Applied => self.applied += 1,
            ApplicationStatus::Interview => self.interview += 1,
            ApplicationStatus::Offer => self.offer += 1,
            ApplicationStatus::Rejected => self.rejected += 1,
        }
    }

    pub fn count(&self, status: ApplicationStatus) -> u32 {
        match status {
            ApplicationStatus::Applied => self.applied,
            ApplicationStatus::Interview => self.interview,
            ApplicationStatus::Offer => self.offer,
            ApplicationStatus::Rejected => self.rejected,
        }
    }
}

/// Activity trend over the two most recent momentum windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Momentum {
    InsufficientData,
    Neutral,
    Increasing,
    Decreasing,
}

/// Forward-looking metrics for one user's record set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightsSnapshot {
    /// Estimated offer probability within 30 days, 0–95, one decimal.
    pub offer_probability_30d: f64,
    pub expected_days_to_offer: Option<i64>,
    pub momentum: Momentum,
    /// Count of date-parseable records, any status.
    pub total_applications: u64,
    pub recent_activity: u64,
    /// Offers as a percentage of total applications, one decimal.
    pub conversion_rate: f64,
}

impl InsightsSnapshot {
    /// The snapshot returned when the user has no records at all.
    pub fn insufficient_data() -> Self {
        Self {
            offer_probability_30d: 0.0,
            expected_days_to_offer: None,
            momentum: Momentum::InsufficientData,
            total_applications: 0,
            recent_activity: 0,
            conversion_rate: 0.0,
        }
    }
}

/// Headline stats from the canonical per-email source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailStats {
    pub total: u64,
    pub read: u64,
    pub unread: u64,
    pub starred: u64,
}

/// One group-by bucket from a delegated count query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupCount {
    pub key: String,
    pub count: u64,
}

/// Application pipeline counts in funnel order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusFunnel {
    pub applied: u64,
    pub interview: u64,
    pub offer: u64,
    pub rejected: u64,
}

/// A saved grouping of emails (the flattened grouping source is the union of
/// all of a user's groups). Groups do not track read/starred flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailGroup {
    pub name: String,
    pub emails: Vec<EmailRecord>,
    pub created_at: DateTime<Utc>,
}

/// Convenience alias for storage-boundary results.
pub type StoreResult<T> = Result<T, StoreError>;
