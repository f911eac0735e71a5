//! Forward-looking application metrics over a single record set.
//!
//! Every computation takes an explicit `now` so momentum, recent activity,
//! and probability are reproducible under test; `compute_insights_now` is
//! the wall-clock convenience wrapper. Records are classified independently
//! here — no state is shared with the timeline aggregator.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::classify::classify_email;
use crate::types::{ApplicationStatus, EmailRecord, InsightsSnapshot, Momentum};

/// Tunable business thresholds for the insights computation.
///
/// The defaults match production behavior; none of them carries a documented
/// rationale, so they are surfaced here rather than buried in the math.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightsConfig {
    /// Recent-activity divisor feeding the probability multiplier.
    #[serde(default = "default_activity_divisor")]
    pub activity_divisor: f64,
    /// Upper bound on the activity multiplier.
    #[serde(default = "default_multiplier_cap")]
    pub multiplier_cap: f64,
    /// Upper bound on the offer probability, in percent.
    #[serde(default = "default_probability_cap")]
    pub probability_cap: f64,
    /// Width of one momentum comparison window, in days.
    #[serde(default = "default_momentum_window_days")]
    pub momentum_window_days: i64,
    /// Width of the recent-activity window, in days.
    #[serde(default = "default_recent_window_days")]
    pub recent_window_days: i64,
}

fn default_activity_divisor() -> f64 {
    5.0
}

fn default_multiplier_cap() -> f64 {
    2.0
}

fn default_probability_cap() -> f64 {
    95.0
}

fn default_momentum_window_days() -> i64 {
    15
}

fn default_recent_window_days() -> i64 {
    30
}

impl Default for InsightsConfig {
    fn default() -> Self {
        Self {
            activity_divisor: default_activity_divisor(),
            multiplier_cap: default_multiplier_cap(),
            probability_cap: default_probability_cap(),
            momentum_window_days: default_momentum_window_days(),
            recent_window_days: default_recent_window_days(),
        }
    }
}

/// Compute the insights snapshot for one user's record set.
///
/// An empty record set returns the insufficient-data snapshot. Records with
/// unparseable dates are classified but excluded from every metric.
pub fn compute_insights(
    records: &[EmailRecord],
    now: DateTime<Utc>,
    config: &InsightsConfig,
) -> InsightsSnapshot {
    if records.is_empty() {
        return InsightsSnapshot::insufficient_data();
    }

    let mut dated: Vec<(ApplicationStatus, NaiveDate)> = Vec::new();
    for record in records {
        let classified = classify_email(record);
        if let Some(date) = classified.date {
            dated.push((classified.status, date));
        }
    }

    let today = now.date_naive();
    let days_ago = |date: NaiveDate| (today - date).num_days();

    let total = dated.len() as u64;
    let offers = dated
        .iter()
        .filter(|(status, _)| *status == ApplicationStatus::Offer)
        .count() as u64;

    let conversion_rate = if total > 0 {
        round_to_tenth(offers as f64 / total as f64 * 100.0)
    } else {
        0.0
    };

    let recent_activity = dated
        .iter()
        .filter(|(_, date)| {
            let n = days_ago(*date);
            n >= 0 && n < config.recent_window_days
        })
        .count() as u64;

    let momentum = compute_momentum(&dated, today, config.momentum_window_days);

    let expected_days_to_offer = expected_days_to_offer(&dated);

    let offer_probability_30d = if recent_activity > 0 {
        let multiplier =
            (recent_activity as f64 / config.activity_divisor).min(config.multiplier_cap);
        round_to_tenth((conversion_rate * multiplier).min(config.probability_cap))
    } else {
        round_to_tenth(conversion_rate * 0.5)
    };

    InsightsSnapshot {
        offer_probability_30d,
        expected_days_to_offer,
        momentum,
        total_applications: total,
        recent_activity,
        conversion_rate,
    }
}

/// Wall-clock wrapper around [`compute_insights`].
pub fn compute_insights_now(records: &[EmailRecord], config: &InsightsConfig) -> InsightsSnapshot {
    compute_insights(records, Utc::now(), config)
}

/// Compare the most recent window against the one preceding it.
/// No prior activity reads as neutral, not decreasing.
fn compute_momentum(
    dated: &[(ApplicationStatus, NaiveDate)],
    today: NaiveDate,
    window_days: i64,
) -> Momentum {
    let mut last_window = 0u64;
    let mut prev_window = 0u64;
    for (_, date) in dated {
        let n = (today - *date).num_days();
        if n >= 0 && n < window_days {
            last_window += 1;
        } else if n >= window_days && n < window_days * 2 {
            prev_window += 1;
        }
    }

    if prev_window == 0 {
        Momentum::Neutral
    } else if last_window > prev_window {
        Momentum::Increasing
    } else {
        Momentum::Decreasing
    }
}

/// Whole days between the earliest application and the earliest offer,
/// present only when the offer came strictly after the application.
fn expected_days_to_offer(dated: &[(ApplicationStatus, NaiveDate)]) -> Option<i64> {
    let earliest = |status: ApplicationStatus| {
        dated
            .iter()
            .filter(|(s, _)| *s == status)
            .map(|(_, date)| *date)
            .min()
    };
    match (
        earliest(ApplicationStatus::Applied),
        earliest(ApplicationStatus::Offer),
    ) {
        (Some(applied), Some(offer)) if offer > applied => Some((offer - applied).num_days()),
        _ => None,
    }
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
