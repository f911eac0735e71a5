//! Dashboard aggregation.
//!
//! Composes extraction, the timeline, the insights snapshot, and the
//! delegated analytics queries into one response. Headline stats fall back
//! from the canonical per-email source to the flattened grouping source when
//! the canonical side is empty; the per-dimension breakdowns always come
//! from the canonical source and may legitimately be empty under fallback.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::company::extract_company;
use crate::insights::{compute_insights, InsightsConfig};
use crate::services::analytics;
use crate::store::{flatten_groups, grouped_counts, EmailStore};
use crate::timeline::build_timeline;
use crate::types::{
    DailyStatusBucket, EmailRecord, EmailStats, GroupCount, InsightsSnapshot, StatusFunnel,
    StoreResult,
};

/// Companies view inside the composed summary.
const BY_COMPANY_LIMIT: usize = analytics::DEFAULT_TOP_LIMIT;
/// Condensed top-companies and top-positions lists.
const TOP_COMPANIES_LIMIT: usize = 5;
const TOP_POSITIONS_LIMIT: usize = 5;

/// Which source produced the headline stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatsSource {
    Canonical,
    Fallback,
}

/// Headline stats and the companies view, tagged with the source that
/// produced them. The shape is uniform across both branches.
#[derive(Debug, Clone, Serialize)]
pub struct SourcedStats {
    pub source: StatsSource,
    pub stats: EmailStats,
    pub company_count: u64,
    pub by_company: Vec<GroupCount>,
    pub top_companies: Vec<GroupCount>,
}

/// The composed dashboard response.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub stats: EmailStats,
    pub company_count: u64,
    pub by_status: Vec<GroupCount>,
    pub by_type: Vec<GroupCount>,
    pub by_experience: Vec<GroupCount>,
    pub by_company: Vec<GroupCount>,
    pub funnel: StatusFunnel,
    pub top_companies: Vec<GroupCount>,
    pub applications_over_time: Vec<DailyStatusBucket>,
    pub predictive_insights: InsightsSnapshot,
    pub top_positions: Vec<GroupCount>,
}

/// Resolve headline stats, preferring the canonical source.
///
/// Canonical total of zero activates the fallback: stats derived from the
/// flattened grouping set, with `unread` pinned to `total` because the
/// grouping source does not track read/starred flags. Company counts in the
/// fallback branch come from sender extraction over the same flattened set.
pub fn resolve_stats(
    store: &dyn EmailStore,
    user_id: &str,
    flattened: &[EmailRecord],
) -> StoreResult<SourcedStats> {
    let stats = analytics::email_stats(store, user_id)?;
    if stats.total > 0 {
        return Ok(SourcedStats {
            source: StatsSource::Canonical,
            stats,
            company_count: store.company_count(user_id)?,
            by_company: analytics::top_companies(store, user_id, BY_COMPANY_LIMIT)?,
            top_companies: analytics::top_companies(store, user_id, TOP_COMPANIES_LIMIT)?,
        });
    }

    log::info!(
        "dashboard: canonical source empty for user {}; deriving stats from {} grouped records",
        user_id,
        flattened.len()
    );
    let total = flattened.len() as u64;
    let companies = grouped_counts(flattened.iter().map(|r| extract_company(&r.sender)));
    Ok(SourcedStats {
        source: StatsSource::Fallback,
        stats: EmailStats {
            total,
            read: 0,
            unread: total,
            starred: 0,
        },
        company_count: companies.len() as u64,
        by_company: companies.iter().take(BY_COMPANY_LIMIT).cloned().collect(),
        top_companies: companies.into_iter().take(TOP_COMPANIES_LIMIT).collect(),
    })
}

/// Build the full dashboard summary for one user.
///
/// `now` anchors the predictive metrics; pass the current instant outside
/// of tests.
pub fn dashboard_summary(
    store: &dyn EmailStore,
    user_id: &str,
    now: DateTime<Utc>,
    config: &InsightsConfig,
) -> StoreResult<DashboardSummary> {
    let records = flatten_groups(store.saved_groups(user_id)?);
    let sourced = resolve_stats(store, user_id, &records)?;

    let summary = DashboardSummary {
        by_status: analytics::emails_by_status(store, user_id)?,
        by_type: analytics::emails_by_job_type(store, user_id)?,
        by_experience: analytics::emails_by_experience(store, user_id)?,
        funnel: analytics::application_funnel(store, user_id)?,
        top_positions: analytics::top_positions(store, user_id, TOP_POSITIONS_LIMIT)?,
        applications_over_time: build_timeline(&records),
        predictive_insights: compute_insights(&records, now, config),
        stats: sourced.stats,
        company_count: sourced.company_count,
        by_company: sourced.by_company,
        top_companies: sourced.top_companies,
    };

    log::debug!(
        "dashboard: summary for user {} ({} grouped records, {} timeline days)",
        user_id,
        records.len(),
        summary.applications_over_time.len()
    );
    Ok(summary)
}
