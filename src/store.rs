//! Storage collaborator boundary.
//!
//! The engine never opens a database. Composition code receives an
//! [`EmailStore`] handle and pushes count/group-by work down to it; the pure
//! components stay storage-free and run over plain record slices.
//! [`MemoryStore`] is the reference implementation used by tests and the
//! report binary — it is the boundary's shape, not a storage engine.

use std::collections::{HashMap, HashSet};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::{
    ApplicationStatus, EmailGroup, EmailRecord, EmailStats, GroupCount, StatusFunnel, StoreResult,
    Timestamp,
};

/// One record in the canonical per-email source. Carries the enrichment
/// metadata the delegated group-bys aggregate over, plus the read/starred
/// flags the grouping source does not track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredEmail {
    #[serde(default)]
    pub id: String,
    pub user_id: String,
    #[serde(rename = "from")]
    pub sender: String,
    pub subject: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub job_type: Option<String>,
    #[serde(default)]
    pub experience_level: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub application_status: Option<ApplicationStatus>,
    #[serde(default)]
    pub starred: bool,
    #[serde(default)]
    pub read: bool,
    pub received_at: Timestamp,
}

/// Aggregation capability of the canonical per-email source, plus access to
/// the user's saved groupings. All queries are scoped to one user.
pub trait EmailStore {
    /// Headline stats; read/starred tracking lives only in this source.
    fn email_stats(&self, user_id: &str) -> StoreResult<EmailStats>;

    fn count_by_status(&self, user_id: &str) -> StoreResult<Vec<GroupCount>>;
    fn count_by_job_type(&self, user_id: &str) -> StoreResult<Vec<GroupCount>>;
    fn count_by_experience(&self, user_id: &str) -> StoreResult<Vec<GroupCount>>;
    fn count_by_language(&self, user_id: &str) -> StoreResult<Vec<GroupCount>>;

    /// Pipeline counts in funnel order.
    fn application_funnel(&self, user_id: &str) -> StoreResult<StatusFunnel>;

    fn top_companies(&self, user_id: &str, limit: usize) -> StoreResult<Vec<GroupCount>>;
    fn top_positions(&self, user_id: &str, limit: usize) -> StoreResult<Vec<GroupCount>>;

    /// Number of distinct companies in the canonical source.
    fn company_count(&self, user_id: &str) -> StoreResult<u64>;

    /// The user's saved groupings, in creation order.
    fn saved_groups(&self, user_id: &str) -> StoreResult<Vec<EmailGroup>>;
}

/// Flatten saved groupings into one ordered record list: groups in order,
/// records in order within each group.
pub fn flatten_groups(groups: Vec<EmailGroup>) -> Vec<EmailRecord> {
    groups.into_iter().flat_map(|group| group.emails).collect()
}

/// Count occurrences of an optional dimension, absent values skipped.
/// Sorted by count descending, key ascending for a stable order.
pub(crate) fn grouped_counts<I>(values: I) -> Vec<GroupCount>
where
    I: IntoIterator<Item = Option<String>>,
{
    let mut counts: HashMap<String, u64> = HashMap::new();
    for value in values.into_iter().flatten() {
        *counts.entry(value).or_default() += 1;
    }
    let mut out: Vec<GroupCount> = counts
        .into_iter()
        .map(|(key, count)| GroupCount { key, count })
        .collect();
    out.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.key.cmp(&b.key)));
    out
}

#[derive(Default)]
struct MemoryInner {
    emails: Vec<StoredEmail>,
    groups: Vec<(String, EmailGroup)>,
}

/// In-memory [`EmailStore`]. Interior mutability so tests and the report
/// binary can share one handle; every query is a full scan, which matches
/// the engine's own scalability ceiling.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<MemoryInner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a canonical email, assigning an id when the caller left it empty.
    pub fn insert_email(&self, mut email: StoredEmail) -> String {
        if email.id.is_empty() {
            email.id = Uuid::new_v4().to_string();
        }
        let id = email.id.clone();
        self.inner.write().emails.push(email);
        id
    }

    /// Insert a saved grouping for a user.
    pub fn insert_group(&self, user_id: &str, group: EmailGroup) {
        self.inner.write().groups.push((user_id.to_string(), group));
    }

    fn with_user_emails<T>(&self, user_id: &str, f: impl FnOnce(&[&StoredEmail]) -> T) -> T {
        let inner = self.inner.read();
        let emails: Vec<&StoredEmail> = inner
            .emails
            .iter()
            .filter(|e| e.user_id == user_id)
            .collect();
        f(&emails)
    }
}

impl EmailStore for MemoryStore {
    fn email_stats(&self, user_id: &str) -> StoreResult<EmailStats> {
        self.with_user_emails(user_id, |emails| {
            let total = emails.len() as u64;
            let read = emails.iter().filter(|e| e.read).count() as u64;
            let starred = emails.iter().filter(|e| e.starred).count() as u64;
            Ok(EmailStats {
                total,
                read,
                unread: total - read,
                starred,
            })
        })
    }

    fn count_by_status(&self, user_id: &str) -> StoreResult<Vec<GroupCount>> {
        self.with_user_emails(user_id, |emails| {
            Ok(grouped_counts(emails.iter().map(|e| {
                e.application_status.map(|s| s.as_str().to_string())
            })))
        })
    }

    fn count_by_job_type(&self, user_id: &str) -> StoreResult<Vec<GroupCount>> {
        self.with_user_emails(user_id, |emails| {
            Ok(grouped_counts(emails.iter().map(|e| e.job_type.clone())))
        })
    }

    fn count_by_experience(&self, user_id: &str) -> StoreResult<Vec<GroupCount>> {
        self.with_user_emails(user_id, |emails| {
            Ok(grouped_counts(
                emails.iter().map(|e| e.experience_level.clone()),
            ))
        })
    }

    fn count_by_language(&self, user_id: &str) -> StoreResult<Vec<GroupCount>> {
        self.with_user_emails(user_id, |emails| {
            Ok(grouped_counts(emails.iter().map(|e| e.language.clone())))
        })
    }

    fn application_funnel(&self, user_id: &str) -> StoreResult<StatusFunnel> {
        self.with_user_emails(user_id, |emails| {
            let count = |status: ApplicationStatus| {
                emails
                    .iter()
                    .filter(|e| e.application_status == Some(status))
                    .count() as u64
            };
            Ok(StatusFunnel {
                applied: count(ApplicationStatus::Applied),
                interview: count(ApplicationStatus::Interview),
                offer: count(ApplicationStatus::Offer),
                rejected: count(ApplicationStatus::Rejected),
            })
        })
    }

    fn top_companies(&self, user_id: &str, limit: usize) -> StoreResult<Vec<GroupCount>> {
        self.with_user_emails(user_id, |emails| {
            let mut counts = grouped_counts(emails.iter().map(|e| e.company.clone()));
            counts.truncate(limit);
            Ok(counts)
        })
    }

    fn top_positions(&self, user_id: &str, limit: usize) -> StoreResult<Vec<GroupCount>> {
        self.with_user_emails(user_id, |emails| {
            let mut counts = grouped_counts(emails.iter().map(|e| e.position.clone()));
            counts.truncate(limit);
            Ok(counts)
        })
    }

    fn company_count(&self, user_id: &str) -> StoreResult<u64> {
        self.with_user_emails(user_id, |emails| {
            let distinct: HashSet<&str> = emails
                .iter()
                .filter_map(|e| e.company.as_deref())
                .collect();
            Ok(distinct.len() as u64)
        })
    }

    fn saved_groups(&self, user_id: &str) -> StoreResult<Vec<EmailGroup>> {
        let inner = self.inner.read();
        Ok(inner
            .groups
            .iter()
            .filter(|(owner, _)| owner == user_id)
            .map(|(_, group)| group.clone())
            .collect())
    }
}
