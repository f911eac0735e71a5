//! Delegated analytics queries against the canonical per-email source.
//!
//! Thin pass-throughs: the aggregation itself is the store's job. This layer
//! only clamps top-N limits to the allowed range.

use crate::store::EmailStore;
use crate::types::{EmailStats, GroupCount, StatusFunnel, StoreResult};

const MIN_TOP_LIMIT: usize = 1;
const MAX_TOP_LIMIT: usize = 50;
pub const DEFAULT_TOP_LIMIT: usize = 10;

fn clamp_limit(limit: usize) -> usize {
    limit.clamp(MIN_TOP_LIMIT, MAX_TOP_LIMIT)
}

pub fn email_stats(store: &dyn EmailStore, user_id: &str) -> StoreResult<EmailStats> {
    store.email_stats(user_id)
}

pub fn emails_by_status(store: &dyn EmailStore, user_id: &str) -> StoreResult<Vec<GroupCount>> {
    store.count_by_status(user_id)
}

pub fn emails_by_job_type(store: &dyn EmailStore, user_id: &str) -> StoreResult<Vec<GroupCount>> {
    store.count_by_job_type(user_id)
}

pub fn emails_by_experience(store: &dyn EmailStore, user_id: &str) -> StoreResult<Vec<GroupCount>> {
    store.count_by_experience(user_id)
}

pub fn emails_by_language(store: &dyn EmailStore, user_id: &str) -> StoreResult<Vec<GroupCount>> {
    store.count_by_language(user_id)
}

pub fn application_funnel(store: &dyn EmailStore, user_id: &str) -> StoreResult<StatusFunnel> {
    store.application_funnel(user_id)
}

pub fn top_companies(
    store: &dyn EmailStore,
    user_id: &str,
    limit: usize,
) -> StoreResult<Vec<GroupCount>> {
    store.top_companies(user_id, clamp_limit(limit))
}

pub fn top_positions(
    store: &dyn EmailStore,
    user_id: &str,
    limit: usize,
) -> StoreResult<Vec<GroupCount>> {
    store.top_positions(user_id, clamp_limit(limit))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, StoredEmail};
    use crate::types::Timestamp;

    fn seed(store: &MemoryStore, companies: &[&str]) {
        for company in companies {
            store.insert_email(StoredEmail {
                id: String::new(),
                user_id: "u1".into(),
                sender: "jobs@acme.com".into(),
                subject: "Application".into(),
                body: String::new(),
                company: Some((*company).into()),
                position: None,
                job_type: None,
                experience_level: None,
                language: None,
                application_status: None,
                starred: false,
                read: false,
                received_at: Timestamp::Text("2025-11-07T00:00:00Z".into()),
            });
        }
    }

    #[test]
    fn test_limit_clamped_low() {
        let store = MemoryStore::new();
        seed(&store, &["Acme", "Initech"]);
        // A zero limit still returns at least one entry.
        assert_eq!(top_companies(&store, "u1", 0).unwrap().len(), 1);
    }

    #[test]
    fn test_limit_clamped_high() {
        let store = MemoryStore::new();
        seed(&store, &["Acme", "Initech"]);
        // An oversized limit is capped, not an error.
        assert_eq!(top_companies(&store, "u1", 500).unwrap().len(), 2);
    }

    #[test]
    fn test_stats_delegate() {
        let store = MemoryStore::new();
        seed(&store, &["Acme"]);
        assert_eq!(email_stats(&store, "u1").unwrap().total, 1);
    }
}
