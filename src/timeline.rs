//! Date-bucketed status counts for the applications-over-time view.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::classify::classify_email;
use crate::types::{DailyStatusBucket, EmailRecord};

/// Aggregate a user's records into ascending per-day status buckets.
///
/// Each record is classified and date-normalized independently; records
/// whose timestamp fails to normalize are skipped entirely. Every returned
/// bucket carries all four status counts, zero-filled where absent.
pub fn build_timeline(records: &[EmailRecord]) -> Vec<DailyStatusBucket> {
    let mut buckets: BTreeMap<NaiveDate, DailyStatusBucket> = BTreeMap::new();
    let mut skipped = 0usize;

    for record in records {
        let classified = classify_email(record);
        let Some(date) = classified.date else {
            skipped += 1;
            continue;
        };
        buckets
            .entry(date)
            .or_insert_with(|| DailyStatusBucket::new(date))
            .increment(classified.status);
    }

    if skipped > 0 {
        log::debug!(
            "timeline: skipped {} of {} records with unparseable dates",
            skipped,
            records.len()
        );
    }

    buckets.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Timestamp;

    fn record(subject: &str, body: &str, received_at: &str) -> EmailRecord {
        EmailRecord {
            user_id: "u1".into(),
            sender: "jobs@acme.com".into(),
            subject: subject.into(),
            body: body.into(),
            html_body: None,
            received_at: Timestamp::Text(received_at.into()),
        }
    }

    #[test]
    fn test_same_day_applied_records_accumulate() {
        let records = vec![
            record("Application received", "", "2025-11-07T09:00:00Z"),
            record("We got your resume", "", "Fri, 7 Nov 2025 16:49:07 +0000"),
        ];
        let timeline = build_timeline(&records);
        assert_eq!(timeline.len(), 1);
        let bucket = &timeline[0];
        assert_eq!(bucket.date, NaiveDate::from_ymd_opt(2025, 11, 7).unwrap());
        assert_eq!(bucket.applied, 2);
        assert_eq!(bucket.interview, 0);
        assert_eq!(bucket.offer, 0);
        assert_eq!(bucket.rejected, 0);
    }

    #[test]
    fn test_unparseable_dates_skipped() {
        let records = vec![
            record("Application received", "", "not a date"),
            record("Interview", "schedule a call", "2025-11-08T00:00:00Z"),
        ];
        let timeline = build_timeline(&records);
        assert_eq!(timeline.len(), 1);
        assert_eq!(timeline[0].interview, 1);
    }

    #[test]
    fn test_ascending_date_order() {
        let records = vec![
            record("a", "", "2025-11-09T00:00:00Z"),
            record("b", "", "2025-11-07T00:00:00Z"),
            record("c", "", "2025-11-08T00:00:00Z"),
        ];
        let dates: Vec<NaiveDate> = build_timeline(&records).iter().map(|b| b.date).collect();
        let mut sorted = dates.clone();
        sorted.sort();
        assert_eq!(dates, sorted);
        assert_eq!(dates.len(), 3);
    }

    #[test]
    fn test_empty_input() {
        assert!(build_timeline(&[]).is_empty());
    }

    #[test]
    fn test_idempotent_over_same_input() {
        let records = vec![
            record("Application received", "", "2025-11-07T09:00:00Z"),
            record("Offer!", "congratulations", "2025-11-10T09:00:00Z"),
            record("junk", "", "no date here"),
        ];
        assert_eq!(build_timeline(&records), build_timeline(&records));
    }
}
