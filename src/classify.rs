//! Single-record classification pipeline.

use crate::company::extract_company;
use crate::dates::normalize_date;
use crate::helpers::strip_html;
use crate::status::classify_status;
use crate::types::{ClassifiedEmail, EmailRecord};

/// Derive company, status, and calendar date signals for one record.
///
/// Pure: same record in, same signals out. When the plain-text body is empty
/// and an HTML body exists, classification falls back to the stripped HTML.
pub fn classify_email(record: &EmailRecord) -> ClassifiedEmail<'_> {
    let company = extract_company(&record.sender);

    let status = match (&record.html_body, record.body.trim().is_empty()) {
        (Some(html), true) => classify_status(&record.subject, &strip_html(html)),
        _ => classify_status(&record.subject, &record.body),
    };

    let date = normalize_date(&record.received_at);

    ClassifiedEmail {
        record,
        company,
        status,
        date,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ApplicationStatus, Timestamp};
    use chrono::NaiveDate;

    fn record(sender: &str, subject: &str, body: &str, received_at: &str) -> EmailRecord {
        EmailRecord {
            user_id: "u1".into(),
            sender: sender.into(),
            subject: subject.into(),
            body: body.into(),
            html_body: None,
            received_at: Timestamp::Text(received_at.into()),
        }
    }

    #[test]
    fn test_full_pipeline() {
        let rec = record(
            "Acme Recruiting <jobs@acme.com>",
            "Interview invitation",
            "Let's schedule a call.",
            "Fri, 7 Nov 2025 16:49:07 +0000",
        );
        let classified = classify_email(&rec);
        assert_eq!(classified.company.as_deref(), Some("Acme"));
        assert_eq!(classified.status, ApplicationStatus::Interview);
        assert_eq!(
            classified.date,
            Some(NaiveDate::from_ymd_opt(2025, 11, 7).unwrap())
        );
    }

    #[test]
    fn test_html_body_fallback_when_plain_empty() {
        let mut rec = record("hr@initech.com", "Update", "", "2025-11-07T00:00:00Z");
        rec.html_body = Some("<p>We are <b>excited</b> to share an offer.</p>".into());
        let classified = classify_email(&rec);
        assert_eq!(classified.status, ApplicationStatus::Offer);
    }

    #[test]
    fn test_plain_body_preferred_over_html() {
        let mut rec = record(
            "hr@initech.com",
            "Update",
            "Thanks for applying.",
            "2025-11-07T00:00:00Z",
        );
        rec.html_body = Some("<p>offer</p>".into());
        let classified = classify_email(&rec);
        assert_eq!(classified.status, ApplicationStatus::Applied);
    }

    #[test]
    fn test_unparseable_date_flows_through_as_none() {
        let rec = record("hr@initech.com", "Hello", "", "sometime last week");
        let classified = classify_email(&rec);
        assert_eq!(classified.date, None);
    }

    #[test]
    fn test_record_untouched() {
        let rec = record("Acme <jobs@acme.com>", "Subject", "Body", "2025-11-07T00:00:00Z");
        let before = rec.clone();
        let _ = classify_email(&rec);
        assert_eq!(rec, before);
    }
}
