//! Keyword-priority application status classification.

use crate::constants::STATUS_KEYWORDS;
use crate::types::ApplicationStatus;

/// Classify subject + body into an application status.
///
/// Total over arbitrary text. Priority follows table order in
/// [`STATUS_KEYWORDS`], not keyword position in the text; no match means
/// the email is a plain application confirmation.
pub fn classify_status(subject: &str, body: &str) -> ApplicationStatus {
    let text = format!("{} {}", subject, body).to_lowercase();
    for (status, keywords) in STATUS_KEYWORDS {
        if keywords.iter().any(|kw| text.contains(kw)) {
            return *status;
        }
    }
    ApplicationStatus::Applied
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offer_beats_interview() {
        let status = classify_status(
            "Interview follow-up",
            "We are pleased to extend an offer after your interview.",
        );
        assert_eq!(status, ApplicationStatus::Offer);
    }

    #[test]
    fn test_rejected_beats_interview() {
        let status = classify_status(
            "Your interview result",
            "Unfortunately we will not move forward.",
        );
        assert_eq!(status, ApplicationStatus::Rejected);
    }

    #[test]
    fn test_interview_keywords() {
        let status = classify_status("Next step", "Let's schedule a call to discuss.");
        assert_eq!(status, ApplicationStatus::Interview);
    }

    #[test]
    fn test_default_is_applied() {
        let status = classify_status("Application received", "We got your resume.");
        assert_eq!(status, ApplicationStatus::Applied);
    }

    #[test]
    fn test_empty_input_is_applied() {
        assert_eq!(classify_status("", ""), ApplicationStatus::Applied);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(
            classify_status("CONGRATULATIONS!", ""),
            ApplicationStatus::Offer
        );
    }

    // Every status is reachable: three via the table, applied as the default.
    #[test]
    fn test_every_status_reachable() {
        let mut reachable: Vec<ApplicationStatus> =
            STATUS_KEYWORDS.iter().map(|(status, _)| *status).collect();
        reachable.push(ApplicationStatus::Applied);
        for status in ApplicationStatus::ALL {
            assert!(reachable.contains(&status), "{:?} unreachable", status);
        }
    }

    // Every table keyword, alone, must classify to its own status. This pins
    // the table as the single source of priority order.
    #[test]
    fn test_table_keywords_classify_to_own_status() {
        for (status, keywords) in STATUS_KEYWORDS {
            for kw in *keywords {
                assert_eq!(
                    classify_status(kw, ""),
                    *status,
                    "keyword {:?} should classify as {:?}",
                    kw,
                    status
                );
            }
        }
    }
}
