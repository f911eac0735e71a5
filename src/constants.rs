//! Keyword tables and token lists for signal extraction.

use crate::types::ApplicationStatus;

/// Ordered status keyword table. Earlier entries win regardless of where
/// their keywords occur in the text; classification falls through to
/// `ApplicationStatus::Applied` when nothing matches.
pub const STATUS_KEYWORDS: &[(ApplicationStatus, &[&str])] = &[
    (
        ApplicationStatus::Offer,
        &[
            "offer",
            "congratulations",
            "excited",
            "we're pleased",
            "accepted",
            "approved",
        ],
    ),
    (
        ApplicationStatus::Rejected,
        &[
            "reject",
            "unfortunately",
            "not move",
            "not selected",
            "decline",
            "unsuccessful",
            "regret",
        ],
    ),
    (
        ApplicationStatus::Interview,
        &[
            "interview",
            "call",
            "schedule",
            "meeting",
            "discuss",
            "next step",
        ],
    ),
];

/// Domain tokens that never name a company.
pub const DOMAIN_STOPLIST: &[&str] = &[
    "mail", "email", "info", "support", "noreply", "no", "reply", "contact",
];

/// English month abbreviations, January first.
pub const MONTH_ABBREVIATIONS: &[&str] = &[
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];
