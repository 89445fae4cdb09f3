//! Affiliation screening heuristics
//!
//! Pure functions with no failure path: absent or malformed input degrades
//! to the documented defaults (academic, no email) instead of erroring.

use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

/// Canonical sentinel used in output rows when no email could be extracted
pub const EMAIL_NOT_FOUND: &str = "Not found";

/// Keywords whose presence marks an affiliation as academic
///
/// A denylist of academic-signal words is more robust than an allowlist
/// would be: there is no fixed vocabulary for the long tail of company
/// names.
pub const ACADEMIC_KEYWORDS: [&str; 7] = [
    "university",
    "college",
    "institute",
    "school",
    "hospital",
    "center",
    "centre",
];

/// Decide whether an affiliation denotes a non-academic organization
///
/// Case-insensitive substring match against [`ACADEMIC_KEYWORDS`]: any hit
/// classifies as academic. An empty affiliation classifies as academic, so
/// unknown input never produces an output row.
pub fn is_non_academic(affiliation: &str) -> bool {
    if affiliation.is_empty() {
        return false;
    }
    let lowered = affiliation.to_lowercase();
    !ACADEMIC_KEYWORDS
        .iter()
        .any(|keyword| lowered.contains(keyword))
}

/// Extract the first email address from free text
///
/// Line breaks are collapsed to spaces before matching; trailing `.`, `;`
/// and `,` are stripped from the match. Returns `None` when nothing in the
/// text looks like an email.
pub fn extract_email(text: &str) -> Option<String> {
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let re = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}")
            .expect("Failed to compile email regex")
    });

    let normalized = text.trim().replace('\n', " ");
    let matched = re.find(&normalized)?;
    let email = matched
        .as_str()
        .trim_end_matches(['.', ';', ','])
        .to_string();
    debug!(email = %email, "extracted email");
    Some(email)
}
