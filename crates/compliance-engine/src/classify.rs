//! Status taxonomy for assessment rows and the overall decision
//!
//! Both classifiers are total: every input, including the empty string,
//! maps to a class.

use serde::Serialize;

/// Compliance class of a single assessment row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusClass {
    Compliant,
    NonCompliant,
    Partial,
    Missing,
    Unknown,
}

impl StatusClass {
    /// Style hook for the status cell
    pub fn css_class(self) -> &'static str {
        match self {
            StatusClass::Compliant => "status-compliant",
            StatusClass::NonCompliant => "status-noncompliant",
            StatusClass::Partial => "status-partial",
            StatusClass::Missing => "status-missing",
            StatusClass::Unknown => "status-unknown",
        }
    }

    /// Single-character marker for plain-text output
    pub fn marker(self) -> &'static str {
        match self {
            StatusClass::Compliant => "✓",
            StatusClass::NonCompliant => "✗",
            StatusClass::Partial => "◐",
            StatusClass::Missing => "?",
            StatusClass::Unknown => "·",
        }
    }
}

/// Verdict shown in the status banner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DecisionBanner {
    Approve,
    ApproveWithComments,
    ReviseAndResubmit,
    Rejected,
    Neutral,
}

impl DecisionBanner {
    pub fn icon(self) -> &'static str {
        match self {
            DecisionBanner::Approve => "✅",
            DecisionBanner::ApproveWithComments => "⚠️",
            DecisionBanner::ReviseAndResubmit => "⚠️",
            DecisionBanner::Rejected => "❌",
            DecisionBanner::Neutral => "📋",
        }
    }

    pub fn severity_class(self) -> &'static str {
        match self {
            DecisionBanner::Approve => "success",
            DecisionBanner::ApproveWithComments => "partial",
            DecisionBanner::ReviseAndResubmit => "warning",
            DecisionBanner::Rejected => "danger",
            DecisionBanner::Neutral => "neutral",
        }
    }
}

/// Exact status phrases, checked in order
const ITEM_STATUSES: [(&str, StatusClass); 4] = [
    ("COMPLIANT", StatusClass::Compliant),
    ("NON-COMPLIANT", StatusClass::NonCompliant),
    ("PARTIALLY COMPLIANT", StatusClass::Partial),
    ("INFORMATION MISSING", StatusClass::Missing),
];

/// Decision phrases in priority order. "APPROVE" must stay last: it is a
/// substring of "APPROVE WITH COMMENTS".
const DECISION_PHRASES: [(&str, DecisionBanner); 4] = [
    ("APPROVE WITH COMMENTS", DecisionBanner::ApproveWithComments),
    ("REVISE AND RESUBMIT", DecisionBanner::ReviseAndResubmit),
    ("REJECTED", DecisionBanner::Rejected),
    ("APPROVE", DecisionBanner::Approve),
];

/// Classify a row status by case-insensitive equality
pub fn classify_item(status: &str) -> StatusClass {
    let status = status.to_uppercase();
    ITEM_STATUSES
        .iter()
        .find(|(phrase, _)| status == *phrase)
        .map(|(_, class)| *class)
        .unwrap_or(StatusClass::Unknown)
}

/// Classify a decision by containment of the literal, upper-case phrases
pub fn classify_decision(decision: &str) -> DecisionBanner {
    DECISION_PHRASES
        .iter()
        .find(|(phrase, _)| decision.contains(phrase))
        .map(|(_, banner)| *banner)
        .unwrap_or(DecisionBanner::Neutral)
}
