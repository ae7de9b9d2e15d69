//! Report Model Builder
//!
//! Turns the analysis text produced by the language model into a
//! [`ComplianceReport`]. Every field is decoded on its own: a missing or
//! malformed field becomes a placeholder, a malformed assessment row is kept
//! with an `UNKNOWN` status, and only a payload that is not a JSON object at
//! all is rejected.
//!
//! Two backend shapes are understood:
//!
//! - **Structured** (canonical): `{submittalSummary, applicableSpecs,
//!   complianceAssessment: [...], criticalIssues, recommendation: {decision,
//!   comments}}`, with snake_case aliases accepted for every key.
//! - **Legacy flat**: `{content_type, review, missing_items,
//!   recommendation}` where `recommendation` is plain text.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use shared_types::{
    ComplianceItem, ComplianceReport, Recommendation, ReportSchema, NO_INFORMATION,
    UNKNOWN_STATUS,
};
use thiserror::Error;
use tracing::{debug, warn};

use crate::text::BULLET_DELIMITER;

/// The analysis payload could not be read as a report.
///
/// `raw` is the payload exactly as received so the caller can still show it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Error formatting results: {reason}")]
pub struct FormatError {
    pub reason: String,
    pub raw: String,
}

impl FormatError {
    fn new(reason: impl Into<String>, raw: &str) -> Self {
        Self {
            reason: reason.into(),
            raw: raw.to_string(),
        }
    }
}

/// A report together with the document text the backend extracted
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzedReport {
    pub report: ComplianceReport,
    pub submittal_text: Option<String>,
    pub spec_text: Option<String>,
}

/// Classification of a complete analyze response body
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisOutcome {
    Report(AnalyzedReport),
    /// The backend answered with an explicit `{error}`
    Upstream(String),
    /// Nothing report-shaped could be recovered
    Unparsed(FormatError),
}

const SUBMITTAL_SUMMARY: &[&str] = &["submittalSummary", "submittal_summary"];
const APPLICABLE_SPECS: &[&str] = &["applicableSpecs", "applicable_specs"];
const COMPLIANCE_ASSESSMENT: &[&str] = &["complianceAssessment", "compliance_assessment"];
const CRITICAL_ISSUES: &[&str] = &["criticalIssues", "critical_issues"];
const RECOMMENDATION: &[&str] = &["recommendation"];
const DECISION: &[&str] = &["decision"];
const COMMENTS: &[&str] = &["comments", "comment"];
const REQUIREMENT: &[&str] = &["requirement"];
const SUBMITTAL_INFO: &[&str] = &["submittalInfo", "submittal_info"];
const STATUS: &[&str] = &["status"];

const LEGACY_CONTENT_TYPE: &[&str] = &["content_type"];
const LEGACY_REVIEW: &[&str] = &["review"];
const LEGACY_MISSING_ITEMS: &[&str] = &["missing_items"];

const SUBMITTAL_TEXT: &[&str] = &["submittalText", "submittal_text"];
const SPEC_TEXT: &[&str] = &["specText", "spec_text"];

/// Build a report from the analysis text, stamped with the current time
pub fn build(raw: &str) -> Result<ComplianceReport, FormatError> {
    build_at(raw, Utc::now())
}

/// Build a report from the analysis text with an explicit generation time
pub fn build_at(raw: &str, generated_at: DateTime<Utc>) -> Result<ComplianceReport, FormatError> {
    let value: Value = serde_json::from_str(raw)
        .map_err(|e| FormatError::new(format!("invalid JSON: {}", e), raw))?;

    report_from_value(&value, generated_at)
        .ok_or_else(|| FormatError::new("expected a JSON object", raw))
}

/// Classify a full analyze response body.
///
/// Accepts `{analysis: "<json text>" | {..}, submittalText?, specText?}`,
/// `{error}`, or the legacy flat object.
pub fn decode_response(body: &str) -> AnalysisOutcome {
    decode_response_at(body, Utc::now())
}

pub fn decode_response_at(body: &str, generated_at: DateTime<Utc>) -> AnalysisOutcome {
    let value: Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(e) => {
            return AnalysisOutcome::Unparsed(FormatError::new(
                format!("invalid JSON: {}", e),
                body,
            ))
        }
    };

    let Some(obj) = value.as_object() else {
        return AnalysisOutcome::Unparsed(FormatError::new("expected a JSON object", body));
    };

    if let Some(error) = optional_text(obj, &["error"]) {
        warn!("Analysis backend returned an error: {}", error);
        return AnalysisOutcome::Upstream(error);
    }

    let submittal_text = raw_string(obj, SUBMITTAL_TEXT);
    let spec_text = raw_string(obj, SPEC_TEXT);

    let report = match obj.get("analysis") {
        Some(Value::String(analysis)) => build_at(analysis, generated_at),
        Some(analysis @ Value::Object(_)) => report_from_value(analysis, generated_at)
            .ok_or_else(|| FormatError::new("expected a JSON object", body)),
        Some(_) => Err(FormatError::new(
            "`analysis` is neither JSON text nor an object",
            body,
        )),
        None if is_legacy(obj) => Ok(legacy_report(obj, generated_at)),
        None => Err(FormatError::new(
            "response carries neither `analysis` nor `error`",
            body,
        )),
    };

    match report {
        Ok(report) => AnalysisOutcome::Report(AnalyzedReport {
            report,
            submittal_text,
            spec_text,
        }),
        Err(e) => AnalysisOutcome::Unparsed(e),
    }
}

fn report_from_value(value: &Value, generated_at: DateTime<Utc>) -> Option<ComplianceReport> {
    let obj = value.as_object()?;
    if is_legacy(obj) {
        return Some(legacy_report(obj, generated_at));
    }
    Some(structured_report(obj, generated_at))
}

/// Legacy objects carry the flat keys and none of the structured ones
fn is_legacy(obj: &Map<String, Value>) -> bool {
    let has_legacy = [LEGACY_CONTENT_TYPE, LEGACY_REVIEW, LEGACY_MISSING_ITEMS]
        .iter()
        .flat_map(|keys| keys.iter())
        .any(|key| obj.contains_key(*key));
    let has_structured = [
        SUBMITTAL_SUMMARY,
        APPLICABLE_SPECS,
        COMPLIANCE_ASSESSMENT,
        CRITICAL_ISSUES,
    ]
    .iter()
    .flat_map(|keys| keys.iter())
    .any(|key| obj.contains_key(*key));

    has_legacy && !has_structured
}

fn structured_report(obj: &Map<String, Value>, generated_at: DateTime<Utc>) -> ComplianceReport {
    let compliance_assessment = match find(obj, COMPLIANCE_ASSESSMENT) {
        Some(Value::Array(items)) => items.iter().map(item_from_value).collect(),
        Some(other) => {
            debug!("Ignoring non-list compliance assessment: {}", type_name(other));
            Vec::new()
        }
        None => Vec::new(),
    };

    let recommendation = match find(obj, RECOMMENDATION) {
        Some(Value::Object(rec)) => Recommendation {
            decision: text_field(rec, DECISION),
            comments: text_field(rec, COMMENTS),
        },
        Some(other) => Recommendation {
            decision: text_of(other).unwrap_or_else(|| NO_INFORMATION.to_string()),
            comments: NO_INFORMATION.to_string(),
        },
        None => Recommendation::default(),
    };

    ComplianceReport {
        submittal_summary: text_field(obj, SUBMITTAL_SUMMARY),
        applicable_specs: text_field(obj, APPLICABLE_SPECS),
        compliance_assessment,
        critical_issues: text_field(obj, CRITICAL_ISSUES),
        recommendation,
        schema: ReportSchema::Structured,
        generated_at,
    }
}

fn legacy_report(obj: &Map<String, Value>, generated_at: DateTime<Utc>) -> ComplianceReport {
    debug!("Decoding analysis with the legacy flat schema");

    let mut report = ComplianceReport::empty(ReportSchema::LegacyFlat, generated_at);
    report.submittal_summary = text_field(obj, LEGACY_CONTENT_TYPE);
    report.critical_issues = text_field(obj, LEGACY_MISSING_ITEMS);
    report.recommendation = Recommendation {
        decision: text_field(obj, RECOMMENDATION),
        comments: text_field(obj, LEGACY_REVIEW),
    };
    report
}

/// Every entry becomes a row, whatever its shape
fn item_from_value(value: &Value) -> ComplianceItem {
    match value {
        Value::Object(item) => ComplianceItem {
            requirement: text_field(item, REQUIREMENT),
            submittal_info: text_field(item, SUBMITTAL_INFO),
            status: optional_text(item, STATUS).unwrap_or_else(|| UNKNOWN_STATUS.to_string()),
        },
        other => {
            debug!("Malformed compliance item: {}", type_name(other));
            ComplianceItem {
                requirement: text_of(other).unwrap_or_else(|| NO_INFORMATION.to_string()),
                submittal_info: NO_INFORMATION.to_string(),
                status: UNKNOWN_STATUS.to_string(),
            }
        }
    }
}

fn find<'a>(obj: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|key| obj.get(*key))
}

fn text_field(obj: &Map<String, Value>, keys: &[&str]) -> String {
    optional_text(obj, keys).unwrap_or_else(|| NO_INFORMATION.to_string())
}

/// First alias that yields non-empty text
fn optional_text(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| obj.get(*key))
        .find_map(text_of)
}

fn raw_string(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| obj.get(*key))
        .find_map(|value| value.as_str().map(str::to_string))
}

/// Render a JSON value as display text. Lists of strings become inline
/// bullets so they split the same way model-written bullets do.
fn text_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Array(items) => {
            let parts: Vec<String> = items
                .iter()
                .filter_map(text_of)
                .map(|part| format!("{}{}", BULLET_DELIMITER, part.trim()))
                .collect();
            (!parts.is_empty()).then(|| parts.join(" "))
        }
        _ => None,
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
