use chrono::{DateTime, Utc};

/// Placeholder for any free-text field the analysis left absent or empty
pub const NO_INFORMATION: &str = "No information available";

/// Status text synthesized for assessment rows that carried no usable status
pub const UNKNOWN_STATUS: &str = "UNKNOWN";

/// Which backend response shape a report was decoded from
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportSchema {
    /// `{submittalSummary, applicableSpecs, complianceAssessment, ...}`
    Structured,
    /// `{content_type, review, missing_items, recommendation}`
    LegacyFlat,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceReport {
    pub submittal_summary: String,
    pub applicable_specs: String,
    pub compliance_assessment: Vec<ComplianceItem>, // Original order, never sorted
    pub critical_issues: String,
    pub recommendation: Recommendation,
    pub schema: ReportSchema,
    pub generated_at: DateTime<Utc>,
}

/// One requirement-vs-evidence row of the assessment table
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceItem {
    pub requirement: String,
    pub submittal_info: String,
    pub status: String, // Free text, e.g. "PARTIALLY COMPLIANT"
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Recommendation {
    pub decision: String,
    pub comments: String,
}

impl Default for Recommendation {
    fn default() -> Self {
        Self {
            decision: NO_INFORMATION.to_string(),
            comments: NO_INFORMATION.to_string(),
        }
    }
}

impl ComplianceReport {
    /// A report with every field at its placeholder
    pub fn empty(schema: ReportSchema, generated_at: DateTime<Utc>) -> Self {
        Self {
            submittal_summary: NO_INFORMATION.to_string(),
            applicable_specs: NO_INFORMATION.to_string(),
            compliance_assessment: Vec::new(),
            critical_issues: NO_INFORMATION.to_string(),
            recommendation: Recommendation::default(),
            schema,
            generated_at,
        }
    }
}
