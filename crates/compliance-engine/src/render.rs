//! Report Renderer
//!
//! Lays a [`ComplianceReport`] out as a [`DisplayTree`]: an ordered list of
//! blocks that any output layer (console, HTML, JSON) can walk. Rendering is
//! pure. The header timestamp comes from the report itself, so the same
//! report always renders to the same tree.
//!
//! Block order is fixed:
//!
//! 1. Header
//! 2. Submittal summary card
//! 3. Applicable specifications card
//! 4. Compliance assessment table
//! 5. Critical issues card
//! 6. Decision banner
//! 7. Recommendations card

use chrono::{DateTime, Utc};
use serde::Serialize;
use shared_types::{ComplianceItem, ComplianceReport, ReportSchema};

use crate::builder::{AnalysisOutcome, FormatError};
use crate::classify::{classify_decision, classify_item, DecisionBanner, StatusClass};
use crate::text::TextBlock;

pub const REPORT_TITLE: &str = "Submittal Compliance Analysis";
pub const REVIEWER: &str = "AI-Assisted Review";
pub const NO_COMPLIANCE_DATA: &str = "No compliance data available";
pub const TABLE_COLUMNS: [&str; 3] = [
    "Specification Requirement",
    "Submittal Information",
    "Compliance Status",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayTree {
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "block", rename_all = "snake_case")]
pub enum Block {
    Header(Header),
    Card(Card),
    ComplianceTable(ComplianceTable),
    DecisionBanner(Banner),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Header {
    pub title: String,
    pub generated_at: DateTime<Utc>,
    pub reviewer: String,
    pub schema: ReportSchema,
}

/// Which free-text section a card shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CardKind {
    SubmittalSummary,
    ApplicableSpecs,
    CriticalIssues,
    Recommendations,
}

impl CardKind {
    pub fn title(self) -> &'static str {
        match self {
            CardKind::SubmittalSummary => "Submittal Summary",
            CardKind::ApplicableSpecs => "Applicable Specifications",
            CardKind::CriticalIssues => "Critical Issues",
            CardKind::Recommendations => "Recommendations",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            CardKind::SubmittalSummary => "📋",
            CardKind::ApplicableSpecs => "📑",
            CardKind::CriticalIssues => "⚠️",
            CardKind::Recommendations => "🔍",
        }
    }

    /// CSS class of the card container
    pub fn css_class(self) -> &'static str {
        match self {
            CardKind::SubmittalSummary => "summary-card",
            CardKind::ApplicableSpecs => "specs-card",
            CardKind::CriticalIssues => "issues-card",
            CardKind::Recommendations => "recommendations-card",
        }
    }

    pub fn is_alert(self) -> bool {
        self == CardKind::CriticalIssues
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Card {
    pub kind: CardKind,
    pub body: TextBlock,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComplianceTable {
    pub columns: [&'static str; 3],
    pub content: TableContent,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "content", rename_all = "snake_case")]
pub enum TableContent {
    Rows(Vec<TableRow>),
    /// Shown instead of an empty table
    NoData(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    pub requirement: String,
    pub submittal_info: String,
    pub status: String,
    pub status_class: StatusClass,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Banner {
    pub decision: DecisionBanner,
    pub icon: &'static str,
    pub severity_class: &'static str,
    pub text: String,
}

/// What the results area shows after an analysis
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum ReportView {
    Report(DisplayTree),
    /// The payload could not be structured; `raw` is shown verbatim
    Unparsed { message: String, raw: String },
    /// The backend reported an error instead of a result
    Error { message: String },
}

/// Render a report. Never fails: absent data was already replaced by
/// placeholders when the report was built.
pub fn render(report: &ComplianceReport) -> DisplayTree {
    let decision = classify_decision(&report.recommendation.decision);

    let blocks = vec![
        Block::Header(Header {
            title: REPORT_TITLE.to_string(),
            generated_at: report.generated_at,
            reviewer: REVIEWER.to_string(),
            schema: report.schema,
        }),
        card(CardKind::SubmittalSummary, &report.submittal_summary),
        card(CardKind::ApplicableSpecs, &report.applicable_specs),
        Block::ComplianceTable(table(&report.compliance_assessment)),
        card(CardKind::CriticalIssues, &report.critical_issues),
        Block::DecisionBanner(Banner {
            decision,
            icon: decision.icon(),
            severity_class: decision.severity_class(),
            text: report.recommendation.decision.clone(),
        }),
        card(CardKind::Recommendations, &report.recommendation.comments),
    ];

    DisplayTree { blocks }
}

/// Render whatever the analyze call produced
pub fn render_outcome(outcome: &AnalysisOutcome) -> ReportView {
    match outcome {
        AnalysisOutcome::Report(analyzed) => ReportView::Report(render(&analyzed.report)),
        AnalysisOutcome::Upstream(message) => ReportView::Error {
            message: message.clone(),
        },
        AnalysisOutcome::Unparsed(err) => unparsed_view(err),
    }
}

pub fn unparsed_view(err: &FormatError) -> ReportView {
    ReportView::Unparsed {
        message: err.to_string(),
        raw: err.raw.clone(),
    }
}

fn card(kind: CardKind, text: &str) -> Block {
    Block::Card(Card {
        kind,
        body: TextBlock::from_text(text),
    })
}

fn table(items: &[ComplianceItem]) -> ComplianceTable {
    let content = if items.is_empty() {
        TableContent::NoData(NO_COMPLIANCE_DATA.to_string())
    } else {
        TableContent::Rows(
            items
                .iter()
                .map(|item| TableRow {
                    requirement: item.requirement.clone(),
                    submittal_info: item.submittal_info.clone(),
                    status: item.status.clone(),
                    status_class: classify_item(&item.status),
                })
                .collect(),
        )
    };

    ComplianceTable {
        columns: TABLE_COLUMNS,
        content,
    }
}
