//! Compliance report pipeline
//!
//! Raw analysis text flows through three stages:
//!
//! 1. [`builder`] decodes the text into a [`ComplianceReport`], falling back
//!    to placeholders for anything missing.
//! 2. [`classify`] maps free-text statuses and decisions onto fixed classes.
//! 3. [`render`] lays the report out as a [`DisplayTree`], which a
//!    [`reporter`] turns into console text, HTML or JSON.

pub mod builder;
pub mod classify;
pub mod render;
pub mod reporter;
pub mod text;

pub use builder::{
    build, build_at, decode_response, decode_response_at, AnalysisOutcome, AnalyzedReport,
    FormatError,
};
pub use classify::{classify_decision, classify_item, DecisionBanner, StatusClass};
pub use render::{render, render_outcome, DisplayTree, ReportView};
pub use shared_types::{ComplianceItem, ComplianceReport, Recommendation, ReportSchema};
pub use text::TextBlock;
