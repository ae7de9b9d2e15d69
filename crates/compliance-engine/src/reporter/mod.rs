//! Output layers for rendered reports
//!
//! A [`ReportView`] is formatted into one of several text outputs:
//!
//! - **Console**: plain text with box-drawn header and status markers
//! - **Html**: standalone markup using the report's CSS class names
//! - **Json**: the display tree itself, for other front ends
//!
//! # Example
//!
//! ```
//! use compliance_engine::reporter::{OutputFormat, Reporter};
//! use compliance_engine::{build, render, ReportView};
//!
//! # fn example() -> anyhow::Result<()> {
//! let report = build(r#"{"submittalSummary": "Geotextile fabric"}"#)?;
//! let view = ReportView::Report(render(&report));
//! let html = Reporter::new(OutputFormat::Html).format_view(&view)?;
//! assert!(html.contains("Geotextile fabric"));
//! # Ok(())
//! # }
//! ```

mod console;
mod html;
mod json;

use anyhow::{Context, Result};
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use crate::render::ReportView;

pub use console::ConsoleReporter;
pub use html::HtmlReporter;
pub use json::JsonReporter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Console,
    Html,
    Json,
    JsonPretty,
}

pub struct Reporter {
    format: OutputFormat,
}

impl Reporter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Print the view to stdout
    pub fn report(&self, view: &ReportView) -> Result<()> {
        let output = self.format_view(view)?;
        print!("{}", output);
        io::stdout().flush()?;
        Ok(())
    }

    pub fn write_to_file<P: AsRef<Path>>(&self, view: &ReportView, path: P) -> Result<()> {
        let path = path.as_ref();
        let output = self.format_view(view)?;
        fs::write(path, output)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
        Ok(())
    }

    pub fn format_view(&self, view: &ReportView) -> Result<String> {
        match self.format {
            OutputFormat::Console => ConsoleReporter::format(view),
            OutputFormat::Html => HtmlReporter::format(view),
            OutputFormat::Json => JsonReporter::format(view, false),
            OutputFormat::JsonPretty => JsonReporter::format(view, true),
        }
    }
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new(OutputFormat::default())
    }
}
