//! Plain-text rendering for terminals

use anyhow::Result;
use std::fmt::Write;

use crate::render::{
    Banner, Block, Card, ComplianceTable, DisplayTree, Header, ReportView, TableContent,
};
use crate::text::TextBlock;

const RULE: &str = "────────────────────────────────────────────────────────────────";

pub struct ConsoleReporter;

impl ConsoleReporter {
    pub fn format(view: &ReportView) -> Result<String> {
        let mut output = String::new();
        match view {
            ReportView::Report(tree) => Self::format_tree(&mut output, tree)?,
            ReportView::Unparsed { message, raw } => {
                writeln!(output, "✗ {}", message)?;
                writeln!(output)?;
                writeln!(output, "{}", raw)?;
            }
            ReportView::Error { message } => {
                writeln!(output, "✗ Error: {}", message)?;
            }
        }
        Ok(output)
    }

    fn format_tree(output: &mut String, tree: &DisplayTree) -> Result<()> {
        for block in &tree.blocks {
            match block {
                Block::Header(header) => Self::format_header(output, header)?,
                Block::Card(card) => Self::format_card(output, card)?,
                Block::ComplianceTable(table) => Self::format_table(output, table)?,
                Block::DecisionBanner(banner) => Self::format_banner(output, banner)?,
            }
        }
        Ok(())
    }

    fn format_header(output: &mut String, header: &Header) -> Result<()> {
        writeln!(output)?;
        writeln!(output, "╔══════════════════════════════════════════════════════════════╗")?;
        writeln!(output, "║{:^62}║", header.title.to_uppercase())?;
        writeln!(output, "╚══════════════════════════════════════════════════════════════╝")?;
        writeln!(
            output,
            "Generated: {}",
            header.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        writeln!(output, "Reviewer:  {}", header.reviewer)?;
        writeln!(output)?;
        Ok(())
    }

    fn format_card(output: &mut String, card: &Card) -> Result<()> {
        writeln!(output, "{}", RULE)?;
        writeln!(output, "{} {}", card.kind.icon(), card.kind.title())?;
        writeln!(output, "{}", RULE)?;
        Self::format_text(output, &card.body)?;
        writeln!(output)?;
        Ok(())
    }

    fn format_text(output: &mut String, body: &TextBlock) -> Result<()> {
        match body {
            TextBlock::Paragraph(text) => {
                for line in text.lines() {
                    writeln!(output, "  {}", line)?;
                }
            }
            TextBlock::List(items) => {
                for item in items {
                    writeln!(output, "  • {}", item)?;
                }
            }
        }
        Ok(())
    }

    fn format_table(output: &mut String, table: &ComplianceTable) -> Result<()> {
        writeln!(output, "{}", RULE)?;
        writeln!(output, "✓ Compliance Assessment")?;
        writeln!(output, "{}", RULE)?;

        match &table.content {
            TableContent::NoData(notice) => writeln!(output, "  {}", notice)?,
            TableContent::Rows(rows) => {
                let [requirement, submittal, status] = table.columns;
                for (idx, row) in rows.iter().enumerate() {
                    writeln!(output, "  [{}] {}: {}", idx + 1, requirement, row.requirement)?;
                    writeln!(output, "      {}: {}", submittal, row.submittal_info)?;
                    writeln!(
                        output,
                        "      {}: {} {}",
                        status,
                        row.status_class.marker(),
                        row.status
                    )?;
                }
            }
        }
        writeln!(output)?;
        Ok(())
    }

    fn format_banner(output: &mut String, banner: &Banner) -> Result<()> {
        writeln!(output, "{}", RULE)?;
        writeln!(output, "{}  {}", banner.icon, banner.text)?;
        writeln!(output, "{}", RULE)?;
        writeln!(output)?;
        Ok(())
    }
}
