//! HTML markup for browser display and printing

use anyhow::Result;
use html_escape::encode_text;
use std::fmt::Write;

use crate::render::{
    Banner, Block, Card, ComplianceTable, DisplayTree, Header, ReportView, TableContent,
};
use crate::text::TextBlock;

pub struct HtmlReporter;

impl HtmlReporter {
    pub fn format(view: &ReportView) -> Result<String> {
        let mut html = String::new();
        match view {
            ReportView::Report(tree) => Self::format_tree(&mut html, tree)?,
            ReportView::Unparsed { message, raw } => {
                writeln!(
                    html,
                    r#"<div class="error-message">{}</div>"#,
                    encode_text(message)
                )?;
                writeln!(html, "<pre>{}</pre>", encode_text(raw))?;
            }
            ReportView::Error { message } => {
                writeln!(
                    html,
                    r#"<div class="error-message">Error: {}</div>"#,
                    encode_text(message)
                )?;
            }
        }
        Ok(html)
    }

    fn format_tree(html: &mut String, tree: &DisplayTree) -> Result<()> {
        writeln!(html, r#"<div class="compliance-report">"#)?;
        for block in &tree.blocks {
            match block {
                Block::Header(header) => Self::format_header(html, header)?,
                Block::Card(card) => Self::format_card(html, card)?,
                Block::ComplianceTable(table) => Self::format_table(html, table)?,
                Block::DecisionBanner(banner) => Self::format_banner(html, banner)?,
            }
        }
        writeln!(html, "</div>")?;
        Ok(())
    }

    fn format_header(html: &mut String, header: &Header) -> Result<()> {
        writeln!(html, r#"<div class="report-header">"#)?;
        writeln!(html, "<h2>{}</h2>", encode_text(&header.title))?;
        writeln!(
            html,
            r#"<div class="report-meta"><span>Generated: {}</span><span>Reviewer: {}</span></div>"#,
            header.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            encode_text(&header.reviewer)
        )?;
        writeln!(html, "</div>")?;
        Ok(())
    }

    fn format_card(html: &mut String, card: &Card) -> Result<()> {
        let header_class = if card.kind.is_alert() {
            "card-header alert-header"
        } else {
            "card-header"
        };
        writeln!(html, r#"<div class="{}">"#, card.kind.css_class())?;
        writeln!(
            html,
            r#"<div class="{}"><h3><span class="material-icon">{}</span> {}</h3></div>"#,
            header_class,
            card.kind.icon(),
            card.kind.title()
        )?;
        write!(html, r#"<div class="card-content">"#)?;
        Self::format_text(html, &card.body)?;
        writeln!(html, "</div>")?;
        writeln!(html, "</div>")?;
        Ok(())
    }

    fn format_text(html: &mut String, body: &TextBlock) -> Result<()> {
        match body {
            TextBlock::Paragraph(text) => write!(html, "<p>{}</p>", encode_text(text))?,
            TextBlock::List(items) => {
                html.push_str("<ul>");
                for item in items {
                    write!(html, "<li>{}</li>", encode_text(item))?;
                }
                html.push_str("</ul>");
            }
        }
        Ok(())
    }

    fn format_table(html: &mut String, table: &ComplianceTable) -> Result<()> {
        writeln!(html, r#"<div class="compliance-card">"#)?;
        writeln!(
            html,
            r#"<div class="card-header"><h3><span class="material-icon">✓</span> Compliance Assessment</h3></div>"#
        )?;
        writeln!(html, r#"<div class="card-content">"#)?;

        match &table.content {
            TableContent::NoData(notice) => writeln!(html, "<p>{}</p>", encode_text(notice))?,
            TableContent::Rows(rows) => {
                writeln!(html, r#"<table class="compliance-table">"#)?;
                html.push_str("<thead><tr>");
                for column in table.columns {
                    write!(html, "<th>{}</th>", column)?;
                }
                writeln!(html, "</tr></thead>")?;
                writeln!(html, "<tbody>")?;
                for row in rows {
                    writeln!(
                        html,
                        r#"<tr><td>{}</td><td>{}</td><td class="{}">{}</td></tr>"#,
                        encode_text(&row.requirement),
                        encode_text(&row.submittal_info),
                        row.status_class.css_class(),
                        encode_text(&row.status)
                    )?;
                }
                writeln!(html, "</tbody></table>")?;
            }
        }

        writeln!(html, "</div>")?;
        writeln!(html, "</div>")?;
        Ok(())
    }

    fn format_banner(html: &mut String, banner: &Banner) -> Result<()> {
        writeln!(
            html,
            r#"<div class="status-banner {}"><span class="status-icon">{}</span><span class="status-text">{}</span></div>"#,
            banner.severity_class,
            banner.icon,
            encode_text(&banner.text)
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build_at;
    use crate::render::render;
    use chrono::{TimeZone, Utc};

    fn format(raw: &str) -> String {
        let at = Utc.with_ymd_and_hms(2024, 5, 2, 9, 30, 0).unwrap();
        let report = build_at(raw, at).unwrap();
        HtmlReporter::format(&ReportView::Report(render(&report))).unwrap()
    }

    #[test]
    fn test_status_cells_are_tagged() {
        let html = format(
            r#"{"complianceAssessment": [
                {"requirement": "A", "submittalInfo": "a", "status": "Partially Compliant"},
                {"requirement": "B", "submittalInfo": "b", "status": "Information Missing"}
            ]}"#,
        );
        assert!(html.contains(r#"<td class="status-partial">Partially Compliant</td>"#));
        assert!(html.contains(r#"<td class="status-missing">Information Missing</td>"#));
        assert_eq!(html.matches("<tr><td>").count(), 2);
    }

    #[test]
    fn test_empty_assessment_has_no_table() {
        let html = format("{}");
        assert!(!html.contains("<table"));
        assert!(html.contains("<p>No compliance data available</p>"));
    }

    #[test]
    fn test_banner_class() {
        let html = format(r#"{"recommendation": {"decision": "REJECTED", "comments": "x"}}"#);
        assert!(html.contains(r#"<div class="status-banner danger">"#));
        assert!(html.contains("❌"));
    }

    #[test]
    fn test_banner_precedes_recommendations() {
        let html = format(r#"{"recommendation": {"decision": "APPROVE", "comments": "ok"}}"#);
        let banner = html.find("status-banner").unwrap();
        let comments = html.find("recommendations-card").unwrap();
        assert!(banner < comments);
    }

    #[test]
    fn test_text_is_escaped() {
        let html = format(r#"{"submittalSummary": "<script>alert(1)</script> & more"}"#);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt; &amp; more"));
    }

    #[test]
    fn test_list_markup() {
        let html = format(r#"{"applicableSpecs": "* 2.1 Materials* 2.2 Testing"}"#);
        assert!(html.contains("<ul><li>2.1 Materials</li><li>2.2 Testing</li></ul>"));
    }

    #[test]
    fn test_unparsed_shows_escaped_raw() {
        let view = ReportView::Unparsed {
            message: "Error formatting results: invalid JSON".into(),
            raw: "<b>raw</b>".into(),
        };
        let html = HtmlReporter::format(&view).unwrap();
        assert!(html.contains(r#"<div class="error-message">"#));
        assert!(html.contains("<pre>&lt;b&gt;raw&lt;/b&gt;</pre>"));
    }
}
