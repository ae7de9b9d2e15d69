use anyhow::Result;

use crate::render::ReportView;

pub struct JsonReporter;

impl JsonReporter {
    pub fn format(view: &ReportView, pretty: bool) -> Result<String> {
        let output = if pretty {
            serde_json::to_string_pretty(view)?
        } else {
            serde_json::to_string(view)?
        };
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build_at;
    use crate::render::render;
    use chrono::{TimeZone, Utc};
    use serde_json::Value;

    fn view() -> ReportView {
        let at = Utc.with_ymd_and_hms(2024, 5, 2, 9, 30, 0).unwrap();
        let report = build_at(
            r#"{"complianceAssessment": [{"requirement": "R", "submittalInfo": "S", "status": "compliant"}],
                "recommendation": {"decision": "REVISE AND RESUBMIT", "comments": "* a* b"}}"#,
            at,
        )
        .unwrap();
        ReportView::Report(render(&report))
    }

    #[test]
    fn test_compact_has_no_newlines() {
        let output = JsonReporter::format(&view(), false).unwrap();
        assert!(!output.contains('\n'));
    }

    #[test]
    fn test_tree_shape() {
        let output = JsonReporter::format(&view(), true).unwrap();
        let json: Value = serde_json::from_str(&output).unwrap();

        assert_eq!(json["view"], "report");
        let blocks = json["blocks"].as_array().unwrap();
        assert_eq!(blocks.len(), 7);
        assert_eq!(blocks[0]["block"], "header");
        assert_eq!(blocks[3]["block"], "compliance_table");
        assert_eq!(blocks[3]["content"]["type"], "rows");
        assert_eq!(blocks[3]["content"]["content"][0]["status_class"], "COMPLIANT");
        assert_eq!(blocks[5]["decision"], "REVISE_AND_RESUBMIT");
        assert_eq!(blocks[5]["severity_class"], "warning");
        assert_eq!(blocks[6]["body"]["type"], "list");
    }

    #[test]
    fn test_error_view() {
        let view = ReportView::Error {
            message: "quota".into(),
        };
        let json: Value = serde_json::from_str(&JsonReporter::format(&view, false).unwrap()).unwrap();
        assert_eq!(json["view"], "error");
        assert_eq!(json["message"], "quota");
    }
}
