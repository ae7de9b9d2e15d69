//! Property-based tests for the compliance report pipeline
//!
//! Covers classifier totality, the bullet-splitting rule, row-count
//! preservation from payload to display tree, and raw-text preservation on
//! format failures.

use compliance_engine::render::{Block, TableContent};
use compliance_engine::{
    build, classify_decision, classify_item, render, DecisionBanner, StatusClass, TextBlock,
};
use proptest::prelude::*;
use serde_json::json;

// ============================================================
// Strategies
// ============================================================

fn known_status() -> impl Strategy<Value = (&'static str, StatusClass)> {
    prop_oneof![
        Just(("COMPLIANT", StatusClass::Compliant)),
        Just(("NON-COMPLIANT", StatusClass::NonCompliant)),
        Just(("PARTIALLY COMPLIANT", StatusClass::Partial)),
        Just(("INFORMATION MISSING", StatusClass::Missing)),
    ]
}

/// Flip the case of each character independently
fn mixed_case(phrase: &'static str) -> impl Strategy<Value = String> {
    proptest::collection::vec(any::<bool>(), phrase.len()).prop_map(move |flips| {
        phrase
            .chars()
            .zip(flips)
            .map(|(c, lower)| if lower { c.to_ascii_lowercase() } else { c })
            .collect()
    })
}

/// Bullet item text that never contains the delimiter itself
fn bullet_item() -> impl Strategy<Value = String> {
    "[A-Za-z0-9][A-Za-z0-9.,()/-]{0,20}( [A-Za-z0-9.,()/-]{1,10}){0,3}"
}

/// Assessment entries of any shape, including malformed ones
fn assessment_entry() -> impl Strategy<Value = serde_json::Value> {
    prop_oneof![
        ("[a-z ]{0,20}", "[a-z ]{0,20}", "[A-Z -]{0,20}").prop_map(|(r, s, st)| {
            json!({"requirement": r, "submittalInfo": s, "status": st})
        }),
        "[a-z ]{0,20}".prop_map(|r| json!({ "requirement": r })),
        "[a-z ]{0,20}".prop_map(serde_json::Value::from),
        any::<i64>().prop_map(serde_json::Value::from),
        Just(serde_json::Value::Null),
        Just(json!([])),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // ============================================================
    // Status Classifier
    // ============================================================

    #[test]
    fn known_statuses_match_in_any_case(
        (status, class) in known_status(),
        flips in proptest::collection::vec(any::<bool>(), 19)
    ) {
        let mixed: String = status
            .chars()
            .zip(flips.into_iter().chain(std::iter::repeat(false)))
            .map(|(c, lower)| if lower { c.to_ascii_lowercase() } else { c })
            .collect();
        prop_assert_eq!(classify_item(&mixed), class);
    }

    #[test]
    fn classify_item_is_total(status in ".*") {
        // Never panics; anything outside the four phrases is UNKNOWN
        let class = classify_item(&status);
        let upper = status.to_uppercase();
        let known = matches!(
            upper.as_str(),
            "COMPLIANT" | "NON-COMPLIANT" | "PARTIALLY COMPLIANT" | "INFORMATION MISSING"
        );
        prop_assert_eq!(class == StatusClass::Unknown, !known);
    }

    #[test]
    fn approve_with_comments_is_never_shadowed(
        prefix in "[a-z ]{0,20}",
        suffix in "[a-z0-9 ]{0,20}"
    ) {
        let decision = format!("{}APPROVE WITH COMMENTS{}", prefix, suffix);
        prop_assert_eq!(classify_decision(&decision), DecisionBanner::ApproveWithComments);
    }

    #[test]
    fn lowered_approve_is_neutral(phrase in mixed_case("APPROVE")) {
        // Matching is literal: any lowered letter breaks the phrase
        let expected = if phrase == "APPROVE" {
            DecisionBanner::Approve
        } else {
            DecisionBanner::Neutral
        };
        prop_assert_eq!(classify_decision(&phrase), expected);
    }

    #[test]
    fn classify_decision_is_total(decision in ".*") {
        let _ = classify_decision(&decision);
    }

    #[test]
    fn text_without_phrases_is_neutral(decision in "[b-df-z ]{0,40}") {
        // Every phrase contains an 'E'; none can appear without one
        prop_assert_eq!(classify_decision(&decision), DecisionBanner::Neutral);
    }

    // ============================================================
    // Bullet Splitting
    // ============================================================

    #[test]
    fn bullets_split_into_items(items in proptest::collection::vec(bullet_item(), 1..8)) {
        let text: String = items.iter().map(|item| format!("* {}", item)).collect();
        prop_assert_eq!(TextBlock::from_text(&text), TextBlock::List(items));
    }

    #[test]
    fn bullet_splitting_is_stable(items in proptest::collection::vec(bullet_item(), 1..8)) {
        let text: String = items.iter().map(|item| format!("* {}", item)).collect();
        let TextBlock::List(first) = TextBlock::from_text(&text) else {
            return Err(TestCaseError::fail("expected a list"));
        };
        let rejoined: String = first.iter().map(|item| format!("* {}", item)).collect();
        prop_assert_eq!(TextBlock::from_text(&rejoined), TextBlock::List(first));
    }

    #[test]
    fn text_without_delimiter_is_one_paragraph(text in "[A-Za-z0-9.,]{1,20}( [A-Za-z0-9.,]{1,20}){0,5}") {
        prop_assert_eq!(TextBlock::from_text(&text), TextBlock::Paragraph(text.clone()));
    }

    // ============================================================
    // Builder and Renderer
    // ============================================================

    #[test]
    fn every_entry_becomes_one_row(entries in proptest::collection::vec(assessment_entry(), 0..12)) {
        let raw = json!({ "complianceAssessment": entries }).to_string();
        let report = build(&raw).unwrap();
        prop_assert_eq!(report.compliance_assessment.len(), entries.len());

        let tree = render(&report);
        prop_assert_eq!(tree.blocks.len(), 7);

        let table = tree.blocks.iter().find_map(|block| match block {
            Block::ComplianceTable(table) => Some(table),
            _ => None,
        });
        match &table.unwrap().content {
            TableContent::Rows(rows) => {
                prop_assert!(!entries.is_empty());
                prop_assert_eq!(rows.len(), entries.len());
            }
            TableContent::NoData(_) => prop_assert!(entries.is_empty()),
        }
    }

    #[test]
    fn rows_preserve_input_order(requirements in proptest::collection::vec("[a-z]{1,12}", 1..10)) {
        let entries: Vec<_> = requirements
            .iter()
            .map(|r| json!({"requirement": r, "submittalInfo": "x", "status": "COMPLIANT"}))
            .collect();
        let report = build(&json!({ "complianceAssessment": entries }).to_string()).unwrap();
        let built: Vec<String> = report
            .compliance_assessment
            .iter()
            .map(|item| item.requirement.clone())
            .collect();
        prop_assert_eq!(built, requirements);
    }

    #[test]
    fn optional_fields_never_change_block_count(
        summary in proptest::option::of("[a-z* ]{0,30}"),
        specs in proptest::option::of("[a-z* ]{0,30}"),
        issues in proptest::option::of("[a-z* ]{0,30}"),
        decision in proptest::option::of("[A-Z ]{0,30}"),
    ) {
        let mut obj = serde_json::Map::new();
        if let Some(s) = summary { obj.insert("submittalSummary".into(), s.into()); }
        if let Some(s) = specs { obj.insert("applicableSpecs".into(), s.into()); }
        if let Some(s) = issues { obj.insert("criticalIssues".into(), s.into()); }
        if let Some(d) = decision { obj.insert("recommendation".into(), json!({ "decision": d })); }

        let report = build(&serde_json::Value::Object(obj).to_string()).unwrap();
        prop_assert_eq!(render(&report).blocks.len(), 7);
    }

    #[test]
    fn format_errors_keep_raw_bytes(raw in "[^{\\[]{1,60}") {
        // Without a '{' the payload can never be an object
        let err = build(&raw).unwrap_err();
        prop_assert_eq!(err.raw, raw);
    }
}
