//! Free-text fields rendered as a paragraph or a bullet list

use serde::Serialize;
use shared_types::NO_INFORMATION;

/// Separator the analysis uses for inline bullet points
pub const BULLET_DELIMITER: &str = "* ";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "content", rename_all = "snake_case")]
pub enum TextBlock {
    Paragraph(String),
    List(Vec<String>),
}

impl TextBlock {
    /// Split on `"* "` when present, keeping non-empty trimmed segments in
    /// order. Anything else becomes a single paragraph.
    pub fn from_text(text: &str) -> Self {
        if text.trim().is_empty() {
            return TextBlock::Paragraph(NO_INFORMATION.to_string());
        }

        if text.contains(BULLET_DELIMITER) {
            let items: Vec<String> = text
                .split(BULLET_DELIMITER)
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(str::to_string)
                .collect();
            if !items.is_empty() {
                return TextBlock::List(items);
            }
        }

        TextBlock::Paragraph(text.to_string())
    }
}
