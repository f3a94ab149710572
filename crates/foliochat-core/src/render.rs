//! Shape-directed message rendering.
//!
//! A scalar renders verbatim, a list renders bulleted, and a mapping
//! renders each key as a bold label followed by its value with the same
//! list/scalar rule applied one level down. Front ends map the spans to
//! their own styling (the TUI uses the bold modifier).

use crate::knowledge::KnowledgeValue;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedSpan {
    pub text: String,
    pub bold: bool,
}

impl RenderedSpan {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
        }
    }

    fn bold(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderedLine {
    pub spans: Vec<RenderedSpan>,
}

impl RenderedLine {
    fn of(spans: Vec<RenderedSpan>) -> Self {
        Self { spans }
    }

    /// Concatenated text without styling, for plain front ends and tests.
    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

pub fn render_message(body: &KnowledgeValue) -> Vec<RenderedLine> {
    match body {
        KnowledgeValue::Scalar(text) => vec![RenderedLine::of(vec![RenderedSpan::plain(text)])],
        KnowledgeValue::List(items) => items
            .iter()
            .map(|item| RenderedLine::of(vec![RenderedSpan::plain(format!("• {item}"))]))
            .collect(),
        KnowledgeValue::Nested(entries) => {
            let mut lines = Vec::new();
            for (key, value) in entries {
                match value {
                    KnowledgeValue::Scalar(text) => {
                        lines.push(RenderedLine::of(vec![
                            RenderedSpan::bold(format!("{key}:")),
                            RenderedSpan::plain(format!(" {text}")),
                        ]));
                    }
                    KnowledgeValue::List(items) => {
                        lines.push(RenderedLine::of(vec![RenderedSpan::bold(format!("{key}:"))]));
                        for item in items {
                            lines.push(RenderedLine::of(vec![RenderedSpan::plain(format!(
                                "• {item}"
                            ))]));
                        }
                    }
                    // Deeper mappings flatten to one line; the label rule
                    // recurses a single level only.
                    KnowledgeValue::Nested(_) => {
                        lines.push(RenderedLine::of(vec![
                            RenderedSpan::bold(format!("{key}:")),
                            RenderedSpan::plain(format!(" {}", inline_text(value))),
                        ]));
                    }
                }
            }
            lines
        }
    }
}

fn inline_text(value: &KnowledgeValue) -> String {
    match value {
        KnowledgeValue::Scalar(text) => text.clone(),
        KnowledgeValue::List(items) => items.join(", "),
        KnowledgeValue::Nested(entries) => entries
            .iter()
            .map(|(k, v)| format!("{k}: {}", inline_text(v)))
            .collect::<Vec<_>>()
            .join(", "),
    }
}
