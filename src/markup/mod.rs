//! Sanitized document model for model output.
//!
//! Spans only ever hold plain text, so nothing the model returns can reach the
//! screen or the HTML export as live markup.

mod cmark;

pub use cmark::CmarkRenderer;

/// Converts markdown-flavoured text into a [`RenderedMarkup`].
pub trait MarkdownRenderer: Send + Sync {
    fn render(&self, markdown: &str) -> RenderedMarkup;
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedMarkup {
    /// Text exactly as the model returned it.
    pub source: String,
    pub blocks: Vec<Block>,
    /// HTML generated from the sanitized event stream.
    pub html: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Heading { level: u8, spans: Vec<Span> },
    Paragraph(Vec<Span>),
    ListItem {
        depth: usize,
        marker: String,
        spans: Vec<Span>,
    },
    CodeBlock {
        language: Option<String>,
        code: String,
    },
    Rule,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub text: String,
    pub style: SpanStyle,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpanStyle {
    pub strong: bool,
    pub emphasis: bool,
    pub strikethrough: bool,
    pub code: bool,
    pub link: Option<String>,
}
