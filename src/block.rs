use serde::Serialize;

/// Inline text spans with formatting
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum Span {
    Text(String),
    Bold(String),
    Italic(String),
    Code(String),
}

impl Span {
    /// The literal text of the span, with its delimiters removed.
    pub fn text(&self) -> &str {
        match self {
            Span::Text(text) | Span::Bold(text) | Span::Italic(text) | Span::Code(text) => text,
        }
    }
}

/// Concatenate the literal text of a span sequence.
pub fn spans_text(spans: &[Span]) -> String {
    spans.iter().map(Span::text).collect()
}

/// Block-level elements parsed from a chat message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Heading {
        level: u8,
        content: Vec<Span>,
    },
    Paragraph {
        content: Vec<Span>,
    },
    CodeBlock {
        language: Option<String>,
        content: String,
    },
    ListItem {
        ordered: bool,
        content: Vec<Span>,
    },
    Table {
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    },
    Blank,
}

impl Block {
    /// Render the block as unformatted text.
    ///
    /// Inline markers are dropped, code is kept verbatim and table cells are
    /// joined with tabs, one row per line.
    pub fn plain_text(&self) -> String {
        match self {
            Block::Heading { content, .. }
            | Block::Paragraph { content }
            | Block::ListItem { content, .. } => spans_text(content),
            Block::CodeBlock { content, .. } => content.clone(),
            Block::Table { headers, rows } => {
                let mut lines = vec![headers.join("\t")];
                lines.extend(rows.iter().map(|row| row.join("\t")));
                lines.join("\n")
            }
            Block::Blank => String::new(),
        }
    }
}
