//! # barath-render
//!
//! Renders BarathAI chat messages: a line-oriented markdown dialect with
//! fenced code, pipe tables, headings, list items and inline emphasis.
//!
//! ```
//! use barath_render::{Block, Span};
//!
//! let blocks = barath_render::parse("## Title\n- item");
//! assert_eq!(
//!     blocks[0],
//!     Block::Heading { level: 2, content: vec![Span::Text("Title".to_string())] }
//! );
//! ```

mod block;
mod config;
mod copy;
mod error;
mod html;
mod inline;
mod parser;

pub use block::{Block, Span, spans_text};
pub use config::{Config, CopyConfig, HtmlConfig, ParseOptions};
pub use copy::{Clipboard, CopyNotice, CopyTracker, WriterClipboard};
pub use error::{Error, Result};
pub use html::{CopyView, blocks_to_html};
pub use inline::parse_inline;
pub use parser::parse_with_options;

/// Parse a chat message into a vector of blocks.
pub fn parse(markdown: &str) -> Vec<Block> {
    parser::parse(markdown)
}

/// Convert a chat message to HTML using default config.
pub fn markdown_to_html(markdown: &str) -> String {
    markdown_to_html_with_config(markdown, &Config::compiled_default())
}

/// Convert a chat message to HTML with custom config.
pub fn markdown_to_html_with_config(markdown: &str, config: &Config) -> String {
    let blocks = parse_with_options(markdown, &config.parse);
    html::blocks_to_html(&blocks, &config.html, None)
}

/// Convert a chat message to a JSON array of blocks.
pub fn markdown_to_json(markdown: &str, config: &Config) -> Result<String> {
    let blocks = parse_with_options(markdown, &config.parse);
    Ok(serde_json::to_string_pretty(&blocks)?)
}

/// Convert a chat message to unformatted text, one block per line.
pub fn markdown_to_text(markdown: &str, config: &Config) -> String {
    parse_with_options(markdown, &config.parse)
        .iter()
        .map(Block::plain_text)
        .collect::<Vec<_>>()
        .join("\n")
}
