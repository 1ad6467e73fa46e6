use std::time::Instant;

use crate::block::{Block, Span};
use crate::config::HtmlConfig;
use crate::copy::CopyTracker;
use crate::inline::parse_inline;

/// Copy indicators to reflect in the rendered buttons, read at `Instant`.
pub type CopyView<'a> = Option<(&'a CopyTracker, Instant)>;

/// Convert blocks to HTML
pub fn blocks_to_html(blocks: &[Block], config: &HtmlConfig, copy: CopyView<'_>) -> String {
    let mut out = String::new();

    let mut i = 0;
    while i < blocks.len() {
        match &blocks[i] {
            Block::ListItem { ordered, .. } => {
                // Consecutive items of the same kind share one list element
                let tag = if *ordered { "ol" } else { "ul" };
                out.push_str(&format!("<{tag}>\n"));
                while let Some(Block::ListItem {
                    ordered: next,
                    content,
                }) = blocks.get(i)
                {
                    if next != ordered {
                        break;
                    }
                    out.push_str("<li>");
                    spans_to_html(content, &mut out);
                    out.push_str("</li>\n");
                    i += 1;
                }
                out.push_str(&format!("</{tag}>\n"));
                continue;
            }
            block => emit_block(block, i, config, copy, &mut out),
        }

        i += 1;
    }

    out
}

fn emit_block(
    block: &Block,
    index: usize,
    config: &HtmlConfig,
    copy: CopyView<'_>,
    out: &mut String,
) {
    match block {
        Block::Heading { level, content } => {
            out.push_str(&format!("<h{level}>"));
            spans_to_html(content, out);
            out.push_str(&format!("</h{level}>\n"));
        }
        Block::Paragraph { content } => {
            out.push_str("<p>");
            spans_to_html(content, out);
            out.push_str("</p>\n");
        }
        Block::CodeBlock { language, content } => {
            emit_code_block(language.as_deref(), content, index, config, copy, out);
        }
        Block::Table { headers, rows } => table_to_html(headers, rows, out),
        // Lists are grouped by the caller
        Block::ListItem { .. } | Block::Blank => {}
    }
}

fn emit_code_block(
    language: Option<&str>,
    content: &str,
    index: usize,
    config: &HtmlConfig,
    copy: CopyView<'_>,
    out: &mut String,
) {
    out.push_str(&format!("<div class=\"code-block\" data-block=\"{index}\">\n"));
    out.push_str("<div class=\"code-header\">");
    out.push_str("<span class=\"code-lang\">");
    escape_into(language.unwrap_or("text"), out);
    out.push_str("</span>");
    if config.copy_buttons {
        let copied = copy.is_some_and(|(tracker, now)| tracker.is_copied(index, now));
        let (class, label) = if copied {
            ("copy-button copied", &config.copied_label)
        } else {
            ("copy-button", &config.copy_label)
        };
        out.push_str(&format!("<button class=\"{class}\" data-copy=\"{index}\">"));
        escape_into(label, out);
        out.push_str("</button>");
    }
    out.push_str("</div>\n");

    out.push_str("<pre><code");
    if let Some(lang) = language {
        out.push_str(" class=\"language-");
        escape_into(lang, out);
        out.push('"');
    }
    out.push('>');
    escape_into(content, out);
    out.push_str("</code></pre>\n</div>\n");
}

fn table_to_html(headers: &[String], rows: &[Vec<String>], out: &mut String) {
    out.push_str("<table>\n<thead>\n<tr>");
    for cell in headers {
        out.push_str("<th>");
        spans_to_html(&parse_inline(cell), out);
        out.push_str("</th>");
    }
    out.push_str("</tr>\n</thead>\n<tbody>\n");

    for row in rows {
        out.push_str("<tr>");
        for cell in row {
            out.push_str("<td>");
            spans_to_html(&parse_inline(cell), out);
            out.push_str("</td>");
        }
        out.push_str("</tr>\n");
    }

    out.push_str("</tbody>\n</table>\n");
}

fn spans_to_html(spans: &[Span], out: &mut String) {
    for span in spans {
        let (open, close, text) = match span {
            Span::Text(text) => ("", "", text),
            Span::Bold(text) => ("<strong>", "</strong>", text),
            Span::Italic(text) => ("<em>", "</em>", text),
            Span::Code(text) => ("<code>", "</code>", text),
        };
        out.push_str(open);
        escape_into(text, out);
        out.push_str(close);
    }
}

fn escape_into(text: &str, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
}
