use log::debug;

use crate::block::Block;
use crate::config::ParseOptions;
use crate::inline::parse_inline;

const FENCE: &str = "```";

/// Parse a chat message into a list of blocks
pub fn parse(markdown: &str) -> Vec<Block> {
    parse_with_options(markdown, &ParseOptions::default())
}

/// Parse a chat message into a list of blocks with custom options.
///
/// Never fails: unterminated fences and partial tables are flushed as
/// whatever they collected.
pub fn parse_with_options(markdown: &str, options: &ParseOptions) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut state = ParseState::default();

    for line in markdown.lines() {
        process_line(line, &mut state, &mut blocks, options);
    }

    flush_table(&mut state, &mut blocks, options);
    if state.in_code_block {
        debug!(
            "unterminated code fence, keeping {} collected line(s)",
            state.code_lines.len()
        );
        blocks.push(state.take_code_block());
    }

    blocks
}

#[derive(Default)]
struct ParseState<'a> {
    // Code block state
    in_code_block: bool,
    code_language: Option<String>,
    code_lines: Vec<&'a str>,

    // Table state
    table_header: Option<&'a str>,
    separator_seen: bool,
    table_rows: Vec<Vec<String>>,
}

impl ParseState<'_> {
    fn take_code_block(&mut self) -> Block {
        self.in_code_block = false;
        let content = std::mem::take(&mut self.code_lines).join("\n");
        let language = self.code_language.take();
        Block::CodeBlock { language, content }
    }
}

fn process_line<'a>(
    line: &'a str,
    state: &mut ParseState<'a>,
    blocks: &mut Vec<Block>,
    options: &ParseOptions,
) {
    let trimmed = line.trim();

    // Fences
    if let Some(tag) = trimmed.strip_prefix(FENCE) {
        if state.in_code_block {
            blocks.push(state.take_code_block());
        } else {
            flush_table(state, blocks, options);
            let tag = tag.trim();
            state.in_code_block = true;
            state.code_language = (!tag.is_empty()).then(|| tag.to_string());
        }
        return;
    }

    if state.in_code_block {
        state.code_lines.push(line);
        return;
    }

    // Tables
    if !trimmed.is_empty() && line.contains('|') {
        if state.table_header.is_none() {
            state.table_header = Some(line);
        } else if !state.separator_seen {
            state.separator_seen = true;
        } else {
            state.table_rows.push(split_cells(line, options));
        }
        return;
    }

    flush_table(state, blocks, options);
    blocks.push(classify(line));
}

fn flush_table(state: &mut ParseState<'_>, blocks: &mut Vec<Block>, options: &ParseOptions) {
    let Some(header) = state.table_header.take() else {
        return;
    };
    let separator_seen = std::mem::take(&mut state.separator_seen);
    let rows = std::mem::take(&mut state.table_rows);

    if !separator_seen {
        debug!("lone pipe line is not a table, classifying it as text");
        blocks.push(classify(header));
        return;
    }

    blocks.push(Block::Table {
        headers: split_cells(header, options),
        rows,
    });
}

/// Classify a line that is neither code nor part of a table.
fn classify(line: &str) -> Block {
    if let Some((level, text)) = heading(line) {
        return Block::Heading {
            level,
            content: parse_inline(text),
        };
    }

    if let Some(text) = line.strip_prefix("- ").or_else(|| line.strip_prefix("* ")) {
        return Block::ListItem {
            ordered: false,
            content: parse_inline(text),
        };
    }

    if let Some(text) = ordered_item(line) {
        return Block::ListItem {
            ordered: true,
            content: parse_inline(text),
        };
    }

    if line.trim().is_empty() {
        return Block::Blank;
    }

    Block::Paragraph {
        content: parse_inline(line),
    }
}

fn heading(line: &str) -> Option<(u8, &str)> {
    [("### ", 3), ("## ", 2), ("# ", 1)]
        .into_iter()
        .find_map(|(marker, level)| line.strip_prefix(marker).map(|text| (level, text)))
}

/// Text after a `<digits>. ` marker.
fn ordered_item(line: &str) -> Option<&str> {
    let rest = line.trim_start_matches(|ch: char| ch.is_ascii_digit());
    if rest.len() == line.len() {
        return None;
    }
    rest.strip_prefix(". ")
}

/// Split a table row on pipes.
///
/// Empty cells are dropped, so `| a | b |` yields two cells. With
/// `keep_inner_empty_cells` only the cells outside the outer pipes are
/// dropped and `a || b` yields three.
fn split_cells(line: &str, options: &ParseOptions) -> Vec<String> {
    let cells: Vec<&str> = line.split('|').map(str::trim).collect();

    if !options.keep_inner_empty_cells {
        return cells
            .into_iter()
            .filter(|cell| !cell.is_empty())
            .map(str::to_string)
            .collect();
    }

    let start = usize::from(cells.first().is_some_and(|cell| cell.is_empty()));
    let end = if cells.len() > start && cells.last().is_some_and(|cell| cell.is_empty()) {
        cells.len() - 1
    } else {
        cells.len()
    };
    cells[start..end].iter().map(|cell| cell.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::Span;
    use pretty_assertions::assert_eq;

    fn text(s: &str) -> Vec<Span> {
        vec![Span::Text(s.to_string())]
    }

    fn strings(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|cell| cell.to_string()).collect()
    }

    #[test]
    fn plain_lines() {
        assert_eq!(
            parse("hello\n\nworld"),
            vec![
                Block::Paragraph {
                    content: text("hello")
                },
                Block::Blank,
                Block::Paragraph {
                    content: text("world")
                },
            ]
        );
    }

    #[test]
    fn empty_input() {
        assert!(parse("").is_empty());
    }

    #[test]
    fn crlf_line_endings() {
        assert_eq!(
            parse("# Hi\r\nthere\r\n"),
            vec![
                Block::Heading {
                    level: 1,
                    content: text("Hi")
                },
                Block::Paragraph {
                    content: text("there")
                },
            ]
        );
    }

    #[test]
    fn headings() {
        assert_eq!(
            parse("# One\n## Two\n### Three"),
            vec![
                Block::Heading {
                    level: 1,
                    content: text("One")
                },
                Block::Heading {
                    level: 2,
                    content: text("Two")
                },
                Block::Heading {
                    level: 3,
                    content: text("Three")
                },
            ]
        );
    }

    #[test]
    fn deep_heading_is_paragraph() {
        assert_eq!(
            parse("#### Four"),
            vec![Block::Paragraph {
                content: text("#### Four")
            }]
        );
    }

    #[test]
    fn list_items() {
        assert_eq!(
            parse("- dash\n* star\n12. twelve\n3.no space"),
            vec![
                Block::ListItem {
                    ordered: false,
                    content: text("dash")
                },
                Block::ListItem {
                    ordered: false,
                    content: text("star")
                },
                Block::ListItem {
                    ordered: true,
                    content: text("twelve")
                },
                Block::Paragraph {
                    content: text("3.no space")
                },
            ]
        );
    }

    #[test]
    fn list_item_inline_formatting() {
        assert_eq!(
            parse("- **key**: value"),
            vec![Block::ListItem {
                ordered: false,
                content: vec![
                    Span::Bold("key".to_string()),
                    Span::Text(": value".to_string())
                ],
            }]
        );
    }

    #[test]
    fn code_block() {
        assert_eq!(
            parse("```js\ncode line\n```"),
            vec![Block::CodeBlock {
                language: Some("js".to_string()),
                content: "code line".to_string(),
            }]
        );
    }

    #[test]
    fn code_block_is_verbatim() {
        assert_eq!(
            parse("```\n# not a heading\n  a | b\n- **x**\n```"),
            vec![Block::CodeBlock {
                language: None,
                content: "# not a heading\n  a | b\n- **x**".to_string(),
            }]
        );
    }

    #[test]
    fn indented_fence() {
        assert_eq!(
            parse("  ``` rust \nlet x = 1;\n  ```\nafter"),
            vec![
                Block::CodeBlock {
                    language: Some("rust".to_string()),
                    content: "let x = 1;".to_string(),
                },
                Block::Paragraph {
                    content: text("after")
                },
            ]
        );
    }

    #[test]
    fn unterminated_fence() {
        assert_eq!(
            parse("intro\n```py\nprint(1)\nprint(2)"),
            vec![
                Block::Paragraph {
                    content: text("intro")
                },
                Block::CodeBlock {
                    language: Some("py".to_string()),
                    content: "print(1)\nprint(2)".to_string(),
                },
            ]
        );
    }

    #[test]
    fn empty_unterminated_fence() {
        assert_eq!(
            parse("```"),
            vec![Block::CodeBlock {
                language: None,
                content: String::new(),
            }]
        );
    }

    #[test]
    fn table() {
        assert_eq!(
            parse("a | b\n---|---\n1 | 2"),
            vec![Block::Table {
                headers: strings(&["a", "b"]),
                rows: vec![strings(&["1", "2"])],
            }]
        );
    }

    #[test]
    fn bordered_table_then_text() {
        assert_eq!(
            parse("| A | B |\n|---|---|\n| 1 | 2 |\n| 3 | 4 |\ndone"),
            vec![
                Block::Table {
                    headers: strings(&["A", "B"]),
                    rows: vec![strings(&["1", "2"]), strings(&["3", "4"])],
                },
                Block::Paragraph {
                    content: text("done")
                },
            ]
        );
    }

    #[test]
    fn separator_is_not_validated() {
        assert_eq!(
            parse("h1|h2\nnot|dashes\nr1|r2"),
            vec![Block::Table {
                headers: strings(&["h1", "h2"]),
                rows: vec![strings(&["r1", "r2"])],
            }]
        );
    }

    #[test]
    fn blank_line_ends_table() {
        assert_eq!(
            parse("a|b\n-|-\n\nc|d"),
            vec![
                Block::Table {
                    headers: strings(&["a", "b"]),
                    rows: Vec::new(),
                },
                Block::Blank,
                Block::Paragraph {
                    content: text("c|d")
                },
            ]
        );
    }

    #[test]
    fn fence_ends_table() {
        assert_eq!(
            parse("a|b\n-|-\n1|2\n```\nx\n```"),
            vec![
                Block::Table {
                    headers: strings(&["a", "b"]),
                    rows: vec![strings(&["1", "2"])],
                },
                Block::CodeBlock {
                    language: None,
                    content: "x".to_string(),
                },
            ]
        );
    }

    #[test]
    fn lone_pipe_line_is_classified_as_text() {
        assert_eq!(
            parse("- either | or\nnext"),
            vec![
                Block::ListItem {
                    ordered: false,
                    content: text("either | or")
                },
                Block::Paragraph {
                    content: text("next")
                },
            ]
        );
    }

    #[test]
    fn empty_cells_are_dropped() {
        assert_eq!(
            parse("a||b\n-|-|-\n1||2"),
            vec![Block::Table {
                headers: strings(&["a", "b"]),
                rows: vec![strings(&["1", "2"])],
            }]
        );
    }

    #[test]
    fn inner_empty_cells_can_be_kept() {
        let options = ParseOptions {
            keep_inner_empty_cells: true,
        };
        assert_eq!(
            parse_with_options("| a || b |\n|-|-|-|\n| 1 | | 2 |", &options),
            vec![Block::Table {
                headers: strings(&["a", "", "b"]),
                rows: vec![strings(&["1", "", "2"])],
            }]
        );
    }
}
