use crate::block::Span;

/// Inline span kinds, in the order they claim text.
#[derive(Debug, Clone, Copy)]
enum SpanKind {
    Code,
    Bold,
    Italic,
}

const PASSES: [SpanKind; 3] = [SpanKind::Code, SpanKind::Bold, SpanKind::Italic];

impl SpanKind {
    /// Delimiters tried at each position, first match wins.
    fn delimiters(self) -> &'static [&'static str] {
        match self {
            SpanKind::Code => &["`"],
            SpanKind::Bold => &["**", "__"],
            SpanKind::Italic => &["*", "_"],
        }
    }

    fn opens_with(self, ch: char) -> bool {
        match self {
            SpanKind::Code => ch == '`',
            SpanKind::Bold | SpanKind::Italic => ch == '*' || ch == '_',
        }
    }

    fn span(self, text: &str) -> Span {
        let text = text.to_string();
        match self {
            SpanKind::Code => Span::Code(text),
            SpanKind::Bold => Span::Bold(text),
            SpanKind::Italic => Span::Italic(text),
        }
    }
}

/// A stretch of the line that is either still unclaimed or already a span.
enum Piece<'a> {
    Raw(&'a str),
    Claimed(Span),
}

/// Split one line of text into formatted spans.
///
/// Inline code is recognized first, then bold, then italic. Each pass only
/// scans text that no earlier pass claimed, so spans never overlap. A
/// delimiter without a closing partner is kept as plain text.
pub fn parse_inline(text: &str) -> Vec<Span> {
    if text.is_empty() {
        return Vec::new();
    }

    let mut pieces = vec![Piece::Raw(text)];
    for kind in PASSES {
        pieces = pieces
            .into_iter()
            .flat_map(|piece| match piece {
                Piece::Raw(raw) => claim(raw, kind),
                claimed => vec![claimed],
            })
            .collect();
    }

    pieces
        .into_iter()
        .map(|piece| match piece {
            Piece::Raw(raw) => Span::Text(raw.to_string()),
            Piece::Claimed(span) => span,
        })
        .collect()
}

/// Scan `raw` left to right, claiming every delimited run of `kind`.
fn claim(raw: &str, kind: SpanKind) -> Vec<Piece<'_>> {
    let mut pieces = Vec::new();
    let mut plain_start = 0;
    let mut cursor = 0;

    while let Some(offset) = raw[cursor..].find(|ch: char| kind.opens_with(ch)) {
        let start = cursor + offset;
        let rest = &raw[start..];
        let matched = kind
            .delimiters()
            .iter()
            .find_map(|delimiter| delimited(rest, delimiter));

        match matched {
            Some((content, consumed)) => {
                if plain_start < start {
                    pieces.push(Piece::Raw(&raw[plain_start..start]));
                }
                pieces.push(Piece::Claimed(kind.span(content)));
                cursor = start + consumed;
                plain_start = cursor;
            }
            // Delimiters are ASCII, so stepping one byte stays on a char boundary.
            None => cursor = start + 1,
        }
    }

    if plain_start < raw.len() {
        pieces.push(Piece::Raw(&raw[plain_start..]));
    }
    pieces
}

/// Match `delimiter content delimiter` at the start of `text`.
///
/// Returns the content and the number of bytes consumed. The content ends at
/// the first closing delimiter and may be empty.
fn delimited<'a>(text: &'a str, delimiter: &str) -> Option<(&'a str, usize)> {
    let body = text.strip_prefix(delimiter)?;
    let end = body.find(delimiter)?;
    Some((&body[..end], delimiter.len() * 2 + end))
}
