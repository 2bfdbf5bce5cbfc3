use super::{Token, cursor::Cursor, keywords::MarkupKind};

/// Result of scanning one body line for short markup.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct InlineScan {
    /// Tokens up to the first opener with no closer on this line.
    pub tokens: Vec<Token>,
    pub open: Option<OpenMarkup>,
}

/// A short markup opener still waiting for its `@}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenMarkup {
    pub kind: MarkupKind,
    /// Raw content after the brace seen so far.
    pub content: String,
}

impl OpenMarkup {
    /// The literal text of an opener that never closed.
    pub fn into_text(self) -> String {
        format!("{}{}", self.kind.opener(), self.content)
    }
}

/// Outcome of feeding the next body line to an open span.
#[derive(Debug, PartialEq, Eq)]
pub enum Continued {
    /// The line held the closer; `rest` is the scan of what follows it.
    Closed {
        kind: MarkupKind,
        content: String,
        rest: InlineScan,
    },
    StillOpen(OpenMarkup),
}

/// Scans body text into `Text` and `ShortMarkup` tokens.
///
/// Spans are lazy and never nest: the first `@}` after an opener closes it
/// and everything in between is kept verbatim, including other openers.
/// An `@` that starts no known opener is literal text. Literal pieces are
/// merged so two `Text` tokens are never adjacent.
///
/// An opener with no `@}` after it ends the scan and is returned as
/// [`InlineScan::open`]; no later span can close on this line anyway.
pub fn scan_inline(s: &str) -> InlineScan {
    let mut cur = Cursor::new(s);
    let mut out = InlineScan::default();
    let mut text_start = cur.pos();

    fn flush_text(out: &mut Vec<Token>, text: &str) {
        if !text.is_empty() {
            out.push(Token::Text {
                content: text.to_string(),
            });
        }
    }

    while !cur.eof() {
        if let Some(kind) = opener_at(&cur) {
            let start = cur.pos();
            let inner_start = start + kind.opener().len();
            cur.seek(inner_start);
            flush_text(&mut out.tokens, cur.slice(text_start, start));

            let Some(inner_end) = cur.find(MarkupKind::CLOSE) else {
                out.open = Some(OpenMarkup {
                    kind,
                    content: cur.slice(inner_start, s.len()).to_string(),
                });
                return out;
            };
            out.tokens.push(Token::ShortMarkup {
                kind,
                content: cur.slice(inner_start, inner_end).to_string(),
            });
            cur.seek(inner_end + MarkupKind::CLOSE.len());
            text_start = cur.pos();
            continue;
        }
        cur.bump();
    }

    flush_text(&mut out.tokens, cur.slice(text_start, s.len()));
    out
}

/// Continues an open span on the next line of the same comment run.
///
/// The lines are joined with `\n` inside the span content.
pub fn continue_inline(mut open: OpenMarkup, line: &str) -> Continued {
    open.content.push('\n');
    match line.find(MarkupKind::CLOSE) {
        Some(end) => {
            open.content.push_str(&line[..end]);
            Continued::Closed {
                kind: open.kind,
                content: open.content,
                rest: scan_inline(&line[end + MarkupKind::CLOSE.len()..]),
            }
        }
        None => {
            open.content.push_str(line);
            Continued::StillOpen(open)
        }
    }
}

fn opener_at(cur: &Cursor<'_>) -> Option<MarkupKind> {
    if cur.peek() != Some(b'@') {
        return None;
    }
    MarkupKind::ALL
        .into_iter()
        .find(|kind| cur.starts_with(kind.opener()))
}
