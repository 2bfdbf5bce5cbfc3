//! # Tokenizer
//!
//! Classifies each logical line into tokens.
//!
//! A line whose first word is a known line keyword (`@decl`, `@param`,
//! `@dl`, `@enddl`, `@item` ...) becomes exactly one keyword token carrying
//! the rest of the line as its argument. Keyword lines are never scanned for
//! inline markup. Every other line is body text and is scanned by
//! [`inline::scan_inline`] for `@i{...@}`-style spans.
//!
//! ```text
//! "@param x"           -> [Delimiter(param, "x")]
//! "See @ref{foo@} now" -> [Text("See "), ShortMarkup(ref, "foo"), Text(" now")]
//! ""                   -> [ParagraphBreak]
//! ```

pub mod cursor;
pub mod inline;
pub mod keywords;

use std::sync::OnceLock;

use regex::Regex;

use crate::extract::LogicalLine;

pub use inline::{Continued, InlineScan, OpenMarkup, continue_inline, scan_inline};
pub use keywords::{BlockFamily, DelimiterKeyword, ItemKeyword, Keyword, MarkupKind, MetaKeyword};

/// A classified piece of a logical line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Meta {
        keyword: MetaKeyword,
        argument: String,
    },
    Delimiter {
        keyword: DelimiterKeyword,
        argument: String,
    },
    Block {
        family: BlockFamily,
        argument: String,
    },
    EndBlock {
        family: BlockFamily,
        argument: String,
    },
    Item {
        keyword: ItemKeyword,
        argument: String,
    },
    ShortMarkup {
        kind: MarkupKind,
        content: String,
    },
    Text {
        content: String,
    },
    ParagraphBreak,
}

impl Token {
    /// Whether this token is a line keyword rather than body content.
    pub fn is_keyword(&self) -> bool {
        !matches!(
            self,
            Token::ShortMarkup { .. } | Token::Text { .. } | Token::ParagraphBreak
        )
    }
}

/// Tokens of one logical line.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LineTokens {
    pub tokens: Vec<Token>,
    /// A short markup opener left open at the end of the line. It may still
    /// close on a later body line of the same comment run.
    pub open: Option<OpenMarkup>,
}

fn keyword_regex() -> &'static Regex {
    static KEYWORD_LINE: OnceLock<Regex> = OnceLock::new();
    KEYWORD_LINE.get_or_init(|| Regex::new(r"^@(\w+)").expect("Invalid keyword regex"))
}

/// Tokenizes one logical line.
pub fn tokenize(line: &LogicalLine) -> LineTokens {
    if line.text.trim().is_empty() {
        return LineTokens {
            tokens: vec![Token::ParagraphBreak],
            open: None,
        };
    }

    if let Some(token) = keyword_token(line.text.trim_start()) {
        return LineTokens {
            tokens: vec![token],
            open: None,
        };
    }

    scan_body(line)
}

/// Tokenizes a logical line as body text, ignoring any leading keyword.
///
/// Used for ordinary prose and for keyword lines that turn out to be
/// misplaced, which are then kept as literal text.
pub fn scan_body(line: &LogicalLine) -> LineTokens {
    let scan = scan_inline(&line.text);
    LineTokens {
        tokens: scan.tokens,
        open: scan.open,
    }
}

fn keyword_token(s: &str) -> Option<Token> {
    let name = keyword_regex().captures(s)?.get(1)?;
    let keyword = Keyword::lookup(name.as_str())?;

    let rest = &s[name.end()..];
    let argument = rest.strip_prefix(' ').unwrap_or(rest).to_string();

    let token = match keyword {
        Keyword::Meta(keyword) => Token::Meta { keyword, argument },
        Keyword::Delimiter(keyword) => Token::Delimiter { keyword, argument },
        Keyword::Block(family) => Token::Block { family, argument },
        Keyword::EndBlock(family) => Token::EndBlock { family, argument },
        Keyword::Item(keyword) => Token::Item { keyword, argument },
    };
    Some(token)
}
