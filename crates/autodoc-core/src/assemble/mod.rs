//! # Scope assembly
//!
//! Builds the document tree from tokens with a stack of open containers.
//!
//! ## Stack shape
//!
//! ```text
//! [top level] [declaration]? [block]*
//! ```
//!
//! Each frame remembers its open section (top level, declarations) or open
//! item (blocks). Body content goes to the innermost open section or item,
//! or to the innermost container when none is open.
//!
//! ## Transitions
//!
//! - **Meta** (`@decl`, `@class` ...): closes everything down to the top
//!   level and pushes a new declaration. Declarations never nest.
//! - **Delimiter** (`@param` ...): replaces the open section of the current
//!   frame. Misplaced inside a block.
//! - **Block** (`@dl` ...): closes the open section/item and pushes a block.
//! - **Item** (`@item` ...): replaces the open item of the current block.
//!   Misplaced outside a block.
//! - **EndBlock** (`@enddl` ...): pops the innermost block, reporting a family
//!   mismatch but popping anyway.
//!
//! Misplaced keyword lines are reported and kept as literal text. Blocks
//! still open when a comment run ends are closed and reported.
//!
//! ## Open markup
//!
//! A short markup opener without `@}` on its line stays pending and may
//! close on a later body line of the same run; the lines are joined with
//! `\n`. A keyword line or the end of the run demotes it to text.

pub mod context;

use crate::diagnostic::{Diagnostic, DiagnosticKind, Location};
use crate::extract::LogicalLine;
use crate::tokens::{
    BlockFamily, Continued, DelimiterKeyword, ItemKeyword, LineTokens, MetaKeyword, OpenMarkup,
    Token, continue_inline, scan_body, tokenize,
};
use crate::tree::{DocumentNode, NodeKind};

use context::{OpenScope, ParseContext};

/// Assembles the logical lines of one extraction call into a tree.
pub struct ScopeAssembler {
    ctx: ParseContext,
    pending: Option<PendingMarkup>,
}

/// A markup span still waiting for its `@}`.
struct PendingMarkup {
    open: OpenMarkup,
    /// Line of the opener.
    line: usize,
}

impl ScopeAssembler {
    pub fn new() -> Self {
        Self {
            ctx: ParseContext::new(),
            pending: None,
        }
    }

    /// Assembles one comment run. Blocks never span runs.
    pub fn push_run(&mut self, run: usize, lines: &[LogicalLine]) {
        log::debug!("assembling run {run} ({} logical lines)", lines.len());
        self.ctx.run = run;
        for line in lines {
            self.push_line(line);
        }
        self.close_pending();
        self.ctx.close_to_top_level();
    }

    pub fn push_line(&mut self, line: &LogicalLine) {
        let mut lt = tokenize(line);
        if lt.tokens.len() == 1 && lt.tokens[0].is_keyword() {
            let token = lt.tokens.remove(0);
            log::trace!("line {}: {token:?}", line.origin_line);
            self.close_pending();
            self.keyword(token, line);
        } else if let Some(pending) = self.pending.take() {
            log::trace!("line {}: inside open {}", line.origin_line, pending.open.kind);
            self.resume(pending, line);
        } else {
            log::trace!("line {}: {:?}", line.origin_line, lt.tokens);
            self.body(lt, line.origin_line);
        }
    }

    pub fn finish(mut self) -> (Vec<DocumentNode>, Vec<Diagnostic>) {
        self.close_pending();
        self.ctx.finish()
    }

    fn location(&self, line: usize) -> Location {
        Location::new(self.ctx.run, line)
    }

    fn keyword(&mut self, token: Token, line: &LogicalLine) {
        let at = line.origin_line;
        match token {
            Token::Meta { keyword, argument } => self.meta(keyword, argument, at),
            Token::Delimiter { keyword, argument } => self.delimiter(keyword, argument, line),
            Token::Block { family, argument } => {
                self.ctx.top_mut().close_open();
                self.ctx
                    .push_frame(DocumentNode::new(NodeKind::Block(family), argument, at));
            }
            Token::Item { keyword, argument } => self.item(keyword, argument, line),
            Token::EndBlock { family, argument } => {
                self.end_block(family, at);
                if !argument.is_empty() {
                    let target = self.ctx.top_mut().text_target();
                    separate_line(target, at);
                    append_text(target, &argument, at);
                }
            }
            Token::ShortMarkup { .. } | Token::Text { .. } | Token::ParagraphBreak => {
                self.body(
                    LineTokens {
                        tokens: vec![token],
                        open: None,
                    },
                    at,
                );
            }
        }
    }

    fn meta(&mut self, keyword: MetaKeyword, argument: String, at: usize) {
        self.ctx.close_to_top_level();

        let location = self.location(at);
        let mut decl = DocumentNode::new(NodeKind::Declaration(keyword), argument, at);

        if keyword.opens_scope() {
            let index = self.ctx.top_level_len();
            self.ctx.scopes.push(OpenScope {
                keyword,
                index,
                location,
            });
        }

        if let Some(opener) = keyword.opener() {
            let innermost = self.ctx.scopes.last().map(|s| s.keyword);
            match innermost {
                Some(open) if open == opener => {
                    self.ctx.scopes.pop();
                }
                expected => {
                    let diagnostic = self.ctx.record(
                        DiagnosticKind::UnbalancedScope {
                            expected,
                            found: keyword,
                        },
                        location,
                    );
                    decl.diagnostics.push(diagnostic);
                }
            }
        }

        self.ctx.push_frame(decl);
    }

    fn delimiter(&mut self, keyword: DelimiterKeyword, argument: String, line: &LogicalLine) {
        if self.ctx.top_mut().block_family().is_some() {
            self.misplaced(keyword.as_str(), line);
            return;
        }
        let section = DocumentNode::new(NodeKind::Section(keyword), argument, line.origin_line);
        self.ctx.top_mut().set_open(section);
    }

    fn item(&mut self, keyword: ItemKeyword, argument: String, line: &LogicalLine) {
        let Some(family) = self.ctx.top_mut().block_family() else {
            self.misplaced(keyword.as_str(), line);
            return;
        };

        let mut item = DocumentNode::new(NodeKind::Item(keyword), argument, line.origin_line);
        if keyword.family() != family {
            let location = self.location(line.origin_line);
            let diagnostic = self.ctx.record(
                DiagnosticKind::MisplacedKeyword {
                    keyword: keyword.as_str().to_string(),
                },
                location,
            );
            item.diagnostics.push(diagnostic);
        }
        self.ctx.top_mut().set_open(item);
    }

    fn end_block(&mut self, found: BlockFamily, at: usize) {
        let location = self.location(at);
        let Some(expected) = self.ctx.top_mut().block_family() else {
            self.ctx
                .report(DiagnosticKind::StrayEndBlock { found }, location);
            return;
        };

        let Some(mut block) = self.ctx.pop_frame() else {
            return;
        };
        if expected != found {
            let diagnostic = self
                .ctx
                .record(DiagnosticKind::UnbalancedBlock { expected, found }, location);
            block.diagnostics.push(diagnostic);
        }
        self.ctx.attach(block);
    }

    /// Reports a keyword that is not allowed here and keeps its line as text.
    fn misplaced(&mut self, keyword: &str, line: &LogicalLine) {
        let location = self.location(line.origin_line);
        self.ctx.report(
            DiagnosticKind::MisplacedKeyword {
                keyword: keyword.to_string(),
            },
            location,
        );
        self.body(scan_body(line), line.origin_line);
    }

    fn body(&mut self, lt: LineTokens, at: usize) {
        let starts_paragraph = matches!(lt.tokens.first(), Some(Token::ParagraphBreak));
        let target = self.ctx.top_mut().text_target();
        if !starts_paragraph {
            separate_line(target, at);
        }
        push_tokens(target, lt.tokens, at);
        self.pending = lt.open.map(|open| PendingMarkup { open, line: at });
    }

    /// Feeds a body line to a pending span.
    fn resume(&mut self, pending: PendingMarkup, line: &LogicalLine) {
        let at = line.origin_line;
        match continue_inline(pending.open, &line.text) {
            Continued::StillOpen(open) => {
                self.pending = Some(PendingMarkup {
                    open,
                    line: pending.line,
                });
            }
            Continued::Closed {
                kind,
                content,
                rest,
            } => {
                let target = self.ctx.top_mut().text_target();
                target.push(DocumentNode::new(NodeKind::Inline(kind), content, pending.line));
                push_tokens(target, rest.tokens, at);
                self.pending = rest.open.map(|open| PendingMarkup { open, line: at });
            }
        }
    }

    /// Demotes a span that never closed to literal text.
    fn close_pending(&mut self) {
        let Some(pending) = self.pending.take() else {
            return;
        };
        let location = self.location(pending.line);
        self.ctx.report(
            DiagnosticKind::UnterminatedShortMarkup {
                markup: pending.open.kind,
            },
            location,
        );
        let target = self.ctx.top_mut().text_target();
        append_text(target, &pending.open.into_text(), pending.line);
    }
}

impl Default for ScopeAssembler {
    fn default() -> Self {
        Self::new()
    }
}

fn push_tokens(target: &mut Vec<DocumentNode>, tokens: Vec<Token>, at: usize) {
    for token in tokens {
        match token {
            Token::ParagraphBreak => {
                target.push(DocumentNode::new(NodeKind::ParagraphBreak, "", at));
            }
            Token::Text { content } => append_text(target, &content, at),
            Token::ShortMarkup { kind, content } => {
                target.push(DocumentNode::new(NodeKind::Inline(kind), content, at));
            }
            other => log::debug!("line {at}: keyword token {other:?} in body ignored"),
        }
    }
}

/// Keeps the line break between two lines of the same paragraph.
fn separate_line(target: &mut Vec<DocumentNode>, at: usize) {
    match target.last_mut() {
        Some(last) if last.kind == NodeKind::TextRun => last.argument.push('\n'),
        Some(last) if matches!(last.kind, NodeKind::Inline(_)) => {
            target.push(DocumentNode::text("\n", at));
        }
        _ => {}
    }
}

fn append_text(target: &mut Vec<DocumentNode>, content: &str, at: usize) {
    match target.last_mut() {
        Some(last) if last.kind == NodeKind::TextRun => last.argument.push_str(content),
        _ => target.push(DocumentNode::text(content, at)),
    }
}
