use serde::Serialize;

use crate::diagnostic::DiagnosticKind;
use crate::tokens::{BlockFamily, MarkupKind};
use crate::tree::{DocumentNode, NodeKind};

/// Style class of a highlighted span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HighlightClass {
    /// Meta keywords: `@decl`, `@class` ...
    Keyword,
    /// Section keywords: `@param`, `@returns` ...
    Delimiter,
    /// Block keywords and their end keywords.
    Block,
    /// Block item keywords.
    Item,
    /// Keyword arguments.
    Argument,
    Italic,
    Bold,
    Code,
    Reference,
    Xml,
    Text,
    /// Keywords of nodes that carry diagnostics.
    Invalid,
}

impl HighlightClass {
    fn for_markup(kind: MarkupKind) -> Self {
        match kind {
            MarkupKind::Italic => HighlightClass::Italic,
            MarkupKind::Bold => HighlightClass::Bold,
            MarkupKind::Teletype => HighlightClass::Code,
            MarkupKind::Ref => HighlightClass::Reference,
            MarkupKind::Xml => HighlightClass::Xml,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HighlightSpan {
    pub class: HighlightClass,
    pub text: String,
}

/// Renders a tree back into comment-body text, as styled spans.
///
/// Concatenating the span texts gives the comment body with markers and
/// continuations removed. Nodes with diagnostics have their keywords
/// classed as [`HighlightClass::Invalid`] so the user sees where the problem
/// is while the rest keeps its normal colors.
pub fn highlight(nodes: &[DocumentNode]) -> Vec<HighlightSpan> {
    let mut h = Highlighter {
        spans: Vec::new(),
        at_line_start: true,
    };
    for node in nodes {
        h.node(node);
    }
    h.spans
}

/// Joins span texts.
pub fn spans_to_text(spans: &[HighlightSpan]) -> String {
    spans.iter().map(|s| s.text.as_str()).collect()
}

struct Highlighter {
    spans: Vec<HighlightSpan>,
    at_line_start: bool,
}

impl Highlighter {
    fn push(&mut self, class: HighlightClass, text: impl Into<String>) {
        let text = text.into();
        if text.is_empty() {
            return;
        }
        self.at_line_start = text.ends_with('\n');
        self.spans.push(HighlightSpan { class, text });
    }

    fn newline(&mut self) {
        if !self.at_line_start {
            self.push(HighlightClass::Text, "\n");
        }
    }

    fn keyword_line(&mut self, class: HighlightClass, name: &str, argument: &str) {
        self.newline();
        self.push(class, format!("@{name}"));
        if !argument.is_empty() {
            self.push(HighlightClass::Text, " ");
            self.push(HighlightClass::Argument, argument);
        }
        self.push(HighlightClass::Text, "\n");
    }

    fn node(&mut self, node: &DocumentNode) {
        let invalid = !node.diagnostics.is_empty();
        let class_or_invalid = |class| {
            if invalid {
                HighlightClass::Invalid
            } else {
                class
            }
        };

        match node.kind {
            NodeKind::Declaration(_) => {
                self.keyword_line(class_or_invalid(HighlightClass::Keyword), node.name(), &node.argument);
                self.children(node);
            }
            NodeKind::Section(_) => {
                self.keyword_line(class_or_invalid(HighlightClass::Delimiter), node.name(), &node.argument);
                self.children(node);
            }
            NodeKind::Item(_) => {
                self.keyword_line(class_or_invalid(HighlightClass::Item), node.name(), &node.argument);
                self.children(node);
            }
            NodeKind::Block(family) => {
                let class = class_or_invalid(HighlightClass::Block);
                self.keyword_line(class, node.name(), &node.argument);
                self.children(node);
                if let Some(closer) = closing_family(node, family) {
                    self.keyword_line(class, &format!("end{closer}"), "");
                }
            }
            NodeKind::Inline(kind) => self.push(
                HighlightClass::for_markup(kind),
                format!("{}{}{}", kind.opener(), node.argument, MarkupKind::CLOSE),
            ),
            NodeKind::TextRun => self.push(HighlightClass::Text, node.argument.as_str()),
            NodeKind::ParagraphBreak => {
                self.newline();
                self.push(HighlightClass::Text, "\n");
            }
        }
    }

    fn children(&mut self, node: &DocumentNode) {
        for child in &node.children {
            self.node(child);
        }
    }
}

/// The family spelled by the keyword that closed a block, if one did.
fn closing_family(node: &DocumentNode, family: BlockFamily) -> Option<BlockFamily> {
    let mut closer = Some(family);
    for d in &node.diagnostics {
        match d.kind {
            DiagnosticKind::UnterminatedBlock { .. } => return None,
            DiagnosticKind::UnbalancedBlock { found, .. } => closer = Some(found),
            _ => {}
        }
    }
    closer
}
