//! The document tree.
//!
//! Every node records which keyword created it through its [`NodeKind`].
//! Leaf content (prose, inline markup) lives in [`DocumentNode::argument`];
//! for container nodes the argument is the rest of the keyword line.

use serde::Serialize;

use crate::diagnostic::Diagnostic;
use crate::tokens::{BlockFamily, DelimiterKeyword, ItemKeyword, MarkupKind, MetaKeyword};

/// The kind of a document node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "keyword", rename_all = "snake_case")]
pub enum NodeKind {
    /// A top-level `@decl`, `@class`, `@module` ... declaration.
    Declaration(MetaKeyword),
    /// A body section such as `@param` or `@returns`.
    Section(DelimiterKeyword),
    /// A `@dl`, `@mapping` or `@array` container.
    Block(BlockFamily),
    /// A child of a block: `@item`, `@member`, `@index`.
    Item(ItemKeyword),
    /// Short inline markup; the argument is its raw content.
    Inline(MarkupKind),
    /// Literal prose; the argument is the text.
    TextRun,
    /// A blank line between paragraphs.
    ParagraphBreak,
}

impl NodeKind {
    /// The tag spelling of this kind, `"text"` and `"br"` for the two
    /// keyword-less kinds.
    pub fn name(self) -> &'static str {
        match self {
            NodeKind::Declaration(k) => k.as_str(),
            NodeKind::Section(k) => k.as_str(),
            NodeKind::Block(f) => f.as_str(),
            NodeKind::Item(k) => k.as_str(),
            NodeKind::Inline(k) => k.as_str(),
            NodeKind::TextRun => "text",
            NodeKind::ParagraphBreak => "br",
        }
    }

    /// Whether nodes of this kind hold literal content instead of children.
    pub fn is_leaf(self) -> bool {
        matches!(
            self,
            NodeKind::Inline(_) | NodeKind::TextRun | NodeKind::ParagraphBreak
        )
    }
}

/// A node of the document tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentNode {
    pub kind: NodeKind,
    /// Keyword argument for containers, literal content for leaves.
    pub argument: String,
    /// Source line the node starts on.
    pub line: usize,
    pub children: Vec<DocumentNode>,
    pub diagnostics: Vec<Diagnostic>,
}

impl DocumentNode {
    pub fn new(kind: NodeKind, argument: impl Into<String>, line: usize) -> Self {
        Self {
            kind,
            argument: argument.into(),
            line,
            children: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    pub fn text(content: impl Into<String>, line: usize) -> Self {
        Self::new(NodeKind::TextRun, content, line)
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// Literal content of a `TextRun` or `Inline` leaf.
    pub fn content(&self) -> Option<&str> {
        match self.kind {
            NodeKind::TextRun | NodeKind::Inline(_) => Some(&self.argument),
            _ => None,
        }
    }

    /// Visits this node and all descendants in pre-order.
    pub fn walk<'a>(&'a self, f: &mut impl FnMut(&'a DocumentNode)) {
        f(self);
        for child in &self.children {
            child.walk(f);
        }
    }

    /// Concatenated content of all leaves below this node, in order.
    pub fn leaf_text(&self) -> String {
        let mut out = String::new();
        self.walk(&mut |n| {
            if let Some(c) = n.content() {
                out.push_str(c);
            }
        });
        out
    }
}
