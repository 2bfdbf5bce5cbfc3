use crate::diagnostic::{Diagnostic, DiagnosticKind, Location};
use crate::tokens::{BlockFamily, MetaKeyword};
use crate::tree::{DocumentNode, NodeKind};

#[derive(Debug)]
enum Container {
    /// The implicit top level; holds finished top-level nodes.
    Document(Vec<DocumentNode>),
    /// A declaration or block still accepting children.
    Node(DocumentNode),
}

/// One level of the open-container stack.
///
/// `open` is the most recently opened section (declaration and top-level
/// frames) or item (block frames) at this depth. It is the active text
/// target until a sibling replaces it or the frame closes.
#[derive(Debug)]
pub struct Frame {
    container: Container,
    open: Option<DocumentNode>,
}

impl Frame {
    fn document() -> Self {
        Self {
            container: Container::Document(Vec::new()),
            open: None,
        }
    }

    pub fn node(node: DocumentNode) -> Self {
        Self {
            container: Container::Node(node),
            open: None,
        }
    }

    /// The family of this frame if it is a block.
    pub fn block_family(&self) -> Option<BlockFamily> {
        match &self.container {
            Container::Node(DocumentNode {
                kind: NodeKind::Block(family),
                ..
            }) => Some(*family),
            _ => None,
        }
    }

    pub fn push_child(&mut self, node: DocumentNode) {
        match &mut self.container {
            Container::Document(nodes) => nodes.push(node),
            Container::Node(parent) => parent.children.push(node),
        }
    }

    /// Closes the open section or item, making it a finished child.
    pub fn close_open(&mut self) {
        if let Some(open) = self.open.take() {
            self.push_child(open);
        }
    }

    /// Replaces the open section or item with `node`.
    pub fn set_open(&mut self, node: DocumentNode) {
        self.close_open();
        self.open = Some(node);
    }

    /// Where body content goes: the open section/item, else the container.
    pub fn text_target(&mut self) -> &mut Vec<DocumentNode> {
        if let Some(open) = self.open.as_mut() {
            return &mut open.children;
        }
        match &mut self.container {
            Container::Document(nodes) => nodes,
            Container::Node(node) => &mut node.children,
        }
    }

    /// The innermost node diagnostics should be attached to, if any.
    pub fn diagnostic_target(&mut self) -> Option<&mut DocumentNode> {
        if let Some(open) = self.open.as_mut() {
            return Some(open);
        }
        match &mut self.container {
            Container::Document(_) => None,
            Container::Node(node) => Some(node),
        }
    }

    /// Closes the frame and returns its container node.
    fn into_node(mut self) -> Option<DocumentNode> {
        self.close_open();
        match self.container {
            Container::Document(_) => None,
            Container::Node(node) => Some(node),
        }
    }
}

/// A `@class`/`@module` scope waiting for its end keyword.
#[derive(Debug, Clone, Copy)]
pub struct OpenScope {
    pub keyword: MetaKeyword,
    /// Index of the opening declaration among top-level nodes.
    pub index: usize,
    pub location: Location,
}

/// Working state of one assembly call.
///
/// The bottom frame is always the implicit top level, so the stack is never
/// empty.
#[derive(Debug)]
pub struct ParseContext {
    stack: Vec<Frame>,
    pub scopes: Vec<OpenScope>,
    diagnostics: Vec<Diagnostic>,
    /// Comment run currently being assembled.
    pub run: usize,
}

impl ParseContext {
    pub fn new() -> Self {
        Self {
            stack: vec![Frame::document()],
            scopes: Vec::new(),
            diagnostics: Vec::new(),
            run: 0,
        }
    }

    pub fn depth(&self) -> usize {
        self.stack.len() - 1
    }

    pub fn top_mut(&mut self) -> &mut Frame {
        let last = self.stack.len() - 1;
        &mut self.stack[last]
    }

    pub fn push_frame(&mut self, node: DocumentNode) {
        self.stack.push(Frame::node(node));
    }

    /// Pops the innermost frame without attaching it anywhere.
    ///
    /// The top-level frame is never popped.
    pub fn pop_frame(&mut self) -> Option<DocumentNode> {
        if self.stack.len() <= 1 {
            return None;
        }
        self.stack.pop().and_then(Frame::into_node)
    }

    /// Attaches a finished node to the container of the innermost frame.
    pub fn attach(&mut self, node: DocumentNode) {
        self.top_mut().push_child(node);
    }

    /// Number of finished top-level nodes.
    pub fn top_level_len(&self) -> usize {
        match &self.stack[0].container {
            Container::Document(nodes) => nodes.len(),
            Container::Node(_) => 0,
        }
    }

    pub fn top_level_mut(&mut self) -> &mut Vec<DocumentNode> {
        match &mut self.stack[0].container {
            Container::Document(nodes) => nodes,
            Container::Node(node) => &mut node.children,
        }
    }

    /// Records a diagnostic in the flat list and returns a copy to attach.
    pub fn record(&mut self, kind: DiagnosticKind, location: Location) -> Diagnostic {
        let diagnostic = Diagnostic::new(kind, location);
        log::debug!("line {}: {}", location.line, diagnostic.message);
        self.diagnostics.push(diagnostic.clone());
        diagnostic
    }

    /// Records a diagnostic and attaches it to the innermost node.
    pub fn report(&mut self, kind: DiagnosticKind, location: Location) {
        let diagnostic = self.record(kind, location);
        if let Some(node) = self.top_mut().diagnostic_target() {
            node.diagnostics.push(diagnostic);
        }
    }

    /// Closes every frame above the top level, and the top-level section.
    ///
    /// Blocks closed this way are reported as unterminated.
    pub fn close_to_top_level(&mut self) {
        while let Some(mut node) = self.pop_frame() {
            if let NodeKind::Block(family) = node.kind {
                let location = Location::new(self.run, node.line);
                let diagnostic =
                    self.record(DiagnosticKind::UnterminatedBlock { family }, location);
                node.diagnostics.push(diagnostic);
            }
            self.attach(node);
        }
        self.top_mut().close_open();
    }

    /// Finishes the call: reports scopes left open and returns the results
    /// with diagnostics in source order.
    pub fn finish(mut self) -> (Vec<DocumentNode>, Vec<Diagnostic>) {
        self.close_to_top_level();

        for scope in std::mem::take(&mut self.scopes) {
            let diagnostic = self.record(
                DiagnosticKind::UnterminatedScope {
                    keyword: scope.keyword,
                },
                scope.location,
            );
            if let Some(node) = self.top_level_mut().get_mut(scope.index) {
                node.diagnostics.push(diagnostic);
            }
        }

        let mut diagnostics = std::mem::take(&mut self.diagnostics);
        diagnostics.sort_by_key(|d| d.location);

        let nodes = match self.stack.swap_remove(0).container {
            Container::Document(nodes) => nodes,
            Container::Node(node) => vec![node],
        };
        (nodes, diagnostics)
    }
}

impl Default for ParseContext {
    fn default() -> Self {
        Self::new()
    }
}
