//! Indented outline of a tree, one node per line.
//!
//! ```text
//! decl "int f(int x)"
//!   param "x"
//!     text "The value."
//! ```

use std::fmt::Write;

use crate::tree::{DocumentNode, NodeKind};

pub fn dump(nodes: &[DocumentNode]) -> String {
    let mut out = String::new();
    for node in nodes {
        dump_node(&mut out, node, 0);
    }
    out
}

fn dump_node(out: &mut String, node: &DocumentNode, depth: usize) {
    let indent = "  ".repeat(depth);
    match node.kind {
        NodeKind::ParagraphBreak => {
            let _ = writeln!(out, "{indent}br");
        }
        NodeKind::Inline(_) | NodeKind::TextRun => {
            let _ = writeln!(out, "{indent}{} {:?}", node.name(), node.argument);
        }
        _ if node.argument.is_empty() => {
            let _ = writeln!(out, "{indent}{}", node.name());
        }
        _ => {
            let _ = writeln!(out, "{indent}{} {:?}", node.name(), node.argument);
        }
    }
    for diagnostic in &node.diagnostics {
        let _ = writeln!(out, "{indent}  ! {}", diagnostic.message);
    }
    for child in &node.children {
        dump_node(out, child, depth + 1);
    }
}
