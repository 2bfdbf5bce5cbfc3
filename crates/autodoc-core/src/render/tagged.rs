//! Generic tagged tree for documentation generators.
//!
//! Every node becomes `{tag, attributes, text, children}`. Keyword arguments
//! move into a named attribute so generators can address them without
//! knowing the keyword vocabulary.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::tokens::{DelimiterKeyword, MetaKeyword};
use crate::tree::{DocumentNode, NodeKind};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaggedNode {
    pub tag: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
    /// Literal content of text and inline markup nodes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TaggedNode>,
}

pub fn tagged(nodes: &[DocumentNode]) -> Vec<TaggedNode> {
    nodes.iter().map(tag_node).collect()
}

fn tag_node(node: &DocumentNode) -> TaggedNode {
    let mut attributes = BTreeMap::new();
    if !node.kind.is_leaf() && !node.argument.is_empty() {
        attributes.insert(
            argument_attribute(node.kind).to_string(),
            node.argument.clone(),
        );
    }
    if !node.diagnostics.is_empty() {
        let messages: Vec<&str> = node.diagnostics.iter().map(|d| d.message.as_str()).collect();
        attributes.insert("diagnostics".to_string(), messages.join("; "));
    }

    TaggedNode {
        tag: node.name().to_string(),
        attributes,
        text: node.content().map(str::to_string),
        children: tagged(&node.children),
    }
}

fn argument_attribute(kind: NodeKind) -> &'static str {
    match kind {
        NodeKind::Declaration(MetaKeyword::Decl) => "signature",
        NodeKind::Declaration(_) => "name",
        NodeKind::Section(DelimiterKeyword::Param) => "name",
        NodeKind::Item(_) => "name",
        _ => "argument",
    }
}
