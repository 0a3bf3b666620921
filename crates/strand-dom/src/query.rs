//! Element queries
//!
//! Simple-selector matching over the tree, with the querier's context
//! resolution: string contexts are themselves resolved against the
//! document, and anything that fails to resolve to an element falls back
//! to the document root.

use crate::content::{is_element_like, is_non_blank_string};
use crate::node::ElementData;
use crate::{Document, DomTree, NodeId};

/// Simple selector for matching
#[derive(Debug, Clone)]
pub enum SimpleSelector {
    Tag(String),
    Class(String),
    Id(String),
    Universal,
}

impl SimpleSelector {
    /// Parse a simple selector string
    pub fn parse(selector: &str) -> Option<Self> {
        let selector = selector.trim();
        if selector.is_empty() {
            return None;
        }

        if selector == "*" {
            Some(Self::Universal)
        } else if let Some(id) = selector.strip_prefix('#') {
            Some(Self::Id(id.to_string()))
        } else if let Some(class) = selector.strip_prefix('.') {
            Some(Self::Class(class.to_string()))
        } else {
            Some(Self::Tag(selector.to_lowercase()))
        }
    }

    /// Check whether an element matches this selector
    pub fn matches(&self, data: &ElementData) -> bool {
        match self {
            Self::Universal => true,
            Self::Tag(tag) => data.tag_name.eq_ignore_ascii_case(tag),
            Self::Id(id) => data.get_attr("id") == Some(id),
            Self::Class(class) => data
                .get_attr("class")
                .is_some_and(|attr| attr.split_whitespace().any(|token| token == class)),
        }
    }
}

/// Query scope
#[derive(Debug, Clone, Copy)]
pub enum Context<'a> {
    /// Resolve this selector against the document first and scope to the
    /// match
    Selector(&'a str),
    /// Scope to this node
    Node(NodeId),
}

fn resolve_context(doc: &Document, context: Option<Context<'_>>) -> NodeId {
    let resolved = match context {
        Some(Context::Selector(selector)) if is_non_blank_string(selector) => {
            query_single(doc, selector, None)
        }
        Some(Context::Node(id)) => Some(id),
        _ => None,
    };

    match resolved {
        Some(id) if is_element_like(doc.tree(), id) => id,
        _ => doc.tree().root(),
    }
}

fn matched_descendants(
    tree: &DomTree,
    scope: NodeId,
    selector: &SimpleSelector,
    first_only: bool,
) -> Vec<NodeId> {
    let mut out = Vec::new();
    let mut stack: Vec<NodeId> = tree.children(scope).collect();
    stack.reverse();

    while let Some(id) = stack.pop() {
        if let Some(data) = tree.get(id).and_then(|node| node.as_element()) {
            if selector.matches(data) {
                out.push(id);
                if first_only {
                    return out;
                }
            }
        }
        let mut children: Vec<NodeId> = tree.children(id).collect();
        children.reverse();
        stack.extend(children);
    }

    out
}

/// Find the first descendant of the context matching a selector, in
/// document order.
///
/// A blank selector matches nothing.
pub fn query_single(doc: &Document, selector: &str, context: Option<Context<'_>>) -> Option<NodeId> {
    if !is_non_blank_string(selector) {
        return None;
    }
    let selector = SimpleSelector::parse(selector)?;
    let scope = resolve_context(doc, context);
    matched_descendants(doc.tree(), scope, &selector, true)
        .first()
        .copied()
}

/// Find every descendant of the context matching a selector, in document
/// order.
///
/// A blank selector yields an empty result.
pub fn query_all(doc: &Document, selector: &str, context: Option<Context<'_>>) -> Vec<NodeId> {
    if !is_non_blank_string(selector) {
        return Vec::new();
    }
    let Some(selector) = SimpleSelector::parse(selector) else {
        return Vec::new();
    };
    let scope = resolve_context(doc, context);
    matched_descendants(doc.tree(), scope, &selector, false)
}
