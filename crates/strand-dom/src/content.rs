//! Content normalization and insertion
//!
//! Reconciles the accepted content shapes (text, node, producer, list)
//! into an ordered sequence of renderable nodes before anything touches
//! the tree. Raw strings always become text nodes, never markup, which
//! makes this pipeline the injection-safety boundary.

use crate::node::Node;
use crate::{DomTree, NodeId};
use std::fmt;

/// Insertable content
///
/// Producers are invoked at most once per occurrence: the top-level
/// value gets one unwrap, and each list entry gets one unwrap. Anything
/// still wrapped after that (a producer returning a producer at entry
/// level, a list nested inside an entry) is unrenderable and dropped.
pub enum Content {
    /// Normalized into a text node when non-blank
    Text(String),
    /// An element or text node, passed through; anything else is dropped
    Node(NodeId),
    /// Invoked once to produce content
    Producer(Box<dyn FnOnce() -> Content>),
    /// One-dimensional sequence of the other shapes
    List(Vec<Content>),
}

impl Content {
    /// Wrap a deferred content producer
    pub fn produce<F>(producer: F) -> Self
    where
        F: FnOnce() -> Content + 'static,
    {
        Self::Producer(Box::new(producer))
    }
}

impl fmt::Debug for Content {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Self::Node(id) => f.debug_tuple("Node").field(id).finish(),
            Self::Producer(_) => f.write_str("Producer(..)"),
            Self::List(entries) => f.debug_tuple("List").field(entries).finish(),
        }
    }
}

impl From<&str> for Content {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Content {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<NodeId> for Content {
    fn from(value: NodeId) -> Self {
        Self::Node(value)
    }
}

impl From<Vec<Content>> for Content {
    fn from(value: Vec<Content>) -> Self {
        Self::List(value)
    }
}

/// Check a string has at least one non-whitespace character
pub fn is_non_blank_string(value: &str) -> bool {
    value.chars().any(|ch| !ch.is_whitespace())
}

/// Check an id refers to an element in this tree.
///
/// Classification is by data discriminant, never by provenance, so nodes
/// created by another document's tree walker still classify correctly
/// once adopted.
pub fn is_element_like(tree: &DomTree, id: NodeId) -> bool {
    tree.get(id).is_some_and(Node::is_element)
}

/// Check an id refers to a text node in this tree
pub fn is_text_node_like(tree: &DomTree, id: NodeId) -> bool {
    tree.get(id).is_some_and(Node::is_text)
}

/// Normalize content into an ordered sequence of renderable nodes.
///
/// The top-level value is unwrapped once if it is a producer, coerced to
/// a list, and then each entry is unwrapped once and classified. Blank
/// text, nested lists, stale ids, and document nodes all vanish rather
/// than erroring; surviving entries keep their relative order.
///
/// The only tree mutation is the creation of text nodes for non-blank
/// strings.
pub fn normalize_content(tree: &mut DomTree, content: Content) -> Vec<NodeId> {
    // First, invoke the content if it is a producer. If it produces a
    // list, that has to happen before coercion.
    let content = match content {
        Content::Producer(produce) => produce(),
        other => other,
    };

    let entries = match content {
        Content::List(entries) => entries,
        single => vec![single],
    };

    entries
        .into_iter()
        .filter_map(|entry| {
            let entry = match entry {
                Content::Producer(produce) => produce(),
                other => other,
            };

            match entry {
                Content::Node(id)
                    if is_element_like(tree, id) || is_text_node_like(tree, id) =>
                {
                    Some(id)
                }
                Content::Text(text) if is_non_blank_string(&text) => {
                    Some(tree.create_text(&text))
                }
                _ => None,
            }
        })
        .collect()
}

/// Normalize content and append the resulting nodes to an element, in
/// order
pub fn append_content(tree: &mut DomTree, el: NodeId, content: Content) -> NodeId {
    for node in normalize_content(tree, content) {
        tree.append_child(el, node);
    }
    el
}

/// Normalize and insert content, replacing the element's existing
/// children
pub fn insert_content(tree: &mut DomTree, el: NodeId, content: Content) -> NodeId {
    let el = empty_element(tree, el);
    append_content(tree, el, content)
}

/// Remove all children from an element.
///
/// Removal loops on `first_child` so live re-linking cannot skip nodes.
pub fn empty_element(tree: &mut DomTree, el: NodeId) -> NodeId {
    loop {
        let first = tree.first_child(el);
        if !first.is_valid() {
            break;
        }
        tree.remove_child(el, first);
    }
    el
}

/// Insert a child as the first child of a parent
pub fn prepend_to(tree: &mut DomTree, child: NodeId, parent: NodeId) {
    let first = tree.first_child(parent);
    if first.is_valid() {
        tree.insert_before(parent, child, first);
    } else {
        tree.append_child(parent, child);
    }
}
