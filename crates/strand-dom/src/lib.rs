//! Strand DOM - DOM convenience layer
//!
//! Element creation, class/attribute manipulation, content normalization
//! and insertion, geometry queries, and light environment detection over
//! an arena-allocated DOM tree.
//!
//! Content passed to the builder/inserter APIs is normalized into plain
//! nodes before anything touches the tree; raw strings always become text
//! nodes, never markup.

mod attributes;
mod builder;
mod classes;
mod content;
mod document;
mod events;
mod geometry;
mod node;
mod query;
mod tree;

pub use attributes::{
    get_attribute, get_attributes, remove_attribute, set_attribute, set_attributes, AttrValue,
};
pub use builder::{create_el, set_text};
pub use classes::{add_class, has_class, remove_class, toggle_class, ClassToggle};
pub use content::{
    append_content, empty_element, insert_content, is_element_like, is_non_blank_string,
    is_text_node_like, normalize_content, prepend_to, Content,
};
pub use document::{Document, FrameStatus, SelectionBlock, UserAgent};
pub use events::{is_single_left_click, PointerEvent, TouchPoint};
pub use geometry::{
    find_position, get_bounding_client_rect, get_pointer_position, Coordinates, ElementGeometry,
    Position, RawRect, Rect,
};
pub use node::{Attribute, ElementData, Node, NodeData, PropValue, TextData};
pub use query::{query_all, query_single, Context, SimpleSelector};
pub use tree::{Children, DomTree};

/// Node identifier (index into the tree arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check this is not the `NONE` sentinel
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }
}

/// Result type for fallible DOM operations
pub type DomResult<T> = Result<T, DomError>;

/// DOM operation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    /// Class names must be single tokens; the class-set API rejects
    /// whitespace and the string fallback matches it for consistency.
    #[error("class has illegal whitespace characters")]
    InvalidArgument,
}
