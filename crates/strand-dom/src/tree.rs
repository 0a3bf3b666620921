//! DOM Tree (arena-based allocation)

use crate::geometry::ElementGeometry;
use crate::node::{Node, PropValue};
use crate::NodeId;

/// Arena-based DOM tree
///
/// Slot 0 is always the document node. Structural operations on stale or
/// foreign ids are silent no-ops: the content pipeline drops anything
/// unrenderable rather than failing part-way through a mutation.
#[derive(Debug)]
pub struct DomTree {
    nodes: Vec<Node>,
    class_list_supported: bool,
}

impl DomTree {
    /// Create a new tree holding only the document node
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::document()],
            class_list_supported: true,
        }
    }

    /// The document node
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Get a node by id
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        if id.is_valid() {
            self.nodes.get(id.0 as usize)
        } else {
            None
        }
    }

    /// Get a mutable node by id
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        if id.is_valid() {
            self.nodes.get_mut(id.0 as usize)
        } else {
            None
        }
    }

    /// Number of nodes in the tree
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree holds only the document node
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Whether the native class-set fast path is available.
    ///
    /// Defaults to true; embedders modelling engines without it can turn
    /// it off, which routes the class helpers through the string-scan
    /// fallback.
    pub fn class_list_supported(&self) -> bool {
        self.class_list_supported
    }

    /// Toggle the class-set capability
    pub fn set_class_list_supported(&mut self, supported: bool) {
        self.class_list_supported = supported;
    }

    /// Create a detached element node
    pub fn create_element(&mut self, tag_name: &str) -> NodeId {
        self.push(Node::element(tag_name))
    }

    /// Create a detached text node
    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.push(Node::text(content.to_string()))
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Parent of a node, if attached
    pub fn parent(&self, id: NodeId) -> NodeId {
        self.get(id).map_or(NodeId::NONE, |node| node.parent)
    }

    /// First child of a node
    pub fn first_child(&self, id: NodeId) -> NodeId {
        self.get(id).map_or(NodeId::NONE, |node| node.first_child)
    }

    /// Iterate over the children of a node, in document order
    pub fn children(&self, id: NodeId) -> Children<'_> {
        Children {
            tree: self,
            next: self.first_child(id),
        }
    }

    /// Append `child` as the last child of `parent`
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if self.get(parent).is_none() || self.get(child).is_none() || parent == child {
            tracing::debug!("append_child skipped for invalid ids");
            return;
        }
        self.detach(child);

        let last = self.nodes[parent.0 as usize].last_child;
        if last.is_valid() {
            self.nodes[last.0 as usize].next_sibling = child;
            self.nodes[child.0 as usize].prev_sibling = last;
        } else {
            self.nodes[parent.0 as usize].first_child = child;
        }
        self.nodes[parent.0 as usize].last_child = child;
        self.nodes[child.0 as usize].parent = parent;
    }

    /// Insert `child` into `parent` immediately before `reference`.
    /// An invalid reference appends instead.
    pub fn insert_before(&mut self, parent: NodeId, child: NodeId, reference: NodeId) {
        if self.get(parent).is_none() || self.get(child).is_none() || parent == child {
            tracing::debug!("insert_before skipped for invalid ids");
            return;
        }
        if self.get(reference).is_none() || self.nodes[reference.0 as usize].parent != parent {
            self.append_child(parent, child);
            return;
        }
        if child == reference {
            return;
        }
        self.detach(child);

        let prev = self.nodes[reference.0 as usize].prev_sibling;
        self.nodes[child.0 as usize].prev_sibling = prev;
        self.nodes[child.0 as usize].next_sibling = reference;
        self.nodes[reference.0 as usize].prev_sibling = child;
        if prev.is_valid() {
            self.nodes[prev.0 as usize].next_sibling = child;
        } else {
            self.nodes[parent.0 as usize].first_child = child;
        }
        self.nodes[child.0 as usize].parent = parent;
    }

    /// Remove `child` from `parent`; a no-op if `child` is not a child of
    /// `parent`
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) {
        if self.get(child).map(|node| node.parent) == Some(parent) {
            self.detach(child);
        }
    }

    /// Unlink a node from its parent and siblings
    pub fn detach(&mut self, id: NodeId) {
        let Some(node) = self.get(id) else {
            return;
        };
        let (parent, prev, next) = (node.parent, node.prev_sibling, node.next_sibling);

        if prev.is_valid() {
            self.nodes[prev.0 as usize].next_sibling = next;
        } else if parent.is_valid() {
            self.nodes[parent.0 as usize].first_child = next;
        }
        if next.is_valid() {
            self.nodes[next.0 as usize].prev_sibling = prev;
        } else if parent.is_valid() {
            self.nodes[parent.0 as usize].last_child = prev;
        }

        let node = &mut self.nodes[id.0 as usize];
        node.parent = NodeId::NONE;
        node.prev_sibling = NodeId::NONE;
        node.next_sibling = NodeId::NONE;
    }

    /// Assign a property on an element; no-op for non-elements
    pub fn set_prop(&mut self, id: NodeId, name: &str, value: PropValue) {
        if let Some(el) = self.get_mut(id).and_then(|node| node.as_element_mut()) {
            el.set_prop(name, value);
        }
    }

    /// Supply layout state for an element
    pub fn set_geometry(&mut self, id: NodeId, geometry: ElementGeometry) {
        if let Some(el) = self.get_mut(id).and_then(|node| node.as_element_mut()) {
            el.geometry = Some(geometry);
        }
    }

    /// Supply a computed-style entry for an element
    pub fn set_computed_style(&mut self, id: NodeId, property: &str, value: &str) {
        if let Some(el) = self.get_mut(id).and_then(|node| node.as_element_mut()) {
            el.computed_style
                .insert(property.to_string(), value.to_string());
        }
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over the children of a node
pub struct Children<'a> {
    tree: &'a DomTree,
    next: NodeId,
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.next.is_valid() {
            return None;
        }
        let current = self.next;
        self.next = self.tree.get(current).map_or(NodeId::NONE, |node| node.next_sibling);
        Some(current)
    }
}
