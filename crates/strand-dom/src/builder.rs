//! Element builder
//!
//! Constructs elements from a property bag, an attribute bag, and
//! normalized content.

use crate::attributes::AttrValue;
use crate::content::{append_content, empty_element, Content};
use crate::node::PropValue;
use crate::{DomTree, NodeId};

/// Create an element with the given properties, attributes, and content.
///
/// `tag_name` defaults to `div`. Properties are applied first, in bag
/// order, then attributes unconditionally, then the content is
/// normalized and appended. The ordering is observable when a property
/// and an attribute target the same name through the deprecated channel.
///
/// Accepting `role`, `type`, and `aria-*` names in the property bag is a
/// deprecated back-compat channel: they are redirected to attributes
/// with a warning. Use the attribute bag for them.
pub fn create_el(
    tree: &mut DomTree,
    tag_name: Option<&str>,
    properties: &[(&str, PropValue)],
    attributes: &[(&str, AttrValue)],
    content: Option<Content>,
) -> NodeId {
    let el = tree.create_element(tag_name.unwrap_or("div"));

    for (name, value) in properties {
        // A substring test, not a prefix test: any name containing
        // "aria-" takes the deprecated channel.
        if name.contains("aria-") || *name == "role" || *name == "type" {
            tracing::warn!(
                property = %name,
                value = %value.to_attr_string(),
                "Setting attributes in the second argument of create_el() has been \
                 deprecated. Use the third argument instead: \
                 create_el(tag, properties, attributes, content)."
            );
            if let Some(data) = tree.get_mut(el).and_then(|node| node.as_element_mut()) {
                data.set_attr(name, &value.to_attr_string());
            }
        } else if *name == "textContent" {
            set_text(tree, el, &value.to_attr_string());
        } else {
            tree.set_prop(el, name, value.clone());
        }
    }

    for (name, value) in attributes {
        // No filtering here, unlike set_attributes().
        if let Some(data) = tree.get_mut(el).and_then(|node| node.as_element_mut()) {
            data.set_attr(name, &value.to_attr_string());
        }
    }

    if let Some(content) = content {
        append_content(tree, el, content);
    }

    el
}

/// Replace an element's content with a single text node.
///
/// Empty text leaves the element childless.
pub fn set_text(tree: &mut DomTree, el: NodeId, text: &str) -> NodeId {
    empty_element(tree, el);
    if !text.is_empty() {
        let node = tree.create_text(text);
        tree.append_child(el, node);
    }
    el
}
