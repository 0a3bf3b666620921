//! Element attributes
//!
//! Single get/set/remove pass-throughs plus the bulk bag operations with
//! boolean-attribute handling.

use crate::node::PropValue;
use crate::{DomTree, NodeId};
use std::collections::HashMap;

/// Known boolean attributes. Matching element properties cover newer
/// names, but this fixed list is still read for markup written against
/// engines that predate them.
const KNOWN_BOOLEANS: [&str; 7] = [
    "autoplay",
    "controls",
    "playsinline",
    "loop",
    "muted",
    "default",
    "defaultMuted",
];

/// Primitive attribute value, as accepted by the attribute bags
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Str(String),
    Num(f64),
    Bool(bool),
    /// Stands in for both null and undefined
    Null,
}

impl AttrValue {
    /// Stringify for an unconditional attribute write
    pub fn to_attr_string(&self) -> String {
        match self {
            Self::Str(value) => value.clone(),
            Self::Num(value) => {
                if value.fract() == 0.0 && value.is_finite() {
                    format!("{}", *value as i64)
                } else {
                    format!("{value}")
                }
            }
            Self::Bool(value) => value.to_string(),
            Self::Null => "null".to_string(),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        Self::Num(value)
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Apply an attribute bag to an element.
///
/// Null and `false` remove the attribute, `true` sets it to the empty
/// string, anything else is stringified. This is the filtering
/// counterpart to the unconditional writes in `create_el`.
pub fn set_attributes(tree: &mut DomTree, el: NodeId, attributes: &[(&str, AttrValue)]) {
    let Some(data) = tree.get_mut(el).and_then(|node| node.as_element_mut()) else {
        return;
    };
    for (name, value) in attributes {
        match value {
            AttrValue::Null | AttrValue::Bool(false) => data.remove_attr(name),
            AttrValue::Bool(true) => data.set_attr(name, ""),
            other => data.set_attr(name, &other.to_attr_string()),
        }
    }
}

/// Read every present attribute of an element.
///
/// Attributes in the known-boolean list, or whose same-named element
/// property holds a boolean, report presence as `true` rather than their
/// string content. `autoplay="false"` in markup is still autoplay on.
pub fn get_attributes(tree: &DomTree, el: NodeId) -> HashMap<String, AttrValue> {
    let mut out = HashMap::new();
    let Some(data) = tree.get(el).and_then(|node| node.as_element()) else {
        return out;
    };

    for attr in &data.attrs {
        let boolean = KNOWN_BOOLEANS.contains(&attr.name.as_str())
            || matches!(data.get_prop(&attr.name), Some(PropValue::Bool(_)));
        let value = if boolean {
            AttrValue::Bool(true)
        } else {
            AttrValue::Str(attr.value.clone())
        };
        out.insert(attr.name.clone(), value);
    }

    out
}

/// Get an attribute value
pub fn get_attribute<'a>(tree: &'a DomTree, el: NodeId, attribute: &str) -> Option<&'a str> {
    tree.get(el)
        .and_then(|node| node.as_element())
        .and_then(|data| data.get_attr(attribute))
}

/// Set an attribute value
pub fn set_attribute(tree: &mut DomTree, el: NodeId, attribute: &str, value: &str) {
    if let Some(data) = tree.get_mut(el).and_then(|node| node.as_element_mut()) {
        data.set_attr(attribute, value);
    }
}

/// Remove an attribute
pub fn remove_attribute(tree: &mut DomTree, el: NodeId, attribute: &str) {
    if let Some(data) = tree.get_mut(el).and_then(|node| node.as_element_mut()) {
        data.remove_attr(attribute);
    }
}
