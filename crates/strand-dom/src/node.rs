//! DOM Node
//!
//! Node link layout follows the usual arena shape: parent plus
//! first/last child and prev/next sibling handles, with node-specific
//! payload in an enum.

use crate::geometry::ElementGeometry;
use crate::NodeId;
use std::collections::HashMap;

/// DOM node: tree links plus payload
#[derive(Debug)]
pub struct Node {
    /// Parent node (`NONE` if detached or root)
    pub parent: NodeId,
    /// First child
    pub first_child: NodeId,
    /// Last child (for O(1) append)
    pub last_child: NodeId,
    /// Previous sibling
    pub prev_sibling: NodeId,
    /// Next sibling
    pub next_sibling: NodeId,
    /// Node-specific data
    pub data: NodeData,
}

impl Node {
    /// Create a new element node
    pub fn element(tag_name: &str) -> Self {
        Self {
            parent: NodeId::NONE,
            first_child: NodeId::NONE,
            last_child: NodeId::NONE,
            prev_sibling: NodeId::NONE,
            next_sibling: NodeId::NONE,
            data: NodeData::Element(ElementData::new(tag_name)),
        }
    }

    /// Create a new text node
    pub fn text(content: String) -> Self {
        Self {
            parent: NodeId::NONE,
            first_child: NodeId::NONE,
            last_child: NodeId::NONE,
            prev_sibling: NodeId::NONE,
            next_sibling: NodeId::NONE,
            data: NodeData::Text(TextData { content }),
        }
    }

    /// Create a document node
    pub fn document() -> Self {
        Self {
            parent: NodeId::NONE,
            first_child: NodeId::NONE,
            last_child: NodeId::NONE,
            prev_sibling: NodeId::NONE,
            next_sibling: NodeId::NONE,
            data: NodeData::Document,
        }
    }

    /// Check if this is an element
    #[inline]
    pub fn is_element(&self) -> bool {
        matches!(self.data, NodeData::Element(_))
    }

    /// Check if this is a text node
    #[inline]
    pub fn is_text(&self) -> bool {
        matches!(self.data, NodeData::Text(_))
    }

    /// Get element data if this is an element
    #[inline]
    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(el) => Some(el),
            _ => None,
        }
    }

    /// Get mutable element data
    #[inline]
    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.data {
            NodeData::Element(el) => Some(el),
            _ => None,
        }
    }

    /// Get text content if this is a text node
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match &self.data {
            NodeData::Text(text) => Some(&text.content),
            _ => None,
        }
    }
}

/// Node-specific data
#[derive(Debug)]
pub enum NodeData {
    /// Document root
    Document,
    /// Element
    Element(ElementData),
    /// Text content
    Text(TextData),
}

/// Element-specific data
#[derive(Debug)]
pub struct ElementData {
    /// Tag name (lowercase)
    pub tag_name: String,
    /// Attributes, in set order
    pub attrs: Vec<Attribute>,
    /// Element properties, in assignment order. Distinct from attributes:
    /// properties are the builder's direct-assignment channel and carry
    /// typed values.
    pub props: Vec<(String, PropValue)>,
    /// Computed style as resolved by the host layout pass
    pub computed_style: HashMap<String, String>,
    /// Layout state, absent until a layout pass supplies it
    pub geometry: Option<ElementGeometry>,
}

impl ElementData {
    pub fn new(tag_name: &str) -> Self {
        Self {
            tag_name: tag_name.to_ascii_lowercase(),
            attrs: Vec::new(),
            props: Vec::new(),
            computed_style: HashMap::new(),
            geometry: None,
        }
    }

    /// Get an attribute value
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| attr.value.as_str())
    }

    /// Set an attribute, replacing any existing value in place
    pub fn set_attr(&mut self, name: &str, value: &str) {
        for attr in &mut self.attrs {
            if attr.name == name {
                attr.value = value.to_string();
                return;
            }
        }
        self.attrs.push(Attribute {
            name: name.to_string(),
            value: value.to_string(),
        });
    }

    /// Remove an attribute if present
    pub fn remove_attr(&mut self, name: &str) {
        self.attrs.retain(|attr| attr.name != name);
    }

    /// Get a property value
    pub fn get_prop(&self, name: &str) -> Option<&PropValue> {
        self.props
            .iter()
            .find(|(prop, _)| prop == name)
            .map(|(_, value)| value)
    }

    /// Assign a property, replacing any existing value in place
    pub fn set_prop(&mut self, name: &str, value: PropValue) {
        for (prop, slot) in &mut self.props {
            if prop == name {
                *slot = value;
                return;
            }
        }
        self.props.push((name.to_string(), value));
    }
}

/// Text node data
#[derive(Debug)]
pub struct TextData {
    pub content: String,
}

/// Attribute
#[derive(Debug, Clone)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

/// Primitive property value, as accepted by the element builder's
/// property bag
#[derive(Debug, Clone, PartialEq)]
pub enum PropValue {
    Str(String),
    Num(f64),
    Bool(bool),
    Null,
}

impl PropValue {
    /// Stringify the way the deprecated attribute channel does
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

impl From<&str> for PropValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for PropValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<f64> for PropValue {
    fn from(value: f64) -> Self {
        Self::Num(value)
    }
}

impl From<bool> for PropValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attr_upsert_keeps_position() {
        let mut el = ElementData::new("DIV");
        el.set_attr("id", "a");
        el.set_attr("class", "x");
        el.set_attr("id", "b");

        assert_eq!(el.tag_name, "div");
        assert_eq!(el.attrs.len(), 2);
        assert_eq!(el.attrs[0].name, "id");
        assert_eq!(el.get_attr("id"), Some("b"));
    }

    #[test]
    fn test_prop_assignment_order() {
        let mut el = ElementData::new("video");
        el.set_prop("muted", PropValue::Bool(true));
        el.set_prop("volume", PropValue::Num(0.5));
        el.set_prop("muted", PropValue::Bool(false));

        assert_eq!(el.props.len(), 2);
        assert_eq!(el.props[0].0, "muted");
        assert_eq!(el.get_prop("muted"), Some(&PropValue::Bool(false)));
    }

    #[test]
    fn test_prop_value_stringify() {
        assert_eq!(PropValue::from("hi").to_attr_string(), "hi");
        assert_eq!(PropValue::Num(2.0).to_attr_string(), "2");
        assert_eq!(PropValue::Num(0.25).to_attr_string(), "0.25");
        assert_eq!(PropValue::Bool(true).to_attr_string(), "true");
        assert_eq!(PropValue::Null.to_attr_string(), "null");
    }
}
