//! Class utilities
//!
//! Each operation has a class-set fast path and a raw-string fallback,
//! selected by the tree's `class_list_supported` capability. The
//! fallback reproduces legacy string manipulation exactly, including its
//! whitespace collapsing; token order is preserved either way.

use crate::{DomError, DomResult, DomTree, NodeId};

/// Class names must be single tokens, matching what the native class-set
/// API enforces
fn throw_if_whitespace(name: &str) -> DomResult<()> {
    if name.chars().any(char::is_whitespace) {
        Err(DomError::InvalidArgument)
    } else {
        Ok(())
    }
}

fn class_attr(tree: &DomTree, el: NodeId) -> String {
    tree.get(el)
        .and_then(|node| node.as_element())
        .and_then(|data| data.get_attr("class"))
        .unwrap_or("")
        .to_string()
}

fn set_class_attr(tree: &mut DomTree, el: NodeId, value: &str) {
    if let Some(data) = tree.get_mut(el).and_then(|node| node.as_element_mut()) {
        data.set_attr("class", value);
    }
}

/// Equivalent of matching `(^|\s)name($|\s)` against the raw class
/// string
fn class_pattern_matches(class_attr: &str, name: &str) -> bool {
    if name.is_empty() {
        return false;
    }
    for (idx, _) in class_attr.match_indices(name) {
        let starts_ok = idx == 0
            || class_attr[..idx]
                .chars()
                .next_back()
                .is_some_and(char::is_whitespace);
        let end = idx + name.len();
        let ends_ok = end == class_attr.len()
            || class_attr[end..].chars().next().is_some_and(char::is_whitespace);
        if starts_ok && ends_ok {
            return true;
        }
    }
    false
}

/// Check whether an element has a class.
///
/// Fails with [`DomError::InvalidArgument`] when `name` contains
/// whitespace, in both paths, to keep the fallback consistent with the
/// class-set API.
pub fn has_class(tree: &DomTree, el: NodeId, name: &str) -> DomResult<bool> {
    throw_if_whitespace(name)?;
    let attr = class_attr(tree, el);
    if tree.class_list_supported() {
        Ok(attr.split_whitespace().any(|token| token == name))
    } else {
        Ok(class_pattern_matches(&attr, name))
    }
}

/// Add a class to an element
pub fn add_class(tree: &mut DomTree, el: NodeId, name: &str) -> DomResult<NodeId> {
    if tree.class_list_supported() {
        throw_if_whitespace(name)?;
        let attr = class_attr(tree, el);
        if !attr.split_whitespace().any(|token| token == name) {
            let joined = format!("{attr} {name}");
            set_class_attr(tree, el, joined.trim());
        }
    } else if !has_class(tree, el, name)? {
        // has_class does the whitespace validation on this path.
        let attr = class_attr(tree, el);
        let joined = format!("{attr} {name}");
        set_class_attr(tree, el, joined.trim());
    }
    Ok(el)
}

/// Remove a class from an element.
///
/// Splits on whitespace runs and rejoins with single spaces, so spacing
/// may collapse but token order is kept. The class-set fast path and the
/// string fallback converge on the same rebuild here; only the
/// validation route differs, and both routes validate.
pub fn remove_class(tree: &mut DomTree, el: NodeId, name: &str) -> DomResult<NodeId> {
    throw_if_whitespace(name)?;
    let attr = class_attr(tree, el);
    let kept: Vec<&str> = attr
        .split_whitespace()
        .filter(|token| *token != name)
        .collect();
    set_class_attr(tree, el, &kept.join(" "));
    Ok(el)
}

/// How [`toggle_class`] decides the target state
pub enum ClassToggle<'a> {
    /// Flip the current state
    Auto,
    /// Force the class on or off
    Force(bool),
    /// Ask a callback; `None` means "flip the current state"
    Predicate(&'a dyn Fn(&DomTree, NodeId, &str) -> Option<bool>),
}

/// Toggle a class on an element.
///
/// Returns `Ok(None)` when the resolved target state already matches the
/// current state, without touching the element. Callers rely on that to
/// detect the no-op, so it stays `None` rather than the element.
pub fn toggle_class(
    tree: &mut DomTree,
    el: NodeId,
    name: &str,
    toggle: ClassToggle<'_>,
) -> DomResult<Option<NodeId>> {
    let has = has_class(tree, el, name)?;

    let resolved = match toggle {
        ClassToggle::Auto => None,
        ClassToggle::Force(state) => Some(state),
        ClassToggle::Predicate(predicate) => predicate(tree, el, name),
    };
    let target = resolved.unwrap_or(!has);

    if target == has {
        return Ok(None);
    }

    if target {
        add_class(tree, el, name)?;
    } else {
        remove_class(tree, el, name)?;
    }
    Ok(Some(el))
}
