//! Geometry APIs
//!
//! Bounding-rect snapshots, page-relative position, and pointer position
//! relative to an element. All queries read the tree fresh per call and
//! retain nothing.

use crate::events::PointerEvent;
use crate::node::ElementData;
use crate::{Document, DomTree, NodeId};

/// Live rectangle as reported by the layout pass.
///
/// `width`/`height` stay optional: some engines omit them, and zero-area
/// layouts report zero. Both cases fall back to a computed-style read
/// when snapshotted.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawRect {
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub width: Option<f64>,
    pub height: Option<f64>,
}

/// Plain bounding-rect snapshot, copied field by field from the live
/// rect. Engines that forbid extending the live rect object are the
/// reason this is a fresh plain record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub bottom: f64,
    pub height: f64,
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub width: f64,
}

/// Page-relative element position, rounded to whole pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub left: f64,
    pub top: f64,
}

/// Pointer position normalized against an element's box; both axes are
/// clamped to `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub x: f64,
    pub y: f64,
}

/// Element layout state, supplied by the host layout pass
#[derive(Debug, Clone, Copy, Default)]
pub struct ElementGeometry {
    /// Viewport-relative rect; `None` models an engine without the rect
    /// capability
    pub rect: Option<RawRect>,
    pub offset_width: f64,
    pub offset_height: f64,
    pub client_left: f64,
    pub client_top: f64,
    pub scroll_left: f64,
    pub scroll_top: f64,
}

/// Parse the leading float of a computed-style value ("12.5px" -> 12.5).
/// NaN when the value is missing or does not start with a number, same
/// as a parseFloat on a missing style read.
fn style_float(el: &ElementData, property: &str) -> f64 {
    let Some(value) = el.computed_style.get(property) else {
        return f64::NAN;
    };
    let value = value.trim_start();
    let mut end = 0;
    let bytes = value.as_bytes();
    if end < bytes.len() && (bytes[end] == b'+' || bytes[end] == b'-') {
        end += 1;
    }
    let mut seen_dot = false;
    while end < bytes.len() {
        match bytes[end] {
            b'0'..=b'9' => end += 1,
            b'.' if !seen_dot => {
                seen_dot = true;
                end += 1;
            }
            _ => break,
        }
    }
    value[..end].parse().unwrap_or(f64::NAN)
}

/// Zero and NaN are "no usable value" for the metric fallbacks below
#[inline]
fn falsy(value: f64) -> bool {
    value == 0.0 || value.is_nan()
}

#[inline]
fn truthy_or(value: f64, fallback: f64) -> f64 {
    if falsy(value) {
        fallback
    } else {
        value
    }
}

fn live_rect(tree: &DomTree, el: NodeId) -> Option<(&ElementData, RawRect)> {
    let node = tree.get(el)?;
    // A detached element has no on-screen box.
    if !node.parent.is_valid() {
        return None;
    }
    let data = node.as_element()?;
    let rect = data.geometry.as_ref()?.rect?;
    Some((data, rect))
}

/// Snapshot an element's bounding rect.
///
/// Returns `None` for anything without a usable live rect: stale ids,
/// detached elements, non-elements, and elements whose engine lacks the
/// rect capability. Missing or zero width/height are backfilled from the
/// computed style.
pub fn get_bounding_client_rect(tree: &DomTree, el: NodeId) -> Option<Rect> {
    let (data, rect) = live_rect(tree, el)?;

    let mut height = rect.height.unwrap_or(0.0);
    if falsy(height) {
        height = style_float(data, "height");
    }
    let mut width = rect.width.unwrap_or(0.0);
    if falsy(width) {
        width = style_float(data, "width");
    }

    Some(Rect {
        bottom: rect.bottom,
        height,
        left: rect.left,
        right: rect.right,
        top: rect.top,
        width,
    })
}

/// Page-relative offset of an element.
///
/// `{0, 0}` without a usable rect. Client-edge and scroll metrics come
/// from the document element, falling back to the body, a historical
/// engine inconsistency both sources have to cover. Coordinates are
/// rounded because mobile engines report sub-pixel noise.
pub fn find_position(doc: &Document, el: NodeId) -> Position {
    let tree = doc.tree();
    let Some((_, rect)) = live_rect(tree, el) else {
        return Position { left: 0.0, top: 0.0 };
    };

    let doc_el = element_geometry(tree, doc.document_element());
    let body = element_geometry(tree, doc.body());

    let client_left = truthy_or(doc_el.client_left, truthy_or(body.client_left, 0.0));
    let scroll_left = truthy_or(doc.page_x_offset(), body.scroll_left);
    let left = rect.left + scroll_left - client_left;

    let client_top = truthy_or(doc_el.client_top, truthy_or(body.client_top, 0.0));
    let scroll_top = truthy_or(doc.page_y_offset(), body.scroll_top);
    let top = rect.top + scroll_top - client_top;

    Position {
        left: left.round(),
        top: top.round(),
    }
}

fn element_geometry(tree: &DomTree, el: NodeId) -> ElementGeometry {
    tree.get(el)
        .and_then(|node| node.as_element())
        .and_then(|data| data.geometry)
        .unwrap_or_default()
}

/// Pointer position relative to an element, as fractions of its box.
///
/// Touch events win over plain pointer coordinates. `y` measures
/// distance up from the bottom edge, which is why it inverts the page
/// axis. Both axes are clamped to `[0, 1]` no matter where the pointer
/// actually is.
pub fn get_pointer_position(doc: &Document, el: NodeId, event: &PointerEvent) -> Coordinates {
    let position = find_position(doc, el);
    let geometry = element_geometry(doc.tree(), el);
    let box_w = geometry.offset_width;
    let box_h = geometry.offset_height;

    let (page_x, page_y) = match event.changed_touches.first() {
        Some(touch) => (touch.page_x, touch.page_y),
        None => (event.page_x, event.page_y),
    };

    Coordinates {
        x: ((page_x - position.left) / box_w).min(1.0).max(0.0),
        y: ((position.top - page_y + box_h) / box_h).min(1.0).max(0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::TouchPoint;

    fn doc_with_el(geometry: ElementGeometry) -> (Document, NodeId) {
        let mut doc = Document::default();
        let body = doc.body();
        let el = doc.tree_mut().create_element("div");
        doc.tree_mut().append_child(body, el);
        doc.tree_mut().set_geometry(el, geometry);
        (doc, el)
    }

    fn rect(left: f64, top: f64, width: f64, height: f64) -> RawRect {
        RawRect {
            left,
            top,
            right: left + width,
            bottom: top + height,
            width: Some(width),
            height: Some(height),
        }
    }

    #[test]
    fn test_rect_snapshot_copies_fields() {
        let (doc, el) = doc_with_el(ElementGeometry {
            rect: Some(rect(10.0, 20.0, 100.0, 50.0)),
            ..Default::default()
        });

        let snapshot = get_bounding_client_rect(doc.tree(), el).unwrap();
        assert_eq!(snapshot.left, 10.0);
        assert_eq!(snapshot.top, 20.0);
        assert_eq!(snapshot.right, 110.0);
        assert_eq!(snapshot.bottom, 70.0);
        assert_eq!(snapshot.width, 100.0);
        assert_eq!(snapshot.height, 50.0);
    }

    #[test]
    fn test_rect_missing_dimensions_fall_back_to_style() {
        let (mut doc, el) = doc_with_el(ElementGeometry {
            rect: Some(RawRect {
                left: 5.0,
                top: 5.0,
                right: 5.0,
                bottom: 5.0,
                width: None,
                height: Some(0.0),
            }),
            ..Default::default()
        });
        doc.tree_mut().set_computed_style(el, "width", "320.5px");
        doc.tree_mut().set_computed_style(el, "height", "180px");

        let snapshot = get_bounding_client_rect(doc.tree(), el).unwrap();
        assert_eq!(snapshot.width, 320.5);
        assert_eq!(snapshot.height, 180.0);
    }

    #[test]
    fn test_rect_detached_or_incapable_is_none() {
        let mut doc = Document::default();
        let detached = doc.tree_mut().create_element("div");
        doc.tree_mut().set_geometry(
            detached,
            ElementGeometry {
                rect: Some(rect(0.0, 0.0, 10.0, 10.0)),
                ..Default::default()
            },
        );
        assert!(get_bounding_client_rect(doc.tree(), detached).is_none());

        // Attached but no rect capability.
        let (doc, el) = doc_with_el(ElementGeometry::default());
        assert!(get_bounding_client_rect(doc.tree(), el).is_none());
        assert!(get_bounding_client_rect(doc.tree(), NodeId(999)).is_none());
    }

    #[test]
    fn test_find_position_adds_scroll_subtracts_client_edge() {
        let (mut doc, el) = doc_with_el(ElementGeometry {
            rect: Some(rect(100.0, 200.0, 50.0, 50.0)),
            ..Default::default()
        });
        doc.set_scroll_offset(30.0, 40.0);
        let html = doc.document_element();
        doc.tree_mut().set_geometry(
            html,
            ElementGeometry {
                client_left: 2.0,
                client_top: 3.0,
                ..Default::default()
            },
        );

        let position = find_position(&doc, el);
        assert_eq!(position.left, 128.0);
        assert_eq!(position.top, 237.0);
    }

    #[test]
    fn test_find_position_body_scroll_fallback_and_rounding() {
        let (mut doc, el) = doc_with_el(ElementGeometry {
            rect: Some(rect(10.4, 20.6, 50.0, 50.0)),
            ..Default::default()
        });
        // No page offset set, so the body's scroll metrics apply.
        let body = doc.body();
        doc.tree_mut().set_geometry(
            body,
            ElementGeometry {
                scroll_left: 5.0,
                scroll_top: 7.0,
                ..Default::default()
            },
        );

        let position = find_position(&doc, el);
        assert_eq!(position.left, 15.0);
        assert_eq!(position.top, 28.0);
    }

    #[test]
    fn test_find_position_without_rect_is_origin() {
        let (doc, el) = doc_with_el(ElementGeometry::default());
        assert_eq!(find_position(&doc, el), Position { left: 0.0, top: 0.0 });
    }

    #[test]
    fn test_pointer_position_basic() {
        let (doc, el) = doc_with_el(ElementGeometry {
            rect: Some(rect(100.0, 100.0, 200.0, 100.0)),
            offset_width: 200.0,
            offset_height: 100.0,
            ..Default::default()
        });

        let event = PointerEvent {
            page_x: 150.0,
            page_y: 150.0,
            ..Default::default()
        };
        let position = get_pointer_position(&doc, el, &event);
        assert_eq!(position.x, 0.25);
        assert_eq!(position.y, 0.5);
    }

    #[test]
    fn test_pointer_position_clamped() {
        let (doc, el) = doc_with_el(ElementGeometry {
            rect: Some(rect(100.0, 100.0, 200.0, 100.0)),
            offset_width: 200.0,
            offset_height: 100.0,
            ..Default::default()
        });

        let far = PointerEvent {
            page_x: 10_000.0,
            page_y: -10_000.0,
            ..Default::default()
        };
        let position = get_pointer_position(&doc, el, &far);
        assert_eq!(position.x, 1.0);
        assert_eq!(position.y, 1.0);

        let near = PointerEvent {
            page_x: -10_000.0,
            page_y: 10_000.0,
            ..Default::default()
        };
        let position = get_pointer_position(&doc, el, &near);
        assert_eq!(position.x, 0.0);
        assert_eq!(position.y, 0.0);
    }

    #[test]
    fn test_pointer_position_prefers_touch() {
        let (doc, el) = doc_with_el(ElementGeometry {
            rect: Some(rect(0.0, 0.0, 100.0, 100.0)),
            offset_width: 100.0,
            offset_height: 100.0,
            ..Default::default()
        });

        let event = PointerEvent {
            page_x: 0.0,
            page_y: 0.0,
            changed_touches: vec![TouchPoint {
                page_x: 50.0,
                page_y: 100.0,
            }],
            ..Default::default()
        };
        let position = get_pointer_position(&doc, el, &event);
        assert_eq!(position.x, 0.5);
        assert_eq!(position.y, 0.0);
    }

    #[test]
    fn test_style_float_parses_prefix() {
        let mut el = ElementData::new("div");
        el.computed_style.insert("height".into(), " 42.25px".into());
        assert_eq!(style_float(&el, "height"), 42.25);
        assert!(style_float(&el, "width").is_nan());
    }
}
