//! Document - High-level document API
//!
//! Wraps the tree and carries the host-environment state the utility
//! layer needs: scroll offsets, frame status, user agent, selection
//! blocking.

use crate::{DomTree, NodeId};

/// Whether the document is hosted inside a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrameStatus {
    /// Top-level browsing context
    #[default]
    TopLevel,
    /// Hosted in a same-origin frame
    Framed,
    /// Hosted in a frame whose parent cannot be inspected. Probing the
    /// parent would fail, so this is reported as "in frame".
    CrossOrigin,
}

/// Host engine description
///
/// Carries the one legacy-version quirk the pointer helpers need.
#[derive(Debug, Clone, Copy, Default)]
pub struct UserAgent {
    /// Major version of a legacy engine that misreports `buttons`,
    /// `None` for anything modern
    pub legacy_version: Option<u32>,
}

/// Token returned by [`Document::block_text_selection`]; hand it back to
/// [`Document::unblock_text_selection`] to release the block.
#[derive(Debug)]
#[must_use = "selection stays blocked until the token is returned"]
pub struct SelectionBlock {
    _priv: (),
}

/// HTML document
#[derive(Debug)]
pub struct Document {
    /// The DOM tree
    tree: DomTree,
    /// Cached reference to the <html> element
    document_element: NodeId,
    /// Cached reference to the <body> element
    body_element: NodeId,
    /// Viewport scroll offsets
    page_x_offset: f64,
    page_y_offset: f64,
    frame: FrameStatus,
    /// Backed by a real tree with element creation, as opposed to a stub
    /// document some embedders hand out
    real_dom: bool,
    user_agent: UserAgent,
    focused: NodeId,
    selection_blocked: bool,
}

impl Document {
    /// Create a new document with the html/body skeleton
    pub fn new() -> Self {
        let mut tree = DomTree::new();
        let html = tree.create_element("html");
        let body = tree.create_element("body");
        let root = tree.root();
        tree.append_child(root, html);
        tree.append_child(html, body);

        Self {
            tree,
            document_element: html,
            body_element: body,
            page_x_offset: 0.0,
            page_y_offset: 0.0,
            frame: FrameStatus::TopLevel,
            real_dom: true,
            user_agent: UserAgent::default(),
            focused: NodeId::NONE,
            selection_blocked: false,
        }
    }

    /// Get the <html> element
    pub fn document_element(&self) -> NodeId {
        self.document_element
    }

    /// Get the <body> element
    pub fn body(&self) -> NodeId {
        self.body_element
    }

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Access the DOM tree mutably
    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }

    /// Horizontal viewport scroll offset
    pub fn page_x_offset(&self) -> f64 {
        self.page_x_offset
    }

    /// Vertical viewport scroll offset
    pub fn page_y_offset(&self) -> f64 {
        self.page_y_offset
    }

    /// Set the viewport scroll offsets
    pub fn set_scroll_offset(&mut self, x: f64, y: f64) {
        self.page_x_offset = x;
        self.page_y_offset = y;
    }

    /// Where this document is hosted
    pub fn frame_status(&self) -> FrameStatus {
        self.frame
    }

    /// Set where this document is hosted
    pub fn set_frame_status(&mut self, frame: FrameStatus) {
        self.frame = frame;
    }

    /// Check whether the document is hosted inside a frame.
    ///
    /// A parent that cannot be inspected counts as a frame.
    pub fn is_in_frame(&self) -> bool {
        match self.frame {
            FrameStatus::TopLevel => false,
            FrameStatus::Framed | FrameStatus::CrossOrigin => true,
        }
    }

    /// Check whether this is a real DOM rather than a stub document
    pub fn is_real_dom(&self) -> bool {
        self.real_dom
    }

    /// Mark the document as a stub (or real again)
    pub fn set_real_dom(&mut self, real: bool) {
        self.real_dom = real;
    }

    /// Host engine description
    pub fn user_agent(&self) -> UserAgent {
        self.user_agent
    }

    /// Set the host engine description
    pub fn set_user_agent(&mut self, user_agent: UserAgent) {
        self.user_agent = user_agent;
    }

    /// Move focus to a node
    pub fn focus(&mut self, id: NodeId) {
        self.focused = id;
    }

    /// Currently focused node
    pub fn focused(&self) -> NodeId {
        self.focused
    }

    /// Block text selection while a drag is in progress.
    ///
    /// Focuses the body and suppresses select-start. The returned token
    /// must be handed back to [`Self::unblock_text_selection`].
    pub fn block_text_selection(&mut self) -> SelectionBlock {
        self.focused = self.body_element;
        self.selection_blocked = true;
        SelectionBlock { _priv: () }
    }

    /// Release a selection block
    pub fn unblock_text_selection(&mut self, _block: SelectionBlock) {
        self.selection_blocked = false;
    }

    /// Whether text selection is currently blocked
    pub fn text_selection_blocked(&self) -> bool {
        self.selection_blocked
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_skeleton() {
        let doc = Document::new();
        assert!(doc.tree().get(doc.document_element()).is_some());
        assert_eq!(doc.tree().parent(doc.body()), doc.document_element());
    }

    #[test]
    fn test_frame_detection() {
        let mut doc = Document::default();
        assert!(!doc.is_in_frame());

        doc.set_frame_status(FrameStatus::Framed);
        assert!(doc.is_in_frame());

        // An uninspectable parent reports as framed rather than erroring.
        doc.set_frame_status(FrameStatus::CrossOrigin);
        assert!(doc.is_in_frame());
    }

    #[test]
    fn test_selection_block_round_trip() {
        let mut doc = Document::default();
        assert!(!doc.text_selection_blocked());

        let block = doc.block_text_selection();
        assert!(doc.text_selection_blocked());
        assert_eq!(doc.focused(), doc.body());

        doc.unblock_text_selection(block);
        assert!(!doc.text_selection_blocked());
    }
}
