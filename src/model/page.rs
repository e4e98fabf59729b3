//! Page content tree.
//!
//! A [`Page`] owns its children and a [`Group`] owns its own, so moving a
//! node between parents is an ownership transfer: a node can never be
//! attached to two parents at once, and nothing refers to it after the move.

use super::geometry::{Matrix, Rect};

/// Object identifier of a content stream: (object number, generation number).
pub type StreamId = (u32, u16);

/// A node in a page's content tree.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentNode {
    /// An existing content stream, referenced by id and never decoded.
    Stream(StreamId),

    /// A group of nodes drawn under a common transform.
    Group(Group),
}

impl ContentNode {
    /// Number of nodes in this subtree, including itself.
    pub fn node_count(&self) -> usize {
        match self {
            ContentNode::Stream(_) => 1,
            ContentNode::Group(g) => 1 + g.children.iter().map(|c| c.node_count()).sum::<usize>(),
        }
    }

    /// Collect stream ids of this subtree in paint order.
    pub fn collect_streams(&self, out: &mut Vec<StreamId>) {
        match self {
            ContentNode::Stream(id) => out.push(*id),
            ContentNode::Group(g) => g.children.iter().for_each(|c| c.collect_streams(out)),
        }
    }

    pub fn as_group(&self) -> Option<&Group> {
        match self {
            ContentNode::Group(g) => Some(g),
            ContentNode::Stream(_) => None,
        }
    }
}

/// A transformed group of content nodes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Group {
    pub transform: Matrix,
    pub children: Vec<ContentNode>,
}

impl Group {
    /// Create an empty group with the given transform.
    pub fn new(transform: Matrix) -> Self {
        Self {
            transform,
            children: Vec::new(),
        }
    }

    /// Append a node as the last child.
    pub fn append_child(&mut self, node: ContentNode) {
        self.children.push(node);
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }
}

/// One page: its extent, boundary boxes and content tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// Page width in points (1 point = 1/72 inch)
    pub width: f64,

    /// Page height in points
    pub height: f64,

    pub crop_box: Rect,
    pub bleed_box: Rect,
    pub trim_box: Rect,

    /// Nominal content area (the PDF ArtBox)
    pub content_box: Rect,

    children: Vec<ContentNode>,
}

impl Page {
    /// Create an empty page whose boxes all cover `(0, 0, width, height)`.
    pub fn new(width: f64, height: f64) -> Self {
        let full = Rect::from_size(width, height);
        Self {
            width,
            height,
            crop_box: full,
            bleed_box: full,
            trim_box: full,
            content_box: full,
            children: Vec::new(),
        }
    }

    /// Create a page with the given children.
    pub fn with_children(width: f64, height: f64, children: Vec<ContentNode>) -> Self {
        Self {
            children,
            ..Self::new(width, height)
        }
    }

    /// Create a new page with standard Letter size (8.5 x 11 inches).
    pub fn letter() -> Self {
        Self::new(612.0, 792.0)
    }

    pub fn children(&self) -> &[ContentNode] {
        &self.children
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Append a node as the last child.
    pub fn append_child(&mut self, node: ContentNode) {
        self.children.push(node);
    }

    /// Detach every child, in order, leaving the page with none.
    pub fn extract_children(&mut self) -> Vec<ContentNode> {
        std::mem::take(&mut self.children)
    }

    pub fn set_size(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    /// Set crop, bleed, trim and content box to the same rectangle.
    pub fn set_all_boxes(&mut self, rect: Rect) {
        self.crop_box = rect;
        self.bleed_box = rect;
        self.trim_box = rect;
        self.content_box = rect;
    }

    /// All content streams in paint order.
    pub fn stream_ids(&self) -> Vec<StreamId> {
        let mut out = Vec::new();
        for child in &self.children {
            child.collect_streams(&mut out);
        }
        out
    }

    /// Get page dimensions as (width, height) tuple.
    pub fn dimensions(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    /// Check if the page is in landscape orientation.
    pub fn is_landscape(&self) -> bool {
        self.width > self.height
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::letter()
    }
}
