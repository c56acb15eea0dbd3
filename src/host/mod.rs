//! Contract between the engine and the environment that owns the rendered tree.
//!
//! The engine reads geometry and style through [`RenderHost`] and measures unwrapped text
//! through [`TextMeasure`]. Hosts are free to back these with a live browser, a layout engine or
//! a recorded snapshot such as [`MemoryHost`].

pub(crate) mod measure;
pub(crate) mod memory;
pub(crate) mod style;

use crate::foundation::core::{DomRect, NodeId};
use crate::foundation::error::SkeletonResult;
use crate::host::style::ComputedStyle;

/// What a node is, as far as classification cares.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    /// An element with its lower-case tag name.
    Element {
        /// Tag name, e.g. `"div"` or `"img"`.
        tag: String,
    },
    /// A raw text node.
    Text,
}

impl NodeKind {
    /// Return `true` for elements.
    pub fn is_element(&self) -> bool {
        matches!(self, Self::Element { .. })
    }

    /// Return `true` for `<img>` elements.
    pub fn is_image(&self) -> bool {
        matches!(self, Self::Element { tag } if tag.eq_ignore_ascii_case("img"))
    }
}

/// Read and structural-edit access to a rendered tree.
///
/// Geometry is expected in one coordinate space for every node. Structural edits are only
/// issued by the text pre-pass and by the line-height probe, which always restores what it
/// swapped out.
pub trait RenderHost {
    /// Whether `node` is known to the host.
    fn contains(&self, node: NodeId) -> bool;

    /// Kind of `node`.
    fn kind(&self, node: NodeId) -> SkeletonResult<NodeKind>;

    /// Parent of `node`, `None` for detached nodes and the document root.
    fn parent(&self, node: NodeId) -> Option<NodeId>;

    /// Children of `node` in document order.
    fn children(&self, node: NodeId) -> Vec<NodeId>;

    /// Border box of `node`.
    fn bounding_box(&self, node: NodeId) -> SkeletonResult<DomRect>;

    /// Computed style of element `node`.
    fn computed_style(&self, node: NodeId) -> SkeletonResult<ComputedStyle>;

    /// Concatenated text of `node` and all its descendants.
    fn text_content(&self, node: NodeId) -> String;

    /// Replace text node `node` with a fresh `span` that has `node` as its only child.
    fn wrap_in_container(&mut self, node: NodeId) -> SkeletonResult<NodeId>;

    /// Deep structural clone of `node`, returned detached.
    fn duplicate(&mut self, node: NodeId) -> SkeletonResult<NodeId>;

    /// Put `replacement` where `current` sits in the tree and detach `current`.
    fn replace(&mut self, current: NodeId, replacement: NodeId) -> SkeletonResult<()>;

    /// Override the `line-height` of element `node` and lay it out again.
    fn set_line_height(&mut self, node: NodeId, value: &str) -> SkeletonResult<()>;

    /// Drop a detached node and its subtree.
    fn discard(&mut self, node: NodeId);
}

/// Off-tree measurement of a string rendered on one line.
pub trait TextMeasure {
    /// Advance width in pixels of `text` set in `font` (a CSS `font` shorthand) at
    /// `font_size_px`, without wrapping.
    fn text_width(&mut self, font: &str, font_size_px: f64, text: &str) -> SkeletonResult<f64>;
}
