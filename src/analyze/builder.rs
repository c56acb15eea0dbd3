use crate::config::{AnalyzeOptions, MergeOrder};
use crate::foundation::color::Rgba;
use crate::foundation::core::{DomRect, NodeId};

/// What a placeholder stands in for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    /// Decorated element or image with a neutral fill.
    Block,
    /// Element whose own background color was toned down into the fill.
    ColoredBlock,
    /// One estimated line of text.
    TextLine,
}

/// One placeholder rectangle, relative to the analysis root.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SkeletonItem {
    /// Top edge.
    pub top: f64,
    /// Left edge.
    pub left: f64,
    /// Horizontal origin.
    pub x: f64,
    /// Vertical origin.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
    /// Placeholder kind.
    pub kind: ItemKind,
    /// Fill hint.
    pub color: Rgba,
    /// Node the placeholder was derived from (the container, for text lines).
    pub source: NodeId,
    /// Set once a same-row successor has swallowed this item.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub absorbed: bool,
}

impl SkeletonItem {
    /// Build an item covering `rect`.
    pub fn new(rect: DomRect, kind: ItemKind, color: Rgba, source: NodeId) -> Self {
        Self {
            top: rect.top,
            left: rect.left,
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            kind,
            color,
            source,
            absorbed: false,
        }
    }

    /// Geometry of the item.
    pub fn rect(&self) -> DomRect {
        DomRect {
            top: self.top,
            left: self.left,
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
        }
    }

    /// Right edge.
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// Whether the item still paints anything.
    pub fn is_visible(&self) -> bool {
        !self.absorbed && !self.color.is_transparent()
    }
}

/// Accumulates placeholders, blocks first and text lines after, each in traversal order.
#[derive(Debug, Default)]
pub struct SkeletonBuilder {
    blocks: Vec<SkeletonItem>,
    lines: Vec<SkeletonItem>,
}

impl SkeletonBuilder {
    /// Empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one block placeholder.
    pub fn push_block(&mut self, rect: DomRect, kind: ItemKind, color: Rgba, source: NodeId) {
        self.blocks.push(SkeletonItem::new(rect, kind, color, source));
    }

    /// Add the estimated lines of one text run.
    pub fn push_text_lines(
        &mut self,
        lines: impl IntoIterator<Item = DomRect>,
        color: Rgba,
        source: NodeId,
    ) {
        self.lines.extend(
            lines
                .into_iter()
                .map(|r| SkeletonItem::new(r, ItemKind::TextLine, color, source)),
        );
    }

    /// Number of items collected so far.
    pub fn len(&self) -> usize {
        self.blocks.len() + self.lines.len()
    }

    /// Return `true` when nothing was collected.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All items, blocks before text lines.
    pub fn finish(self) -> Vec<SkeletonItem> {
        let mut items = self.blocks;
        items.extend(self.lines);
        items
    }
}

/// Fuse same-row neighbours separated by less than `opts.merge_gap_px`.
///
/// Each item is only compared with the item right before it. On a match the later item grows to
/// cover both spans and the earlier one turns transparent (or is removed, with
/// `opts.drop_absorbed`). Returns the number of absorbed items.
pub fn merge_adjacent(items: &mut Vec<SkeletonItem>, opts: &AnalyzeOptions) -> usize {
    if opts.merge_order == MergeOrder::RowSorted {
        items.sort_by(|a, b| a.top.total_cmp(&b.top).then(a.left.total_cmp(&b.left)));
    }

    let mut absorbed = 0;
    for i in 1..items.len() {
        let (head, tail) = items.split_at_mut(i);
        let prev = &mut head[i - 1];
        let cur = &mut tail[0];

        let gap = cur.left - prev.right();
        if cur.top != prev.top || gap >= opts.merge_gap_px {
            continue;
        }

        let span = prev.rect().to_kurbo().union(cur.rect().to_kurbo());
        cur.x += span.x0 - cur.left;
        cur.left = span.x0;
        cur.width = span.width();
        prev.color = Rgba::TRANSPARENT;
        prev.absorbed = true;
        absorbed += 1;
    }

    if opts.drop_absorbed {
        items.retain(|item| !item.absorbed);
    }
    if absorbed > 0 {
        tracing::debug!(absorbed, "merged adjacent placeholders");
    }
    absorbed
}

#[cfg(test)]
#[path = "../../tests/unit/analyze/builder.rs"]
mod tests;
