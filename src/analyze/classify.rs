use crate::analyze::builder::ItemKind;
use crate::analyze::prepass::has_visible_text;
use crate::config::Palette;
use crate::foundation::color::Rgba;
use crate::foundation::core::NodeId;
use crate::foundation::error::SkeletonError;
use crate::host::style::ComputedStyle;
use crate::host::{NodeKind, RenderHost};
use crate::walk::{PreorderWalk, Visit, walk};

const OPAQUE_BLACK: Rgba = Rgba::rgba(0.0, 0.0, 0.0, 1.0);

fn has_background_color(style: &ComputedStyle) -> bool {
    let raw = style.background_color.trim();
    match Rgba::parse_css(raw) {
        Ok(c) => !c.is_transparent(),
        Err(_) => !raw.is_empty(),
    }
}

fn has_background_image(style: &ComputedStyle) -> bool {
    let raw = style.background_image.trim();
    !raw.is_empty() && !raw.eq_ignore_ascii_case("none")
}

// The initial `border-color` is `currentcolor`, which computes to black for default text.
fn has_border_color(style: &ComputedStyle) -> bool {
    let raw = style.border_color.trim();
    if raw.is_empty() {
        return false;
    }
    match Rgba::parse_css(raw) {
        Ok(c) => !c.is_transparent() && c != OPAQUE_BLACK,
        Err(_) => true,
    }
}

/// Whether an element with `style` should become a block placeholder.
pub fn is_decorative(kind: &NodeKind, style: &ComputedStyle) -> bool {
    kind.is_element()
        && (has_background_color(style)
            || has_background_image(style)
            || has_border_color(style)
            || kind.is_image())
}

/// Fill decision for one decorative block.
#[derive(Debug)]
pub struct BlockFill {
    /// Placeholder kind.
    pub kind: ItemKind,
    /// Placeholder color.
    pub color: Rgba,
    /// Set when the background color was present but unreadable.
    pub error: Option<SkeletonError>,
}

/// Pick the placeholder color for a decorative block.
pub fn block_fill(kind: &NodeKind, style: &ComputedStyle, palette: &Palette) -> BlockFill {
    let mut error = None;
    if has_background_color(style) {
        match Rgba::parse_css(&style.background_color) {
            Ok(bg) => {
                return BlockFill {
                    kind: ItemKind::ColoredBlock,
                    color: palette.tint(bg),
                    error: None,
                };
            }
            Err(e) => error = Some(e),
        }
    }

    let color = if kind.is_image() && error.is_none() {
        palette.image
    } else {
        palette.neutral
    };
    BlockFill {
        kind: ItemKind::Block,
        color,
        error,
    }
}

fn decorative_filter<H: RenderHost + ?Sized>(host: &H, node: NodeId) -> Visit {
    let Ok(kind) = host.kind(node) else {
        return Visit::Skip;
    };
    if !kind.is_element() {
        return Visit::Skip;
    }
    match host.computed_style(node) {
        Ok(style) if is_decorative(&kind, &style) => Visit::Accept,
        _ => Visit::Skip,
    }
}

fn text_run_filter<H: RenderHost + ?Sized>(host: &H, node: NodeId) -> Visit {
    match host.kind(node) {
        Ok(NodeKind::Text) if has_visible_text(&host.text_content(node)) => Visit::Accept,
        _ => Visit::Skip,
    }
}

/// Decorative elements below `root`, in document order.
pub fn decorative_blocks<H: RenderHost + ?Sized>(
    host: &H,
    root: NodeId,
) -> PreorderWalk<'_, H, fn(&H, NodeId) -> Visit> {
    walk(host, root, decorative_filter::<H> as fn(&H, NodeId) -> Visit)
}

/// Visible text nodes below `root`, in document order.
pub fn text_runs<H: RenderHost + ?Sized>(
    host: &H,
    root: NodeId,
) -> PreorderWalk<'_, H, fn(&H, NodeId) -> Visit> {
    walk(host, root, text_run_filter::<H> as fn(&H, NodeId) -> Visit)
}

#[cfg(test)]
#[path = "../../tests/unit/analyze/classify.rs"]
mod tests;
