//! The layout-analysis pipeline.
//!
//! 1. **Pre-pass**: isolate visible text nodes that share a parent with elements.
//! 2. **Blocks**: every decorated element becomes one placeholder at its own box.
//! 3. **Text**: every visible text node is measured through its container (probe line height,
//!    strip padding, estimate lines).
//! 4. **Merge**: same-row neighbours with a small gap are fused.
//!
//! Per-node failures never abort the run; they are recovered and recorded in
//! [`Skeleton::diagnostics`].

pub(crate) mod builder;
pub(crate) mod classify;
pub(crate) mod geometry;
pub(crate) mod prepass;
pub(crate) mod probe;
pub(crate) mod text;

use crate::analyze::builder::{SkeletonBuilder, SkeletonItem, merge_adjacent};
use crate::analyze::geometry::Normalizer;
use crate::analyze::text::{TextMetrics, estimate_text_lines};
use crate::config::AnalyzeOptions;
use crate::foundation::core::{DomRect, NodeId};
use crate::foundation::error::{SkeletonError, SkeletonResult};
use crate::host::{RenderHost, TextMeasure};

/// A recovered per-node failure.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Diagnostic {
    /// Node the failure belongs to.
    pub node: NodeId,
    /// Rendered error.
    pub message: String,
}

/// Ordered list of recovered failures.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
#[serde(transparent)]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
    /// Record `error` against `node` and log it.
    pub fn push(&mut self, node: NodeId, error: &SkeletonError) {
        tracing::warn!(node = node.0, "{error}");
        self.0.push(Diagnostic {
            node,
            message: error.to_string(),
        });
    }

    /// Recorded entries in order.
    pub fn entries(&self) -> &[Diagnostic] {
        &self.0
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Return `true` when nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Result of one analysis.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Skeleton {
    /// Bounding box of the root at analysis start; all items are relative to it.
    pub root: DomRect,
    /// Placeholders: blocks, then text lines, after merging.
    pub items: Vec<SkeletonItem>,
    /// Recovered per-node failures.
    pub diagnostics: Diagnostics,
}

impl Skeleton {
    /// Items that still paint something after merging.
    pub fn visible_items(&self) -> impl Iterator<Item = &SkeletonItem> {
        self.items.iter().filter(|i| i.is_visible())
    }
}

/// Synthesize skeleton placeholders for the subtree under `root`.
///
/// The host must not re-layout during the call. Only an unknown or non-element root
/// ([`SkeletonError::InvalidRoot`]) or invalid `opts` fail the call.
#[tracing::instrument(skip_all, fields(root = root.0))]
pub fn analyze<H, M>(
    host: &mut H,
    measure: &mut M,
    root: NodeId,
    opts: &AnalyzeOptions,
) -> SkeletonResult<Skeleton>
where
    H: RenderHost + ?Sized,
    M: TextMeasure + ?Sized,
{
    if !host.contains(root) {
        return Err(SkeletonError::invalid_root(format!(
            "node {} is not in the tree",
            root.0
        )));
    }
    if !host.kind(root)?.is_element() {
        return Err(SkeletonError::invalid_root(format!(
            "node {} is not an element",
            root.0
        )));
    }
    let origin = host
        .bounding_box(root)
        .map_err(|e| SkeletonError::invalid_root(format!("root has no box: {e}")))?;
    opts.validate()?;

    let normalizer = Normalizer::new(origin);
    let mut diagnostics = Diagnostics::default();
    let mut builder = SkeletonBuilder::new();

    let wrapped = prepass::wrap_bare_text(host, root, &mut diagnostics);

    let blocks: Vec<NodeId> = classify::decorative_blocks(&*host, root).collect();
    for node in &blocks {
        let node = *node;
        let probed = (
            host.kind(node),
            host.bounding_box(node),
            host.computed_style(node),
        );
        let (kind, rect, style) = match probed {
            (Ok(kind), Ok(rect), Ok(style)) => (kind, rect, style),
            (Err(e), _, _) | (_, Err(e), _) | (_, _, Err(e)) => {
                diagnostics.push(node, &e);
                continue;
            }
        };
        let fill = classify::block_fill(&kind, &style, &opts.palette);
        if let Some(e) = &fill.error {
            diagnostics.push(node, e);
        }
        builder.push_block(normalizer.normalize(rect), fill.kind, fill.color, node);
    }

    let runs: Vec<NodeId> = classify::text_runs(&*host, root).collect();
    for text_node in &runs {
        match text_run_lines(host, measure, *text_node, &normalizer, &mut diagnostics) {
            Ok((container, lines)) => {
                builder.push_text_lines(lines, opts.palette.text, container);
            }
            Err(e) => diagnostics.push(*text_node, &e),
        }
    }

    let mut items = builder.finish();
    let absorbed = merge_adjacent(&mut items, opts);
    tracing::debug!(
        wrapped,
        blocks = blocks.len(),
        text_runs = runs.len(),
        items = items.len(),
        absorbed,
        "analysis finished"
    );

    Ok(Skeleton {
        root: origin,
        items,
        diagnostics,
    })
}

fn text_run_lines<H, M>(
    host: &mut H,
    measure: &mut M,
    text_node: NodeId,
    normalizer: &Normalizer,
    diagnostics: &mut Diagnostics,
) -> SkeletonResult<(NodeId, Vec<DomRect>)>
where
    H: RenderHost + ?Sized,
    M: TextMeasure + ?Sized,
{
    let container = host
        .parent(text_node)
        .ok_or_else(|| SkeletonError::host(format!("text node {} is detached", text_node.0)))?;
    let style = host.computed_style(container)?;
    let font_size_px = style.font_size_px()?;

    let (content, padding_error) = normalizer.content_box(host.bounding_box(container)?, &style);
    if let Some(e) = padding_error {
        diagnostics.push(container, &e);
    }

    let line_height_ratio = match probe::probe_line_height(host, container) {
        Ok(ratio) => ratio,
        Err(e) => {
            diagnostics.push(container, &e);
            None
        }
    };

    let text = host.text_content(container);
    let text_width_px = measure.text_width(&style.font, font_size_px, text.trim())?;

    let metrics = TextMetrics {
        font_size_px,
        line_height_ratio,
        text_width_px,
    };
    Ok((container, estimate_text_lines(&content, &metrics)))
}

#[cfg(test)]
#[path = "../../tests/unit/analyze/pipeline.rs"]
mod tests;
