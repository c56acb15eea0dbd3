//! Empirical line-height measurement.
//!
//! `line-height` may be `normal` or otherwise symbolic, so instead of parsing it the prober lays
//! out a copy of the container with `line-height: 1` and compares heights: the rendered height
//! divided by the single-advance height is the effective line height as a multiple of the font
//! size.

use crate::foundation::core::NodeId;
use crate::foundation::error::{SkeletonError, SkeletonResult};
use crate::host::RenderHost;

/// A deep copy of a node temporarily standing in for it in the tree.
///
/// While the guard lives the original is detached and the copy sits in its place. Dropping the
/// guard puts the original back and discards the copy, whichever way the caller leaves the scope.
pub struct MeasurementDuplicate<'h, H: RenderHost + ?Sized> {
    host: &'h mut H,
    original: NodeId,
    duplicate: NodeId,
    swapped: bool,
}

impl<'h, H: RenderHost + ?Sized> MeasurementDuplicate<'h, H> {
    /// Clone `original` and swap the clone into its position.
    pub fn acquire(host: &'h mut H, original: NodeId) -> SkeletonResult<Self> {
        let duplicate = host.duplicate(original)?;
        if let Err(e) = host.replace(original, duplicate) {
            host.discard(duplicate);
            return Err(e);
        }
        Ok(Self {
            host,
            original,
            duplicate,
            swapped: true,
        })
    }

    /// The stand-in node.
    pub fn node(&self) -> NodeId {
        self.duplicate
    }

    /// Override the stand-in's `line-height`.
    pub fn set_line_height(&mut self, value: &str) -> SkeletonResult<()> {
        self.host.set_line_height(self.duplicate, value)
    }

    /// Current border-box height of the stand-in.
    pub fn height(&self) -> SkeletonResult<f64> {
        Ok(self.host.bounding_box(self.duplicate)?.height)
    }

    /// Put the original back now, reporting a failure instead of only logging it.
    pub fn restore(mut self) -> SkeletonResult<()> {
        self.swap_back()
    }

    fn swap_back(&mut self) -> SkeletonResult<()> {
        if self.swapped {
            self.host.replace(self.duplicate, self.original)?;
            self.swapped = false;
        }
        Ok(())
    }
}

impl<H: RenderHost + ?Sized> Drop for MeasurementDuplicate<'_, H> {
    fn drop(&mut self) {
        if let Err(e) = self.swap_back() {
            tracing::error!(
                original = self.original.0,
                duplicate = self.duplicate.0,
                "failed to restore measured node: {e}"
            );
        }
        self.host.discard(self.duplicate);
    }
}

/// Smallest effective line height, as a multiple of the font size, accepted from a measurement.
pub const MIN_LINE_HEIGHT_RATIO: f64 = 0.1;

/// Effective line height of `node` as a multiple of its font size.
///
/// Returns `None` when the single-line copy has no measurable height; callers then treat the
/// text as a single line. A ratio below [`MIN_LINE_HEIGHT_RATIO`] is reported as a
/// [`SkeletonError::MalformedStyle`].
#[tracing::instrument(level = "debug", skip(host))]
pub fn probe_line_height<H: RenderHost + ?Sized>(
    host: &mut H,
    node: NodeId,
) -> SkeletonResult<Option<f64>> {
    let rendered = host.bounding_box(node)?.height;

    let mut probe = MeasurementDuplicate::acquire(host, node)?;
    probe.set_line_height("1")?;
    let single = probe.height()?;
    probe.restore()?;

    if !single.is_finite() || single <= 0.0 {
        tracing::debug!(rendered, single, "zero-height probe, assuming one line");
        return Ok(None);
    }
    let ratio = rendered / single;
    if !ratio.is_finite() || ratio <= 0.0 {
        return Ok(None);
    }
    if ratio < MIN_LINE_HEIGHT_RATIO {
        return Err(SkeletonError::malformed_style(format!(
            "line height ratio {ratio} is below {MIN_LINE_HEIGHT_RATIO}"
        )));
    }
    Ok(Some(ratio))
}

#[cfg(test)]
#[path = "../../tests/unit/analyze/probe.rs"]
mod tests;
