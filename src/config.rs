use std::path::Path;

use crate::foundation::color::Rgba;
use crate::foundation::error::{SkeletonError, SkeletonResult};

/// How the merge pass chooses which item is compared with which.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeOrder {
    /// Compare each item with its predecessor in emission order.
    #[default]
    Sequence,
    /// Stable-sort items by `(top, left)` first, so same-row items become neighbours.
    RowSorted,
}

/// Fill colors handed out to placeholders.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Palette {
    /// Images without a background color.
    pub image: Rgba,
    /// Decorated blocks whose own color cannot be reused.
    pub neutral: Rgba,
    /// Text lines.
    pub text: Rgba,
    /// Alpha applied to a block's own background before it is toned down.
    pub tint_alpha: f64,
    /// Saturation removed from a block's own background.
    pub tint_desaturate: f64,
    /// Lightness assigned to a block's own background.
    pub tint_lightness: f64,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            image: Rgba::black_alpha(0.08),
            neutral: Rgba::black_alpha(0.04),
            text: Rgba::black_alpha(0.08),
            tint_alpha: 0.8,
            tint_desaturate: 0.5,
            tint_lightness: 0.9,
        }
    }
}

impl Palette {
    /// Tone a block's own background down into a placeholder fill.
    pub fn tint(&self, background: Rgba) -> Rgba {
        background
            .with_alpha(self.tint_alpha)
            .desaturate(self.tint_desaturate)
            .with_lightness(self.tint_lightness)
    }
}

/// Tunables for [`crate::analyze`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AnalyzeOptions {
    /// Horizontal gap in pixels below which same-row neighbours merge.
    pub merge_gap_px: f64,
    /// Pairing strategy of the merge pass.
    pub merge_order: MergeOrder,
    /// Remove absorbed items instead of leaving them transparent in place.
    pub drop_absorbed: bool,
    /// Fill colors.
    pub palette: Palette,
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self {
            merge_gap_px: 4.0,
            merge_order: MergeOrder::Sequence,
            drop_absorbed: false,
            palette: Palette::default(),
        }
    }
}

impl AnalyzeOptions {
    /// Parse options from JSON; missing fields take their defaults.
    pub fn from_json(s: &str) -> SkeletonResult<Self> {
        let opts: Self = serde_json::from_str(s)?;
        opts.validate()?;
        Ok(opts)
    }

    /// Load options from a JSON file.
    pub fn from_path(path: &Path) -> SkeletonResult<Self> {
        let s = std::fs::read_to_string(path).map_err(|e| {
            SkeletonError::Other(
                anyhow::Error::new(e).context(format!("read options '{}'", path.display())),
            )
        })?;
        Self::from_json(&s)
    }

    /// Check ranges.
    pub fn validate(&self) -> SkeletonResult<()> {
        if !self.merge_gap_px.is_finite() {
            return Err(SkeletonError::config("merge_gap_px must be finite"));
        }
        let p = &self.palette;
        for (name, v) in [
            ("tint_alpha", p.tint_alpha),
            ("tint_desaturate", p.tint_desaturate),
            ("tint_lightness", p.tint_lightness),
        ] {
            if !(0.0..=1.0).contains(&v) {
                return Err(SkeletonError::config(format!(
                    "palette.{name} must be within 0..=1, got {v}"
                )));
            }
        }
        Ok(())
    }
}
