use crate::foundation::error::{SkeletonError, SkeletonResult};
use crate::host::TextMeasure;

/// Estimates width as `chars * font_size * advance_em`.
///
/// Useful for recorded snapshots and tests where the page fonts are unavailable. Whitespace
/// runs count as one space, as they collapse when rendered.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AdvanceMeasure {
    /// Average glyph advance as a fraction of the font size.
    pub advance_em: f64,
}

impl Default for AdvanceMeasure {
    fn default() -> Self {
        Self { advance_em: 0.5 }
    }
}

impl AdvanceMeasure {
    /// Measure with a custom average advance.
    pub fn new(advance_em: f64) -> SkeletonResult<Self> {
        if !advance_em.is_finite() || advance_em <= 0.0 {
            return Err(SkeletonError::config("advance_em must be finite and > 0"));
        }
        Ok(Self { advance_em })
    }
}

impl TextMeasure for AdvanceMeasure {
    fn text_width(&mut self, _font: &str, font_size_px: f64, text: &str) -> SkeletonResult<f64> {
        let glyphs = text.split_whitespace().map(|w| w.chars().count()).sum::<usize>()
            + text.split_whitespace().count().saturating_sub(1);
        Ok(glyphs as f64 * font_size_px * self.advance_em)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct MeasureBrush;

/// Shapes text with Parley against one explicitly loaded font.
///
/// The `font` shorthand only contributes its size; the family always resolves to the loaded
/// font since no system font database is consulted. Whitespace runs, newlines included, are
/// collapsed to one space before shaping so the text lays out on a single line.
pub struct ParleyMeasure {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<MeasureBrush>,
    family_name: String,
}

impl std::fmt::Debug for ParleyMeasure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParleyMeasure")
            .field("family_name", &self.family_name)
            .finish_non_exhaustive()
    }
}

impl ParleyMeasure {
    /// Register `font_bytes` (TTF/OTF) and measure with its first family.
    pub fn from_font_bytes(font_bytes: &[u8]) -> SkeletonResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.to_vec()), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| SkeletonError::config("no font families registered from font bytes"))?;
        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| SkeletonError::config("registered font family has no name"))?
            .to_string();

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family_name,
        })
    }

    /// Family name resolved from the loaded font.
    pub fn family_name(&self) -> &str {
        &self.family_name
    }
}

impl TextMeasure for ParleyMeasure {
    fn text_width(&mut self, font: &str, font_size_px: f64, text: &str) -> SkeletonResult<f64> {
        let size = crate::host::style::font_size_from_shorthand(font).unwrap_or(font_size_px);
        if !size.is_finite() || size <= 0.0 {
            return Err(SkeletonError::malformed_style(format!(
                "font size for \"{font}\" must be finite and > 0"
            )));
        }

        let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
        if collapsed.is_empty() {
            return Ok(0.0);
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, &collapsed, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size as f32));
        builder.push_default(parley::style::StyleProperty::Brush(MeasureBrush));

        let mut layout: parley::Layout<MeasureBrush> = builder.build(&collapsed);
        layout.break_all_lines(None);

        let width = layout
            .lines()
            .map(|line| f64::from(line.metrics().advance))
            .fold(0.0, f64::max);
        Ok(width)
    }
}
