use crate::foundation::core::Edges;
use crate::foundation::error::{SkeletonError, SkeletonResult};

/// Computed style subset the engine reads, as the host reports it (CSS strings).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ComputedStyle {
    /// `background-color`.
    pub background_color: String,
    /// `background-image`.
    pub background_image: String,
    /// `border-color`; empty when the host does not report one.
    pub border_color: String,
    /// `padding` shorthand, e.g. `"4px 8px"`.
    pub padding: String,
    /// `font-size`, e.g. `"14px"`.
    pub font_size: String,
    /// `line-height`: `normal`, a bare multiplier, `px` or `%`.
    pub line_height: String,
    /// `font` shorthand passed to text measurement.
    pub font: String,
}

impl Default for ComputedStyle {
    fn default() -> Self {
        Self {
            background_color: "rgba(0, 0, 0, 0)".to_owned(),
            background_image: "none".to_owned(),
            border_color: "rgb(0, 0, 0)".to_owned(),
            padding: "0px".to_owned(),
            font_size: "16px".to_owned(),
            line_height: "normal".to_owned(),
            font: "16px sans-serif".to_owned(),
        }
    }
}

/// Multiplier browsers commonly resolve `line-height: normal` to.
pub const NORMAL_LINE_HEIGHT: f64 = 1.2;

impl ComputedStyle {
    /// Parsed [`ComputedStyle::padding`].
    pub fn padding_edges(&self) -> SkeletonResult<Edges> {
        parse_padding(&self.padding)
    }

    /// Parsed [`ComputedStyle::font_size`] in pixels.
    pub fn font_size_px(&self) -> SkeletonResult<f64> {
        let v = parse_px(&self.font_size)?;
        if v <= 0.0 {
            return Err(SkeletonError::malformed_style(format!(
                "font-size must be > 0, got \"{}\"",
                self.font_size
            )));
        }
        Ok(v)
    }

    /// `line-height` resolved to a multiplier of the font size.
    ///
    /// Only used by hosts that simulate layout; the engine itself never reads `line-height`
    /// directly and probes it instead.
    pub fn line_height_factor(&self) -> SkeletonResult<f64> {
        let raw = self.line_height.trim();
        if raw.is_empty() || raw.eq_ignore_ascii_case("normal") {
            return Ok(NORMAL_LINE_HEIGHT);
        }
        if let Some(pct) = raw.strip_suffix('%') {
            return parse_number(pct).map(|p| p / 100.0);
        }
        if raw.ends_with("px") {
            return Ok(parse_px(raw)? / self.font_size_px()?);
        }
        parse_number(raw)
    }
}

/// Parse a 1–4 component padding shorthand with CSS side expansion.
pub fn parse_padding(s: &str) -> SkeletonResult<Edges> {
    let values = s
        .split_whitespace()
        .map(parse_px)
        .collect::<SkeletonResult<Vec<_>>>()
        .map_err(|e| SkeletonError::malformed_style(format!("padding \"{s}\": {e}")))?;

    match values.as_slice() {
        [all] => Ok(Edges::uniform(*all)),
        [v, h] => Ok(Edges {
            top: *v,
            right: *h,
            bottom: *v,
            left: *h,
        }),
        [top, h, bottom] => Ok(Edges {
            top: *top,
            right: *h,
            bottom: *bottom,
            left: *h,
        }),
        [top, right, bottom, left] => Ok(Edges {
            top: *top,
            right: *right,
            bottom: *bottom,
            left: *left,
        }),
        _ => Err(SkeletonError::malformed_style(format!(
            "padding \"{s}\" must have 1 to 4 components"
        ))),
    }
}

/// Parse a pixel length (`"12px"`, `"12.5px"`, or a unitless `"0"`).
pub fn parse_px(s: &str) -> SkeletonResult<f64> {
    let s = s.trim();
    let num = s.strip_suffix("px").unwrap_or(s);
    parse_number(num).map_err(|_| SkeletonError::malformed_style(format!("invalid length \"{s}\"")))
}

fn parse_number(s: &str) -> SkeletonResult<f64> {
    let v = s
        .trim()
        .parse::<f64>()
        .map_err(|_| SkeletonError::malformed_style(format!("invalid number \"{s}\"")))?;
    if !v.is_finite() {
        return Err(SkeletonError::malformed_style(format!(
            "non-finite number \"{s}\""
        )));
    }
    Ok(v)
}

/// Font size embedded in a `font` shorthand (`"italic 700 14px/1.4 Inter, sans-serif"`).
pub fn font_size_from_shorthand(font: &str) -> Option<f64> {
    font.split_whitespace().find_map(|token| {
        let size = token.split('/').next()?;
        let num = size.strip_suffix("px")?;
        num.parse::<f64>().ok().filter(|v| v.is_finite() && *v > 0.0)
    })
}

#[cfg(test)]
#[path = "../../tests/unit/host/style.rs"]
mod tests;
