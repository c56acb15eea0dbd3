//! Line geometry for a text container, backed out of two measurable numbers: the container's
//! rendered height and the pixel width of its text laid out on one line.
//!
//! The result is an estimate. Actual break positions are unknown, so every line but the last is
//! assumed full-width and the last line gets whatever the formula leaves over.

use crate::foundation::core::DomRect;

/// Font-derived inputs of the estimate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextMetrics {
    /// Font size in pixels.
    pub font_size_px: f64,
    /// Effective line height as a multiple of the font size; `None` forces a single line.
    pub line_height_ratio: Option<f64>,
    /// Width of the whole text rendered without wrapping.
    pub text_width_px: f64,
}

/// Whether a content box of `height` holds a single line of `font_size_px` text.
pub fn is_single_line(height: f64, font_size_px: f64) -> bool {
    height < 2.0 * font_size_px
}

// A ratio probed from the same box divides back to a whole number only up to rounding.
const LINE_COUNT_EPSILON: f64 = 1e-6;

/// Number of whole lines that fit in `height`.
///
/// Capped at one line per pixel of `height`, so a degenerate ratio cannot produce more lines
/// than the box can show.
pub fn line_count(height: f64, font_size_px: f64, line_height_ratio: f64) -> usize {
    let n = (height / line_height_ratio / font_size_px + LINE_COUNT_EPSILON).floor();
    if !height.is_finite() || n.is_nan() || n <= 0.0 {
        return 0;
    }
    n.min(height.floor().max(1.0)) as usize
}

/// Width of the last of `line_count` lines, clamped to `0..=content_width`.
pub fn last_line_width(line_count: usize, content_width: f64, text_width_px: f64) -> f64 {
    let w = (line_count as f64 * content_width - text_width_px).min(content_width);
    w.max(0.0)
}

/// One rect per estimated visual line, in the coordinate space of `content`.
pub fn estimate_text_lines(content: &DomRect, metrics: &TextMetrics) -> Vec<DomRect> {
    let fs = metrics.font_size_px;
    let multi = match metrics.line_height_ratio {
        Some(ratio) if !is_single_line(content.height, fs) => {
            let n = line_count(content.height, fs, ratio);
            (n > 0).then_some((n, ratio))
        }
        _ => None,
    };

    let Some((n, ratio)) = multi else {
        let padding_y = (content.height - fs) / 2.0;
        return vec![DomRect {
            top: content.top + padding_y,
            left: content.left,
            x: content.x,
            y: content.y + padding_y,
            width: metrics.text_width_px.min(content.width).max(0.0),
            height: fs,
        }];
    };

    let line_padding_y = fs * (ratio - 1.0);
    let advance = content.height / n as f64;
    let last_width = last_line_width(n, content.width, metrics.text_width_px);
    tracing::debug!(lines = n, ratio, last_width, "multi-line text");

    (0..n)
        .map(|i| {
            let offset = advance * i as f64 + line_padding_y;
            DomRect {
                top: content.top + offset,
                left: content.left,
                x: content.x,
                y: content.y + offset,
                width: if i + 1 == n { last_width } else { content.width },
                height: fs,
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/analyze/text.rs"]
mod tests;
