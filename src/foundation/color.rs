use crate::foundation::error::{SkeletonError, SkeletonResult};
use serde::{Deserialize, Serialize};

/// Straight-alpha sRGB color with channels normalized to `0..=1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    /// Red channel.
    pub r: f64,
    /// Green channel.
    pub g: f64,
    /// Blue channel.
    pub b: f64,
    /// Alpha channel.
    pub a: f64,
}

impl Rgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);

    /// Build a color from normalized channels.
    pub const fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Black with the given alpha.
    pub const fn black_alpha(a: f64) -> Self {
        Self::rgba(0.0, 0.0, 0.0, a)
    }

    /// Parse a computed CSS color value.
    ///
    /// Accepts `transparent`, `#rgb`, `#rrggbb`, `#rrggbbaa`, and `rgb()`/`rgba()` in both the
    /// legacy comma syntax and the space syntax with an optional `/ alpha`.
    pub fn parse_css(s: &str) -> SkeletonResult<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("transparent") {
            return Ok(Self::TRANSPARENT);
        }
        if let Some(hex) = s.strip_prefix('#') {
            return parse_hex(hex).map_err(SkeletonError::malformed_style);
        }
        let lower = s.to_ascii_lowercase();
        let inner = lower
            .strip_prefix("rgba(")
            .or_else(|| lower.strip_prefix("rgb("))
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(|| SkeletonError::malformed_style(format!("unsupported color \"{s}\"")))?;
        parse_rgb_args(inner).map_err(SkeletonError::malformed_style)
    }

    /// Format as a CSS `rgba()` value.
    pub fn to_css(self) -> String {
        fn channel(x: f64) -> u8 {
            (x.clamp(0.0, 1.0) * 255.0).round() as u8
        }
        let a = (self.a.clamp(0.0, 1.0) * 1000.0).round() / 1000.0;
        format!(
            "rgba({}, {}, {}, {a})",
            channel(self.r),
            channel(self.g),
            channel(self.b)
        )
    }

    /// Return `true` when the alpha channel is zero.
    pub fn is_transparent(self) -> bool {
        self.a <= 0.0
    }

    /// Same color with a different alpha.
    pub fn with_alpha(self, a: f64) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Lower HSL saturation by `amount`, clamping at zero.
    pub fn desaturate(self, amount: f64) -> Self {
        let (h, s, l) = self.to_hsl();
        hsla_to_rgba(h, (s - amount).clamp(0.0, 1.0), l, self.a)
    }

    /// Replace HSL lightness.
    pub fn with_lightness(self, lightness: f64) -> Self {
        let (h, s, _) = self.to_hsl();
        hsla_to_rgba(h, s, lightness.clamp(0.0, 1.0), self.a)
    }

    /// Convert to `(hue_degrees, saturation, lightness)`.
    pub fn to_hsl(self) -> (f64, f64, f64) {
        let r = self.r.clamp(0.0, 1.0);
        let g = self.g.clamp(0.0, 1.0);
        let b = self.b.clamp(0.0, 1.0);
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;
        let d = max - min;
        if d == 0.0 {
            return (0.0, 0.0, l);
        }

        let s = if l > 0.5 {
            d / (2.0 - max - min)
        } else {
            d / (max + min)
        };
        let h = if max == r {
            (g - b) / d + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };
        (h * 60.0, s, l)
    }
}

impl Serialize for Rgba {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_css())
    }
}

impl<'de> Deserialize<'de> for Rgba {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Css(String),
            RgbaObj {
                r: f64,
                g: f64,
                b: f64,
                #[serde(default = "one")]
                a: f64,
            },
        }

        fn one() -> f64 {
            1.0
        }

        match Repr::deserialize(deserializer)? {
            Repr::Css(s) => Self::parse_css(&s).map_err(serde::de::Error::custom),
            Repr::RgbaObj { r, g, b, a } => Ok(Self::rgba(r, g, b, a)),
        }
    }
}

fn parse_hex(s: &str) -> Result<Rgba, String> {
    fn hex_byte(pair: &str) -> Result<u8, String> {
        u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex byte \"{pair}\""))
    }

    if !s.is_ascii() {
        return Err(format!("invalid hex color \"#{s}\""));
    }

    let (r, g, b, a) = match s.len() {
        3 => {
            let r = hex_byte(&s[0..1].repeat(2))?;
            let g = hex_byte(&s[1..2].repeat(2))?;
            let b = hex_byte(&s[2..3].repeat(2))?;
            (r, g, b, 255)
        }
        6 => (
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
            255,
        ),
        8 => (
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
            hex_byte(&s[6..8])?,
        ),
        _ => {
            return Err("hex color must be #RGB, #RRGGBB or #RRGGBBAA".to_owned());
        }
    };

    Ok(Rgba::rgba(
        f64::from(r) / 255.0,
        f64::from(g) / 255.0,
        f64::from(b) / 255.0,
        f64::from(a) / 255.0,
    ))
}

fn parse_rgb_args(inner: &str) -> Result<Rgba, String> {
    let (channels, alpha) = match inner.split_once('/') {
        Some((c, a)) => (c, Some(a.trim())),
        None => (inner, None),
    };
    let mut parts: Vec<&str> = channels
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|p| !p.is_empty())
        .collect();

    let alpha = match (alpha, parts.len()) {
        (Some(a), 3) => a,
        (None, 4) => parts.pop().unwrap_or("1"),
        (None, 3) => "1",
        _ => return Err(format!("rgb() needs 3 channels plus optional alpha, got \"{inner}\"")),
    };

    fn channel(v: &str) -> Result<f64, String> {
        let n = match v.strip_suffix('%') {
            Some(p) => p.parse::<f64>().map(|p| p / 100.0),
            None => v.parse::<f64>().map(|c| c / 255.0),
        };
        n.map(|n| n.clamp(0.0, 1.0))
            .map_err(|_| format!("invalid color channel \"{v}\""))
    }

    fn alpha_value(v: &str) -> Result<f64, String> {
        let n = match v.strip_suffix('%') {
            Some(p) => p.parse::<f64>().map(|p| p / 100.0),
            None => v.parse::<f64>(),
        };
        n.map(|n| n.clamp(0.0, 1.0))
            .map_err(|_| format!("invalid alpha \"{v}\""))
    }

    Ok(Rgba::rgba(
        channel(parts[0])?,
        channel(parts[1])?,
        channel(parts[2])?,
        alpha_value(alpha)?,
    ))
}

fn hsla_to_rgba(h: f64, s: f64, l: f64, a: f64) -> Rgba {
    // Standard HSL -> RGB conversion (sRGB space, normalized 0..1 inputs).
    let h = (h % 360.0 + 360.0) % 360.0 / 360.0;
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);

    if s == 0.0 {
        return Rgba::rgba(l, l, l, a);
    }

    fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
        if t < 0.0 {
            t += 1.0;
        }
        if t > 1.0 {
            t -= 1.0;
        }
        if t < 1.0 / 6.0 {
            return p + (q - p) * 6.0 * t;
        }
        if t < 1.0 / 2.0 {
            return q;
        }
        if t < 2.0 / 3.0 {
            return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
        }
        p
    }

    let q = if l < 0.5 {
        l * (1.0 + s)
    } else {
        l + s - l * s
    };
    let p = 2.0 * l - q;

    Rgba::rgba(
        hue_to_rgb(p, q, h + 1.0 / 3.0),
        hue_to_rgb(p, q, h),
        hue_to_rgb(p, q, h - 1.0 / 3.0),
        a,
    )
}
