pub use kurbo::{Rect, Vec2};

/// Opaque handle to one node of a host render tree.
///
/// Hosts issue these; the engine never interprets the raw value.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct NodeId(pub u32);

/// Bounding box in the shape a browser reports it.
///
/// `x`/`y` mirror `left`/`top` for boxes straight out of layout, but are carried separately
/// because hosts may report them independently.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct DomRect {
    /// Top edge.
    pub top: f64,
    /// Left edge.
    pub left: f64,
    /// Horizontal origin.
    pub x: f64,
    /// Vertical origin.
    pub y: f64,
    /// Box width.
    pub width: f64,
    /// Box height.
    pub height: f64,
}

impl DomRect {
    /// Build a rect whose `x`/`y` equal `left`/`top`.
    pub fn new(top: f64, left: f64, width: f64, height: f64) -> Self {
        Self {
            top,
            left,
            x: left,
            y: top,
            width,
            height,
        }
    }

    /// Right edge.
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Shift every positional field by `delta`; size is unchanged.
    pub fn translate(self, delta: Vec2) -> Self {
        Self {
            top: self.top + delta.y,
            left: self.left + delta.x,
            x: self.x + delta.x,
            y: self.y + delta.y,
            ..self
        }
    }

    /// Express this rect relative to `origin`'s top-left corner.
    pub fn relative_to(self, origin: &DomRect) -> Self {
        Self {
            top: self.top - origin.top,
            left: self.left - origin.left,
            x: self.x - origin.x,
            y: self.y - origin.y,
            ..self
        }
    }

    /// Remove `padding` from every side, clamping the size at zero.
    pub fn inset(self, padding: &Edges) -> Self {
        Self {
            top: self.top + padding.top,
            left: self.left + padding.left,
            x: self.x + padding.left,
            y: self.y + padding.top,
            width: (self.width - padding.left - padding.right).max(0.0),
            height: (self.height - padding.top - padding.bottom).max(0.0),
        }
    }

    /// Horizontal/vertical extent as a kurbo rect.
    pub fn to_kurbo(self) -> Rect {
        Rect::new(self.left, self.top, self.right(), self.bottom())
    }
}

impl<'de> serde::Deserialize<'de> for DomRect {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        struct Repr {
            top: f64,
            left: f64,
            #[serde(default)]
            x: Option<f64>,
            #[serde(default)]
            y: Option<f64>,
            width: f64,
            height: f64,
        }

        let r = Repr::deserialize(deserializer)?;
        Ok(Self {
            top: r.top,
            left: r.left,
            x: r.x.unwrap_or(r.left),
            y: r.y.unwrap_or(r.top),
            width: r.width,
            height: r.height,
        })
    }
}

/// Four-sided box edges, in CSS order.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Edges {
    /// Top edge.
    pub top: f64,
    /// Right edge.
    pub right: f64,
    /// Bottom edge.
    pub bottom: f64,
    /// Left edge.
    pub left: f64,
}

impl Edges {
    /// Same value on every side.
    pub fn uniform(v: f64) -> Self {
        Self {
            top: v,
            right: v,
            bottom: v,
            left: v,
        }
    }

    /// Sum of the top and bottom edges.
    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }
}
