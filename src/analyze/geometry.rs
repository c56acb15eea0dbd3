use crate::foundation::core::{DomRect, Edges};
use crate::foundation::error::SkeletonError;
use crate::host::style::ComputedStyle;

/// Maps host boxes into the analysis root's coordinate space.
///
/// The origin is captured once per analysis; every placeholder is expressed against it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Normalizer {
    origin: DomRect,
}

impl Normalizer {
    /// Use `origin` (the root's bounding box) as the coordinate origin.
    pub fn new(origin: DomRect) -> Self {
        Self { origin }
    }

    /// The captured origin.
    pub fn origin(&self) -> DomRect {
        self.origin
    }

    /// `rect` relative to the origin.
    pub fn normalize(&self, rect: DomRect) -> DomRect {
        rect.relative_to(&self.origin)
    }

    /// Root-relative content box of an element: its border box minus padding.
    ///
    /// Unparsable padding degrades to zero padding; the parse error is handed back so the caller
    /// can report it.
    pub fn content_box(
        &self,
        rect: DomRect,
        style: &ComputedStyle,
    ) -> (DomRect, Option<SkeletonError>) {
        let (padding, error) = match style.padding_edges() {
            Ok(p) => (p, None),
            Err(e) => (Edges::default(), Some(e)),
        };
        (self.normalize(rect.inset(&padding)), error)
    }
}
