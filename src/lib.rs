//! Skeleton-layout infers loading-skeleton placeholders from an already rendered tree.
//!
//! Given a root element, it returns a flat list of rectangles, relative to that root, that
//! approximate the page's silhouette: one block per decorated element or image, and one bar per
//! estimated line of text.
//!
//! # Pipeline overview
//!
//! 1. **Pre-pass**: text that shares its parent with elements gets its own `span`
//! 2. **Blocks**: decorated elements and images become tinted or neutral blocks
//! 3. **Text**: each text container is probed for its line height and split into line bars
//! 4. **Merge**: same-row neighbours with a small gap are fused
//!
//! The tree is reached through [`RenderHost`]. [`MemoryHost`] replays a recorded JSON snapshot;
//! unwrapped text is measured with a [`TextMeasure`] such as [`ParleyMeasure`].
//!
//! # Getting started
//!
//! ```no_run
//! use skeleton_layout::{AdvanceMeasure, AnalyzeOptions, MemoryHost, analyze};
//!
//! let mut host = MemoryHost::from_path("page.json".as_ref())?;
//! let root = host.root();
//! let skeleton = analyze(&mut host, &mut AdvanceMeasure::default(), root, &AnalyzeOptions::default())?;
//! for item in skeleton.visible_items() {
//!     println!("{:?} {} {} {} {}", item.kind, item.left, item.top, item.width, item.height);
//! }
//! # Ok::<(), skeleton_layout::SkeletonError>(())
//! ```
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod analyze;
mod config;
mod foundation;
mod host;
mod walk;

pub use analyze::builder::{ItemKind, SkeletonBuilder, SkeletonItem, merge_adjacent};
pub use analyze::classify::{BlockFill, block_fill, decorative_blocks, is_decorative, text_runs};
pub use analyze::geometry::Normalizer;
pub use analyze::prepass::{has_visible_text, wrap_bare_text};
pub use analyze::probe::{MIN_LINE_HEIGHT_RATIO, MeasurementDuplicate, probe_line_height};
pub use analyze::text::{
    TextMetrics, estimate_text_lines, is_single_line, last_line_width, line_count,
};
pub use analyze::{Diagnostic, Diagnostics, Skeleton, analyze};
pub use config::{AnalyzeOptions, MergeOrder, Palette};
pub use foundation::color::Rgba;
pub use foundation::core::{DomRect, Edges, NodeId, Rect, Vec2};
pub use foundation::error::{SkeletonError, SkeletonResult};
pub use host::measure::{AdvanceMeasure, ParleyMeasure};
pub use host::memory::{MemoryHost, NodeDef};
pub use host::style::{
    ComputedStyle, NORMAL_LINE_HEIGHT, font_size_from_shorthand, parse_padding, parse_px,
};
pub use host::{NodeKind, RenderHost, TextMeasure};
pub use walk::{PreorderWalk, Visit, walk};
