use super::*;
use crate::foundation::core::DomRect;
use crate::foundation::error::SkeletonError;
use crate::host::NodeKind;
use crate::host::memory::MemoryHost;
use crate::host::style::ComputedStyle;

fn text_box(height: f64, line_height: &str) -> (MemoryHost, NodeId) {
    let mut host = MemoryHost::new(DomRect::new(0.0, 0.0, 300.0, 300.0), ComputedStyle::default());
    let root = host.root();
    let p = host
        .append_element(
            root,
            "p",
            DomRect::new(0.0, 0.0, 100.0, height),
            ComputedStyle {
                font_size: "14px".to_owned(),
                line_height: line_height.to_owned(),
                ..ComputedStyle::default()
            },
        )
        .unwrap();
    host.append_text(p, "some text").unwrap();
    (host, p)
}

/// Delegates to a [`MemoryHost`] but refuses every `line-height` override.
struct StubbornHost(MemoryHost);

impl RenderHost for StubbornHost {
    fn contains(&self, node: NodeId) -> bool {
        self.0.contains(node)
    }
    fn kind(&self, node: NodeId) -> SkeletonResult<NodeKind> {
        self.0.kind(node)
    }
    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.0.parent(node)
    }
    fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.0.children(node)
    }
    fn bounding_box(&self, node: NodeId) -> SkeletonResult<DomRect> {
        self.0.bounding_box(node)
    }
    fn computed_style(&self, node: NodeId) -> SkeletonResult<ComputedStyle> {
        self.0.computed_style(node)
    }
    fn text_content(&self, node: NodeId) -> String {
        self.0.text_content(node)
    }
    fn wrap_in_container(&mut self, node: NodeId) -> SkeletonResult<NodeId> {
        self.0.wrap_in_container(node)
    }
    fn duplicate(&mut self, node: NodeId) -> SkeletonResult<NodeId> {
        self.0.duplicate(node)
    }
    fn replace(&mut self, current: NodeId, replacement: NodeId) -> SkeletonResult<()> {
        self.0.replace(current, replacement)
    }
    fn set_line_height(&mut self, _node: NodeId, _value: &str) -> SkeletonResult<()> {
        Err(SkeletonError::host("line-height is locked"))
    }
    fn discard(&mut self, node: NodeId) {
        self.0.discard(node)
    }
}

#[test]
fn normal_line_height_probes_to_its_factor() {
    let (mut host, p) = text_box(33.6, "normal");
    let ratio = probe_line_height(&mut host, p).unwrap().unwrap();
    assert!((ratio - 1.2).abs() < 1e-9);
}

#[test]
fn explicit_line_height_is_recovered() {
    let (mut host, p) = text_box(48.0, "20px");
    let ratio = probe_line_height(&mut host, p).unwrap().unwrap();
    assert!((ratio - 48.0 / 28.0).abs() < 1e-9);
}

#[test]
fn probe_leaves_the_tree_as_it_was() {
    let (mut host, p) = text_box(33.6, "normal");
    let root = host.root();
    let before = host.to_def(root).unwrap();
    let live = host.live_nodes();

    probe_line_height(&mut host, p).unwrap();

    assert_eq!(host.to_def(root).unwrap(), before);
    assert_eq!(host.live_nodes(), live);
    assert_eq!(host.parent(p), Some(root));
}

#[test]
fn failed_override_still_restores_the_original() {
    let (inner, p) = text_box(33.6, "normal");
    let mut host = StubbornHost(inner);
    let root = host.0.root();
    let before = host.0.to_def(root).unwrap();
    let live = host.0.live_nodes();

    let err = probe_line_height(&mut host, p).unwrap_err();
    assert!(matches!(err, SkeletonError::Host(_)));

    assert_eq!(host.children(root), vec![p]);
    assert_eq!(host.0.to_def(root).unwrap(), before);
    assert_eq!(host.0.live_nodes(), live);
}

#[test]
fn guard_swaps_the_duplicate_in_place() {
    let (mut host, p) = text_box(20.0, "normal");
    let root = host.root();
    {
        let probe = MeasurementDuplicate::acquire(&mut host, p).unwrap();
        let dup = probe.node();
        assert_ne!(dup, p);
        assert_eq!(probe.height().unwrap(), 20.0);
    }
    assert_eq!(host.children(root), vec![p]);
}

#[test]
fn zero_height_probe_means_single_line() {
    let (mut host, p) = text_box(0.0, "normal");
    assert_eq!(probe_line_height(&mut host, p).unwrap(), None);
}

#[test]
fn vanishing_line_height_is_rejected_after_restoring() {
    let (mut host, p) = text_box(40.0, "1e-300");
    let root = host.root();
    let before = host.to_def(root).unwrap();

    let err = probe_line_height(&mut host, p).unwrap_err();
    assert!(matches!(err, SkeletonError::MalformedStyle(_)));
    assert_eq!(host.to_def(root).unwrap(), before);
}
