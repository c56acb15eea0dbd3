use super::*;

fn text_style(font_size: &str, line_height: &str) -> ComputedStyle {
    ComputedStyle {
        font_size: font_size.to_owned(),
        line_height: line_height.to_owned(),
        ..ComputedStyle::default()
    }
}

#[test]
fn loads_snapshot_json() {
    let host = MemoryHost::from_json(
        r#"{
            "root": {
                "rect": {"top": 0, "left": 0, "width": 300, "height": 200},
                "children": [
                    {"tag": "p", "rect": {"top": 10, "left": 10, "width": 100, "height": 20},
                     "children": [{"text": "hello"}]},
                    {"tag": "IMG", "rect": {"top": 40, "left": 10, "width": 50, "height": 50}}
                ]
            }
        }"#,
    )
    .unwrap();

    let root = host.root();
    let kids = host.children(root);
    assert_eq!(kids.len(), 2);
    assert_eq!(
        host.kind(kids[0]).unwrap(),
        NodeKind::Element {
            tag: "p".to_owned()
        }
    );
    assert!(host.kind(kids[1]).unwrap().is_image());
    assert_eq!(host.text_content(root), "hello");
    assert_eq!(host.parent(kids[0]), Some(root));
}

#[test]
fn snapshot_root_must_be_element() {
    let err = MemoryHost::from_json(r#"{"root": {"text": "x"}}"#).unwrap_err();
    assert!(matches!(err, SkeletonError::InvalidRoot(_)));
}

#[test]
fn wrap_replaces_text_in_place() {
    let mut host = MemoryHost::new(
        DomRect::new(0.0, 0.0, 200.0, 100.0),
        ComputedStyle {
            padding: "5px".to_owned(),
            font_size: "12px".to_owned(),
            ..ComputedStyle::default()
        },
    );
    let root = host.root();
    let before = host
        .append_element(root, "b", DomRect::new(5.0, 5.0, 20.0, 14.0), ComputedStyle::default())
        .unwrap();
    let text = host.append_text(root, "tail").unwrap();

    let span = host.wrap_in_container(text).unwrap();
    assert_eq!(host.children(root), vec![before, span]);
    assert_eq!(host.children(span), vec![text]);
    assert_eq!(host.parent(text), Some(span));
    assert_eq!(
        host.bounding_box(span).unwrap(),
        DomRect::new(5.0, 5.0, 190.0, 90.0)
    );
    assert_eq!(host.computed_style(span).unwrap().font_size, "12px");
    assert!(host.wrap_in_container(span).is_err());
}

#[test]
fn duplicate_replace_restore_roundtrip() {
    let mut host = MemoryHost::new(DomRect::new(0.0, 0.0, 100.0, 100.0), ComputedStyle::default());
    let root = host.root();
    let p = host
        .append_element(root, "p", DomRect::new(0.0, 0.0, 100.0, 40.0), text_style("10px", "2"))
        .unwrap();
    host.append_text(p, "abc").unwrap();
    let before = host.to_def(root).unwrap();

    let dup = host.duplicate(p).unwrap();
    assert_eq!(host.parent(dup), None);
    assert_eq!(host.text_content(dup), "abc");

    host.replace(p, dup).unwrap();
    assert_eq!(host.children(root), vec![dup]);
    assert_eq!(host.parent(p), None);

    host.set_line_height(dup, "1").unwrap();
    assert_eq!(host.bounding_box(dup).unwrap().height, 20.0);

    host.replace(dup, p).unwrap();
    host.discard(dup);
    assert!(!host.contains(dup));
    assert_eq!(host.to_def(root).unwrap(), before);
}

#[test]
fn replace_rejects_attached_replacement() {
    let mut host = MemoryHost::new(DomRect::new(0.0, 0.0, 10.0, 10.0), ComputedStyle::default());
    let root = host.root();
    let a = host
        .append_element(root, "a", DomRect::default(), ComputedStyle::default())
        .unwrap();
    let b = host
        .append_element(root, "b", DomRect::default(), ComputedStyle::default())
        .unwrap();
    assert!(matches!(host.replace(a, b), Err(SkeletonError::Host(_))));
}

#[test]
fn relayout_keeps_padding() {
    let mut host = MemoryHost::new(DomRect::new(0.0, 0.0, 100.0, 100.0), ComputedStyle::default());
    let root = host.root();
    let p = host
        .append_element(
            root,
            "p",
            DomRect::new(0.0, 0.0, 100.0, 64.0),
            ComputedStyle {
                padding: "4px 0px".to_owned(),
                ..text_style("14px", "2")
            },
        )
        .unwrap();
    host.set_line_height(p, "1").unwrap();
    assert_eq!(host.bounding_box(p).unwrap().height, 2.0 * 14.0 + 8.0);
}

#[test]
fn root_hangs_under_a_hidden_document() {
    let mut host = MemoryHost::new(DomRect::new(0.0, 0.0, 50.0, 40.0), text_style("10px", "2"));
    let root = host.root();
    let doc = host.document();
    host.append_text(root, "abc").unwrap();
    let before = host.to_def(root).unwrap();

    assert_eq!(host.parent(root), Some(doc));
    assert_eq!(host.children(doc), vec![root]);

    let dup = host.duplicate(root).unwrap();
    host.replace(root, dup).unwrap();
    assert_eq!(host.children(doc), vec![dup]);
    host.replace(dup, root).unwrap();
    host.discard(dup);

    assert_eq!(host.children(doc), vec![root]);
    assert_eq!(host.to_def(root).unwrap(), before);
}

#[test]
fn discarding_the_newest_subtree_reclaims_its_slots() {
    let mut host = MemoryHost::new(DomRect::new(0.0, 0.0, 100.0, 100.0), ComputedStyle::default());
    let root = host.root();
    let p = host
        .append_element(root, "p", DomRect::new(0.0, 0.0, 100.0, 40.0), text_style("10px", "2"))
        .unwrap();
    host.append_text(p, "abc").unwrap();
    let slots = host.slot_count();

    let dup = host.duplicate(p).unwrap();
    assert_eq!(host.slot_count(), slots + 2);
    host.discard(dup);
    assert_eq!(host.slot_count(), slots);
    assert!(!host.contains(dup));
}
