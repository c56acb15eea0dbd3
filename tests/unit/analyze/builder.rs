use super::*;

fn line(top: f64, left: f64, width: f64) -> SkeletonItem {
    SkeletonItem::new(
        DomRect::new(top, left, width, 14.0),
        ItemKind::TextLine,
        Rgba::black_alpha(0.08),
        NodeId(1),
    )
}

#[test]
fn builder_emits_blocks_before_lines() {
    let mut b = SkeletonBuilder::new();
    b.push_text_lines([DomRect::new(0.0, 0.0, 10.0, 14.0)], Rgba::black_alpha(0.08), NodeId(3));
    b.push_block(
        DomRect::new(50.0, 0.0, 10.0, 10.0),
        ItemKind::Block,
        Rgba::black_alpha(0.04),
        NodeId(2),
    );
    assert_eq!(b.len(), 2);

    let items = b.finish();
    assert_eq!(items[0].kind, ItemKind::Block);
    assert_eq!(items[0].source, NodeId(2));
    assert_eq!(items[1].kind, ItemKind::TextLine);
}

#[test]
fn three_px_gap_merges_into_the_later_item() {
    let mut items = vec![line(0.0, 0.0, 50.0), line(0.0, 53.0, 40.0)];
    let absorbed = merge_adjacent(&mut items, &AnalyzeOptions::default());

    assert_eq!(absorbed, 1);
    assert!(items[0].absorbed);
    assert!(items[0].color.is_transparent());
    assert_eq!(items[1].left, 0.0);
    assert_eq!(items[1].x, 0.0);
    assert_eq!(items[1].width, 93.0);
    assert!(items[1].is_visible());
}

#[test]
fn five_px_gap_does_not_merge() {
    let mut items = vec![line(0.0, 0.0, 50.0), line(0.0, 55.0, 40.0)];
    assert_eq!(merge_adjacent(&mut items, &AnalyzeOptions::default()), 0);
    assert_eq!(items[1].width, 40.0);
    assert!(items[0].is_visible());
}

#[test]
fn different_rows_never_merge() {
    let mut items = vec![line(0.0, 0.0, 50.0), line(1.0, 51.0, 40.0)];
    assert_eq!(merge_adjacent(&mut items, &AnalyzeOptions::default()), 0);
}

#[test]
fn overlapping_items_merge_to_the_union() {
    let mut items = vec![line(0.0, 20.0, 50.0), line(0.0, 10.0, 20.0)];
    merge_adjacent(&mut items, &AnalyzeOptions::default());
    assert_eq!(items[1].left, 10.0);
    assert_eq!(items[1].width, 60.0);
}

#[test]
fn chains_fold_into_the_last_item() {
    let mut items = vec![
        line(0.0, 0.0, 10.0),
        line(0.0, 12.0, 10.0),
        line(0.0, 24.0, 10.0),
    ];
    assert_eq!(merge_adjacent(&mut items, &AnalyzeOptions::default()), 2);
    assert_eq!(items.iter().filter(|i| i.is_visible()).count(), 1);
    assert_eq!(items[2].left, 0.0);
    assert_eq!(items[2].width, 34.0);
}

#[test]
fn sequence_order_skips_interleaved_rows() {
    let mut items = vec![
        line(0.0, 0.0, 50.0),
        line(20.0, 0.0, 50.0),
        line(0.0, 52.0, 30.0),
    ];
    assert_eq!(merge_adjacent(&mut items, &AnalyzeOptions::default()), 0);

    let opts = AnalyzeOptions {
        merge_order: MergeOrder::RowSorted,
        ..AnalyzeOptions::default()
    };
    assert_eq!(merge_adjacent(&mut items, &opts), 1);
    assert_eq!(items[1].top, 0.0);
    assert_eq!(items[1].width, 82.0);
}

#[test]
fn drop_absorbed_removes_swallowed_items() {
    let opts = AnalyzeOptions {
        drop_absorbed: true,
        ..AnalyzeOptions::default()
    };
    let mut items = vec![line(0.0, 0.0, 50.0), line(0.0, 52.0, 40.0)];
    merge_adjacent(&mut items, &opts);
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].width, 92.0);
}

#[test]
fn absorbed_flag_is_omitted_when_false() {
    let json = serde_json::to_value(line(0.0, 0.0, 1.0)).unwrap();
    assert!(json.get("absorbed").is_none());
    assert_eq!(json["kind"], "text_line");
}
