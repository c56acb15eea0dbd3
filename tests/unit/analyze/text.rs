use super::*;

fn metrics(font_size_px: f64, ratio: Option<f64>, text_width_px: f64) -> TextMetrics {
    TextMetrics {
        font_size_px,
        line_height_ratio: ratio,
        text_width_px,
    }
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn single_line_is_vertically_centered() {
    let content = DomRect::new(0.0, 0.0, 200.0, 18.0);
    let lines = estimate_text_lines(&content, &metrics(14.0, Some(1.2), 80.0));
    assert_eq!(lines, vec![DomRect::new(2.0, 0.0, 80.0, 14.0)]);
}

#[test]
fn single_line_width_never_exceeds_content() {
    let content = DomRect::new(0.0, 0.0, 50.0, 18.0);
    let lines = estimate_text_lines(&content, &metrics(14.0, None, 80.0));
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].width, 50.0);
}

#[test]
fn two_font_sizes_is_the_multi_line_threshold() {
    assert!(!is_single_line(28.0, 14.0));
    assert!(is_single_line(27.0, 14.0));

    let content = DomRect::new(0.0, 0.0, 100.0, 27.0);
    assert_eq!(
        estimate_text_lines(&content, &metrics(14.0, Some(1.0), 150.0)).len(),
        1
    );
    let content = DomRect::new(0.0, 0.0, 100.0, 28.0);
    assert_eq!(
        estimate_text_lines(&content, &metrics(14.0, Some(1.0), 150.0)).len(),
        2
    );
}

#[test]
fn multi_line_last_line_fully_consumed() {
    let content = DomRect::new(0.0, 0.0, 100.0, 48.0);
    let lines = estimate_text_lines(&content, &metrics(14.0, Some(1.4), 220.0));

    assert_eq!(line_count(48.0, 14.0, 1.4), 2);
    assert_eq!(lines.len(), 2);
    assert!(close(lines[0].top, 5.6));
    assert!(close(lines[1].top, 29.6));
    assert_eq!(lines[0].width, 100.0);
    assert_eq!(lines[1].width, 0.0);
    assert!(lines.iter().all(|l| l.height == 14.0));
}

#[test]
fn multi_line_partial_last_line() {
    let content = DomRect::new(10.0, 20.0, 100.0, 48.0);
    let lines = estimate_text_lines(&content, &metrics(14.0, Some(1.4), 130.0));
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[1].width, 70.0);
    assert_eq!(lines[1].left, 20.0);
    assert!(close(lines[1].y, 10.0 + 24.0 + 5.6));
}

#[test]
fn last_line_width_is_clamped() {
    assert_eq!(last_line_width(3, 100.0, 50.0), 100.0);
    assert_eq!(last_line_width(2, 100.0, 500.0), 0.0);
    assert_eq!(last_line_width(2, 100.0, 160.0), 40.0);
}

#[test]
fn missing_ratio_forces_single_line() {
    let content = DomRect::new(0.0, 0.0, 100.0, 60.0);
    let lines = estimate_text_lines(&content, &metrics(14.0, None, 300.0));
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].top, 23.0);
}

#[test]
fn huge_ratio_with_zero_lines_falls_back_to_single_line() {
    let content = DomRect::new(0.0, 0.0, 100.0, 30.0);
    assert_eq!(line_count(30.0, 14.0, 3.0), 0);
    let lines = estimate_text_lines(&content, &metrics(14.0, Some(3.0), 40.0));
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].width, 40.0);
}

#[test]
fn tiny_ratio_is_capped_to_one_line_per_pixel() {
    assert_eq!(line_count(40.0, 14.0, 1e-300), 40);
    assert_eq!(line_count(40.0, 14.0, f64::MIN_POSITIVE), 40);

    let content = DomRect::new(0.0, 0.0, 100.0, 40.0);
    let lines = estimate_text_lines(&content, &metrics(14.0, Some(1e-300), 10.0));
    assert_eq!(lines.len(), 40);
}
