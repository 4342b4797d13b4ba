use invaders::geometry::{intersects, Rect};

#[test]
fn overlapping_rects_intersect() {
    let a = Rect::new(0.0, 0.0, 10.0, 10.0);
    let b = Rect::new(5.0, 5.0, 10.0, 10.0);
    assert!(intersects(&a, &b));
    assert!(intersects(&b, &a));
}

#[test]
fn contained_rect_intersects() {
    let outer = Rect::new(0.0, 0.0, 30.0, 30.0);
    let inner = Rect::new(10.0, 10.0, 4.0, 10.0);
    assert!(intersects(&outer, &inner));
    assert!(intersects(&inner, &outer));
}

#[test]
fn disjoint_rects_do_not_intersect() {
    let a = Rect::new(0.0, 0.0, 10.0, 10.0);
    assert!(!intersects(&a, &Rect::new(20.0, 0.0, 10.0, 10.0)));
    assert!(!intersects(&a, &Rect::new(0.0, 20.0, 10.0, 10.0)));
}

#[test]
fn shared_vertical_edge_is_not_a_collision() {
    let a = Rect::new(0.0, 0.0, 10.0, 10.0);
    let b = Rect::new(10.0, 0.0, 10.0, 10.0);
    assert!(!intersects(&a, &b));
    assert!(!intersects(&b, &a));
}

#[test]
fn shared_horizontal_edge_is_not_a_collision() {
    let enemy = Rect::new(30.0, 30.0, 30.0, 30.0);
    let bullet = Rect::new(40.0, 60.0, 4.0, 10.0);
    assert!(!intersects(&enemy, &bullet));
    assert!(!intersects(&bullet, &enemy));
}

#[test]
fn shared_corner_is_not_a_collision() {
    let a = Rect::new(0.0, 0.0, 10.0, 10.0);
    let b = Rect::new(10.0, 10.0, 10.0, 10.0);
    assert!(!intersects(&a, &b));
}

#[test]
fn sliver_overlap_counts() {
    let a = Rect::new(0.0, 0.0, 10.0, 10.0);
    let b = Rect::new(9.5, 9.5, 10.0, 10.0);
    assert!(intersects(&a, &b));
}

#[test]
fn rect_edges() {
    let r = Rect::new(30.0, 40.0, 4.0, 10.0);
    assert_eq!(r.right(), 34.0);
    assert_eq!(r.bottom(), 50.0);
}
