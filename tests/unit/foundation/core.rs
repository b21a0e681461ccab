use super::*;

#[test]
fn empty_is_union_identity() {
    let b = Bounds::new(10.0, 50.0, 40.0, 20.0);
    assert_eq!(Bounds::EMPTY.union(b), b);
    assert_eq!(b.union(Bounds::EMPTY), b);
    assert!(Bounds::EMPTY.is_empty());
    assert!(!b.is_empty());
}

#[test]
fn union_encloses_both_boxes() {
    let a = Bounds::new(0.0, 10.0, 10.0, 0.0);
    let b = Bounds::new(5.0, 30.0, 25.0, -5.0);
    let u = a.union(b);
    assert_eq!(u, Bounds::new(0.0, 30.0, 25.0, -5.0));
    assert_eq!(u.width(), 25.0);
    assert_eq!(u.height(), 35.0);
}

#[test]
fn inverted_and_nan_bounds_are_empty() {
    assert!(Bounds::new(10.0, 0.0, 0.0, 10.0).is_empty());
    assert!(Bounds::new(f64::NAN, 1.0, 1.0, 0.0).is_empty());
    assert!(!Bounds::new(3.0, 3.0, 3.0, 3.0).is_empty());
}

#[test]
fn rect_conversion_keeps_y_up_orientation() {
    let b = Bounds::new(1.0, 8.0, 4.0, 2.0);
    let r = b.to_rect();
    assert_eq!(r, Rect::new(1.0, 2.0, 4.0, 8.0));
    assert_eq!(Bounds::from_rect(r), b);
    assert_eq!(Bounds::from_rect(Rect::new(4.0, 8.0, 1.0, 2.0)), b);
}

#[test]
fn css_colors() {
    assert_eq!(Rgba8::opaque(255, 0, 10).css(), "rgb(255, 0, 10)");
    let half = Rgba8 {
        r: 0,
        g: 0,
        b: 0,
        a: 51,
    };
    assert_eq!(half.css(), "rgba(0, 0, 0, 0.200)");
}

#[test]
fn main_canvas_is_zero() {
    assert!(CanvasId::MAIN.is_main());
    assert!(!CanvasId(2).is_main());
    assert_eq!(FunctionId(3).index(), 3);
}
