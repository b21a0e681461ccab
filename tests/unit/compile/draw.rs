use super::*;
use crate::compile::layer::ScanAccumulator;

fn draw(bounds: Bounds) -> DrawFunction {
    let mut header = FunctionHeader::new("shape", "shape");
    header.bounds = bounds;
    DrawFunction::new(header)
}

fn set(f: &mut DrawFunction, key: &str, value: &str) -> ParamOutcome {
    f.set_parameter(key, value, &mut [], &CompileOptions::default())
}

#[test]
fn origin_keywords() {
    let mut f = draw(Bounds::EMPTY);
    for (value, h, v) in [
        ("center", 0.5, 0.5),
        ("ul", 0.0, 0.0),
        ("upper-right", 1.0, 0.0),
        ("lr", 1.0, 1.0),
        ("lower-left", 0.0, 1.0),
    ] {
        assert_eq!(set(&mut f, "origin", value), ParamOutcome::Applied);
        assert!(f.translate_origin);
        assert_eq!((f.translate_origin_h, f.translate_origin_v), (h, v), "{value}");
    }
    assert_eq!(set(&mut f, "o", "normal"), ParamOutcome::Applied);
    assert!(!f.translate_origin);
}

#[test]
fn custom_origin_needs_exactly_two_numbers() {
    let mut f = draw(Bounds::EMPTY);
    assert_eq!(set(&mut f, "origin", "0.25, 0.75"), ParamOutcome::Applied);
    assert_eq!((f.translate_origin_h, f.translate_origin_v), (0.25, 0.75));

    assert_eq!(set(&mut f, "origin", "1,2,3"), ParamOutcome::Malformed);
    assert_eq!(set(&mut f, "origin", "left"), ParamOutcome::Malformed);
    assert_eq!(set(&mut f, "origin", "x,1"), ParamOutcome::Malformed);
    assert_eq!((f.translate_origin_h, f.translate_origin_v), (0.25, 0.75));
}

#[test]
fn rasterize_strips_the_supplied_extension() {
    let mut f = draw(Bounds::EMPTY);
    assert_eq!(set(&mut f, "rasterize", "photo.jpeg"), ParamOutcome::Applied);
    assert_eq!(f.rasterize_file_name.as_deref(), Some("photo.png"));
    assert_eq!(set(&mut f, "rast", "sprite"), ParamOutcome::Applied);
    assert_eq!(f.rasterize_file_name.as_deref(), Some("sprite.png"));
    assert_eq!(set(&mut f, "rast", "no"), ParamOutcome::Applied);
    assert_eq!(f.rasterize_file_name, None);
    assert_eq!(set(&mut f, "rast", ""), ParamOutcome::Malformed);
}

#[test]
fn legacy_rasterize_cuts_the_function_name() {
    let mut f = draw(Bounds::EMPTY);
    let legacy = CompileOptions {
        rasterize_name_from_function: true,
        ..CompileOptions::default()
    };
    f.set_parameter("rasterize", "ab.png", &mut [], &legacy);
    assert_eq!(f.rasterize_file_name.as_deref(), Some("sh.png"));
    f.set_parameter("rasterize", "longer-name.png", &mut [], &legacy);
    assert_eq!(f.rasterize_file_name.as_deref(), Some("shape.png"));
}

#[test]
fn crop_marks_only_the_first_layer() {
    let bounds = Bounds::new(0.0, 10.0, 10.0, 0.0);
    let scanned = ScanAccumulator {
        bounds,
        features: Features::default(),
    };
    let mut layers = vec![
        Layer::new("a", None, scanned),
        Layer::new("b", None, scanned),
    ];
    let mut f = draw(Bounds::EMPTY);
    f.add_layer(LayerId(0), &layers[0]);
    f.add_layer(LayerId(1), &layers[1]);

    let opts = CompileOptions::default();
    assert_eq!(
        f.set_parameter("crop", "yes", &mut layers, &opts),
        ParamOutcome::Applied
    );
    assert!(f.crop);
    assert!(layers[0].crop);
    assert!(!layers[1].crop);

    f.set_parameter("c", "no", &mut layers, &opts);
    assert!(!layers[0].crop);
    assert_eq!(
        f.set_parameter("crop", "perhaps", &mut layers, &opts),
        ParamOutcome::Malformed
    );
}

#[test]
fn add_layer_unions_bounds_and_features() {
    let mut f = draw(Bounds::EMPTY);
    let a = Layer::new(
        "a",
        None,
        ScanAccumulator {
            bounds: Bounds::new(0.0, 5.0, 5.0, 0.0),
            features: Features {
                has_alpha: true,
                ..Features::default()
            },
        },
    );
    let b = Layer::new(
        "b",
        None,
        ScanAccumulator {
            bounds: Bounds::new(10.0, 20.0, 20.0, 10.0),
            features: Features {
                has_patterns: true,
                ..Features::default()
            },
        },
    );
    f.add_layer(LayerId(0), &a);
    f.add_layer(LayerId(1), &b);
    assert_eq!(f.header.bounds, Bounds::new(0.0, 20.0, 20.0, 0.0));
    assert!(f.features.has_alpha && f.features.has_patterns);
    assert!(!f.features.has_gradients);
}

#[test]
fn reposition_follows_the_origin_formula() {
    let doc = Bounds::new(0.0, 100.0, 200.0, 0.0);
    let mut f = draw(Bounds::new(50.0, 80.0, 90.0, 60.0));
    assert_eq!(f.reposition(doc), None);

    set(&mut f, "origin", "ul");
    assert_eq!(f.reposition(doc), Some(Vec2::new(50.0, 20.0)));
    set(&mut f, "origin", "lr");
    assert_eq!(f.reposition(doc), Some(Vec2::new(90.0, 40.0)));
}

#[test]
fn reposition_of_a_function_covering_the_document() {
    let doc = Bounds::new(0.0, 100.0, 200.0, 0.0);
    let mut f = draw(doc);
    set(&mut f, "origin", "ul");
    assert_eq!(f.reposition(doc), Some(Vec2::new(0.0, 0.0)));
    set(&mut f, "origin", "center");
    assert_eq!(f.reposition(doc), Some(Vec2::new(100.0, 50.0)));
}

#[test]
fn local_transform_maps_anchor_to_origin() {
    let doc = Bounds::new(0.0, 100.0, 200.0, 0.0);
    let mut f = draw(Bounds::new(50.0, 80.0, 90.0, 60.0));

    let page = f.local_transform(doc);
    assert_eq!(page * kurbo::Point::new(50.0, 80.0), kurbo::Point::new(50.0, 20.0));

    set(&mut f, "origin", "ul");
    let anchored = f.local_transform(doc);
    assert_eq!(anchored * kurbo::Point::new(50.0, 80.0), kurbo::Point::ZERO);
    assert_eq!(anchored * kurbo::Point::new(90.0, 60.0), kurbo::Point::new(40.0, 20.0));
}

#[test]
fn bound_animation_without_origin_anchors_at_center() {
    let mut f = draw(Bounds::new(0.0, 10.0, 10.0, 0.0));
    assert_eq!(f.anchor(), None);
    f.animation_function = Some(FunctionId(0));
    assert_eq!(f.anchor(), Some((0.5, 0.5)));
    assert_eq!(f.reposition(Bounds::new(0.0, 10.0, 10.0, 0.0)), None);
}

#[test]
fn animation_options() {
    let mut f = draw(Bounds::EMPTY);
    assert!(!f.has_animation());
    assert_eq!(set(&mut f, "anim", "Orbit Path"), ParamOutcome::Applied);
    assert_eq!(f.animation_function_name.as_deref(), Some("orbitPath"));
    assert!(f.has_animation());
    assert_eq!(set(&mut f, "animation", "--"), ParamOutcome::Malformed);

    assert_eq!(set(&mut f, "orient", "follow"), ParamOutcome::Applied);
    assert_eq!(f.follow_orientation, Some(0.0));
    assert_eq!(set(&mut f, "orientation", "90"), ParamOutcome::Applied);
    assert_eq!(f.follow_orientation, Some(90.0));
    assert_eq!(set(&mut f, "orientation", "n"), ParamOutcome::Applied);
    assert_eq!(f.follow_orientation, None);
}

#[test]
fn type_values_must_be_recognized() {
    let mut f = draw(Bounds::EMPTY);
    assert_eq!(set(&mut f, "t", "d"), ParamOutcome::Applied);
    assert_eq!(set(&mut f, "type", "Drawing"), ParamOutcome::Applied);
    assert_eq!(set(&mut f, "type", "wobble"), ParamOutcome::Malformed);
}

#[test]
fn clock_families_route_by_prefix() {
    let mut f = draw(Bounds::EMPTY);
    assert_eq!(set(&mut f, "rotate-duration", "3"), ParamOutcome::Applied);
    assert_eq!(set(&mut f, "fade-timing", "sineEaseIn"), ParamOutcome::Applied);
    assert_eq!(set(&mut f, "scale-iter", "lots"), ParamOutcome::Malformed);
    assert_eq!(f.rotate_clock.duration, 3.0);
    assert!(f.rotate_clock.is_active());
    assert!(f.alpha_clock.is_active());
    assert!(!f.scale_clock.is_active());
    assert_eq!(f.active_clocks().count(), 2);
    assert!(f.has_animation());

    assert_eq!(set(&mut f, "path-duration", "3"), ParamOutcome::Unknown);
    assert_eq!(set(&mut f, "wobble-duration", "3"), ParamOutcome::Unknown);
    assert_eq!(set(&mut f, "color", "red"), ParamOutcome::Unknown);
}

#[test]
fn clock_triggers() {
    let mut f = draw(Bounds::EMPTY);
    assert_eq!(
        set(&mut f, "scale-trigger", "ball.path.finished"),
        ParamOutcome::Applied
    );
    assert_eq!(set(&mut f, "alpha-trigger", "ball"), ParamOutcome::Malformed);
    assert_eq!(f.triggers.len(), 1);
    assert_eq!(f.triggers[0].target, ClockKind::Scale);
}
