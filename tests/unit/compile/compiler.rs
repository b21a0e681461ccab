use super::*;
use crate::{
    artwork::{
        builder::ArtworkBuilder,
        document::{ArtworkDocument, NodeDoc, PaintDoc},
    },
    foundation::core::Rgba8,
};

fn square(left: f64, bottom: f64, size: f64) -> NodeDoc {
    NodeDoc::rect(Bounds::new(left, bottom + size, left + size, bottom))
}

/// One square per layer name, listed top-most first like the host does.
fn document(names: &[&str]) -> ArtworkDocument {
    let mut b = ArtworkBuilder::new();
    for (i, name) in names.iter().enumerate() {
        let node = b.node(square(i as f64 * 10.0, 0.0, 10.0));
        b.layer(*name, &[node]);
    }
    b.build().unwrap()
}

fn compile(doc: &ArtworkDocument) -> CompiledDocument {
    DocumentCompiler::default().compile(doc).unwrap()
}

fn function_names(compiled: &CompiledDocument) -> Vec<&str> {
    compiled.functions.iter().map(|(_, f)| f.name()).collect()
}

fn draw<'a>(compiled: &'a CompiledDocument, name: &str) -> &'a crate::compile::draw::DrawFunction {
    compiled
        .functions
        .draw_functions()
        .find(|(_, d)| d.header.name == name)
        .map(|(_, d)| d)
        .unwrap()
}

fn layer(name: &str, bounds: Bounds, crop: bool) -> Layer {
    let mut layer = Layer::new(name, None, Default::default());
    layer.bounds = bounds;
    layer.crop = crop;
    layer
}

#[test]
fn background_and_cropped_circle() {
    let mut b = ArtworkBuilder::new();
    let circle = b.node(square(40.0, 40.0, 20.0));
    let background = b.node(square(0.0, 0.0, 100.0));
    b.layer("Circle(rasterize:circle.png;crop:yes)", &[circle]);
    b.layer("Background(origin:ul)", &[background]);
    let compiled = compile(&b.build().unwrap());

    assert_eq!(function_names(&compiled), vec!["background", "circle"]);
    let background = draw(&compiled, "background");
    assert!(background.translate_origin);
    assert_eq!(
        (background.translate_origin_h, background.translate_origin_v),
        (0.0, 0.0)
    );
    let circle = draw(&compiled, "circle");
    assert_eq!(circle.rasterize_file_name.as_deref(), Some("circle.png"));
    assert!(circle.crop);
    assert_eq!(compiled.bounds, circle.header.bounds);
    assert_eq!(compiled.bounds, Bounds::new(40.0, 60.0, 60.0, 40.0));
    assert!(compiled.warnings.is_empty());
    assert!(!compiled.has_animation);
}

#[test]
fn separated_layers_with_the_same_name_get_distinct_functions() {
    // Scan order is the reverse of host order; the middle `b` separates the two `a` layers.
    let compiled = compile(&document(&["a()", "b()", "a()"]));
    assert_eq!(function_names(&compiled), vec!["a", "b", "a1"]);
    assert_eq!(draw(&compiled, "a1").header.requested_name, "a");
}

#[test]
fn adjacent_layers_with_the_same_name_share_a_function() {
    let compiled = compile(&document(&["a()", "a()"]));
    assert_eq!(function_names(&compiled), vec!["a"]);
    let a = draw(&compiled, "a");
    assert_eq!(a.layers, vec![LayerId(0), LayerId(1)]);
    assert_eq!(a.header.bounds, Bounds::new(0.0, 10.0, 20.0, 0.0));
}

#[test]
fn crop_on_a_shared_function_lands_on_its_first_layer() {
    // Scan order: plain `a` first, then `a(crop:yes)`.
    let compiled = compile(&document(&["a(crop:yes)", "a"]));
    assert!(compiled.layers[0].crop);
    assert!(!compiled.layers[1].crop);
    assert_eq!(compiled.bounds, compiled.layers[0].bounds);
}

#[test]
fn symbol_flags_stay_on_the_pattern() {
    let mut b = ArtworkBuilder::new();
    let shaded = b.node(square(0.0, 0.0, 5.0).fill(PaintDoc::Gradient { stops: Vec::new() }));
    let star = b.pattern("Star", Some(shaded));
    let instance = b.symbol(square(0.0, 0.0, 5.0), star);
    b.layer("Sky", &[instance]);
    let compiled = compile(&b.build().unwrap());

    let pattern = compiled.patterns.find(star).unwrap();
    assert!(pattern.is_symbol);
    assert!(pattern.features.has_gradients);
    assert!(!compiled.layers[0].features.has_gradients);
    assert!(!draw(&compiled, "sky").features.has_gradients);
    assert_eq!(compiled.canvases.len(), 1);
}

#[test]
fn fill_patterns_get_hidden_canvases() {
    let mut b = ArtworkBuilder::new();
    let tile = b.node(square(0.0, 0.0, 4.0));
    let dots = b.pattern("Dots", Some(tile));
    let node = b.node(square(0.0, 0.0, 50.0).fill(PaintDoc::Pattern { pattern: dots.0 }));
    b.layer("Floor", &[node]);
    let compiled = compile(&b.build().unwrap());

    assert!(draw(&compiled, "floor").features.has_patterns);
    assert_eq!(compiled.canvases.len(), 2);
    assert_eq!(compiled.canvases[0].id, CanvasId::MAIN);
    assert_eq!((compiled.width(), compiled.height()), (50.0, 50.0));
    let hidden = compiled.canvases[1];
    assert!(hidden.hidden);
    assert_eq!(hidden.id, CanvasId(1));
    assert_eq!((hidden.width, hidden.height), (4.0, 4.0));
}

#[test]
fn option_problems_become_warnings() {
    let compiled = compile(&document(&["ball(crop; origin:left; wobble:1; origin:ll)"]));
    let kinds: Vec<_> = compiled.warnings.iter().map(|w| w.kind).collect();
    assert_eq!(
        kinds,
        vec![
            WarningKind::MalformedOption,
            WarningKind::MalformedOption,
            WarningKind::UnknownOption,
        ]
    );
    assert!(compiled.warnings.iter().all(|w| w.function.as_deref() == Some("ball")));
    let ball = draw(&compiled, "ball");
    assert!(ball.translate_origin);
    assert_eq!((ball.translate_origin_h, ball.translate_origin_v), (0.0, 1.0));
}

#[test]
fn animation_layers_bind_to_draw_functions() {
    let mut b = ArtworkBuilder::new();
    let ball = b.node(square(0.0, 0.0, 10.0).fill(PaintDoc::Solid {
        color: Rgba8::opaque(255, 0, 0),
    }));
    let track = b.node(
        NodeDoc::new(Bounds::new(0.0, 100.0, 100.0, 0.0)).path("M0 0 L100 0 L100 100"),
    );
    b.layer("Ball(anim:orbit; rotate-duration:2; rotate-trigger:orbit.path.finished)", &[ball]);
    b.layer("Orbit(t:a; duration:4; iterations:inf)", &[track]);
    let compiled = compile(&b.build().unwrap());

    assert_eq!(function_names(&compiled), vec!["orbit", "ball"]);
    assert!(compiled.has_animation);
    assert!(compiled.warnings.is_empty(), "{:?}", compiled.warnings);

    let (orbit_id, orbit) = compiled.functions.animation_functions().next().unwrap();
    assert_eq!(orbit.layer, Some(LayerId(0)));
    assert_eq!(orbit.segments.len(), 2);
    assert_eq!(orbit.path_clock.duration, 4.0);
    assert_eq!(orbit.path_clock.iterations, 0);
    assert_eq!(orbit.header.bounds, compiled.layers[0].bounds);

    let ball = draw(&compiled, "ball");
    assert_eq!(ball.animation_function, Some(orbit_id));
    assert!(ball.rotate_clock.is_active());
    assert_eq!(ball.rotate_clock.duration, 2.0);
    assert_eq!(ball.triggers[0].source, Some(orbit_id));
}

#[test]
fn unresolved_references_are_warnings_not_errors() {
    let compiled = compile(&document(&["ball(anim:nowhere; scale-trigger:ghost.path.started)"]));
    let kinds: Vec<_> = compiled.warnings.iter().map(|w| w.kind).collect();
    assert_eq!(
        kinds,
        vec![WarningKind::UnresolvedAnimation, WarningKind::UnresolvedTrigger]
    );
    assert_eq!(draw(&compiled, "ball").animation_function, None);
}

#[test]
fn nothing_visible_is_fatal() {
    let mut b = ArtworkBuilder::new();
    let node = b.node(square(0.0, 0.0, 10.0));
    b.hidden_layer("Only", &[node]);
    b.layer("Empty", &[]);
    let doc = b.build().unwrap();
    let err = DocumentCompiler::default().compile(&doc).unwrap_err();
    assert!(matches!(err, ExportError::NoVisibleContent));

    let empty = ArtworkDocument::default();
    assert!(DocumentCompiler::default().compile(&empty).is_err());
}

#[test]
fn depth_limit_is_reported() {
    let mut b = ArtworkBuilder::new();
    let leaf = b.node(square(0.0, 0.0, 1.0));
    let mid = b.group(square(0.0, 0.0, 2.0), &[leaf]);
    let top = b.group(square(0.0, 0.0, 3.0), &[mid]);
    b.layer("Deep", &[top]);
    let compiler = DocumentCompiler::new(CompileOptions {
        max_depth: 2,
        ..CompileOptions::default()
    });
    let compiled = compiler.compile(&b.build().unwrap()).unwrap();
    assert_eq!(compiled.warnings.len(), 1);
    assert_eq!(compiled.warnings[0].kind, WarningKind::DepthLimit);
    assert_eq!(compiled.bounds, Bounds::new(0.0, 3.0, 3.0, 0.0));
}

#[test]
fn trigger_without_running_clocks_still_animates() {
    let compiled = compile(&document(&["a(rotate-trigger:b.scale.finished)", "b"]));
    assert!(compiled.warnings.is_empty(), "{:?}", compiled.warnings);
    assert!(draw(&compiled, "a").active_clocks().next().is_none());
    assert!(compiled.has_animation);
}

#[test]
fn crop_layer_without_art_is_passed_over() {
    let mut b = ArtworkBuilder::new();
    let art = b.node(square(0.0, 0.0, 10.0));
    b.layer("Frame(crop:yes)", &[]);
    b.layer("Art", &[art]);
    let compiled = compile(&b.build().unwrap());

    assert_eq!(compiled.bounds, Bounds::new(0.0, 10.0, 10.0, 0.0));
    let kinds: Vec<_> = compiled.warnings.iter().map(|w| w.kind).collect();
    assert_eq!(kinds, vec![WarningKind::EmptyCrop]);
}

#[test]
fn symbol_functions_are_named_after_draw_functions() {
    let mut b = ArtworkBuilder::new();
    let shape = b.node(square(0.0, 0.0, 5.0));
    let star = b.pattern("Star", Some(shape));
    let instance = b.symbol(square(0.0, 0.0, 5.0), star);
    let label = b.node(square(10.0, 0.0, 5.0));
    b.layer("Sky", &[instance]);
    b.layer("Star Symbol", &[label]);
    let compiled = compile(&b.build().unwrap());

    assert_eq!(function_names(&compiled), vec!["starSymbol", "sky"]);
    let pattern = compiled.patterns.iter().find(|p| p.name == "star").unwrap();
    assert_eq!(pattern.function_name(), "starSymbol1");
}

#[test]
fn compute_bounds_unions_without_crop() {
    let layers = [
        layer("a", Bounds::new(0.0, 10.0, 10.0, 0.0), false),
        layer("b", Bounds::new(-5.0, 3.0, 4.0, -8.0), false),
    ];
    assert_eq!(compute_bounds(&layers), Bounds::new(-5.0, 10.0, 10.0, -8.0));
    assert!(compute_bounds(&[]).is_empty());
}

#[test]
fn first_crop_layer_wins() {
    let layers = [
        layer("big", Bounds::new(-100.0, 100.0, 100.0, -100.0), false),
        layer("crop", Bounds::new(0.0, 10.0, 10.0, 0.0), true),
        layer("later", Bounds::new(0.0, 50.0, 50.0, 0.0), true),
    ];
    assert_eq!(compute_bounds(&layers), Bounds::new(0.0, 10.0, 10.0, 0.0));

    let layers = [
        layer("empty", Bounds::EMPTY, true),
        layer("art", Bounds::new(0.0, 5.0, 5.0, 0.0), false),
    ];
    assert_eq!(compute_bounds(&layers), Bounds::new(0.0, 5.0, 5.0, 0.0));
}

#[test]
fn more_layers_never_shrink_bounds() {
    let mut layers = Vec::new();
    let mut previous = compute_bounds(&layers);
    for (i, size) in [4.0, 1.0, 9.0, 2.0].into_iter().enumerate() {
        let offset = i as f64 * 3.0 - 5.0;
        let bounds = Bounds::new(offset, offset + size, offset + size, offset);
        layers.push(layer("l", bounds, false));
        let next = compute_bounds(&layers);
        assert_eq!(next.union(previous), next);
        previous = next;
    }
}

#[test]
fn options_deserialize_with_defaults() {
    let opts: CompileOptions = serde_json::from_str("{}").unwrap();
    assert_eq!(opts, CompileOptions::default());
    assert_eq!(opts.max_depth, 256);
    let legacy: CompileOptions =
        serde_json::from_str(r#"{"rasterize_name_from_function": true}"#).unwrap();
    assert!(legacy.rasterize_name_from_function);
}
