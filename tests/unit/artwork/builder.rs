use super::*;
use crate::{artwork::source::ArtworkSource, foundation::core::Bounds};

#[test]
fn builders_create_expected_structure() {
    let mut b = ArtworkBuilder::new();
    let a = b.node(NodeDoc::rect(Bounds::new(0.0, 10.0, 10.0, 0.0)));
    let c = b.node(NodeDoc::rect(Bounds::new(20.0, 10.0, 30.0, 0.0)));
    let g = b.group(NodeDoc::new(Bounds::new(0.0, 10.0, 30.0, 0.0)), &[a, c]);
    let star = b.node(NodeDoc::new(Bounds::new(0.0, 1.0, 1.0, 0.0)));
    let p = b.pattern("Star", Some(star));
    let s = b.symbol(NodeDoc::new(Bounds::new(5.0, 6.0, 6.0, 5.0)), p);
    let top = b.layer("Top", &[g, s]);
    let hidden = b.hidden_layer("Ghost", &[]);
    let doc = b.build().unwrap();

    assert_eq!(doc.layer_count(), 2);
    assert_eq!(doc.first_art(top), Some(g));
    assert_eq!(doc.first_child(g), Some(a));
    assert_eq!(doc.next_sibling(a), Some(c));
    assert_eq!(doc.next_sibling(c), None);
    assert_eq!(doc.next_sibling(g), Some(s));
    assert_eq!(doc.node_kind(s), NodeKind::Symbol);
    assert_eq!(doc.symbol_pattern(s), Some(p));
    assert_eq!(doc.pattern_content_root(p), Some(star));
    assert!(!doc.is_layer_visible(hidden));
    assert_eq!(doc.first_art(hidden), None);
}

#[test]
fn plugin_group_keeps_result_and_children() {
    let mut b = ArtworkBuilder::new();
    let src = b.node(NodeDoc::new(Bounds::new(0.0, 4.0, 4.0, 0.0)));
    let out = b.node(NodeDoc::new(Bounds::new(0.0, 5.0, 5.0, 0.0)));
    let result = b.group(NodeDoc::new(Bounds::new(0.0, 5.0, 5.0, 0.0)), &[out]);
    let fx = b.plugin_group(NodeDoc::new(Bounds::new(0.0, 5.0, 5.0, 0.0)), result, &[src]);
    b.layer("Fx", &[fx]);
    let doc = b.build().unwrap();

    assert_eq!(doc.node_kind(fx), NodeKind::PluginGroup);
    assert_eq!(doc.plugin_result_root(fx), Some(result));
    assert_eq!(doc.first_child(fx), Some(src));
}

#[test]
fn build_rejects_shared_nodes() {
    let mut b = ArtworkBuilder::new();
    let a = b.node(NodeDoc::new(Bounds::new(0.0, 1.0, 1.0, 0.0)));
    b.layer("One", &[a]);
    b.layer("Two", &[a]);
    assert!(b.build().is_err());
}
