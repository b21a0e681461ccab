use crate::foundation::core::{BezPath, Bounds, Rgba8};

/// Opaque handle to a top-level layer of the host document.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct LayerHandle(pub u32);

/// Opaque handle to one art node of the host document.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct NodeId(pub u32);

/// Opaque handle to a pattern or symbol definition of the host document.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct PatternHandle(pub u32);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// Ordinary path or group.
    #[default]
    Plain,
    /// Placed instance of a symbol definition.
    Symbol,
    /// Plugin (effect) group whose rendered output lives in a separate result group.
    PluginGroup,
}

/// Kind of paint applied to a node's fill or stroke.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub enum PaintKind {
    #[default]
    None,
    Solid,
    Gradient,
    Pattern(PatternHandle),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaintTarget {
    Fill,
    Stroke,
}

/// One color stop of a gradient paint, `offset` in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GradientStop {
    pub offset: f64,
    pub color: Rgba8,
}

/// Read-only view of a layered vector document.
///
/// Layers are indexed top-most first: `layer(0)` is painted last. Art nodes form a tree through
/// `first_child` / `next_sibling`. Hosts only need the required methods for compilation; the
/// provided ones feed [`crate::OutlineRenderer`] and default to "no information".
pub trait ArtworkSource {
    fn layer_count(&self) -> usize;
    fn layer(&self, index: usize) -> LayerHandle;
    fn is_layer_visible(&self, layer: LayerHandle) -> bool;
    fn layer_name(&self, layer: LayerHandle) -> String;
    fn first_art(&self, layer: LayerHandle) -> Option<NodeId>;

    fn first_child(&self, node: NodeId) -> Option<NodeId>;
    fn next_sibling(&self, node: NodeId) -> Option<NodeId>;
    fn bounds(&self, node: NodeId) -> Bounds;
    fn is_hidden(&self, node: NodeId) -> bool;
    fn node_kind(&self, node: NodeId) -> NodeKind;
    fn opacity(&self, node: NodeId) -> f64;
    fn fill_paint(&self, node: NodeId) -> PaintKind;
    fn stroke_paint(&self, node: NodeId) -> PaintKind;

    /// Pattern definition a [`NodeKind::Symbol`] node instantiates.
    fn symbol_pattern(&self, node: NodeId) -> Option<PatternHandle>;
    /// Root of the artwork result group of a [`NodeKind::PluginGroup`] node.
    fn plugin_result_root(&self, node: NodeId) -> Option<NodeId>;
    fn pattern_content_root(&self, pattern: PatternHandle) -> Option<NodeId>;
    fn pattern_name(&self, pattern: PatternHandle) -> String;

    /// Path geometry of a node, in document space.
    fn path(&self, _node: NodeId) -> Option<BezPath> {
        None
    }

    fn solid_color(&self, _node: NodeId, _target: PaintTarget) -> Option<Rgba8> {
        None
    }

    fn gradient_stops(&self, _node: NodeId, _target: PaintTarget) -> Vec<GradientStop> {
        Vec::new()
    }

    fn stroke_width(&self, _node: NodeId) -> f64 {
        1.0
    }
}
