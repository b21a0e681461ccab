use std::path::Path;

use crate::{
    artwork::source::{
        ArtworkSource, GradientStop, LayerHandle, NodeId, NodeKind, PaintKind, PaintTarget,
        PatternHandle,
    },
    foundation::{
        core::{BezPath, Bounds, Rgba8},
        error::{ExportError, ExportResult},
    },
};

/// Self-contained JSON description of a layered artwork document.
///
/// Nodes, layers and patterns reference each other by index into `nodes` and `patterns`.
/// `layers[0]` is the top-most layer.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ArtworkDocument {
    #[serde(default)]
    pub layers: Vec<LayerDoc>,
    #[serde(default)]
    pub nodes: Vec<NodeDoc>,
    #[serde(default)]
    pub patterns: Vec<PatternDoc>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LayerDoc {
    pub name: String,
    #[serde(default = "default_true")]
    pub visible: bool,
    /// First art node of the layer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub art: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NodeDoc {
    #[serde(default)]
    pub kind: NodeKind,
    pub bounds: Bounds,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default = "default_opacity")]
    pub opacity: f64,
    #[serde(default)]
    pub fill: PaintDoc,
    #[serde(default)]
    pub stroke: PaintDoc,
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_child: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_sibling: Option<u32>,
    /// Pattern index instantiated by a `symbol` node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<u32>,
    /// Result group root of a `plugin_group` node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<u32>,
    /// SVG path data in document coordinates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl NodeDoc {
    /// Plain visible node with the given bounds and no paint.
    pub fn new(bounds: Bounds) -> Self {
        Self {
            kind: NodeKind::Plain,
            bounds,
            hidden: false,
            opacity: 1.0,
            fill: PaintDoc::None,
            stroke: PaintDoc::None,
            stroke_width: 1.0,
            first_child: None,
            next_sibling: None,
            symbol: None,
            result: None,
            path: None,
        }
    }

    /// Axis-aligned rectangle path filling `bounds`.
    pub fn rect(bounds: Bounds) -> Self {
        let path = format!(
            "M{} {} L{} {} L{} {} L{} {} Z",
            bounds.left,
            bounds.top,
            bounds.right,
            bounds.top,
            bounds.right,
            bounds.bottom,
            bounds.left,
            bounds.bottom
        );
        Self {
            path: Some(path),
            ..Self::new(bounds)
        }
    }

    pub fn fill(mut self, paint: PaintDoc) -> Self {
        self.fill = paint;
        self
    }

    pub fn stroke(mut self, paint: PaintDoc) -> Self {
        self.stroke = paint;
        self
    }

    pub fn opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn path(mut self, svg: impl Into<String>) -> Self {
        self.path = Some(svg.into());
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PaintDoc {
    #[default]
    None,
    Solid {
        color: Rgba8,
    },
    Gradient {
        #[serde(default)]
        stops: Vec<GradientStop>,
    },
    Pattern {
        pattern: u32,
    },
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PatternDoc {
    pub name: String,
    /// Root art node of the definition.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<u32>,
}

fn default_true() -> bool {
    true
}

fn default_opacity() -> f64 {
    1.0
}

fn default_stroke_width() -> f64 {
    1.0
}

impl ArtworkDocument {
    /// Parse and validate a document from JSON text.
    pub fn from_json_str(s: &str) -> ExportResult<Self> {
        let doc: Self = serde_json::from_str(s).map_err(|e| ExportError::serde(e.to_string()))?;
        doc.validate()?;
        Ok(doc)
    }

    /// Read, parse and validate a document from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> ExportResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            ExportError::Other(anyhow::Error::new(e).context(format!("read '{}'", path.display())))
        })?;
        Self::from_json_str(&text)
    }

    /// Validate index references, numeric fields and tree shape.
    ///
    /// Every node may be the target of at most one structural reference (layer art, first
    /// child, next sibling, plugin result or pattern content), which keeps every reachable
    /// structure a finite tree.
    pub fn validate(&self) -> ExportResult<()> {
        let node_count = self.nodes.len();
        let mut referenced = vec![false; node_count];
        let mut claim = |index: u32, what: &str| -> ExportResult<()> {
            let slot = referenced.get_mut(index as usize).ok_or_else(|| {
                ExportError::validation(format!(
                    "{what} references missing node {index} (document has {node_count} nodes)"
                ))
            })?;
            if *slot {
                return Err(ExportError::validation(format!(
                    "node {index} is referenced more than once ({what})"
                )));
            }
            *slot = true;
            Ok(())
        };

        for (i, layer) in self.layers.iter().enumerate() {
            if let Some(art) = layer.art {
                claim(art, &format!("layer {i} '{}'", layer.name))?;
            }
        }
        for (i, pattern) in self.patterns.iter().enumerate() {
            if let Some(content) = pattern.content {
                claim(content, &format!("pattern {i} '{}'", pattern.name))?;
            }
        }
        for (i, node) in self.nodes.iter().enumerate() {
            if node.first_child == Some(i as u32) || node.next_sibling == Some(i as u32) {
                return Err(ExportError::validation(format!(
                    "node {i} references itself"
                )));
            }
            if let Some(child) = node.first_child {
                claim(child, &format!("node {i} first_child"))?;
            }
            if let Some(sibling) = node.next_sibling {
                claim(sibling, &format!("node {i} next_sibling"))?;
            }
            if let Some(result) = node.result {
                claim(result, &format!("node {i} result"))?;
            }
        }

        for (i, node) in self.nodes.iter().enumerate() {
            let b = node.bounds;
            if ![b.left, b.top, b.right, b.bottom].iter().all(|v| v.is_finite()) {
                return Err(ExportError::validation(format!(
                    "node {i} bounds must be finite"
                )));
            }
            if !node.opacity.is_finite() || !(0.0..=1.0).contains(&node.opacity) {
                return Err(ExportError::validation(format!(
                    "node {i} opacity must be in [0, 1]"
                )));
            }
            if !node.stroke_width.is_finite() || node.stroke_width < 0.0 {
                return Err(ExportError::validation(format!(
                    "node {i} stroke_width must be finite and >= 0"
                )));
            }
            match node.kind {
                NodeKind::Symbol if node.symbol.is_none() => {
                    return Err(ExportError::validation(format!(
                        "symbol node {i} must name a pattern"
                    )));
                }
                NodeKind::PluginGroup if node.result.is_none() => {
                    return Err(ExportError::validation(format!(
                        "plugin_group node {i} must name a result node"
                    )));
                }
                _ => {}
            }
            if let Some(symbol) = node.symbol {
                self.check_pattern(symbol, i)?;
            }
            for paint in [&node.fill, &node.stroke] {
                match paint {
                    PaintDoc::Pattern { pattern } => self.check_pattern(*pattern, i)?,
                    PaintDoc::Gradient { stops } => {
                        if stops
                            .iter()
                            .any(|s| !s.offset.is_finite() || !(0.0..=1.0).contains(&s.offset))
                        {
                            return Err(ExportError::validation(format!(
                                "node {i} gradient stop offsets must be in [0, 1]"
                            )));
                        }
                    }
                    PaintDoc::None | PaintDoc::Solid { .. } => {}
                }
            }
            if let Some(d) = &node.path {
                BezPath::from_svg(d).map_err(|e| {
                    ExportError::validation(format!("node {i} path data is invalid: {e}"))
                })?;
            }
        }
        Ok(())
    }

    fn check_pattern(&self, pattern: u32, node: usize) -> ExportResult<()> {
        if pattern as usize >= self.patterns.len() {
            return Err(ExportError::validation(format!(
                "node {node} references missing pattern {pattern}"
            )));
        }
        Ok(())
    }

    fn node(&self, node: NodeId) -> Option<&NodeDoc> {
        self.nodes.get(node.0 as usize)
    }

    fn paint(&self, node: NodeId, target: PaintTarget) -> Option<&PaintDoc> {
        self.node(node).map(|n| match target {
            PaintTarget::Fill => &n.fill,
            PaintTarget::Stroke => &n.stroke,
        })
    }

    fn paint_kind(&self, node: NodeId, target: PaintTarget) -> PaintKind {
        match self.paint(node, target) {
            None | Some(PaintDoc::None) => PaintKind::None,
            Some(PaintDoc::Solid { .. }) => PaintKind::Solid,
            Some(PaintDoc::Gradient { .. }) => PaintKind::Gradient,
            Some(PaintDoc::Pattern { pattern }) => PaintKind::Pattern(PatternHandle(*pattern)),
        }
    }
}

impl ArtworkSource for ArtworkDocument {
    fn layer_count(&self) -> usize {
        self.layers.len()
    }

    fn layer(&self, index: usize) -> LayerHandle {
        LayerHandle(index as u32)
    }

    fn is_layer_visible(&self, layer: LayerHandle) -> bool {
        self.layers
            .get(layer.0 as usize)
            .is_some_and(|l| l.visible)
    }

    fn layer_name(&self, layer: LayerHandle) -> String {
        self.layers
            .get(layer.0 as usize)
            .map(|l| l.name.clone())
            .unwrap_or_default()
    }

    fn first_art(&self, layer: LayerHandle) -> Option<NodeId> {
        self.layers.get(layer.0 as usize)?.art.map(NodeId)
    }

    fn first_child(&self, node: NodeId) -> Option<NodeId> {
        self.node(node)?.first_child.map(NodeId)
    }

    fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        self.node(node)?.next_sibling.map(NodeId)
    }

    fn bounds(&self, node: NodeId) -> Bounds {
        self.node(node).map(|n| n.bounds).unwrap_or(Bounds::EMPTY)
    }

    fn is_hidden(&self, node: NodeId) -> bool {
        self.node(node).is_none_or(|n| n.hidden)
    }

    fn node_kind(&self, node: NodeId) -> NodeKind {
        self.node(node).map(|n| n.kind).unwrap_or_default()
    }

    fn opacity(&self, node: NodeId) -> f64 {
        self.node(node).map(|n| n.opacity).unwrap_or(1.0)
    }

    fn fill_paint(&self, node: NodeId) -> PaintKind {
        self.paint_kind(node, PaintTarget::Fill)
    }

    fn stroke_paint(&self, node: NodeId) -> PaintKind {
        self.paint_kind(node, PaintTarget::Stroke)
    }

    fn symbol_pattern(&self, node: NodeId) -> Option<PatternHandle> {
        self.node(node)?.symbol.map(PatternHandle)
    }

    fn plugin_result_root(&self, node: NodeId) -> Option<NodeId> {
        self.node(node)?.result.map(NodeId)
    }

    fn pattern_content_root(&self, pattern: PatternHandle) -> Option<NodeId> {
        self.patterns.get(pattern.0 as usize)?.content.map(NodeId)
    }

    fn pattern_name(&self, pattern: PatternHandle) -> String {
        self.patterns
            .get(pattern.0 as usize)
            .map(|p| p.name.clone())
            .unwrap_or_default()
    }

    fn path(&self, node: NodeId) -> Option<BezPath> {
        let d = self.node(node)?.path.as_deref()?;
        BezPath::from_svg(d).ok()
    }

    fn solid_color(&self, node: NodeId, target: PaintTarget) -> Option<Rgba8> {
        match self.paint(node, target)? {
            PaintDoc::Solid { color } => Some(*color),
            _ => None,
        }
    }

    fn gradient_stops(&self, node: NodeId, target: PaintTarget) -> Vec<GradientStop> {
        match self.paint(node, target) {
            Some(PaintDoc::Gradient { stops }) => stops.clone(),
            _ => Vec::new(),
        }
    }

    fn stroke_width(&self, node: NodeId) -> f64 {
        self.node(node).map(|n| n.stroke_width).unwrap_or(1.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/artwork/document.rs"]
mod tests;
