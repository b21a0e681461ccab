use kurbo::PathEl;

use crate::{
    artwork::source::{ArtworkSource, NodeId, NodeKind, PaintKind, PaintTarget, PatternHandle},
    compile::pattern::PatternRegistry,
    emit::writer::{CodeWriter, fmt_num, quote},
    foundation::{
        core::{Affine, Point},
        error::ExportResult,
    },
};

/// Turns one art node (and its subtree) into drawing statements.
///
/// `transform` maps document space to the output space of the current paint scope. The
/// emitter has already declared the `alpha`, `gradient` and `pattern` locals required by the
/// scope's feature flags before the first call.
pub trait PathRenderer {
    fn render(
        &mut self,
        w: &mut CodeWriter,
        source: &dyn ArtworkSource,
        node: NodeId,
        transform: Affine,
    ) -> ExportResult<()>;

    /// Render the content of symbol `symbol`, starting at `first` and following siblings.
    fn render_symbol(
        &mut self,
        w: &mut CodeWriter,
        source: &dyn ArtworkSource,
        _symbol: PatternHandle,
        first: Option<NodeId>,
        transform: Affine,
    ) -> ExportResult<()> {
        let mut node = first;
        while let Some(current) = node {
            self.render(w, source, current, transform)?;
            node = source.next_sibling(current);
        }
        Ok(())
    }
}

/// Emits canvas path commands from node outlines with solid, gradient and pattern paints.
pub struct OutlineRenderer<'a> {
    ctx: &'a str,
    patterns: &'a PatternRegistry,
    max_depth: usize,
    /// Symbols whose content is being rendered; instances of these are not called again.
    active_symbols: Vec<PatternHandle>,
}

impl<'a> OutlineRenderer<'a> {
    pub fn new(ctx: &'a str, patterns: &'a PatternRegistry, max_depth: usize) -> Self {
        Self {
            ctx,
            patterns,
            max_depth,
            active_symbols: Vec::new(),
        }
    }

    fn render_siblings(
        &mut self,
        w: &mut CodeWriter,
        source: &dyn ArtworkSource,
        first: Option<NodeId>,
        transform: Affine,
        depth: usize,
    ) -> ExportResult<()> {
        let mut node = first;
        while let Some(current) = node {
            self.render_node(w, source, current, transform, depth)?;
            node = source.next_sibling(current);
        }
        Ok(())
    }

    fn render_node(
        &mut self,
        w: &mut CodeWriter,
        source: &dyn ArtworkSource,
        node: NodeId,
        transform: Affine,
        depth: usize,
    ) -> ExportResult<()> {
        if depth > self.max_depth || source.is_hidden(node) {
            return Ok(());
        }
        let ctx = self.ctx;
        let opacity = source.opacity(node);
        let translucent = opacity != 1.0;
        if translucent {
            w.line(format!("{ctx}.globalAlpha = alpha * {};", fmt_num(opacity)));
        }

        match source.node_kind(node) {
            NodeKind::Symbol => self.render_symbol_instance(w, source, node, transform),
            NodeKind::PluginGroup => {
                if let Some(result) = source.plugin_result_root(node) {
                    let first = source.first_child(result);
                    self.render_siblings(w, source, first, transform, depth + 1)?;
                }
            }
            NodeKind::Plain => {
                self.render_outline(w, source, node, transform);
                let first = source.first_child(node);
                self.render_siblings(w, source, first, transform, depth + 1)?;
            }
        }

        if translucent {
            w.line(format!("{ctx}.globalAlpha = alpha;"));
        }
        Ok(())
    }

    fn render_symbol_instance(
        &self,
        w: &mut CodeWriter,
        source: &dyn ArtworkSource,
        node: NodeId,
        transform: Affine,
    ) {
        let Some(handle) = source.symbol_pattern(node) else {
            return;
        };
        if self.active_symbols.contains(&handle) {
            w.line("// recursive symbol instance skipped");
            return;
        }
        let Some(pattern) = self.patterns.find(handle) else {
            return;
        };
        let placed = source.bounds(node);
        let origin = transform * Point::new(placed.left, placed.top);
        let ctx = self.ctx;
        w.line(format!("{ctx}.save();"));
        w.line(format!(
            "{ctx}.translate({}, {});",
            fmt_num(origin.x),
            fmt_num(origin.y)
        ));
        let content = pattern.bounds;
        if !content.is_empty() && content.width() > 0.0 && content.height() > 0.0 {
            let sx = placed.width() / content.width();
            let sy = placed.height() / content.height();
            if (sx - 1.0).abs() > 1e-9 || (sy - 1.0).abs() > 1e-9 {
                w.line(format!("{ctx}.scale({}, {});", fmt_num(sx), fmt_num(sy)));
            }
        }
        w.line(format!("{}({ctx});", pattern.function_name()));
        w.line(format!("{ctx}.restore();"));
    }

    fn render_outline(
        &self,
        w: &mut CodeWriter,
        source: &dyn ArtworkSource,
        node: NodeId,
        transform: Affine,
    ) {
        let Some(path) = source.path(node) else {
            return;
        };
        if path.elements().is_empty() {
            return;
        }
        let fill = source.fill_paint(node);
        let stroke = source.stroke_paint(node);
        if fill == PaintKind::None && stroke == PaintKind::None {
            return;
        }

        let ctx = self.ctx;
        let path = transform * path;
        w.line(format!("{ctx}.beginPath();"));
        for el in path.elements() {
            match *el {
                PathEl::MoveTo(p) => {
                    w.line(format!("{ctx}.moveTo({}, {});", fmt_num(p.x), fmt_num(p.y)));
                }
                PathEl::LineTo(p) => {
                    w.line(format!("{ctx}.lineTo({}, {});", fmt_num(p.x), fmt_num(p.y)));
                }
                PathEl::QuadTo(c, p) => w.line(format!(
                    "{ctx}.quadraticCurveTo({}, {}, {}, {});",
                    fmt_num(c.x),
                    fmt_num(c.y),
                    fmt_num(p.x),
                    fmt_num(p.y)
                )),
                PathEl::CurveTo(c1, c2, p) => w.line(format!(
                    "{ctx}.bezierCurveTo({}, {}, {}, {}, {}, {});",
                    fmt_num(c1.x),
                    fmt_num(c1.y),
                    fmt_num(c2.x),
                    fmt_num(c2.y),
                    fmt_num(p.x),
                    fmt_num(p.y)
                )),
                PathEl::ClosePath => w.line(format!("{ctx}.closePath();")),
            }
        }

        if self.paint_style(w, source, node, PaintTarget::Fill, fill, transform) {
            w.line(format!("{ctx}.fill();"));
        }
        if self.paint_style(w, source, node, PaintTarget::Stroke, stroke, transform) {
            w.line(format!(
                "{ctx}.lineWidth = {};",
                fmt_num(source.stroke_width(node))
            ));
            w.line(format!("{ctx}.stroke();"));
        }
    }

    /// Set `fillStyle`/`strokeStyle` for `paint`. Returns false when nothing should be painted.
    fn paint_style(
        &self,
        w: &mut CodeWriter,
        source: &dyn ArtworkSource,
        node: NodeId,
        target: PaintTarget,
        paint: PaintKind,
        transform: Affine,
    ) -> bool {
        let ctx = self.ctx;
        let property = match target {
            PaintTarget::Fill => "fillStyle",
            PaintTarget::Stroke => "strokeStyle",
        };
        match paint {
            PaintKind::None => false,
            PaintKind::Solid => {
                let color = source
                    .solid_color(node, target)
                    .map(|c| c.css())
                    .unwrap_or_else(|| "rgb(0, 0, 0)".to_owned());
                w.line(format!("{ctx}.{property} = {};", quote(&color)));
                true
            }
            PaintKind::Gradient => {
                let b = source.bounds(node);
                let mid = (b.top + b.bottom) / 2.0;
                let start = transform * Point::new(b.left, mid);
                let end = transform * Point::new(b.right, mid);
                w.line(format!(
                    "gradient = {ctx}.createLinearGradient({}, {}, {}, {});",
                    fmt_num(start.x),
                    fmt_num(start.y),
                    fmt_num(end.x),
                    fmt_num(end.y)
                ));
                for stop in source.gradient_stops(node, target) {
                    w.line(format!(
                        "gradient.addColorStop({}, {});",
                        fmt_num(stop.offset),
                        quote(&stop.color.css())
                    ));
                }
                w.line(format!("{ctx}.{property} = gradient;"));
                true
            }
            PaintKind::Pattern(handle) => {
                let Some(canvas) = self.patterns.find(handle).and_then(|p| p.canvas) else {
                    return false;
                };
                let element = format!(
                    "document.getElementById({}) as HTMLCanvasElement",
                    quote(&pattern_canvas_id(canvas.0))
                );
                w.line(format!("pattern = {ctx}.createPattern({element}, \"repeat\")!;"));
                w.line(format!("{ctx}.{property} = pattern;"));
                true
            }
        }
    }
}

impl PathRenderer for OutlineRenderer<'_> {
    fn render(
        &mut self,
        w: &mut CodeWriter,
        source: &dyn ArtworkSource,
        node: NodeId,
        transform: Affine,
    ) -> ExportResult<()> {
        self.render_node(w, source, node, transform, 1)
    }

    /// Nested instances of the symbol being rendered are skipped.
    fn render_symbol(
        &mut self,
        w: &mut CodeWriter,
        source: &dyn ArtworkSource,
        symbol: PatternHandle,
        first: Option<NodeId>,
        transform: Affine,
    ) -> ExportResult<()> {
        self.active_symbols.push(symbol);
        let result = self.render_siblings(w, source, first, transform, 1);
        self.active_symbols.pop();
        result
    }
}

/// Element id of the hidden canvas backing pattern canvas `index`.
pub fn pattern_canvas_id(index: u32) -> String {
    format!("pattern{index}")
}

#[cfg(test)]
#[path = "../../tests/unit/emit/renderer.rs"]
mod tests;
