use crate::{
    artwork::source::{ArtworkSource, LayerHandle, NodeId, NodeKind, PaintKind, PatternHandle},
    compile::{
        layer::{Layer, ScanAccumulator},
        pattern::{PatternInfo, PatternRegistry},
        warning::{CompileWarning, WarningKind},
    },
    foundation::core::BezPath,
};

/// Walks the host layer tree, producing [`Layer`] records and registering patterns.
///
/// Recursion depth is bounded by `max_depth`; deeper subtrees are skipped and reported.
pub struct LayerScanner<'a, S: ArtworkSource + ?Sized> {
    source: &'a S,
    patterns: &'a mut PatternRegistry,
    warnings: &'a mut Vec<CompileWarning>,
    max_depth: usize,
}

impl<'a, S: ArtworkSource + ?Sized> LayerScanner<'a, S> {
    pub fn new(
        source: &'a S,
        patterns: &'a mut PatternRegistry,
        warnings: &'a mut Vec<CompileWarning>,
        max_depth: usize,
    ) -> Self {
        Self {
            source,
            patterns,
            warnings,
            max_depth,
        }
    }

    /// Scan every visible layer, bottom-most first.
    #[tracing::instrument(skip_all)]
    pub fn scan_document(&mut self) -> Vec<Layer> {
        let count = self.source.layer_count();
        let mut layers = Vec::with_capacity(count);
        for index in (0..count).rev() {
            let handle = self.source.layer(index);
            if !self.source.is_layer_visible(handle) {
                tracing::debug!(index, "skipping hidden layer");
                continue;
            }
            layers.push(self.scan_layer(handle));
        }
        layers
    }

    fn scan_layer(&mut self, handle: LayerHandle) -> Layer {
        let name = self.source.layer_name(handle);
        let art = self.source.first_art(handle);
        let mut acc = ScanAccumulator::default();
        self.scan_artwork(art, 1, &mut acc);
        tracing::debug!(layer = %name, features = ?acc.features, "scanned layer");
        Layer::new(name, art, acc)
    }

    /// Depth-first walk of `first` and its following siblings into `acc`.
    pub fn scan_artwork(&mut self, first: Option<NodeId>, depth: usize, acc: &mut ScanAccumulator) {
        let Some(first) = first else {
            return;
        };
        if depth > self.max_depth {
            tracing::warn!(depth, "art nesting exceeds depth limit, subtree skipped");
            self.warnings.push(CompileWarning::new(
                WarningKind::DepthLimit,
                None,
                format!(
                    "art nesting deeper than {} levels was skipped",
                    self.max_depth
                ),
            ));
            return;
        }

        let source = self.source;
        let mut node = Some(first);
        while let Some(current) = node {
            if !source.is_hidden(current) {
                self.scan_node(current, depth, acc);
            }
            node = source.next_sibling(current);
        }
    }

    fn scan_node(&mut self, node: NodeId, depth: usize, acc: &mut ScanAccumulator) {
        let source = self.source;
        acc.bounds = acc.bounds.union(source.bounds(node));

        match source.node_kind(node) {
            NodeKind::Symbol => {
                if let Some(pattern) = source.symbol_pattern(node) {
                    self.register_pattern(pattern, true, depth);
                }
            }
            NodeKind::PluginGroup => {
                if let Some(result) = source.plugin_result_root(node) {
                    let first = source.first_child(result);
                    self.scan_artwork(first, depth + 1, acc);
                }
            }
            NodeKind::Plain => {}
        }

        if source.opacity(node) != 1.0 {
            acc.features.has_alpha = true;
        }

        for paint in [source.fill_paint(node), source.stroke_paint(node)] {
            match paint {
                PaintKind::Pattern(pattern) => {
                    self.register_pattern(pattern, false, depth);
                    acc.features.has_patterns = true;
                }
                PaintKind::Gradient => acc.features.has_gradients = true,
                PaintKind::None | PaintKind::Solid => {}
            }
        }

        self.scan_artwork(source.first_child(node), depth + 1, acc);
    }

    /// Register a pattern and, when new, scan its content into an isolated accumulator so its
    /// features land on the pattern record only.
    fn register_pattern(&mut self, handle: PatternHandle, is_symbol: bool, depth: usize) {
        let source = self.source;
        let content = source.pattern_content_root(handle);
        let host_name = source.pattern_name(handle);
        let info = PatternInfo {
            host_name: &host_name,
            content,
            bounds: content.map(|root| source.bounds(root)).unwrap_or_default(),
        };
        if !self.patterns.add(handle, is_symbol, info) {
            return;
        }

        let mut isolated = ScanAccumulator::default();
        self.scan_artwork(content, depth + 1, &mut isolated);
        if let Some(pattern) = self.patterns.find_mut(handle) {
            pattern.features = isolated.features;
        }
    }
}

/// First visible node under `first` (depth-first, siblings included) that carries path geometry.
pub fn find_motion_path<S: ArtworkSource + ?Sized>(
    source: &S,
    first: Option<NodeId>,
    max_depth: usize,
) -> Option<BezPath> {
    fn walk<S: ArtworkSource + ?Sized>(
        source: &S,
        first: Option<NodeId>,
        depth: usize,
        max_depth: usize,
    ) -> Option<BezPath> {
        if depth > max_depth {
            return None;
        }
        let mut node = first;
        while let Some(current) = node {
            if !source.is_hidden(current) {
                if let Some(path) = source.path(current).filter(|p| !p.elements().is_empty()) {
                    return Some(path);
                }
                if let Some(path) = walk(source, source.first_child(current), depth + 1, max_depth)
                {
                    return Some(path);
                }
            }
            node = source.next_sibling(current);
        }
        None
    }
    walk(source, first, 1, max_depth)
}

#[cfg(test)]
#[path = "../../tests/unit/compile/scanner.rs"]
mod tests;
