use crate::{
    artwork::source::{NodeId, PatternHandle},
    compile::layer::Features,
    foundation::{
        core::{Bounds, CanvasId},
        naming::{to_identifier, unique_name},
    },
};

/// A reusable drawable subtree: a symbol definition or a fill/stroke pattern.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Pattern {
    pub handle: PatternHandle,
    /// Generated identifier, unique among patterns.
    pub name: String,
    pub is_symbol: bool,
    /// Hidden canvas the pattern tile is painted into. Only fill/stroke patterns get one.
    pub canvas: Option<CanvasId>,
    pub content: Option<NodeId>,
    /// Module-level function painting a symbol, unique among all generated names.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol_function: Option<String>,
    /// Bounds of the content root, empty when the definition has no content.
    pub bounds: Bounds,
    #[serde(flatten)]
    pub features: Features,
}

/// Patterns registered during a scan, deduplicated by host handle, in discovery order.
#[derive(Clone, Debug, Default, serde::Serialize)]
pub struct PatternRegistry {
    patterns: Vec<Pattern>,
    next_canvas: u32,
}

/// Host data needed to register a pattern.
#[derive(Clone, Debug)]
pub struct PatternInfo<'a> {
    pub host_name: &'a str,
    pub content: Option<NodeId>,
    pub bounds: Bounds,
}

impl PatternRegistry {
    /// Register `handle`. Returns `true` when the pattern was not known before.
    ///
    /// A pattern first seen as a symbol and later used as a paint still receives its hidden canvas.
    pub fn add(&mut self, handle: PatternHandle, is_symbol: bool, info: PatternInfo<'_>) -> bool {
        if let Some(index) = self.patterns.iter().position(|p| p.handle == handle) {
            if !is_symbol && self.patterns[index].canvas.is_none() {
                let canvas = self.allocate_canvas();
                self.patterns[index].canvas = Some(canvas);
            }
            return false;
        }

        let base = match to_identifier(info.host_name) {
            ident if ident.is_empty() => "pattern".to_owned(),
            ident => ident,
        };
        let name = unique_name(&base, |n| self.patterns.iter().any(|p| p.name == n));
        let canvas = (!is_symbol).then(|| self.allocate_canvas());
        tracing::debug!(pattern = %name, is_symbol, "registered pattern");
        self.patterns.push(Pattern {
            handle,
            name,
            is_symbol,
            canvas,
            content: info.content,
            symbol_function: None,
            bounds: info.bounds,
            features: Features::default(),
        });
        true
    }

    pub fn find(&self, handle: PatternHandle) -> Option<&Pattern> {
        self.patterns.iter().find(|p| p.handle == handle)
    }

    pub fn find_mut(&mut self, handle: PatternHandle) -> Option<&mut Pattern> {
        self.patterns.iter_mut().find(|p| p.handle == handle)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pattern> {
        self.patterns.iter()
    }

    /// Patterns painted into hidden canvases, in canvas order.
    pub fn canvas_patterns(&self) -> impl Iterator<Item = &Pattern> {
        self.patterns.iter().filter(|p| p.canvas.is_some())
    }

    pub fn symbols(&self) -> impl Iterator<Item = &Pattern> {
        self.patterns.iter().filter(|p| p.is_symbol)
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Give every symbol a function name that `taken` does not claim and no other symbol uses.
    pub fn name_symbol_functions(&mut self, taken: impl Fn(&str) -> bool) {
        for index in 0..self.patterns.len() {
            if !self.patterns[index].is_symbol {
                continue;
            }
            let base = symbol_function_name(&self.patterns[index].name);
            let name = unique_name(&base, |n| {
                taken(n)
                    || self
                        .patterns
                        .iter()
                        .any(|p| p.symbol_function.as_deref() == Some(n))
            });
            self.patterns[index].symbol_function = Some(name);
        }
    }

    fn allocate_canvas(&mut self) -> CanvasId {
        self.next_canvas += 1;
        CanvasId(self.next_canvas)
    }
}

impl Pattern {
    /// Name of the generated function painting this symbol.
    pub fn function_name(&self) -> String {
        self.symbol_function
            .clone()
            .unwrap_or_else(|| symbol_function_name(&self.name))
    }
}

/// Default name of the generated function that paints symbol `name`.
pub fn symbol_function_name(name: &str) -> String {
    format!("{name}Symbol")
}

#[cfg(test)]
#[path = "../../tests/unit/compile/pattern.rs"]
mod tests;
