use crate::{
    artwork::source::ArtworkSource,
    compile::{
        collection::FunctionCollection,
        function::{Function, FunctionKind},
        layer::{Layer, LayerId},
        options::{function_kind, parse_layer_name, split_option},
        pattern::PatternRegistry,
        scanner::{LayerScanner, find_motion_path},
        warning::{CompileWarning, WarningKind},
    },
    foundation::{
        core::{Bounds, CanvasDesc, CanvasId, ParamOutcome},
        error::{ExportError, ExportResult},
    },
};

/// Compile-time knobs. Every field has a default, so `{}` is a valid options file.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CompileOptions {
    /// Art nesting guard for the scanner; deeper subtrees are skipped with a warning.
    pub max_depth: usize,
    /// Derive `rasterize` file names from the function name instead of the supplied value.
    pub rasterize_name_from_function: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            max_depth: 256,
            rasterize_name_from_function: false,
        }
    }
}

/// Everything the emitter needs: layers, functions, patterns, canvases and resolved bounds.
#[derive(Clone, Debug, serde::Serialize)]
pub struct CompiledDocument {
    /// Visible layers in scan (bottom-up) order. Indexed by [`LayerId`].
    pub layers: Vec<Layer>,
    pub functions: FunctionCollection,
    pub patterns: PatternRegistry,
    pub bounds: Bounds,
    /// Main canvas first, then one hidden canvas per fill/stroke pattern.
    pub canvases: Vec<CanvasDesc>,
    pub has_animation: bool,
    pub warnings: Vec<CompileWarning>,
}

impl CompiledDocument {
    pub fn width(&self) -> f64 {
        self.bounds.width()
    }

    pub fn height(&self) -> f64 {
        self.bounds.height()
    }

    pub fn layer(&self, id: LayerId) -> Option<&Layer> {
        self.layers.get(id.index())
    }
}

#[derive(Clone, Debug, Default)]
pub struct DocumentCompiler {
    options: CompileOptions,
}

impl DocumentCompiler {
    pub fn new(options: CompileOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    /// Scan `source`, build functions from its layers, bind cross references and size the
    /// output.
    ///
    /// Fails only with [`ExportError::NoVisibleContent`]; every other problem becomes a
    /// [`CompileWarning`] on the result.
    #[tracing::instrument(skip_all, fields(max_depth = self.options.max_depth))]
    pub fn compile<S: ArtworkSource + ?Sized>(&self, source: &S) -> ExportResult<CompiledDocument> {
        let mut patterns = PatternRegistry::default();
        let mut warnings = Vec::new();
        let mut layers =
            LayerScanner::new(source, &mut patterns, &mut warnings, self.options.max_depth)
                .scan_document();

        let mut functions = FunctionCollection::default();
        self.parse_layers(source, &mut layers, &mut functions, &mut warnings);
        warnings.extend(functions.bind_animation_functions());
        warnings.extend(functions.bind_triggers());
        patterns.name_symbol_functions(|name| functions.find(name, None).is_some());

        for layer in layers.iter().filter(|l| l.crop && l.bounds.is_empty()) {
            tracing::warn!(layer = %layer.name, "crop layer has no visible art");
            warnings.push(CompileWarning::new(
                WarningKind::EmptyCrop,
                Some(&layer.name),
                "crop layer has no visible art and does not size the document",
            ));
        }
        let bounds = compute_bounds(&layers);
        if bounds.is_empty() {
            return Err(ExportError::NoVisibleContent);
        }

        let mut canvases = vec![CanvasDesc {
            id: CanvasId::MAIN,
            width: bounds.width(),
            height: bounds.height(),
            hidden: false,
        }];
        for pattern in patterns.canvas_patterns() {
            let Some(id) = pattern.canvas else {
                continue;
            };
            let (width, height) = if pattern.bounds.is_empty() {
                (0.0, 0.0)
            } else {
                (pattern.bounds.width(), pattern.bounds.height())
            };
            canvases.push(CanvasDesc {
                id,
                width,
                height,
                hidden: true,
            });
        }

        // A resolved trigger needs the clock runtime even when no clock runs on its own.
        let has_animation = functions.iter().any(|(_, f)| match f {
            Function::Animation(_) => true,
            Function::Draw(draw) => {
                draw.has_animation() || draw.triggers.iter().any(|t| t.source.is_some())
            }
        });

        tracing::debug!(
            layers = layers.len(),
            functions = functions.len(),
            patterns = patterns.len(),
            warnings = warnings.len(),
            "compiled document"
        );
        Ok(CompiledDocument {
            layers,
            functions,
            patterns,
            bounds,
            canvases,
            has_animation,
            warnings,
        })
    }

    /// Classify every layer, register it with a function and apply its options.
    #[tracing::instrument(skip_all)]
    fn parse_layers<S: ArtworkSource + ?Sized>(
        &self,
        source: &S,
        layers: &mut [Layer],
        functions: &mut FunctionCollection,
        warnings: &mut Vec<CompileWarning>,
    ) {
        for index in 0..layers.len() {
            let layer_id = LayerId(index as u32);
            let parsed = parse_layer_name(&layers[index].name);

            let mut options = Vec::with_capacity(parsed.options.len());
            for raw in &parsed.options {
                match split_option(raw) {
                    Some(option) => options.push(option),
                    None => {
                        tracing::warn!(
                            layer = %layers[index].name,
                            option = %raw,
                            "malformed option"
                        );
                        warnings.push(CompileWarning::new(
                            WarningKind::MalformedOption,
                            Some(&parsed.base_name),
                            format!("option '{raw}' is not of the form key:value"),
                        ));
                    }
                }
            }

            let id = match function_kind(&options) {
                FunctionKind::Draw => {
                    let id = functions.add_draw_function(&parsed.base_name);
                    if let Some(draw) = functions.get_mut(id).and_then(Function::as_draw_mut) {
                        draw.add_layer(layer_id, &layers[index]);
                    }
                    id
                }
                FunctionKind::Animation => {
                    let id = functions.add_animation_function(&parsed.base_name);
                    let layer = &layers[index];
                    if let Some(anim) = functions.get_mut(id).and_then(Function::as_animation_mut)
                    {
                        anim.layer = Some(layer_id);
                        anim.art = layer.art;
                        anim.header.bounds = layer.bounds;
                        match find_motion_path(source, layer.art, self.options.max_depth) {
                            Some(path) => anim.set_path(&path),
                            None => tracing::debug!(
                                function = %anim.header.name,
                                "animation layer has no path geometry"
                            ),
                        }
                    }
                    id
                }
            };

            let Some(function) = functions.get_mut(id) else {
                continue;
            };
            for (key, value) in &options {
                let outcome = match function {
                    Function::Draw(draw) => draw.set_parameter(key, value, layers, &self.options),
                    Function::Animation(anim) => anim.set_parameter(key, value),
                };
                let name = function.name();
                match outcome {
                    ParamOutcome::Applied => {}
                    ParamOutcome::Unknown => {
                        tracing::warn!(function = %name, key = %key, "unknown option ignored");
                        warnings.push(CompileWarning::new(
                            WarningKind::UnknownOption,
                            Some(name),
                            format!("unknown option '{key}'"),
                        ));
                    }
                    ParamOutcome::Malformed => {
                        tracing::warn!(
                            function = %name,
                            key = %key,
                            value = %value,
                            "option value skipped"
                        );
                        warnings.push(CompileWarning::new(
                            WarningKind::MalformedOption,
                            Some(name),
                            format!("value '{value}' for option '{key}' is not usable"),
                        ));
                    }
                }
            }
        }
    }
}

/// Document bounds: the first crop layer in scan order wins outright, otherwise the union of
/// all layer bounds. Crop layers without art are passed over. Returns [`Bounds::EMPTY`] when
/// there is nothing to enclose.
pub fn compute_bounds(layers: &[Layer]) -> Bounds {
    if let Some(crop) = layers.iter().find(|l| l.crop && !l.bounds.is_empty()) {
        return crop.bounds;
    }
    layers
        .iter()
        .fold(Bounds::EMPTY, |acc, layer| acc.union(layer.bounds))
}

#[cfg(test)]
#[path = "../../tests/unit/compile/compiler.rs"]
mod tests;
