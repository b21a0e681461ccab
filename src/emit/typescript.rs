use std::{borrow::Cow, collections::HashSet};

use crate::{
    animation::clock::{AnimationClock, ClockKind},
    artwork::source::{ArtworkSource, NodeId},
    compile::{
        compiler::{CompileOptions, CompiledDocument},
        draw::DrawFunction,
        function::Function,
        layer::Features,
    },
    emit::{
        renderer::{OutlineRenderer, PathRenderer, pattern_canvas_id},
        runtime::runtime_source,
        writer::{CodeWriter, fmt_num, quote},
    },
    foundation::{
        core::{Affine, Bounds, FunctionId, Point},
        error::ExportResult,
    },
};

/// Output settings for [`TypeScriptEmitter`]. Every field has a default.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EmitOptions {
    /// Element id of the visible canvas used when `render()` is called without arguments.
    pub canvas_id: String,
    /// Name of the 2D context parameter in generated functions.
    pub context_name: String,
    pub fps: f64,
    /// Embed the clock runtime when the document animates.
    pub include_runtime: bool,
    /// Mark repositioned origins and append a summary comment.
    pub debug: bool,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            canvas_id: "canvas".to_owned(),
            context_name: "ctx".to_owned(),
            fps: 60.0,
            include_runtime: true,
            debug: false,
        }
    }
}

/// Writes a compiled document as a self-contained TypeScript module.
///
/// Module layout, in order: optional runtime, `bounds`, symbol functions, `drawPatterns()`,
/// one exported object per draw function, motion paths, clocks, `drawFrame(ctx)` and the
/// `render(canvas)` entry point.
pub struct TypeScriptEmitter<'a> {
    document: &'a CompiledDocument,
    source: &'a dyn ArtworkSource,
    options: EmitOptions,
}

impl<'a> TypeScriptEmitter<'a> {
    pub fn new(
        document: &'a CompiledDocument,
        source: &'a dyn ArtworkSource,
        options: EmitOptions,
    ) -> Self {
        Self {
            document,
            source,
            options,
        }
    }

    /// Emit with the built-in [`OutlineRenderer`].
    pub fn emit(&self) -> ExportResult<String> {
        let mut renderer = OutlineRenderer::new(
            &self.options.context_name,
            &self.document.patterns,
            CompileOptions::default().max_depth,
        );
        self.emit_with(&mut renderer)
    }

    #[tracing::instrument(skip_all, fields(functions = self.document.functions.len()))]
    pub fn emit_with(&self, renderer: &mut dyn PathRenderer) -> ExportResult<String> {
        let mut w = CodeWriter::new();
        w.line("// Generated by canvas-export. Do not edit.");
        w.blank();

        if self.document.has_animation && self.options.include_runtime {
            w.lines(&runtime_source());
            w.blank();
        }

        w.line(format!(
            "export const bounds = {};",
            bounds_literal(self.document.bounds)
        ));
        w.blank();

        self.emit_symbols(&mut w, renderer)?;
        self.emit_patterns(&mut w, renderer)?;
        self.emit_draw_functions(&mut w, renderer)?;
        self.emit_motion_paths(&mut w);
        self.emit_clocks(&mut w);
        self.emit_draw_frame(&mut w);
        self.emit_render(&mut w);
        if self.options.debug {
            self.emit_debug_info(&mut w);
        }

        tracing::debug!(bytes = w.as_str().len(), "emitted module");
        Ok(w.into_string())
    }

    fn emit_symbols(&self, w: &mut CodeWriter, renderer: &mut dyn PathRenderer) -> ExportResult<()> {
        let ctx = &self.options.context_name;
        for pattern in self.document.patterns.symbols() {
            let name = pattern.function_name();
            w.open(format!(
                "function {}({ctx}: CanvasRenderingContext2D): void {{",
                script_name(&name)
            ));
            declare_locals(w, ctx, pattern.features);
            renderer.render_symbol(
                w,
                self.source,
                pattern.handle,
                pattern.content,
                content_transform(pattern.bounds),
            )?;
            w.close("}");
            w.blank();
        }
        Ok(())
    }

    fn emit_patterns(&self, w: &mut CodeWriter, renderer: &mut dyn PathRenderer) -> ExportResult<()> {
        let patterns: Vec<_> = self.document.patterns.canvas_patterns().collect();
        if patterns.is_empty() {
            return Ok(());
        }
        let ctx = &self.options.context_name;
        w.open("export function drawPatterns(): void {");
        for pattern in patterns {
            let Some(canvas_id) = pattern.canvas else {
                continue;
            };
            let canvas = format!("canvas{}", canvas_id.0);
            let (width, height) = extent(pattern.bounds);
            w.line(format!("// {}", pattern.name));
            w.open("{");
            w.line(format!(
                "const {canvas} = document.getElementById({}) as HTMLCanvasElement;",
                quote(&pattern_canvas_id(canvas_id.0))
            ));
            w.line(format!("{canvas}.width = {};", fmt_num(width)));
            w.line(format!("{canvas}.height = {};", fmt_num(height)));
            w.line(format!("const {ctx} = {canvas}.getContext(\"2d\")!;"));
            declare_locals(w, ctx, pattern.features);
            let transform = content_transform(pattern.bounds);
            self.render_chain(w, renderer, pattern.content, transform)?;
            w.close("}");
        }
        w.close("}");
        w.blank();
        Ok(())
    }

    fn emit_draw_functions(
        &self,
        w: &mut CodeWriter,
        renderer: &mut dyn PathRenderer,
    ) -> ExportResult<()> {
        let ctx = &self.options.context_name;
        let document_bounds = self.document.bounds;
        for (_, draw) in self.document.functions.draw_functions() {
            let name = script_name(&draw.header.name);
            w.open(format!("export const {name} = {{"));
            w.line(format!("bounds: {},", bounds_literal(draw.header.bounds)));
            if draw.rasterize_file_name.is_some() {
                w.line("image: new Image(),");
            }
            w.open(format!("paint({ctx}: CanvasRenderingContext2D): void {{"));
            let transform = draw.local_transform(document_bounds);
            if draw.rasterize_file_name.is_some() {
                let b = draw.header.bounds;
                let origin = transform * Point::new(b.left, b.top);
                let (width, height) = extent(b);
                w.line(format!(
                    "{ctx}.drawImage({name}.image, {}, {}, {}, {});",
                    fmt_num(origin.x),
                    fmt_num(origin.y),
                    fmt_num(width),
                    fmt_num(height)
                ));
            } else {
                declare_locals(w, ctx, draw.features);
                for layer_id in &draw.layers {
                    let art = self.document.layer(*layer_id).and_then(|l| l.art);
                    self.render_chain(w, renderer, art, transform)?;
                }
            }
            w.close("},");
            w.close("};");
            if let Some(file) = &draw.rasterize_file_name {
                w.line(format!("{name}.image.src = {};", quote(file)));
            }
            w.blank();
        }
        Ok(())
    }

    /// Render `first` and its following siblings.
    fn render_chain(
        &self,
        w: &mut CodeWriter,
        renderer: &mut dyn PathRenderer,
        first: Option<NodeId>,
        transform: Affine,
    ) -> ExportResult<()> {
        let mut node = first;
        while let Some(current) = node {
            renderer.render(w, self.source, current, transform)?;
            node = self.source.next_sibling(current);
        }
        Ok(())
    }

    fn emit_motion_paths(&self, w: &mut CodeWriter) {
        let page = content_transform(self.document.bounds);
        for (_, anim) in self.document.functions.animation_functions() {
            w.open(format!(
                "export const {} = new MotionPath(",
                script_name(&anim.header.name)
            ));
            w.open("[");
            for segment in &anim.segments {
                let points = [segment.p0, segment.p1, segment.p2, segment.p3]
                    .map(|p| page * p)
                    .iter()
                    .flat_map(|p| [fmt_num(p.x), fmt_num(p.y)])
                    .collect::<Vec<_>>()
                    .join(", ");
                w.line(format!("[{points}],"));
            }
            w.close("],");
            let lengths = anim
                .segment_lengths
                .iter()
                .map(|l| fmt_num(*l))
                .collect::<Vec<_>>()
                .join(", ");
            w.line(format!("[{lengths}],"));
            w.line(format!("{},", clock_literal(&anim.path_clock)));
            w.close(");");
            w.blank();
        }
    }

    fn emit_clocks(&self, w: &mut CodeWriter) {
        let referenced = self.trigger_clocks();
        let mut any = false;
        for (id, draw) in self.document.functions.draw_functions() {
            for clock in draw_clocks(draw) {
                if clock.is_active() || referenced.contains(&(id, clock.kind)) {
                    w.line(format!(
                        "export const {} = {};",
                        draw_clock_name(&draw.header.name, clock.kind),
                        clock_literal(clock)
                    ));
                    any = true;
                }
            }
        }
        if any {
            w.blank();
        }
    }

    fn emit_draw_frame(&self, w: &mut CodeWriter) {
        let ctx = &self.options.context_name;
        let doc = self.document;
        w.open(format!(
            "export function drawFrame({ctx}: CanvasRenderingContext2D): void {{"
        ));
        w.line(format!(
            "{ctx}.clearRect(0, 0, {}, {});",
            fmt_num(doc.width()),
            fmt_num(doc.height())
        ));
        for (_, draw) in doc.functions.draw_functions() {
            let name = script_name(&draw.header.name);
            let path = draw
                .animation_function
                .and_then(|id| doc.functions.get(id))
                .map(|f| script_name(f.name()));
            let transformed = draw.translate_origin
                || path.is_some()
                || draw.active_clocks().next().is_some();

            if transformed {
                w.line(format!("{ctx}.save();"));
            }
            if let Some(path) = &path {
                w.line(format!("{ctx}.translate({path}.x(), {path}.y());"));
                if let Some(degrees) = draw.follow_orientation {
                    let offset = if degrees == 0.0 {
                        String::new()
                    } else {
                        format!(" + {}", fmt_num(degrees.to_radians()))
                    };
                    w.line(format!("{ctx}.rotate({path}.angle(){offset});"));
                }
            } else if let Some(offset) = draw.reposition(doc.bounds) {
                // Always emitted, even for a zero offset: earlier calls share the context.
                w.line(format!(
                    "{ctx}.translate({}, {});",
                    fmt_num(offset.x),
                    fmt_num(offset.y)
                ));
            }
            for clock in draw.active_clocks() {
                let value = format!("{}.value", draw_clock_name(&draw.header.name, clock.kind));
                match clock.kind {
                    ClockKind::Rotate => w.line(format!("{ctx}.rotate({value});")),
                    ClockKind::Scale => w.line(format!("{ctx}.scale({value}, {value});")),
                    ClockKind::Alpha => w.line(format!("{ctx}.globalAlpha *= {value};")),
                    ClockKind::Path => {}
                }
            }
            w.line(format!("{name}.paint({ctx});"));
            if self.options.debug && draw.translate_origin {
                w.line(format!("{ctx}.save();"));
                w.line(format!("{ctx}.fillStyle = \"rgb(0, 0, 255)\";"));
                w.line(format!("{ctx}.fillRect(-2, -2, 5, 5);"));
                w.line(format!("{ctx}.restore();"));
            }
            if transformed {
                w.line(format!("{ctx}.restore();"));
            }
        }
        w.close("}");
        w.blank();
    }

    fn emit_render(&self, w: &mut CodeWriter) {
        let ctx = &self.options.context_name;
        let doc = self.document;
        w.open(format!(
            "export function render(canvas: HTMLCanvasElement = document.getElementById({}) as HTMLCanvasElement): void {{",
            quote(&self.options.canvas_id)
        ));
        w.line(format!("canvas.width = {};", fmt_num(doc.width())));
        w.line(format!("canvas.height = {};", fmt_num(doc.height())));
        w.line(format!("const {ctx} = canvas.getContext(\"2d\")!;"));
        if doc.patterns.canvas_patterns().next().is_some() {
            w.line("drawPatterns();");
        }
        if !doc.has_animation {
            w.line(format!("drawFrame({ctx});"));
            w.close("}");
            return;
        }

        let mut targeted = HashSet::new();
        for (id, function) in doc.functions.iter() {
            for trigger in function.triggers() {
                let Some(source_id) = trigger.source else {
                    continue;
                };
                let Some(source_fn) = doc.functions.get(source_id) else {
                    continue;
                };
                targeted.insert((id, trigger.target));
                w.line(format!(
                    "{}.{}.on(() => {}.{}());",
                    clock_ref(source_fn, trigger.source_clock),
                    trigger.event.runtime_name(),
                    clock_ref(function, trigger.target),
                    trigger.action.runtime_name()
                ));
            }
        }
        for (id, function) in doc.functions.iter() {
            for clock in function_clocks(function) {
                if clock.is_active() && !targeted.contains(&(id, clock.kind)) {
                    w.line(format!("{}.start();", clock_ref(function, clock.kind)));
                }
            }
        }
        w.open("setInterval(() => {");
        w.line("updateClocks();");
        w.line(format!("drawFrame({ctx});"));
        w.close(format!("}}, 1000 / {});", fmt_num(self.options.fps)));
        w.close("}");
    }

    fn emit_debug_info(&self, w: &mut CodeWriter) {
        w.blank();
        for line in self.document.functions.debug_info().lines() {
            w.line(format!("// {line}"));
        }
        for pattern in self.document.patterns.iter() {
            w.line(format!(
                "// pattern {}: symbol={}, canvas={}",
                pattern.name,
                pattern.is_symbol,
                pattern.canvas.map(|c| c.0.to_string()).unwrap_or_else(|| "none".to_owned())
            ));
        }
        for warning in &self.document.warnings {
            w.line(format!("// warning: {warning}"));
        }
    }

    /// Clocks named by resolved triggers, on either end.
    fn trigger_clocks(&self) -> HashSet<(FunctionId, ClockKind)> {
        let mut clocks = HashSet::new();
        for (id, function) in self.document.functions.iter() {
            for trigger in function.triggers() {
                if let Some(source) = trigger.source {
                    clocks.insert((id, trigger.target));
                    clocks.insert((source, trigger.source_clock));
                }
            }
        }
        clocks
    }
}

const RESERVED: &[&str] = &[
    "break", "case", "catch", "class", "const", "continue", "debugger", "default", "delete", "do",
    "else", "enum", "export", "extends", "false", "finally", "for", "function", "if", "import",
    "in", "instanceof", "new", "null", "return", "super", "switch", "this", "throw", "true", "try",
    "typeof", "var", "void", "while", "with", "let", "static", "yield", "await", "bounds",
    "drawFrame", "drawPatterns", "render", "timing", "clocks", "updateClocks", "bounceOut",
    "inOut", "cubic", "cubicSlope", "document", "canvas",
];

/// Module-level identifier for a generated name; reserved words get a trailing `_`.
pub fn script_name(name: &str) -> Cow<'_, str> {
    if RESERVED.contains(&name) {
        Cow::Owned(format!("{name}_"))
    } else {
        Cow::Borrowed(name)
    }
}

fn draw_clock_name(function: &str, kind: ClockKind) -> String {
    let suffix = match kind {
        ClockKind::Path => "PathClock",
        ClockKind::Rotate => "RotateClock",
        ClockKind::Scale => "ScaleClock",
        ClockKind::Alpha => "AlphaClock",
    };
    format!("{function}{suffix}")
}

fn clock_ref(function: &Function, kind: ClockKind) -> String {
    match function {
        Function::Animation(anim) => format!("{}.pathClock", script_name(&anim.header.name)),
        Function::Draw(draw) => draw_clock_name(&draw.header.name, kind),
    }
}

fn draw_clocks(draw: &DrawFunction) -> [&AnimationClock; 3] {
    [&draw.rotate_clock, &draw.scale_clock, &draw.alpha_clock]
}

fn function_clocks(function: &Function) -> Vec<&AnimationClock> {
    match function {
        Function::Draw(draw) => draw_clocks(draw).to_vec(),
        Function::Animation(anim) => vec![&anim.path_clock],
    }
}

fn clock_literal(clock: &AnimationClock) -> String {
    format!(
        "new Clock({}, {}, {}, {}, {}, timing.{}, {}, {}, {})",
        exact(clock.duration),
        exact(clock.delay),
        clock.direction.sign(),
        clock.reverses,
        clock.iterations,
        clock.timing.runtime_name(),
        exact(clock.range),
        exact(clock.multiplier),
        exact(clock.offset)
    )
}

/// Shortest round-trip representation; clock parameters are not rounded.
fn exact(value: f64) -> String {
    if value.is_finite() {
        value.to_string()
    } else {
        "0".to_owned()
    }
}

fn bounds_literal(b: Bounds) -> String {
    let (width, height) = extent(b);
    format!(
        "{{ left: {}, top: {}, width: {}, height: {} }}",
        fmt_num(b.left),
        fmt_num(b.top),
        fmt_num(width),
        fmt_num(height)
    )
}

fn extent(b: Bounds) -> (f64, f64) {
    if b.is_empty() {
        (0.0, 0.0)
    } else {
        (b.width(), b.height())
    }
}

/// Document-to-canvas transform that puts the upper-left corner of `b` at the origin.
fn content_transform(b: Bounds) -> Affine {
    let flip = Affine::scale_non_uniform(1.0, -1.0);
    if b.is_empty() {
        flip
    } else {
        Affine::translate((-b.left, b.top)) * flip
    }
}

fn declare_locals(w: &mut CodeWriter, ctx: &str, features: Features) {
    if features.has_alpha {
        w.line(format!("const alpha = {ctx}.globalAlpha;"));
    }
    if features.has_gradients {
        w.line("let gradient: CanvasGradient;");
    }
    if features.has_patterns {
        w.line("let pattern: CanvasPattern;");
    }
}

#[cfg(test)]
#[path = "../../tests/unit/emit/typescript.rs"]
mod tests;
