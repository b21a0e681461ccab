//! canvas-export compiles layered vector artwork into HTML5 canvas drawing code.
//!
//! Each visible layer of an artwork document becomes part of a named *draw function*. Layers
//! can also describe *animation functions* (motion paths) that draw functions follow, and every
//! function can carry clocks that rotate, scale or fade it over time.
//!
//! # Pipeline overview
//!
//! 1. **Scan**: [`LayerScanner`] walks an [`ArtworkSource`] and measures each layer (bounds,
//!    alpha/gradient/pattern usage, referenced patterns and symbols).
//! 2. **Compile**: [`DocumentCompiler`] parses layer names such as `ball(anim:orbit; origin:c)`
//!    into a [`FunctionCollection`], binds motion paths and clock triggers, and computes the
//!    document bounds. Problems in individual options become [`CompileWarning`] values.
//! 3. **Emit**: [`TypeScriptEmitter`] writes the [`CompiledDocument`] as a TypeScript module with
//!    one exported object per draw function and, when needed, a clock runtime.
//!
//! Artwork comes from any [`ArtworkSource`]. [`ArtworkDocument`] is the bundled JSON-backed
//! source; [`ArtworkBuilder`] assembles one in code.
//!
//! # Layer name grammar
//!
//! `name(key:value; key:value)`. The text before the last `(` names the function; names are
//! reduced to lower-camel-case identifiers. `t:a` (or `type:animation`) marks an animation layer.
//! Layers that resolve to the same name are painted by the same function when they are adjacent.
#![forbid(unsafe_code)]

mod animation;
mod artwork;
mod compile;
mod emit;
mod foundation;

pub use animation::clock::{AnimationClock, ClockDirection, ClockKind, ClockSample};
pub use animation::timing::TimingFunction;
pub use animation::trigger::{ClockAction, ClockEvent, Trigger};
pub use artwork::builder::ArtworkBuilder;
pub use artwork::document::{ArtworkDocument, LayerDoc, NodeDoc, PaintDoc, PatternDoc};
pub use artwork::source::{
    ArtworkSource, GradientStop, LayerHandle, NodeId, NodeKind, PaintKind, PaintTarget,
    PatternHandle,
};
pub use compile::collection::FunctionCollection;
pub use compile::compiler::{CompileOptions, CompiledDocument, DocumentCompiler, compute_bounds};
pub use compile::draw::DrawFunction;
pub use compile::function::{Function, FunctionHeader, FunctionKind};
pub use compile::layer::{Features, Layer, LayerId, ScanAccumulator};
pub use compile::motion::AnimationFunction;
pub use compile::options::{
    DEFAULT_FUNCTION_NAME, ParsedLayerName, function_kind, parse_function_kind, parse_layer_name,
    split_option,
};
pub use compile::pattern::{Pattern, PatternInfo, PatternRegistry, symbol_function_name};
pub use compile::scanner::{LayerScanner, find_motion_path};
pub use compile::warning::{CompileWarning, WarningKind};
pub use emit::renderer::{OutlineRenderer, PathRenderer, pattern_canvas_id};
pub use emit::runtime::runtime_source;
pub use emit::typescript::{EmitOptions, TypeScriptEmitter, script_name};
pub use emit::writer::{CodeWriter, fmt_num, quote};
pub use foundation::core::{
    Affine, BezPath, Bounds, CanvasDesc, CanvasId, CubicBez, FunctionId, ParamOutcome, Point,
    Rect, Rgba8, Vec2,
};
pub use foundation::error::{ExportError, ExportResult};
pub use foundation::naming::{clean_parameter, to_identifier, unique_name};
