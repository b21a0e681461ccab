use std::fmt::Write as _;

use crate::{
    compile::{
        draw::DrawFunction,
        function::{Function, FunctionHeader, FunctionKind},
        motion::AnimationFunction,
        warning::{CompileWarning, WarningKind},
    },
    foundation::{core::FunctionId, naming::unique_name},
};

/// All functions compiled from one document, in registration order.
///
/// Lookups scan from the most recently added function backwards; registration order is
/// load-bearing for draw function reuse.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct FunctionCollection {
    functions: Vec<Function>,
    has_draw_functions: bool,
}

impl FunctionCollection {
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    pub fn has_draw_functions(&self) -> bool {
        self.has_draw_functions
    }

    pub fn has_animation_functions(&self) -> bool {
        self.functions
            .iter()
            .any(|f| f.kind() == FunctionKind::Animation)
    }

    pub fn get(&self, id: FunctionId) -> Option<&Function> {
        self.functions.get(id.index())
    }

    pub fn get_mut(&mut self, id: FunctionId) -> Option<&mut Function> {
        self.functions.get_mut(id.index())
    }

    pub fn iter(&self) -> impl Iterator<Item = (FunctionId, &Function)> {
        self.functions
            .iter()
            .enumerate()
            .map(|(i, f)| (FunctionId(i as u32), f))
    }

    pub fn draw_functions(&self) -> impl Iterator<Item = (FunctionId, &DrawFunction)> {
        self.iter().filter_map(|(id, f)| f.as_draw().map(|d| (id, d)))
    }

    pub fn animation_functions(&self) -> impl Iterator<Item = (FunctionId, &AnimationFunction)> {
        self.iter()
            .filter_map(|(id, f)| f.as_animation().map(|a| (id, a)))
    }

    /// Most recently added function called `name`. `kind: None` matches any kind.
    ///
    /// Only generated names are compared, never requested names.
    pub fn find(&self, name: &str, kind: Option<FunctionKind>) -> Option<FunctionId> {
        self.functions
            .iter()
            .rposition(|f| f.name() == name && kind.is_none_or(|k| k == f.kind()))
            .map(|i| FunctionId(i as u32))
    }

    /// `base`, or `base` followed by the smallest positive integer that is not taken.
    pub fn create_unique_name(&self, base: &str) -> String {
        unique_name(base, |candidate| self.find(candidate, None).is_some())
    }

    /// Most recent draw function matching `name` by generated or requested name, and whether it
    /// is still open for reuse (no other draw function was registered after it).
    ///
    /// Animation functions are skipped without closing the match.
    pub fn find_draw_function(&self, name: &str) -> Option<(FunctionId, bool)> {
        let mut passed_draw = false;
        for (index, function) in self.functions.iter().enumerate().rev() {
            let Function::Draw(draw) = function else {
                continue;
            };
            if draw.header.name == name || draw.header.requested_name == name {
                return Some((FunctionId(index as u32), !passed_draw));
            }
            passed_draw = true;
        }
        None
    }

    /// Reuse the open draw function named `requested_name`, or register a new one.
    pub fn add_draw_function(&mut self, requested_name: &str) -> FunctionId {
        self.has_draw_functions = true;
        if let Some((id, true)) = self.find_draw_function(requested_name) {
            tracing::debug!(function = requested_name, "reusing draw function");
            return id;
        }
        let name = self.create_unique_name(requested_name);
        tracing::debug!(function = %name, requested = requested_name, "new draw function");
        self.push(Function::Draw(DrawFunction::new(FunctionHeader::new(
            name,
            requested_name,
        ))))
    }

    /// Register a new animation function; its name is always uniquified.
    pub fn add_animation_function(&mut self, requested_name: &str) -> FunctionId {
        let name = self.create_unique_name(requested_name);
        tracing::debug!(function = %name, requested = requested_name, "new animation function");
        self.push(Function::Animation(AnimationFunction::new(
            FunctionHeader::new(name, requested_name),
        )))
    }

    fn push(&mut self, function: Function) -> FunctionId {
        self.functions.push(function);
        FunctionId((self.functions.len() - 1) as u32)
    }

    /// Resolve every draw function's `animation` option to an animation function id.
    #[tracing::instrument(skip_all)]
    pub fn bind_animation_functions(&mut self) -> Vec<CompileWarning> {
        let resolved: Vec<_> = self
            .draw_functions()
            .filter_map(|(id, draw)| {
                let target = draw.animation_function_name.as_deref()?;
                let found = self.find(target, Some(FunctionKind::Animation));
                Some((id, target.to_owned(), found))
            })
            .collect();

        let mut warnings = Vec::new();
        for (id, target, found) in resolved {
            let Some(draw) = self.get_mut(id).and_then(Function::as_draw_mut) else {
                continue;
            };
            draw.animation_function = found;
            if found.is_none() {
                tracing::warn!(
                    function = %draw.header.name,
                    animation = %target,
                    "unresolved animation function"
                );
                warnings.push(CompileWarning::new(
                    WarningKind::UnresolvedAnimation,
                    Some(&draw.header.name),
                    format!("animation function '{target}' does not exist"),
                ));
            }
        }
        warnings
    }

    /// Resolve every trigger's source function and check it owns the referenced clock.
    #[tracing::instrument(skip_all)]
    pub fn bind_triggers(&mut self) -> Vec<CompileWarning> {
        let mut resolutions = Vec::new();
        for (index, function) in self.functions.iter().enumerate() {
            for (slot, trigger) in function.triggers().iter().enumerate() {
                let source = self.find(&trigger.source_function, None).filter(|id| {
                    self.get(*id)
                        .is_some_and(|f| f.owns_clock(trigger.source_clock))
                });
                resolutions.push((index, slot, source));
            }
        }

        let mut warnings = Vec::new();
        for (index, slot, source) in resolutions {
            let function = &mut self.functions[index];
            let name = function.name().to_owned();
            let Some(trigger) = function.triggers_mut().get_mut(slot) else {
                continue;
            };
            trigger.source = source;
            if source.is_none() {
                tracing::warn!(
                    function = %name,
                    source = %trigger.source_function,
                    "unresolved trigger"
                );
                warnings.push(CompileWarning::new(
                    WarningKind::UnresolvedTrigger,
                    Some(&name),
                    format!(
                        "trigger source '{}.{}' does not exist",
                        trigger.source_function,
                        trigger.source_clock.runtime_name()
                    ),
                ));
            }
        }
        warnings
    }

    /// Human-readable summary of the registered functions.
    pub fn debug_info(&self) -> String {
        let mut out = String::new();
        let draw_count = self.draw_functions().count();
        let _ = writeln!(out, "Draw functions: {draw_count}");
        for (_, draw) in self.draw_functions() {
            let _ = writeln!(
                out,
                "- {}: layers={}, requested={}",
                draw.header.name,
                draw.layers.len(),
                draw.header.requested_name
            );
        }
        let animation_count = self.animation_functions().count();
        if animation_count > 0 {
            let _ = writeln!(out, "Animation functions: {animation_count}");
            for (_, anim) in self.animation_functions() {
                let _ = writeln!(
                    out,
                    "- {}: segments={}, requested={}",
                    anim.header.name,
                    anim.segments.len(),
                    anim.header.requested_name
                );
            }
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compile/collection.rs"]
mod tests;
