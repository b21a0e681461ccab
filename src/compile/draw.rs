use crate::{
    animation::{
        clock::{AnimationClock, ClockKind, parse_flag},
        trigger::Trigger,
    },
    compile::{
        compiler::CompileOptions,
        function::FunctionHeader,
        layer::{Features, Layer, LayerId},
        options::parse_function_kind,
    },
    foundation::{
        core::{Affine, Bounds, FunctionId, ParamOutcome, Vec2},
        naming::to_identifier,
    },
};

/// Static paint function built from one or more adjacent layers.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct DrawFunction {
    #[serde(flatten)]
    pub header: FunctionHeader,
    /// Member layers in scan order.
    pub layers: Vec<LayerId>,
    #[serde(flatten)]
    pub features: Features,
    pub translate_origin: bool,
    pub translate_origin_h: f64,
    pub translate_origin_v: f64,
    pub rasterize_file_name: Option<String>,
    pub crop: bool,
    /// Name given by the `animation` option; resolved into `animation_function` at bind time.
    pub animation_function_name: Option<String>,
    pub animation_function: Option<FunctionId>,
    /// Rotation offset in degrees when following the motion path's direction.
    pub follow_orientation: Option<f64>,
    pub rotate_clock: AnimationClock,
    pub scale_clock: AnimationClock,
    pub alpha_clock: AnimationClock,
    pub triggers: Vec<Trigger>,
}

impl DrawFunction {
    pub fn new(header: FunctionHeader) -> Self {
        Self {
            header,
            layers: Vec::new(),
            features: Features::default(),
            translate_origin: false,
            translate_origin_h: 0.0,
            translate_origin_v: 0.0,
            rasterize_file_name: None,
            crop: false,
            animation_function_name: None,
            animation_function: None,
            follow_orientation: None,
            rotate_clock: AnimationClock::new(ClockKind::Rotate),
            scale_clock: AnimationClock::new(ClockKind::Scale),
            alpha_clock: AnimationClock::new(ClockKind::Alpha),
            triggers: Vec::new(),
        }
    }

    /// Append a layer, folding its bounds and features into the function.
    pub fn add_layer(&mut self, id: LayerId, layer: &Layer) {
        self.layers.push(id);
        self.header.bounds = self.header.bounds.union(layer.bounds);
        self.features.merge(layer.features);
    }

    pub fn clock(&self, kind: ClockKind) -> Option<&AnimationClock> {
        match kind {
            ClockKind::Rotate => Some(&self.rotate_clock),
            ClockKind::Scale => Some(&self.scale_clock),
            ClockKind::Alpha => Some(&self.alpha_clock),
            ClockKind::Path => None,
        }
    }

    fn clock_mut(&mut self, kind: ClockKind) -> Option<&mut AnimationClock> {
        match kind {
            ClockKind::Rotate => Some(&mut self.rotate_clock),
            ClockKind::Scale => Some(&mut self.scale_clock),
            ClockKind::Alpha => Some(&mut self.alpha_clock),
            ClockKind::Path => None,
        }
    }

    pub fn active_clocks(&self) -> impl Iterator<Item = &AnimationClock> {
        [&self.rotate_clock, &self.scale_clock, &self.alpha_clock]
            .into_iter()
            .filter(|c| c.is_active())
    }

    pub fn has_animation(&self) -> bool {
        self.animation_function_name.is_some() || self.active_clocks().next().is_some()
    }

    /// Apply one `key:value` option. `layers` is the compiled layer list so `crop` can reach the
    /// function's first layer.
    pub fn set_parameter(
        &mut self,
        key: &str,
        value: &str,
        layers: &mut [Layer],
        options: &CompileOptions,
    ) -> ParamOutcome {
        match key {
            "type" | "t" => match parse_function_kind(value) {
                Some(_) => ParamOutcome::Applied,
                None => ParamOutcome::Malformed,
            },
            "origin" | "o" => self.set_origin(value),
            "rasterize" | "rast" => {
                match value.to_ascii_lowercase().as_str() {
                    "" => return ParamOutcome::Malformed,
                    "no" | "n" => self.rasterize_file_name = None,
                    _ => {
                        let file = self.rasterize_file(value, options.rasterize_name_from_function);
                        self.rasterize_file_name = Some(file);
                    }
                }
                ParamOutcome::Applied
            }
            "crop" | "c" => match parse_flag(value) {
                Some(crop) => {
                    self.crop = crop;
                    // Only the first member layer carries the crop.
                    if let Some(first) = self.layers.first()
                        && let Some(layer) = layers.get_mut(first.index())
                    {
                        layer.crop = crop;
                    }
                    ParamOutcome::Applied
                }
                None => ParamOutcome::Malformed,
            },
            "animation" | "anim" => match to_identifier(value) {
                name if name.is_empty() => ParamOutcome::Malformed,
                name => {
                    self.animation_function_name = Some(name);
                    ParamOutcome::Applied
                }
            },
            "orientation" | "orient" => match value.to_ascii_lowercase().as_str() {
                "follow" | "f" => {
                    self.follow_orientation = Some(0.0);
                    ParamOutcome::Applied
                }
                "none" | "n" => {
                    self.follow_orientation = None;
                    ParamOutcome::Applied
                }
                other => match other.parse::<f64>() {
                    Ok(degrees) if degrees.is_finite() => {
                        self.follow_orientation = Some(degrees);
                        ParamOutcome::Applied
                    }
                    _ => ParamOutcome::Malformed,
                },
            },
            _ => self.set_clock_parameter(key, value),
        }
    }

    fn set_origin(&mut self, value: &str) -> ParamOutcome {
        let anchor = match value.to_ascii_lowercase().as_str() {
            "normal" | "n" => {
                self.translate_origin = false;
                return ParamOutcome::Applied;
            }
            "center" | "c" => (0.5, 0.5),
            "upper-left" | "ul" => (0.0, 0.0),
            "upper-right" | "ur" => (1.0, 0.0),
            "lower-right" | "lr" => (1.0, 1.0),
            "lower-left" | "ll" => (0.0, 1.0),
            custom => {
                let parts: Vec<_> = custom.split(',').map(str::trim).collect();
                let [h, v] = parts.as_slice() else {
                    return ParamOutcome::Malformed;
                };
                match (h.parse::<f64>(), v.parse::<f64>()) {
                    (Ok(h), Ok(v)) if h.is_finite() && v.is_finite() => (h, v),
                    _ => return ParamOutcome::Malformed,
                }
            }
        };
        self.translate_origin = true;
        (self.translate_origin_h, self.translate_origin_v) = anchor;
        ParamOutcome::Applied
    }

    fn set_clock_parameter(&mut self, key: &str, value: &str) -> ParamOutcome {
        let Some((prefix, rest)) = key.split_once('-') else {
            return ParamOutcome::Unknown;
        };
        let Some(kind) = ClockKind::from_prefix(prefix).filter(|k| *k != ClockKind::Path) else {
            return ParamOutcome::Unknown;
        };
        if rest == "trigger" {
            return match Trigger::parse(kind, value) {
                Some(trigger) => {
                    self.triggers.push(trigger);
                    ParamOutcome::Applied
                }
                None => ParamOutcome::Malformed,
            };
        }
        match self.clock_mut(kind) {
            Some(clock) => clock.set_parameter(rest, value),
            None => ParamOutcome::Unknown,
        }
    }

    /// `<base>.png`, where the base is `value` minus its extension. In legacy mode the base is the
    /// function name cut at the position of the extension dot found in `value`.
    fn rasterize_file(&self, value: &str, legacy: bool) -> String {
        match value.rfind('.') {
            Some(dot) if legacy => {
                let name = &self.header.name;
                format!("{}.png", name.get(..dot).unwrap_or(name))
            }
            Some(dot) => format!("{}.png", &value[..dot]),
            None => format!("{value}.png"),
        }
    }

    /// Translation that moves the chosen origin point of this function to the drawing origin.
    ///
    /// `None` unless `translate_origin` is set. The vertical axis is flipped: document space is
    /// y-up, output space is y-down.
    pub fn reposition(&self, document: Bounds) -> Option<Vec2> {
        if !self.translate_origin {
            return None;
        }
        Some(self.anchor_offset(
            document,
            self.translate_origin_h,
            self.translate_origin_v,
        ))
    }

    /// Origin fractions used for placement. Functions that follow a motion path without an
    /// explicit origin are anchored at their center.
    pub fn anchor(&self) -> Option<(f64, f64)> {
        if self.translate_origin {
            Some((self.translate_origin_h, self.translate_origin_v))
        } else if self.animation_function.is_some() {
            Some((0.5, 0.5))
        } else {
            None
        }
    }

    /// Document-to-output transform for this function's artwork.
    ///
    /// Flips y, moves the document's upper-left corner to (0, 0), then subtracts the anchor
    /// offset so the anchor point sits at the origin.
    pub fn local_transform(&self, document: Bounds) -> Affine {
        let page = Affine::translate((-document.left, document.top))
            * Affine::scale_non_uniform(1.0, -1.0);
        match self.anchor() {
            Some((h, v)) => Affine::translate(-self.anchor_offset(document, h, v)) * page,
            None => page,
        }
    }

    /// Output-space position of the anchor point described by the fractions `h`, `v`.
    pub fn anchor_offset(&self, document: Bounds, h: f64, v: f64) -> Vec2 {
        let bounds = self.header.bounds;
        let offset_h = bounds.left - document.left;
        let offset_v = bounds.top - document.top;
        let translate_h = bounds.width() * h;
        let translate_v = bounds.height() * v;
        Vec2::new(offset_h + translate_h, -offset_v + translate_v)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compile/draw.rs"]
mod tests;
