use kurbo::{ParamCurve, ParamCurveArclen, PathSeg};

use crate::{
    animation::{
        clock::{AnimationClock, ClockDirection, ClockKind},
        trigger::Trigger,
    },
    artwork::source::NodeId,
    compile::{function::FunctionHeader, layer::LayerId, options::parse_function_kind},
    foundation::core::{BezPath, CubicBez, ParamOutcome, Point},
};

const ARCLEN_ACCURACY: f64 = 1e-3;

/// Motion path extracted from one layer, driven by a path clock.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct AnimationFunction {
    #[serde(flatten)]
    pub header: FunctionHeader,
    pub layer: Option<LayerId>,
    #[serde(skip)]
    pub art: Option<NodeId>,
    /// Path segments in document space, raised to cubics.
    pub segments: Vec<CubicBez>,
    pub segment_lengths: Vec<f64>,
    pub path_clock: AnimationClock,
    pub triggers: Vec<Trigger>,
}

impl AnimationFunction {
    pub fn new(header: FunctionHeader) -> Self {
        Self {
            header,
            layer: None,
            art: None,
            segments: Vec::new(),
            segment_lengths: Vec::new(),
            path_clock: AnimationClock::new(ClockKind::Path).with_direction(ClockDirection::Forward),
            triggers: Vec::new(),
        }
    }

    /// Replace the motion path. Line and quadratic segments are raised to cubics.
    pub fn set_path(&mut self, path: &BezPath) {
        self.segments = path.segments().map(to_cubic).collect();
        self.segment_lengths = self
            .segments
            .iter()
            .map(|c| c.arclen(ARCLEN_ACCURACY))
            .collect();
    }

    pub fn total_length(&self) -> f64 {
        self.segment_lengths.iter().sum()
    }

    /// Path clock options, bare or with a `path-` prefix, plus `trigger`.
    pub fn set_parameter(&mut self, key: &str, value: &str) -> ParamOutcome {
        if matches!(key, "type" | "t") {
            return match parse_function_kind(value) {
                Some(_) => ParamOutcome::Applied,
                None => ParamOutcome::Malformed,
            };
        }
        let key = key.strip_prefix("path-").unwrap_or(key);
        if key == "trigger" {
            return match Trigger::parse(ClockKind::Path, value) {
                Some(trigger) => {
                    self.triggers.push(trigger);
                    ParamOutcome::Applied
                }
                None => ParamOutcome::Malformed,
            };
        }
        self.path_clock.set_parameter(key, value)
    }

    /// Document-space point at `fraction` of the total arc length, clamped to the path.
    pub fn point_at(&self, fraction: f64) -> Option<Point> {
        let total = self.total_length();
        let last = self.segments.last()?;
        if total <= 0.0 {
            return Some(last.p3);
        }
        let mut remaining = fraction.clamp(0.0, 1.0) * total;
        for (segment, length) in self.segments.iter().zip(&self.segment_lengths) {
            if remaining <= *length && *length > 0.0 {
                let t = segment.inv_arclen(remaining, ARCLEN_ACCURACY);
                return Some(segment.eval(t));
            }
            remaining -= length;
        }
        Some(last.p3)
    }
}

fn to_cubic(seg: PathSeg) -> CubicBez {
    match seg {
        PathSeg::Line(line) => CubicBez::new(
            line.p0,
            line.p0.lerp(line.p1, 1.0 / 3.0),
            line.p0.lerp(line.p1, 2.0 / 3.0),
            line.p1,
        ),
        PathSeg::Quad(quad) => CubicBez::new(
            quad.p0,
            quad.p0 + (quad.p1 - quad.p0) * (2.0 / 3.0),
            quad.p2 + (quad.p1 - quad.p2) * (2.0 / 3.0),
            quad.p2,
        ),
        PathSeg::Cubic(cubic) => cubic,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compile/motion.rs"]
mod tests;
