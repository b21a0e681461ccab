use crate::{
    animation::timing::TimingFunction,
    foundation::{core::ParamOutcome, naming::clean_parameter},
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ClockDirection {
    /// Inactive clock.
    #[default]
    None,
    Forward,
    Backward,
}

impl ClockDirection {
    pub fn reversed(self) -> Self {
        match self {
            Self::None => Self::None,
            Self::Forward => Self::Backward,
            Self::Backward => Self::Forward,
        }
    }

    /// Runtime encoding: `0`, `1` or `-1`.
    pub fn sign(self) -> i32 {
        match self {
            Self::None => 0,
            Self::Forward => 1,
            Self::Backward => -1,
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "forward" | "f" | "1" => Some(Self::Forward),
            "backward" | "b" | "-1" => Some(Self::Backward),
            "none" | "n" | "0" => Some(Self::None),
            _ => None,
        }
    }
}

/// Which animatable property a clock drives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ClockKind {
    /// Progress along an animation function's motion path.
    Path,
    Rotate,
    Scale,
    Alpha,
}

impl ClockKind {
    /// Option-key prefix for this clock (`rotate-duration`, ...). `fade` aliases `alpha`.
    pub fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "path" => Some(Self::Path),
            "rotate" | "rotation" => Some(Self::Rotate),
            "scale" => Some(Self::Scale),
            "alpha" | "fade" => Some(Self::Alpha),
            _ => None,
        }
    }

    pub fn runtime_name(self) -> &'static str {
        match self {
            Self::Path => "pathClock",
            Self::Rotate => "rotateClock",
            Self::Scale => "scaleClock",
            Self::Alpha => "alphaClock",
        }
    }

    /// Value range covered by one iteration.
    pub fn default_range(self) -> f64 {
        match self {
            Self::Rotate => std::f64::consts::TAU,
            Self::Path | Self::Scale | Self::Alpha => 1.0,
        }
    }
}

/// Time-driven value generator with iteration, direction and easing controls.
///
/// The compiler only configures clocks; the emitted runtime ticks them. [`AnimationClock::sample`]
/// evaluates the same formula so compiled output can be checked without a browser.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct AnimationClock {
    pub kind: ClockKind,
    /// Seconds per iteration, always > 0.
    pub duration: f64,
    /// Seconds before the first iteration starts.
    pub delay: f64,
    pub direction: ClockDirection,
    /// Flip direction on every odd iteration.
    pub reverses: bool,
    /// `0` repeats forever.
    pub iterations: u32,
    pub timing: TimingFunction,
    pub range: f64,
    pub multiplier: f64,
    pub offset: f64,
    #[serde(skip)]
    explicit_direction: bool,
}

/// Clock state at one point in time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClockSample {
    pub iteration: u32,
    /// Normalized time within the iteration, after direction is applied.
    pub t: f64,
    pub direction: ClockDirection,
    pub value: f64,
    pub finished: bool,
}

impl AnimationClock {
    /// Inactive clock with the defaults for `kind`.
    pub fn new(kind: ClockKind) -> Self {
        Self {
            kind,
            duration: 1.0,
            delay: 0.0,
            direction: ClockDirection::None,
            reverses: false,
            iterations: 1,
            timing: TimingFunction::Linear,
            range: kind.default_range(),
            multiplier: 1.0,
            offset: 0.0,
            explicit_direction: false,
        }
    }

    pub fn with_direction(mut self, direction: ClockDirection) -> Self {
        self.direction = direction;
        self
    }

    pub fn is_active(&self) -> bool {
        self.direction != ClockDirection::None
    }

    /// Apply one option whose clock prefix has already been stripped.
    ///
    /// Setting any other key on an inactive clock activates it in the forward direction, unless
    /// a `direction` option has already been given explicitly.
    pub fn set_parameter(&mut self, key: &str, value: &str) -> ParamOutcome {
        let value = clean_parameter(value);
        let outcome = match key {
            "duration" | "dur" => match parse_finite(value) {
                Some(v) if v > 0.0 => {
                    self.duration = v;
                    ParamOutcome::Applied
                }
                _ => ParamOutcome::Malformed,
            },
            "delay" => match parse_finite(value) {
                Some(v) if v >= 0.0 => {
                    self.delay = v;
                    ParamOutcome::Applied
                }
                _ => ParamOutcome::Malformed,
            },
            "direction" | "dir" => match ClockDirection::parse(value) {
                Some(direction) => {
                    self.direction = direction;
                    self.explicit_direction = true;
                    return ParamOutcome::Applied;
                }
                None => ParamOutcome::Malformed,
            },
            "iterations" | "iter" => {
                let lowered = value.to_ascii_lowercase();
                if matches!(lowered.as_str(), "infinite" | "inf" | "forever") {
                    self.iterations = 0;
                    ParamOutcome::Applied
                } else if let Ok(n) = value.parse::<u32>() {
                    self.iterations = n;
                    ParamOutcome::Applied
                } else {
                    ParamOutcome::Malformed
                }
            }
            "timing-function" | "timing" | "tf" => match value.parse::<TimingFunction>() {
                Ok(f) => {
                    self.timing = f;
                    ParamOutcome::Applied
                }
                Err(_) => ParamOutcome::Malformed,
            },
            "reverses" | "rev" => match parse_flag(value) {
                Some(flag) => {
                    self.reverses = flag;
                    ParamOutcome::Applied
                }
                None => ParamOutcome::Malformed,
            },
            "multiplier" | "mult" => match parse_finite(value) {
                Some(v) => {
                    self.multiplier = v;
                    ParamOutcome::Applied
                }
                None => ParamOutcome::Malformed,
            },
            "offset" => match parse_finite(value) {
                Some(v) => {
                    self.offset = v;
                    ParamOutcome::Applied
                }
                None => ParamOutcome::Malformed,
            },
            _ => return ParamOutcome::Unknown,
        };
        if outcome == ParamOutcome::Applied && !self.is_active() && !self.explicit_direction {
            self.direction = ClockDirection::Forward;
        }
        outcome
    }

    /// Value the runtime holds before the clock is started.
    pub fn initial_value(&self) -> f64 {
        let t = if self.direction == ClockDirection::Forward {
            0.0
        } else {
            1.0
        };
        self.value_at(t)
    }

    /// Evaluate the clock `elapsed` seconds after it was started.
    pub fn sample(&self, elapsed: f64) -> ClockSample {
        if !self.is_active() {
            return ClockSample {
                iteration: 0,
                t: 1.0,
                direction: ClockDirection::None,
                value: self.initial_value(),
                finished: false,
            };
        }

        let progress = ((elapsed - self.delay) / self.duration).max(0.0);
        let mut iteration = progress.floor();
        let mut t = progress - iteration;
        let mut finished = false;
        if self.iterations != 0 && iteration >= f64::from(self.iterations) {
            iteration = f64::from(self.iterations - 1);
            t = 1.0;
            finished = true;
        }
        let iteration = iteration.min(f64::from(u32::MAX)) as u32;

        let direction = if self.reverses && iteration % 2 == 1 {
            self.direction.reversed()
        } else {
            self.direction
        };
        if direction == ClockDirection::Backward {
            t = 1.0 - t;
        }

        ClockSample {
            iteration,
            t,
            direction,
            value: self.value_at(t),
            finished,
        }
    }

    fn value_at(&self, t: f64) -> f64 {
        let span = self.range * self.multiplier;
        self.timing.apply(t) * span + self.range * self.offset
    }
}

fn parse_finite(value: &str) -> Option<f64> {
    value.parse::<f64>().ok().filter(|v| v.is_finite())
}

pub(crate) fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "yes" | "y" | "true" | "1" | "on" => Some(true),
        "no" | "n" | "false" | "0" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/clock.rs"]
mod tests;
