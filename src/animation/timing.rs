use std::f64::consts::PI;

use crate::foundation::error::{ExportError, ExportResult};

/// Easing curve applied to a clock's normalized time.
///
/// Names match the runtime's timing function table, so [`TimingFunction::runtime_name`] can be
/// emitted verbatim.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum TimingFunction {
    #[default]
    Linear,
    SineEaseIn,
    SineEaseOut,
    SineEaseInOut,
    QuadEaseIn,
    QuadEaseOut,
    QuadEaseInOut,
    CubicEaseIn,
    CubicEaseOut,
    CubicEaseInOut,
    QuartEaseIn,
    QuartEaseOut,
    QuartEaseInOut,
    QuintEaseIn,
    QuintEaseOut,
    QuintEaseInOut,
    CircEaseIn,
    CircEaseOut,
    CircEaseInOut,
    ExpoEaseIn,
    ExpoEaseOut,
    ExpoEaseInOut,
    BounceEaseIn,
    BounceEaseOut,
    BounceEaseInOut,
    ZeroStep,
    HalfStep,
    OneStep,
    ClockTick,
}

impl TimingFunction {
    pub const ALL: [Self; 29] = [
        Self::Linear,
        Self::SineEaseIn,
        Self::SineEaseOut,
        Self::SineEaseInOut,
        Self::QuadEaseIn,
        Self::QuadEaseOut,
        Self::QuadEaseInOut,
        Self::CubicEaseIn,
        Self::CubicEaseOut,
        Self::CubicEaseInOut,
        Self::QuartEaseIn,
        Self::QuartEaseOut,
        Self::QuartEaseInOut,
        Self::QuintEaseIn,
        Self::QuintEaseOut,
        Self::QuintEaseInOut,
        Self::CircEaseIn,
        Self::CircEaseOut,
        Self::CircEaseInOut,
        Self::ExpoEaseIn,
        Self::ExpoEaseOut,
        Self::ExpoEaseInOut,
        Self::BounceEaseIn,
        Self::BounceEaseOut,
        Self::BounceEaseInOut,
        Self::ZeroStep,
        Self::HalfStep,
        Self::OneStep,
        Self::ClockTick,
    ];

    pub fn runtime_name(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::SineEaseIn => "sineEaseIn",
            Self::SineEaseOut => "sineEaseOut",
            Self::SineEaseInOut => "sineEaseInOut",
            Self::QuadEaseIn => "quadEaseIn",
            Self::QuadEaseOut => "quadEaseOut",
            Self::QuadEaseInOut => "quadEaseInOut",
            Self::CubicEaseIn => "cubicEaseIn",
            Self::CubicEaseOut => "cubicEaseOut",
            Self::CubicEaseInOut => "cubicEaseInOut",
            Self::QuartEaseIn => "quartEaseIn",
            Self::QuartEaseOut => "quartEaseOut",
            Self::QuartEaseInOut => "quartEaseInOut",
            Self::QuintEaseIn => "quintEaseIn",
            Self::QuintEaseOut => "quintEaseOut",
            Self::QuintEaseInOut => "quintEaseInOut",
            Self::CircEaseIn => "circEaseIn",
            Self::CircEaseOut => "circEaseOut",
            Self::CircEaseInOut => "circEaseInOut",
            Self::ExpoEaseIn => "expoEaseIn",
            Self::ExpoEaseOut => "expoEaseOut",
            Self::ExpoEaseInOut => "expoEaseInOut",
            Self::BounceEaseIn => "bounceEaseIn",
            Self::BounceEaseOut => "bounceEaseOut",
            Self::BounceEaseInOut => "bounceEaseInOut",
            Self::ZeroStep => "zeroStep",
            Self::HalfStep => "halfStep",
            Self::OneStep => "oneStep",
            Self::ClockTick => "clockTick",
        }
    }

    /// Map normalized time `t` (clamped to `[0, 1]`) through the curve.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::SineEaseIn => 1.0 - (t * PI / 2.0).cos(),
            Self::SineEaseOut => (t * PI / 2.0).sin(),
            Self::SineEaseInOut => -0.5 * ((PI * t).cos() - 1.0),
            Self::QuadEaseIn => t * t,
            Self::QuadEaseOut => -t * (t - 2.0),
            Self::QuadEaseInOut => in_out(t, |u| u * u, |u| -(u * (u - 2.0) - 1.0), -1.0),
            Self::CubicEaseIn => t.powi(3),
            Self::CubicEaseOut => (t - 1.0).powi(3) + 1.0,
            Self::CubicEaseInOut => in_out(t, |u| u.powi(3), |u| u.powi(3) + 2.0, -2.0),
            Self::QuartEaseIn => t.powi(4),
            Self::QuartEaseOut => -((t - 1.0).powi(4) - 1.0),
            Self::QuartEaseInOut => in_out(t, |u| u.powi(4), |u| -(u.powi(4) - 2.0), -2.0),
            Self::QuintEaseIn => t.powi(5),
            Self::QuintEaseOut => (t - 1.0).powi(5) + 1.0,
            Self::QuintEaseInOut => in_out(t, |u| u.powi(5), |u| u.powi(5) + 2.0, -2.0),
            Self::CircEaseIn => -((1.0 - t * t).sqrt() - 1.0),
            Self::CircEaseOut => (1.0 - (t - 1.0) * (t - 1.0)).sqrt(),
            Self::CircEaseInOut => in_out(
                t,
                |u| -((1.0 - u * u).sqrt() - 1.0),
                |u| (1.0 - u * u).sqrt() + 1.0,
                -2.0,
            ),
            Self::ExpoEaseIn => {
                if t == 0.0 {
                    0.0
                } else {
                    2f64.powf(10.0 * (t - 1.0))
                }
            }
            Self::ExpoEaseOut => {
                if t == 1.0 {
                    1.0
                } else {
                    1.0 - 2f64.powf(-10.0 * t)
                }
            }
            Self::ExpoEaseInOut => {
                if t == 0.0 || t == 1.0 {
                    t
                } else if t < 0.5 {
                    0.5 * 2f64.powf(10.0 * (2.0 * t - 1.0))
                } else {
                    0.5 * (2.0 - 2f64.powf(-10.0 * (2.0 * t - 1.0)))
                }
            }
            Self::BounceEaseIn => 1.0 - bounce_out(1.0 - t),
            Self::BounceEaseOut => bounce_out(t),
            Self::BounceEaseInOut => {
                if t < 0.5 {
                    (1.0 - bounce_out(1.0 - 2.0 * t)) * 0.5
                } else {
                    bounce_out(2.0 * t - 1.0) * 0.5 + 0.5
                }
            }
            Self::ZeroStep => {
                if t <= 0.0 {
                    0.0
                } else {
                    1.0
                }
            }
            Self::HalfStep => {
                if t < 0.5 {
                    0.0
                } else {
                    1.0
                }
            }
            Self::OneStep => {
                if t >= 1.0 {
                    1.0
                } else {
                    0.0
                }
            }
            Self::ClockTick => (t * 60.0).floor() / 60.0,
        }
    }
}

/// Penner-style in/out split: `t` is doubled, the first half uses `first(u)`, the second half
/// shifts `u` by `shift` and uses `second(u)`. Both halves are scaled by one half.
fn in_out(t: f64, first: impl Fn(f64) -> f64, second: impl Fn(f64) -> f64, shift: f64) -> f64 {
    let u = t * 2.0;
    if u < 1.0 {
        0.5 * first(u)
    } else {
        0.5 * second(u + shift)
    }
}

fn bounce_out(t: f64) -> f64 {
    const K: f64 = 7.5625;
    const D: f64 = 2.75;
    if t < 1.0 / D {
        K * t * t
    } else if t < 2.0 / D {
        let t = t - 1.5 / D;
        K * t * t + 0.75
    } else if t < 2.5 / D {
        let t = t - 2.25 / D;
        K * t * t + 0.9375
    } else {
        let t = t - 2.625 / D;
        K * t * t + 0.984375
    }
}

impl std::str::FromStr for TimingFunction {
    type Err = ExportError;

    /// Case-insensitive runtime name lookup; `-`, `_` and spaces are ignored so `sine-ease-in` works.
    fn from_str(s: &str) -> ExportResult<Self> {
        let wanted: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .map(|c| c.to_ascii_lowercase())
            .collect();
        Self::ALL
            .into_iter()
            .find(|f| f.runtime_name().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| ExportError::validation(format!("unknown timing function '{s}'")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/timing.rs"]
mod tests;
