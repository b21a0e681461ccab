use super::*;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn forward(kind: ClockKind) -> AnimationClock {
    AnimationClock::new(kind).with_direction(ClockDirection::Forward)
}

#[test]
fn defaults_per_kind() {
    let rotate = AnimationClock::new(ClockKind::Rotate);
    assert!(!rotate.is_active());
    assert_eq!(rotate.duration, 1.0);
    assert_eq!(rotate.iterations, 1);
    assert!(close(rotate.range, std::f64::consts::TAU));
    assert_eq!(AnimationClock::new(ClockKind::Alpha).range, 1.0);
}

#[test]
fn inactive_clock_holds_its_initial_value() {
    let alpha = AnimationClock::new(ClockKind::Alpha);
    let s = alpha.sample(3.0);
    assert_eq!(s.value, 1.0);
    assert_eq!(s.direction, ClockDirection::None);
    assert!(!s.finished);
}

#[test]
fn forward_clock_progresses_linearly() {
    let mut c = forward(ClockKind::Scale);
    c.duration = 2.0;
    assert!(close(c.initial_value(), 0.0));
    let s = c.sample(1.0);
    assert!(close(s.t, 0.5));
    assert!(close(s.value, 0.5));
    assert!(!s.finished);
}

#[test]
fn delay_holds_the_start() {
    let mut c = forward(ClockKind::Scale);
    c.delay = 1.0;
    assert!(close(c.sample(0.5).value, 0.0));
    assert!(close(c.sample(1.25).value, 0.25));
}

#[test]
fn finite_iterations_clamp_and_finish() {
    let mut c = forward(ClockKind::Scale);
    c.iterations = 2;
    let s = c.sample(10.0);
    assert!(s.finished);
    assert_eq!(s.iteration, 1);
    assert!(close(s.t, 1.0));
    assert!(close(s.value, 1.0));
}

#[test]
fn infinite_iterations_wrap() {
    let mut c = forward(ClockKind::Scale);
    c.iterations = 0;
    let s = c.sample(5.25);
    assert_eq!(s.iteration, 5);
    assert!(close(s.t, 0.25));
    assert!(!s.finished);
}

#[test]
fn reverses_flips_odd_iterations() {
    let mut c = forward(ClockKind::Scale);
    c.iterations = 0;
    c.reverses = true;
    let even = c.sample(0.25);
    let odd = c.sample(1.25);
    assert_eq!(even.direction, ClockDirection::Forward);
    assert_eq!(odd.direction, ClockDirection::Backward);
    assert!(close(odd.t, 0.75));
}

#[test]
fn backward_runs_from_one_to_zero() {
    let c = AnimationClock::new(ClockKind::Scale).with_direction(ClockDirection::Backward);
    assert!(close(c.initial_value(), 1.0));
    assert!(close(c.sample(0.25).value, 0.75));
}

#[test]
fn multiplier_and_offset_scale_the_range() {
    let mut c = forward(ClockKind::Rotate);
    c.multiplier = 0.5;
    c.offset = 0.25;
    let tau = std::f64::consts::TAU;
    assert!(close(c.sample(1.0).value, tau * 0.5 + tau * 0.25));
}

#[test]
fn parameters_parse_and_activate() {
    let mut c = AnimationClock::new(ClockKind::Rotate);
    assert_eq!(c.set_parameter("dur", "2.5"), ParamOutcome::Applied);
    assert!(c.is_active());
    assert_eq!(c.duration, 2.5);
    assert_eq!(c.set_parameter("iter", "infinite"), ParamOutcome::Applied);
    assert_eq!(c.iterations, 0);
    assert_eq!(
        c.set_parameter("timing-function", "\"quadEaseOut\""),
        ParamOutcome::Applied
    );
    assert_eq!(c.timing, TimingFunction::QuadEaseOut);
    assert_eq!(c.set_parameter("rev", "yes"), ParamOutcome::Applied);
    assert!(c.reverses);
    assert_eq!(c.set_parameter("dir", "b"), ParamOutcome::Applied);
    assert_eq!(c.direction, ClockDirection::Backward);
}

#[test]
fn explicit_none_direction_is_kept() {
    let mut c = AnimationClock::new(ClockKind::Scale);
    assert_eq!(c.set_parameter("direction", "none"), ParamOutcome::Applied);
    assert_eq!(c.set_parameter("duration", "3"), ParamOutcome::Applied);
    assert!(!c.is_active());
}

#[test]
fn bad_values_are_malformed_and_leave_state_untouched() {
    let mut c = AnimationClock::new(ClockKind::Scale);
    assert_eq!(c.set_parameter("duration", "0"), ParamOutcome::Malformed);
    assert_eq!(c.set_parameter("delay", "-1"), ParamOutcome::Malformed);
    assert_eq!(c.set_parameter("iterations", "many"), ParamOutcome::Malformed);
    assert_eq!(c.set_parameter("timing", "wobble"), ParamOutcome::Malformed);
    assert_eq!(c.set_parameter("offset", "NaN"), ParamOutcome::Malformed);
    assert_eq!(c.set_parameter("colour", "red"), ParamOutcome::Unknown);
    assert_eq!(c, AnimationClock::new(ClockKind::Scale));
}

#[test]
fn prefixes_map_to_kinds() {
    assert_eq!(ClockKind::from_prefix("fade"), Some(ClockKind::Alpha));
    assert_eq!(ClockKind::from_prefix("rotate"), Some(ClockKind::Rotate));
    assert_eq!(ClockKind::from_prefix("spin"), None);
    assert_eq!(ClockDirection::Backward.sign(), -1);
}
