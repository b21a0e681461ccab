use super::*;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn endpoints_are_stable() {
    for f in TimingFunction::ALL {
        assert!(close(f.apply(0.0), 0.0), "{f:?} at 0");
        assert!(close(f.apply(1.0), 1.0), "{f:?} at 1");
    }
}

#[test]
fn input_is_clamped() {
    for f in TimingFunction::ALL {
        assert_eq!(f.apply(-3.0), f.apply(0.0));
        assert_eq!(f.apply(7.0), f.apply(1.0));
    }
}

#[test]
fn in_out_curves_pass_through_the_midpoint() {
    for f in [
        TimingFunction::SineEaseInOut,
        TimingFunction::QuadEaseInOut,
        TimingFunction::CubicEaseInOut,
        TimingFunction::QuartEaseInOut,
        TimingFunction::QuintEaseInOut,
        TimingFunction::CircEaseInOut,
        TimingFunction::ExpoEaseInOut,
        TimingFunction::BounceEaseInOut,
    ] {
        assert!(close(f.apply(0.5), 0.5), "{f:?}");
    }
}

#[test]
fn spot_values() {
    assert!(close(TimingFunction::QuadEaseIn.apply(0.5), 0.25));
    assert!(close(TimingFunction::QuadEaseOut.apply(0.5), 0.75));
    assert!(close(TimingFunction::CubicEaseOut.apply(0.5), 0.875));
    assert!(close(TimingFunction::BounceEaseOut.apply(0.5), 0.765625));
    assert!(close(TimingFunction::ExpoEaseIn.apply(0.5), 2f64.powf(-5.0)));
}

#[test]
fn step_functions() {
    assert_eq!(TimingFunction::ZeroStep.apply(0.0), 0.0);
    assert_eq!(TimingFunction::ZeroStep.apply(0.01), 1.0);
    assert_eq!(TimingFunction::HalfStep.apply(0.49), 0.0);
    assert_eq!(TimingFunction::HalfStep.apply(0.5), 1.0);
    assert_eq!(TimingFunction::OneStep.apply(0.99), 0.0);
    assert_eq!(TimingFunction::OneStep.apply(1.0), 1.0);
    assert_eq!(TimingFunction::ClockTick.apply(0.5), 0.5);
    assert!(close(TimingFunction::ClockTick.apply(0.02), 1.0 / 60.0));
}

#[test]
fn parse_accepts_runtime_names_case_insensitively() {
    assert_eq!(
        "sineEaseIn".parse::<TimingFunction>().unwrap(),
        TimingFunction::SineEaseIn
    );
    assert_eq!(
        "BOUNCE-EASE-OUT".parse::<TimingFunction>().unwrap(),
        TimingFunction::BounceEaseOut
    );
    assert_eq!(
        "linear".parse::<TimingFunction>().unwrap(),
        TimingFunction::Linear
    );
    assert!("wobble".parse::<TimingFunction>().is_err());
}

#[test]
fn runtime_names_round_trip() {
    for f in TimingFunction::ALL {
        assert_eq!(f.runtime_name().parse::<TimingFunction>().unwrap(), f);
    }
}
