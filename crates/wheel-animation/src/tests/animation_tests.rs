use super::*;

#[test]
fn every_easing_pins_endpoints() {
    let curves = [
        Easing::Linear,
        Easing::EaseIn,
        Easing::EaseOut,
        Easing::EaseInOut,
        Easing::FastOutSlowIn,
        Easing::LinearOutSlowIn,
        Easing::FastOutLinear,
        Easing::ViscousFluid,
    ];
    for curve in curves {
        assert_eq!(curve.transform(0.0), 0.0, "{curve:?} at 0");
        assert_eq!(curve.transform(1.0), 1.0, "{curve:?} at 1");
    }
}

#[test]
fn viscous_fluid_is_monotonic_and_front_loaded() {
    let mut previous = 0.0;
    for step in 1..=100 {
        let value = Easing::ViscousFluid.transform(step as f32 / 100.0);
        assert!(value >= previous, "not monotonic at step {step}");
        previous = value;
    }
    assert!(Easing::ViscousFluid.transform(0.5) > 0.5);
    assert!((Easing::ViscousFluid.transform(0.999) - 1.0).abs() < 0.01);
}

#[test]
fn closures_act_as_interpolators() {
    let half = |fraction: f32| fraction * 0.5;
    assert_eq!(half.interpolate(1.0), 0.5);
    let shared: SharedInterpolator = std::rc::Rc::new(half);
    assert_eq!(shared.interpolate(0.5), 0.25);
}

#[test]
fn spline_runs_from_zero_to_one() {
    assert!(spline_distance_fraction(0.0).abs() < 0.01);
    assert_eq!(spline_distance_fraction(1.0), 1.0);
    let mut previous = 0.0;
    for step in 0..=100 {
        let value = spline_distance_fraction(step as f32 / 100.0);
        assert!(value >= previous);
        previous = value;
    }
}

#[test]
fn faster_release_flings_further_and_longer() {
    let calculator = FlingCalculator::with_density(1.0);
    let slow = calculator.fling_info(1500.0);
    let fast = calculator.fling_info(6000.0);

    assert!(slow.distance > 0.0);
    assert!(slow.duration_ms > 0);
    assert!(fast.distance > slow.distance);
    assert!(fast.duration_ms > slow.duration_ms);
}

#[test]
fn negative_velocity_travels_backwards() {
    let info = FlingCalculator::default().fling_info(-3000.0);
    assert!(info.position(info.duration_ms / 2) < 0.0);
    assert!((info.position(info.duration_ms) - info.final_position()).abs() < 0.5);
    assert!(info.is_finished(info.duration_ms));
}

#[test]
fn capped_duration_keeps_distance() {
    let info = FlingCalculator::default().fling_info(8000.0);
    let capped = info.with_max_duration(100);
    assert_eq!(capped.duration_ms, 100.min(info.duration_ms));
    assert_eq!(capped.distance, info.distance);
}

#[test]
fn zero_velocity_is_a_null_fling() {
    let info = FlingCalculator::default().fling_info(0.0);
    assert_eq!(info.distance, 0.0);
    assert_eq!(info.duration_ms, 0);
    assert_eq!(info.position(10), 0.0);
}

#[test]
fn non_finite_velocity_is_a_null_fling() {
    for velocity in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
        let info = FlingCalculator::default().fling_info(velocity);
        assert_eq!(info.distance, 0.0, "{velocity}");
        assert_eq!(info.duration_ms, 0, "{velocity}");
        assert_eq!(info.final_position(), 0.0, "{velocity}");
        assert!(info.is_finished(0));
    }
}
