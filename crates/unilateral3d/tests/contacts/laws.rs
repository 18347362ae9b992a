use approx::assert_relative_eq;
use unilateral3d::law::{effective_cof, effective_cor, ConditionalDefaults, Restitution};
use unilateral3d::math::Real;

#[test]
fn cor_reference_values() {
    assert_relative_eq!(effective_cor(0.5, 0.01, 1.0, 0.5), 0.75, epsilon = 1.0e-6);
    assert_eq!(effective_cor(0.5, 0.01, 1.0, 2.0), 0.5);
    assert_eq!(effective_cor(0.5, 0.01, 1.0, 0.005), 0.0);
    assert_eq!(effective_cor(0.5, 0.01, 1.0, 0.01), 0.0);
    assert_relative_eq!(effective_cor(0.5, 0.0, 1.0, 0.0), 0.0);
}

#[test]
fn cof_reference_values() {
    assert_relative_eq!(effective_cof(0.8, 0.3, 0.01, 0.1, 0.05), 0.8005, epsilon = 1.0e-6);
    assert_relative_eq!(effective_cof(0.8, 0.3, 0.01, 0.1, 0.2), 0.302, epsilon = 1.0e-6);
}

#[test]
#[should_panic]
fn cor_rejects_negative_impact_speed() {
    let _ = effective_cor(0.5, 0.01, 1.0, -0.1);
}

#[test]
#[should_panic]
fn cor_rejects_capture_above_min_cor_speed() {
    let _ = effective_cor(0.5, 2.0, 1.0, 0.5);
}

#[test]
fn cor_is_nonincreasing_above_capture_speed() {
    let mut rng = oorandom::Rand32::new(42);

    for _ in 0..200 {
        let min_cor = rng.rand_float() as Real;
        let min_cor_speed = 0.1 + rng.rand_float() as Real;
        let capture_speed = min_cor_speed * rng.rand_float() as Real;

        let a = capture_speed + 2.0 * min_cor_speed * rng.rand_float() as Real;
        let b = capture_speed + 2.0 * min_cor_speed * rng.rand_float() as Real;
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };

        if lo <= capture_speed {
            continue;
        }

        let cor_lo = effective_cor(min_cor, capture_speed, min_cor_speed, lo);
        let cor_hi = effective_cor(min_cor, capture_speed, min_cor_speed, hi);
        assert!(cor_hi <= cor_lo + 1.0e-6);
        assert!(min_cor - 1.0e-6 <= cor_hi && cor_lo <= 1.0);
    }
}

#[test]
fn calibration_uses_defaults_unless_overridden() {
    let defaults = ConditionalDefaults::default();
    assert!(defaults.validate().is_ok());

    let restitution = Restitution::new(0.5);
    assert_relative_eq!(
        restitution.effective_cor(defaults.capture_speed, 2.0, 1.0),
        0.75,
        epsilon = 1.0e-6
    );
    assert_eq!(
        restitution.effective_cor(defaults.capture_speed, defaults.min_cor_speed, 5.0),
        0.5
    );
}
