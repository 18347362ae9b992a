use approx::assert_relative_eq;
use unilateral3d::prelude::*;

#[test]
fn motor_regime_classification() {
    let mut system = MultibodySystem::new();
    let shaft = system.add_mobilized_body(1);
    let motor = SpeedLimitedMotor::new(&mut system, &shaft, 0, 1.0, 4.0);
    let motor = system.add_bounded_speed_constraint(motor);
    let motor = system.bounded_speed_constraint(motor).unwrap();
    let mut state = system.default_state();

    assert_eq!(motor.calc_effective_bounds(&state), (-4.0, 4.0));
    assert!(motor.resolve_reaction(&state, 2.0).is_holding());
    assert_eq!(
        motor.resolve_reaction(&state, 6.0),
        BoundedSpeedRegime::SlippingAtUpper { reaction: 4.0 }
    );
    assert_relative_eq!(motor.resolve_reaction(&state, -6.0).reaction(), -4.0);

    // Enabled: the reaction is read from the multiplier.
    assert_eq!(motor.reaction(&state), None);
    assert!(motor.enable(&mut state));
    system.realize(&mut state, Stage::Position);
    let ix = motor.multiplier_index(&state).unwrap();
    state.multipliers_mut()[ix.into_raw() as usize] = -3.0;
    assert_eq!(motor.reaction(&state), Some(3.0));

    state.u_mut()[0] = 1.0;
    assert!(motor.satisfies_conditions(&state, 3.0, 1.0e-6));
    assert!(motor
        .as_bounded_speed::<SpeedLimitedMotor>()
        .is_some_and(|m| m.target_speed() == 1.0));
}

#[test]
fn coordinate_friction_through_the_system() {
    let mut system = MultibodySystem::new();
    let slider = system.add_mobilized_body(1);
    let friction = CoordinateFriction::new(
        &mut system,
        &slider,
        0,
        Friction::new(0.6, 0.4, 0.0),
        NormalForce::Constant(10.0),
    );
    let index = system.add_state_limited_friction(friction);
    let friction = system.state_limited_friction(index).unwrap();
    let mut state = system.default_state();

    assert_eq!(friction.my_index(), Some(index));
    assert_relative_eq!(friction.friction_limit(&state, 0.01), 6.0, epsilon = 1.0e-5);

    state.u_mut()[0] = 1.0;
    assert_relative_eq!(friction.friction_limit(&state, 0.01), 4.0, epsilon = 1.0e-5);
    assert!(friction.as_friction::<CoordinateFriction>().is_some());
}
