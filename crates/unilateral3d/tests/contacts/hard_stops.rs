use approx::assert_relative_eq;
use unilateral3d::prelude::*;

fn hinge_with_stops() -> (MultibodySystem, UnilateralContactIndex, UnilateralContactIndex) {
    let mut system = MultibodySystem::new();
    let hinge = system.add_mobilized_body(1);
    let upper = HardStopUpper::new(&mut system, &hinge, 0, 1.0, Restitution::new(0.5));
    let lower = HardStopLower::new(&mut system, &hinge, 0, -1.0, Restitution::new(0.5));
    let upper = system.add_unilateral_contact(upper);
    let lower = system.add_unilateral_contact(lower);
    (system, upper, lower)
}

#[test]
fn enable_disable_is_idempotent() {
    let (system, upper, _) = hinge_with_stops();
    let stop = system.unilateral_contact(upper).unwrap();
    let mut state = system.default_state();

    assert!(!stop.disable(&mut state));
    assert!(stop.enable(&mut state));
    assert!(!stop.enable(&mut state));
    assert!(stop.is_enabled(&state));
    assert!(stop.disable(&mut state));
    assert!(!stop.is_enabled(&state));
}

#[test]
fn stops_know_their_index() {
    let (system, upper, lower) = hinge_with_stops();
    assert_eq!(system.unilateral_contact(upper).unwrap().my_index(), Some(upper));
    assert_eq!(system.unilateral_contact(lower).unwrap().my_index(), Some(lower));

    let stop = system.unilateral_contact(lower).unwrap();
    let stop = stop.as_contact::<HardStopLower>().unwrap();
    assert_eq!(stop.lower_limit(), -1.0);
    assert!(system
        .unilateral_contact(lower)
        .unwrap()
        .as_contact::<HardStopUpper>()
        .is_none());
}

#[test]
fn sign_conventions_make_valid_configurations_nonnegative() {
    let (system, upper, lower) = hinge_with_stops();
    let mut state = system.default_state();
    state.q_mut()[0] = 0.2;

    for (_, stop) in system.unilateral_contacts() {
        let perr = stop.sign_convention().apply(stop.perr(&state));
        assert!(perr > 0.0);
        assert!(stop.satisfies_conditions(&state, 1.0e-6));
    }

    assert_eq!(
        system.unilateral_contact(upper).unwrap().sign_convention(),
        SignConvention::Negative
    );
    assert_relative_eq!(
        system.unilateral_contact(upper).unwrap().perr(&state),
        -0.8,
        epsilon = 1.0e-6
    );
    assert_relative_eq!(
        system.unilateral_contact(lower).unwrap().perr(&state),
        1.2,
        epsilon = 1.0e-6
    );

    state.q_mut()[0] = 1.1;
    let stop = system.unilateral_contact(upper).unwrap();
    assert_eq!(
        stop.violated_condition(&state, 1.0e-6),
        Some(ConditionViolation::Penetration)
    );
}

#[test]
fn approaching_stop_at_the_limit() {
    let (system, upper, _) = hinge_with_stops();
    let stop = system.unilateral_contact(upper).unwrap();
    let mut state = system.default_state();
    state.q_mut()[0] = 1.0;
    state.u_mut()[0] = 0.5;

    assert!(stop.is_proximal(&state, 1.0e-6));
    assert_eq!(
        stop.violated_condition(&state, 1.0e-6),
        Some(ConditionViolation::Approach)
    );
    assert_relative_eq!(stop.separation_speed(&state), -0.5);

    let cor = stop.effective_cor(&state, &ConditionalDefaults::default(), 0.5);
    assert_relative_eq!(cor, 0.75, epsilon = 1.0e-6);
}

#[test]
fn multipliers_are_assigned_to_enabled_stops_only() {
    let (system, upper, lower) = hinge_with_stops();
    let mut state = system.default_state();
    let upper = system.unilateral_contact(upper).unwrap();
    let lower = system.unilateral_contact(lower).unwrap();

    assert_eq!(upper.contact_multiplier_index(&state), None);
    assert_eq!(lower.contact_multiplier_index(&state), None);

    assert!(lower.enable(&mut state));
    system.realize(&mut state, Stage::Position);
    assert_eq!(upper.contact_multiplier_index(&state), None);
    assert_eq!(
        lower.contact_multiplier_index(&state),
        Some(MultiplierIndex::from_raw(0))
    );
    assert_eq!(lower.contact_multiplier(&state), Some(0.0));

    assert!(upper.enable(&mut state));
    system.realize(&mut state, Stage::Position);
    assert_eq!(
        upper.contact_multiplier_index(&state),
        Some(MultiplierIndex::from_raw(0))
    );
    assert_eq!(
        lower.contact_multiplier_index(&state),
        Some(MultiplierIndex::from_raw(1))
    );
}

/// A realized state where only `active` is enabled, resting at `q` with the given
/// acceleration and normal multiplier.
fn resting_on_stop(
    system: &MultibodySystem,
    active: UnilateralContactIndex,
    q: Real,
    udot: Real,
    lambda: Real,
) -> State {
    let stop = system.unilateral_contact(active).unwrap();
    let mut state = system.default_state();
    assert!(stop.enable(&mut state));
    state.q_mut()[0] = q;
    state.u_mut()[0] = 0.0;
    system.realize(&mut state, Stage::Position);

    state.udot_mut()[0] = udot;
    let ix = stop.contact_multiplier_index(&state).unwrap();
    state.multipliers_mut()[ix.into_raw() as usize] = lambda;
    state
}

#[test]
fn upper_stop_at_rest_checks_acceleration_and_force() {
    let (system, upper, _) = hinge_with_stops();
    let stop = system.unilateral_contact(upper).unwrap();
    let tol = 1.0e-6;

    let cases = [
        (1.0, 0.0, Some(ConditionViolation::Acceleration)),
        (0.0, -2.0, Some(ConditionViolation::AttractiveForce)),
        (-1.0, 2.0, Some(ConditionViolation::Complementarity)),
        (0.0, 2.0, None),
        (-1.0, 0.0, None),
    ];

    for (udot, lambda, expected) in cases {
        let state = resting_on_stop(&system, upper, 1.0, udot, lambda);
        assert_eq!(stop.contact_multiplier(&state), Some(lambda));
        assert_eq!(stop.violated_condition(&state, tol), expected);
    }
}

#[test]
fn lower_stop_at_rest_checks_acceleration_and_force() {
    let (system, _, lower) = hinge_with_stops();
    let stop = system.unilateral_contact(lower).unwrap();
    let tol = 1.0e-6;

    let cases = [
        (-1.0, 0.0, Some(ConditionViolation::Acceleration)),
        (0.0, 2.0, Some(ConditionViolation::AttractiveForce)),
        (1.0, -2.0, Some(ConditionViolation::Complementarity)),
        (0.0, -2.0, None),
        (1.0, 0.0, None),
    ];

    for (udot, lambda, expected) in cases {
        let state = resting_on_stop(&system, lower, -1.0, udot, lambda);
        assert_eq!(stop.contact_multiplier(&state), Some(lambda));
        assert_eq!(stop.violated_condition(&state, tol), expected);
    }
}

#[test]
fn swapping_stops_discards_the_previous_multiplier() {
    let (system, upper, lower) = hinge_with_stops();
    let mut state = system.default_state();
    let upper = system.unilateral_contact(upper).unwrap();
    let lower = system.unilateral_contact(lower).unwrap();

    assert!(lower.enable(&mut state));
    system.realize(&mut state, Stage::Position);
    let ix = lower.contact_multiplier_index(&state).unwrap();
    state.multipliers_mut()[ix.into_raw() as usize] = -5.0;
    assert_eq!(lower.contact_multiplier(&state), Some(-5.0));

    assert!(lower.disable(&mut state));
    assert!(upper.enable(&mut state));
    assert_eq!(upper.contact_multiplier(&state), None);

    system.realize(&mut state, Stage::Position);
    assert_eq!(lower.contact_multiplier(&state), None);
    assert_eq!(upper.contact_multiplier(&state), Some(0.0));

    // Moving without changing the enabled set keeps the solver's values.
    state.multipliers_mut()[0] = 3.0;
    state.q_mut()[0] = 0.5;
    system.realize(&mut state, Stage::Position);
    assert_eq!(upper.contact_multiplier(&state), Some(3.0));
}
