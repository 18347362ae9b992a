use unilateral3d::prelude::*;

#[test]
fn states_track_enabling_and_realization() {
    let mut system = MultibodySystem::new();
    let hinge = system.add_mobilized_body(1);
    let ground = system.ground();
    let ball = system.add_mobilized_body(0);

    let stop = HardStopUpper::new(&mut system, &hinge, 0, 0.5, Restitution::plastic());
    let contact = SpherePlaneContact::new(
        &mut system,
        &ground,
        Vector::z_axis(),
        0.0,
        &ball,
        Point::origin(),
        0.1,
        Restitution::new(0.3),
        Friction::new(0.5, 0.4, 0.0),
    );
    let stop = system.add_unilateral_contact(stop);
    let contact = system.add_unilateral_contact(contact);
    assert_eq!(system.unilateral_contacts().len(), 2);

    let mut state = system.default_state();
    assert_eq!(state.num_multipliers(), 0);

    let contact = system.unilateral_contact(contact).unwrap();
    assert!(contact.enable(&mut state));
    assert!(state.stage() < Stage::Position);
    system.realize(&mut state, Stage::Velocity);
    assert_eq!(state.stage(), Stage::Velocity);
    assert_eq!(state.multipliers().len(), 3);

    let stop = system.unilateral_contact(stop).unwrap();
    assert!(stop.enable(&mut state));
    system.realize(&mut state, Stage::Position);
    assert_eq!(state.multipliers().len(), 4);
    assert_eq!(
        stop.contact_multiplier_index(&state),
        Some(MultiplierIndex::from_raw(0))
    );
    assert_eq!(
        contact.contact_multiplier_index(&state),
        Some(MultiplierIndex::from_raw(3))
    );
}

#[test]
#[should_panic]
fn realizing_a_foreign_state_panics() {
    let mut small = MultibodySystem::new();
    let _ = small.add_mobilized_body(1);
    let mut large = MultibodySystem::new();
    let _ = large.add_mobilized_body(2);

    let mut state = small.default_state();
    large.realize(&mut state, Stage::Position);
}
