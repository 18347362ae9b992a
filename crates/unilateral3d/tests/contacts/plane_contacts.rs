use approx::assert_relative_eq;
use unilateral3d::prelude::*;

struct Scene {
    system: MultibodySystem,
    body: MobilizedBody,
    frictionless: UnilateralContactIndex,
    point: UnilateralContactIndex,
    sphere: UnilateralContactIndex,
}

fn scene() -> Scene {
    let mut system = MultibodySystem::new();
    let ground = system.ground();
    let body = system.add_mobilized_body(0);
    let normal = UnitVector::new_normalize(Vector::new(0.0, 0.3, 1.0));

    let frictionless = PointPlaneFrictionlessContact::new(
        &mut system,
        &ground,
        normal,
        0.1,
        &body,
        Point::new(0.2, 0.0, 0.0),
        Restitution::new(0.4),
    );
    let point = PointPlaneContact::new(
        &mut system,
        &ground,
        normal,
        0.1,
        &body,
        Point::new(-0.2, 0.0, 0.0),
        Restitution::new(0.4),
        Friction::new(0.8, 0.3, 0.01),
    );
    let sphere = SpherePlaneContact::new(
        &mut system,
        &ground,
        normal,
        0.1,
        &body,
        Point::new(0.0, 0.2, 0.0),
        0.05,
        Restitution::new(0.4),
        Friction::new(0.8, 0.3, 0.01),
    );

    Scene {
        frictionless: system.add_unilateral_contact(frictionless),
        point: system.add_unilateral_contact(point),
        sphere: system.add_unilateral_contact(sphere),
        system,
        body,
    }
}

fn moving_state(scene: &Scene) -> State {
    let mut state = scene.system.default_state();
    let kinematics = state.body_mut(scene.body.index());
    kinematics.pose = Isometry::new(Vector::new(0.1, -0.3, 0.7), Vector::new(0.2, -0.1, 0.4));
    kinematics.linvel = Vector::new(0.5, 0.2, -1.0);
    kinematics.angvel = Vector::new(0.0, 1.0, 2.0);
    kinematics.linacc = Vector::new(0.0, 0.0, -9.81);
    kinematics.angacc = Vector::new(0.3, 0.0, 0.0);
    state
}

#[test]
fn disabled_errors_agree_with_enabled_primitives() {
    let scene = scene();
    let mut state = moving_state(&scene);

    let contacts: Vec<_> = scene.system.unilateral_contacts().map(|(_, c)| c).collect();
    let disabled: Vec<_> = contacts
        .iter()
        .map(|c| [c.perr(&state), c.verr(&state), c.aerr(&state)])
        .collect();

    for contact in &contacts {
        assert!(contact.enable(&mut state));
    }
    scene.system.realize(&mut state, Stage::Position);

    for (contact, expected) in contacts.iter().zip(disabled) {
        assert_relative_eq!(contact.perr(&state), expected[0], epsilon = 1.0e-6);
        assert_relative_eq!(contact.verr(&state), expected[1], epsilon = 1.0e-5);
        assert_relative_eq!(contact.aerr(&state), expected[2], epsilon = 1.0e-4);
    }
}

#[test]
fn friction_capabilities() {
    let scene = scene();
    let mut state = moving_state(&scene);
    let frictionless = scene.system.unilateral_contact(scene.frictionless).unwrap();
    let point = scene.system.unilateral_contact(scene.point).unwrap();
    let sphere = scene.system.unilateral_contact(scene.sphere).unwrap();

    assert!(!frictionless.has_friction(&state));
    assert_eq!(frictionless.calc_effective_cof(&state, 0.1, 0.0), None);
    assert_eq!(frictionless.slip_velocity(&state), None);
    assert!(frictionless.as_position_info().is_none());

    for contact in [point, sphere] {
        assert!(contact.has_friction(&state));
        assert!(contact.slip_velocity(&state).is_some());
        assert!(contact.as_position_info().is_some());
        assert_eq!(contact.friction_multiplier_indices(&state), None);
        assert_relative_eq!(
            contact.calc_effective_cof(&state, 0.1, 0.05).unwrap(),
            0.8005,
            epsilon = 1.0e-6
        );
    }

    assert!(point.enable(&mut state));
    assert!(sphere.enable(&mut state));
    scene.system.realize(&mut state, Stage::Position);

    let mut all = Vec::new();
    for contact in [point, sphere] {
        let [x, y] = contact.friction_multiplier_indices(&state).unwrap();
        let normal = contact.contact_multiplier_index(&state).unwrap();
        all.extend([x, y, normal]);
    }
    all.sort();
    all.dedup();
    assert_eq!(all.len(), 6);
    assert!(all
        .iter()
        .all(|ix| (ix.into_raw() as usize) < state.num_multipliers()));

    assert!(sphere.disable(&mut state));
    assert_eq!(sphere.friction_multiplier_indices(&state), None);
    assert_eq!(sphere.contact_multiplier_index(&state), None);
}

#[test]
fn slip_velocity_matches_between_disabled_and_enabled() {
    let scene = scene();
    let mut state = moving_state(&scene);
    let sphere = scene.system.unilateral_contact(scene.sphere).unwrap();

    let disabled = sphere.slip_velocity(&state).unwrap();
    let _ = sphere.enable(&mut state);
    scene.system.realize(&mut state, Stage::Position);
    let enabled = sphere.slip_velocity(&state).unwrap();
    assert_relative_eq!(disabled, enabled, epsilon = 1.0e-6);
}

#[test]
fn proximal_contacts() {
    let scene = scene();
    let mut state = scene.system.default_state();
    // The body origin and both points lie on the plane surface, the sphere floats above it.
    state.body_mut(scene.body.index()).pose =
        Isometry::translation(0.0, 0.0, 0.1 * (1.0 + 0.09 as Real).sqrt());

    let proximal: Vec<_> = scene.system.proximal_contacts(&state, 1.0e-3).collect();
    assert!(proximal.contains(&scene.frictionless));
    assert!(proximal.contains(&scene.point));
    assert!(!proximal.contains(&scene.sphere));
}
