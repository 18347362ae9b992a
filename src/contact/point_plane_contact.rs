use crate::contact::{PositionInfo, SignConvention, UnilateralContact};
use crate::index::{MultiplierIndex, UnilateralContactIndex};
use crate::law::{CalibrationError, Friction, Restitution};
use crate::math::{Point, Real, TangentVector, UnitVector};
use crate::primitive::{
    ConstraintPrimitive, ContactPlane, PlaneContactGeometry, PointInPlane,
    PointInPlaneWithStiction, NORMAL, TANGENT_X, TANGENT_Y,
};
use crate::system::{MobilizedBody, MultibodySystem, State};

/// Builds the geometry of a point (zero `radius`) or a sphere touching a plane.
pub(super) fn plane_contact_geometry(
    plane_body: &MobilizedBody,
    plane_normal: UnitVector<Real>,
    plane_height: Real,
    follower: &MobilizedBody,
    station: Point<Real>,
    radius: Real,
) -> Result<PlaneContactGeometry, CalibrationError> {
    if !(radius.is_finite() && radius >= 0.0) {
        return Err(CalibrationError::InvalidLength {
            name: "sphere radius",
            value: radius,
        });
    }

    Ok(PlaneContactGeometry {
        plane_body: plane_body.index(),
        plane: ContactPlane::try_new(plane_normal, plane_height)?,
        follower: follower.index(),
        station,
        radius,
    })
}

/// Enables `primitive`, returning `true` if it was disabled.
pub(super) fn enable_primitive(
    primitive: &impl ConstraintPrimitive,
    state: &mut State,
    my_index: Option<UnilateralContactIndex>,
) -> bool {
    if !primitive.is_disabled(state) {
        return false;
    }

    primitive.enable(state);
    log::trace!("enabled contact {:?}", my_index);
    true
}

/// Disables `primitive`, returning `true` if it was enabled.
pub(super) fn disable_primitive(
    primitive: &impl ConstraintPrimitive,
    state: &mut State,
    my_index: Option<UnilateralContactIndex>,
) -> bool {
    if primitive.is_disabled(state) {
        return false;
    }

    primitive.disable(state);
    log::trace!("disabled contact {:?}", my_index);
    true
}

/// A frictionless contact between a point fixed on one body and a plane fixed on another.
///
/// The position error is the signed distance of the point above the plane, so the sign
/// convention is [`SignConvention::Positive`]. The normal direction is the only one
/// constrained while the contact is enabled.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointPlaneFrictionlessContact {
    constraint: PointInPlane,
    restitution: Restitution,
    my_index: Option<UnilateralContactIndex>,
}

impl PointPlaneFrictionlessContact {
    /// Creates a contact between `point` (in the frame of `follower`) and the plane of
    /// normal `plane_normal` and height `plane_height` (in the frame of `plane_body`).
    pub fn try_new(
        system: &mut MultibodySystem,
        plane_body: &MobilizedBody,
        plane_normal: UnitVector<Real>,
        plane_height: Real,
        follower: &MobilizedBody,
        point: Point<Real>,
        restitution: Restitution,
    ) -> Result<Self, CalibrationError> {
        let geometry =
            plane_contact_geometry(plane_body, plane_normal, plane_height, follower, point, 0.0)?;

        Ok(PointPlaneFrictionlessContact {
            constraint: PointInPlane::new(system, geometry),
            restitution,
            my_index: None,
        })
    }

    /// Creates a frictionless point-plane contact.
    ///
    /// # Panics
    /// Panics if the plane height is not finite.
    pub fn new(
        system: &mut MultibodySystem,
        plane_body: &MobilizedBody,
        plane_normal: UnitVector<Real>,
        plane_height: Real,
        follower: &MobilizedBody,
        point: Point<Real>,
        restitution: Restitution,
    ) -> Self {
        Self::try_new(
            system,
            plane_body,
            plane_normal,
            plane_height,
            follower,
            point,
            restitution,
        )
        .unwrap_or_else(|e| panic!("{}", e))
    }

    /// The restitution calibration of this contact.
    #[inline]
    pub fn restitution(&self) -> &Restitution {
        &self.restitution
    }

    /// The primitive keeping the point on the plane while the contact is enabled.
    #[inline]
    pub fn constraint(&self) -> &PointInPlane {
        &self.constraint
    }

    /// The plane and the point.
    #[inline]
    pub fn geometry(&self) -> &PlaneContactGeometry {
        self.constraint.geometry()
    }
}

impl UnilateralContact for PointPlaneFrictionlessContact {
    fn sign_convention(&self) -> SignConvention {
        SignConvention::Positive
    }

    fn my_index(&self) -> Option<UnilateralContactIndex> {
        self.my_index
    }

    fn set_my_index(&mut self, index: UnilateralContactIndex) {
        self.my_index = Some(index);
    }

    fn disable(&self, state: &mut State) -> bool {
        disable_primitive(&self.constraint, state, self.my_index)
    }

    fn enable(&self, state: &mut State) -> bool {
        enable_primitive(&self.constraint, state, self.my_index)
    }

    fn is_enabled(&self, state: &State) -> bool {
        !self.constraint.is_disabled(state)
    }

    fn where_to_display(&self, state: &State) -> Point<Real> {
        self.geometry().projected_point(state)
    }

    fn calc_effective_cor(
        &self,
        _state: &State,
        default_capture_speed: Real,
        default_min_cor_speed: Real,
        impact_speed: Real,
    ) -> Real {
        self.restitution
            .effective_cor(default_capture_speed, default_min_cor_speed, impact_speed)
    }

    fn perr(&self, state: &State) -> Real {
        self.constraint
            .position_error(state)
            .unwrap_or_else(|| self.geometry().separation(state))
    }

    fn verr(&self, state: &State) -> Real {
        self.constraint
            .velocity_error(state)
            .unwrap_or_else(|| self.geometry().normal_errors(state)[1])
    }

    fn aerr(&self, state: &State) -> Real {
        self.constraint
            .acceleration_error(state)
            .unwrap_or_else(|| self.geometry().normal_errors(state)[2])
    }

    fn contact_multiplier_index(&self, state: &State) -> Option<MultiplierIndex> {
        self.constraint.multiplier_index(state, 0)
    }
}

/// Implements [`UnilateralContact`] and [`PositionInfo`] for a plane contact with friction.
///
/// The type must have the fields `constraint: PointInPlaneWithStiction`,
/// `restitution: Restitution`, `friction: Friction` and
/// `my_index: Option<UnilateralContactIndex>`. `$display` is the method of
/// [`PlaneContactGeometry`] giving the display point.
macro_rules! impl_plane_contact_with_friction(
    ($Contact: ident, $display: ident) => {
        impl $Contact {
            /// The restitution calibration of this contact.
            #[inline]
            pub fn restitution(&self) -> &Restitution {
                &self.restitution
            }

            /// The friction calibration of this contact.
            #[inline]
            pub fn friction(&self) -> &Friction {
                &self.friction
            }

            /// The primitive keeping the follower on the plane, without slipping, while
            /// the contact is enabled.
            #[inline]
            pub fn constraint(&self) -> &PointInPlaneWithStiction {
                &self.constraint
            }

            /// The plane and the follower.
            #[inline]
            pub fn geometry(&self) -> &PlaneContactGeometry {
                self.constraint.geometry()
            }
        }

        impl UnilateralContact for $Contact {
            fn sign_convention(&self) -> SignConvention {
                SignConvention::Positive
            }

            fn my_index(&self) -> Option<UnilateralContactIndex> {
                self.my_index
            }

            fn set_my_index(&mut self, index: UnilateralContactIndex) {
                self.my_index = Some(index);
            }

            // The normal and tangential directions share a single primitive, so friction
            // follows the contact.
            fn disable(&self, state: &mut State) -> bool {
                $crate::contact::point_plane_contact::disable_primitive(
                    &self.constraint,
                    state,
                    self.my_index,
                )
            }

            fn enable(&self, state: &mut State) -> bool {
                $crate::contact::point_plane_contact::enable_primitive(
                    &self.constraint,
                    state,
                    self.my_index,
                )
            }

            fn is_enabled(&self, state: &State) -> bool {
                !self.constraint.is_disabled(state)
            }

            fn where_to_display(&self, state: &State) -> Point<Real> {
                self.geometry().$display(state)
            }

            fn calc_effective_cor(
                &self,
                _state: &State,
                default_capture_speed: Real,
                default_min_cor_speed: Real,
                impact_speed: Real,
            ) -> Real {
                self.restitution.effective_cor(
                    default_capture_speed,
                    default_min_cor_speed,
                    impact_speed,
                )
            }

            fn perr(&self, state: &State) -> Real {
                self.constraint
                    .position_error(state)
                    .unwrap_or_else(|| self.geometry().separation(state))
            }

            fn verr(&self, state: &State) -> Real {
                match self.constraint.velocity_errors(state) {
                    Some(errs) => errs[NORMAL],
                    None => self.geometry().normal_errors(state)[1],
                }
            }

            fn aerr(&self, state: &State) -> Real {
                match self.constraint.acceleration_errors(state) {
                    Some(errs) => errs[NORMAL],
                    None => self.geometry().normal_errors(state)[2],
                }
            }

            fn contact_multiplier_index(&self, state: &State) -> Option<MultiplierIndex> {
                self.constraint.multiplier_index(state, NORMAL)
            }

            fn has_friction(&self, _state: &State) -> bool {
                true
            }

            fn calc_effective_cof(
                &self,
                _state: &State,
                default_transition_speed: Real,
                slip_speed: Real,
            ) -> Option<Real> {
                Some(self.friction.effective_cof(default_transition_speed, slip_speed))
            }

            fn slip_velocity(&self, state: &State) -> Option<TangentVector<Real>> {
                let slip = match self.constraint.velocity_errors(state) {
                    Some(errs) => TangentVector::new(errs[TANGENT_X], errs[TANGENT_Y]),
                    None => self.geometry().slip_velocity(state),
                };
                Some(slip)
            }

            fn friction_multiplier_indices(&self, state: &State) -> Option<[MultiplierIndex; 2]> {
                Some([
                    self.constraint.multiplier_index(state, TANGENT_X)?,
                    self.constraint.multiplier_index(state, TANGENT_Y)?,
                ])
            }

            fn as_position_info(&self) -> Option<&dyn PositionInfo> {
                Some(self)
            }
        }

        impl PositionInfo for $Contact {
            fn position_info(&self, state: &State) -> Point<Real> {
                self.constraint.contact_point_in_plane(state)
            }

            fn set_instance_parameter(&self, state: &mut State, position: &Point<Real>) {
                self.constraint.set_anchor(state, Some(*position))
            }
        }
    }
);

pub(super) use impl_plane_contact_with_friction;

/// A contact between a point fixed on one body and a plane fixed on another, with friction.
///
/// While enabled, the point is kept on the plane and prevented from slipping: the two
/// tangential multipliers are the friction forces an external driver limits with the
/// effective COF. The sign convention is [`SignConvention::Positive`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointPlaneContact {
    constraint: PointInPlaneWithStiction,
    restitution: Restitution,
    friction: Friction,
    my_index: Option<UnilateralContactIndex>,
}

impl PointPlaneContact {
    /// Creates a contact between `point` (in the frame of `follower`) and the plane of
    /// normal `plane_normal` and height `plane_height` (in the frame of `plane_body`).
    pub fn try_new(
        system: &mut MultibodySystem,
        plane_body: &MobilizedBody,
        plane_normal: UnitVector<Real>,
        plane_height: Real,
        follower: &MobilizedBody,
        point: Point<Real>,
        restitution: Restitution,
        friction: Friction,
    ) -> Result<Self, CalibrationError> {
        let geometry =
            plane_contact_geometry(plane_body, plane_normal, plane_height, follower, point, 0.0)?;

        Ok(PointPlaneContact {
            constraint: PointInPlaneWithStiction::new(system, geometry),
            restitution,
            friction,
            my_index: None,
        })
    }

    /// Creates a point-plane contact with friction.
    ///
    /// # Panics
    /// Panics if the plane height is not finite.
    pub fn new(
        system: &mut MultibodySystem,
        plane_body: &MobilizedBody,
        plane_normal: UnitVector<Real>,
        plane_height: Real,
        follower: &MobilizedBody,
        point: Point<Real>,
        restitution: Restitution,
        friction: Friction,
    ) -> Self {
        Self::try_new(
            system,
            plane_body,
            plane_normal,
            plane_height,
            follower,
            point,
            restitution,
            friction,
        )
        .unwrap_or_else(|e| panic!("{}", e))
    }
}

impl_plane_contact_with_friction!(PointPlaneContact, projected_point);

#[cfg(test)]
mod test {
    use super::*;
    use crate::math::{Isometry, Vector};
    use crate::system::Stage;
    use approx::assert_relative_eq;

    fn falling_point() -> (MultibodySystem, PointPlaneFrictionlessContact, MobilizedBody) {
        let mut system = MultibodySystem::new();
        let ground = system.ground();
        let body = system.add_mobilized_body(0);
        let contact = PointPlaneFrictionlessContact::new(
            &mut system,
            &ground,
            Vector::z_axis(),
            0.5,
            &body,
            Point::new(0.0, 0.0, -0.1),
            Restitution::new(0.5),
        );
        (system, contact, body)
    }

    #[test]
    fn disabled_errors_match_enabled_errors() {
        let (system, contact, body) = falling_point();
        let mut state = system.default_state();
        let kinematics = state.body_mut(body.index());
        kinematics.pose = Isometry::translation(0.3, -0.2, 1.0);
        kinematics.linvel = Vector::new(1.0, 0.0, -2.0);
        kinematics.linacc = Vector::new(0.0, 0.0, -9.81);

        let disabled = [contact.perr(&state), contact.verr(&state), contact.aerr(&state)];
        assert_relative_eq!(disabled[0], 0.4, epsilon = 1.0e-6);
        assert_relative_eq!(disabled[1], -2.0, epsilon = 1.0e-6);
        assert_relative_eq!(disabled[2], -9.81, epsilon = 1.0e-5);

        assert!(contact.enable(&mut state));
        system.realize(&mut state, Stage::Position);
        let enabled = [contact.perr(&state), contact.verr(&state), contact.aerr(&state)];
        assert_relative_eq!(disabled[0], enabled[0]);
        assert_relative_eq!(disabled[1], enabled[1]);
        assert_relative_eq!(disabled[2], enabled[2]);

        assert_relative_eq!(
            contact.where_to_display(&state),
            Point::new(0.3, -0.2, 0.5),
            epsilon = 1.0e-6
        );
    }

    #[test]
    fn frictionless_contact_reports_no_friction() {
        let (system, contact, _) = falling_point();
        let state = system.default_state();
        assert!(!contact.has_friction(&state));
        assert_eq!(contact.slip_velocity(&state), None);
        assert!(contact.as_position_info().is_none());
    }

    #[test]
    fn friction_multipliers_follow_the_contact() {
        let mut system = MultibodySystem::new();
        let ground = system.ground();
        let body = system.add_mobilized_body(0);
        let contact = PointPlaneContact::new(
            &mut system,
            &ground,
            Vector::z_axis(),
            0.0,
            &body,
            Point::origin(),
            Restitution::plastic(),
            Friction::new(0.8, 0.3, 0.0),
        );
        let mut state = system.default_state();

        assert!(contact.has_friction(&state));
        assert_eq!(contact.friction_multiplier_indices(&state), None);

        assert!(contact.enable(&mut state));
        system.realize(&mut state, Stage::Position);
        let normal = contact.contact_multiplier_index(&state).unwrap();
        let [x, y] = contact.friction_multiplier_indices(&state).unwrap();
        assert!(x != y && x != normal && y != normal);
        assert_eq!(state.num_multipliers(), 3);

        assert!(contact.disable(&mut state));
        assert!(!contact.disable(&mut state));
        assert_eq!(contact.friction_multiplier_indices(&state), None);
        assert_eq!(contact.contact_multiplier_index(&state), None);
    }

    #[test]
    fn stiction_anchor_tracks_drift() {
        let mut system = MultibodySystem::new();
        let ground = system.ground();
        let body = system.add_mobilized_body(0);
        let contact = PointPlaneContact::new(
            &mut system,
            &ground,
            Vector::z_axis(),
            0.0,
            &body,
            Point::origin(),
            Restitution::plastic(),
            Friction::new(0.5, 0.5, 0.0),
        );
        let mut state = system.default_state();
        let _ = contact.enable(&mut state);
        system.realize(&mut state, Stage::Position);

        let info = contact.as_position_info().unwrap();
        let anchor = info.position_info(&state);
        info.set_instance_parameter(&mut state, &anchor);

        state.body_mut(body.index()).pose = Isometry::translation(0.25, 0.5, 0.0);
        let drift = contact.constraint().tangential_drift(&state).unwrap();
        assert_relative_eq!(drift.x, 0.25, epsilon = 1.0e-6);
        assert_relative_eq!(drift.y, 0.5, epsilon = 1.0e-6);
    }
}
