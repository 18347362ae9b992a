use crate::index::ConstraintIndex;
use crate::math::{Point, Real, TangentVector, Vector};
use crate::primitive::{ConstraintPrimitive, PlaneContactGeometry};
use crate::system::{MultibodySystem, State};

/// Constraint keeping a follower point on a plane while preventing it from slipping.
///
/// It generates three multipliers, laid out as [`TANGENT_X`](super::TANGENT_X),
/// [`TANGENT_Y`](super::TANGENT_Y) and [`NORMAL`](super::NORMAL). The velocity and
/// acceleration errors use the same layout: the two tangential components are the slip
/// velocity (resp. acceleration) along the plane axes, the last one is the normal error.
///
/// The anchor point (an instance parameter stored in the state) records where sticking
/// began; the tangential drift away from it is reported by [`Self::tangential_drift`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct PointInPlaneWithStiction {
    index: ConstraintIndex,
    geometry: PlaneContactGeometry,
}

/// A sphere on a plane is a point with stiction whose geometry carries a nonzero radius.
pub type SphereOnPlane = PointInPlaneWithStiction;

impl PointInPlaneWithStiction {
    /// Registers a plane contact with stiction with the given geometry.
    pub fn new(system: &mut MultibodySystem, geometry: PlaneContactGeometry) -> Self {
        PointInPlaneWithStiction {
            index: system.add_constraint(3, true),
            geometry,
        }
    }

    /// The geometry of this constraint.
    #[inline]
    pub fn geometry(&self) -> &PlaneContactGeometry {
        &self.geometry
    }

    /// The signed distance from the plane, if enabled.
    pub fn position_error(&self, state: &State) -> Option<Real> {
        (!self.is_disabled(state)).then(|| self.geometry.separation(state))
    }

    /// Slip velocity and normal velocity error, if enabled.
    pub fn velocity_errors(&self, state: &State) -> Option<Vector<Real>> {
        if self.is_disabled(state) {
            return None;
        }

        let slip = self.geometry.slip_velocity(state);
        let normal = self.geometry.normal_errors(state)[1];
        Some(Vector::new(slip.x, slip.y, normal))
    }

    /// Slip acceleration and normal acceleration error, if enabled.
    pub fn acceleration_errors(&self, state: &State) -> Option<Vector<Real>> {
        if self.is_disabled(state) {
            return None;
        }

        let slip = self.geometry.slip_acceleration(state);
        let normal = self.geometry.normal_errors(state)[2];
        Some(Vector::new(slip.x, slip.y, normal))
    }

    /// The sticking anchor, in plane coordinates, if one was set.
    pub fn anchor(&self, state: &State) -> Option<Point<Real>> {
        state.instance_parameter(self.index)
    }

    /// Records the sticking anchor, in plane coordinates.
    pub fn set_anchor(&self, state: &mut State, anchor: Option<Point<Real>>) {
        state.set_instance_parameter(self.index, anchor)
    }

    /// The contact point, in plane coordinates.
    pub fn contact_point_in_plane(&self, state: &State) -> Point<Real> {
        let contact = self.geometry.contact_point(state);
        self.geometry.plane_coordinates(state, &contact)
    }

    /// Tangential displacement of the contact point since the anchor was set.
    ///
    /// Returns `None` if the constraint is disabled or if no anchor was set.
    pub fn tangential_drift(&self, state: &State) -> Option<TangentVector<Real>> {
        if self.is_disabled(state) {
            return None;
        }

        let anchor = self.anchor(state)?;
        let current = self.contact_point_in_plane(state);
        Some(TangentVector::new(current.x - anchor.x, current.y - anchor.y))
    }
}

impl ConstraintPrimitive for PointInPlaneWithStiction {
    fn constraint_index(&self) -> ConstraintIndex {
        self.index
    }

    fn num_multipliers(&self) -> usize {
        3
    }
}
