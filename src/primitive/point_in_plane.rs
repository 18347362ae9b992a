use crate::index::ConstraintIndex;
use crate::math::Real;
use crate::primitive::{ConstraintPrimitive, PlaneContactGeometry};
use crate::system::{MultibodySystem, State};

/// Holonomic constraint keeping a follower point on a plane.
///
/// The position error is the signed distance from the plane; only the normal direction
/// is constrained, so there is a single multiplier.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct PointInPlane {
    index: ConstraintIndex,
    geometry: PlaneContactGeometry,
}

impl PointInPlane {
    /// Registers a point-in-plane constraint with the given geometry.
    pub fn new(system: &mut MultibodySystem, geometry: PlaneContactGeometry) -> Self {
        PointInPlane {
            index: system.add_constraint(1, true),
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

    /// Time derivative of the position error, if enabled.
    pub fn velocity_error(&self, state: &State) -> Option<Real> {
        (!self.is_disabled(state)).then(|| self.geometry.normal_errors(state)[1])
    }

    /// Second time derivative of the position error, if enabled.
    pub fn acceleration_error(&self, state: &State) -> Option<Real> {
        (!self.is_disabled(state)).then(|| self.geometry.normal_errors(state)[2])
    }
}

impl ConstraintPrimitive for PointInPlane {
    fn constraint_index(&self) -> ConstraintIndex {
        self.index
    }

    fn num_multipliers(&self) -> usize {
        1
    }
}
