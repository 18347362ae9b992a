//! Constraint primitives wrapped by the conditional constraints.
//!
//! A primitive owns the equations of one bilateral constraint and a slot in the
//! [`State`] holding its enabled flag. Primitives only report errors while enabled:
//! their accessors return `None` otherwise. Every primitive of this module is disabled
//! by default, since whether they apply is decided by the conditional constraint wrapping
//! them.

pub use self::constant_coordinate::ConstantCoordinate;
pub use self::constant_speed::ConstantSpeed;
pub use self::contact_plane::ContactPlane;
pub use self::plane_contact_geometry::PlaneContactGeometry;
pub use self::point_in_plane::PointInPlane;
pub use self::point_in_plane_with_stiction::{PointInPlaneWithStiction, SphereOnPlane};

use crate::index::{ConstraintIndex, MultiplierIndex};
use crate::system::State;

mod constant_coordinate;
mod constant_speed;
mod contact_plane;
mod plane_contact_geometry;
mod point_in_plane;
mod point_in_plane_with_stiction;

/// Direction of the first tangential multiplier of a plane contact with stiction.
pub const TANGENT_X: usize = 0;
/// Direction of the second tangential multiplier of a plane contact with stiction.
pub const TANGENT_Y: usize = 1;
/// Direction of the normal multiplier of a plane contact with stiction.
pub const NORMAL: usize = 2;

/// Interface shared by all the constraint primitives.
pub trait ConstraintPrimitive {
    /// The index of this primitive in its multibody system.
    fn constraint_index(&self) -> ConstraintIndex;

    /// The number of multipliers this primitive generates while enabled.
    fn num_multipliers(&self) -> usize;

    /// Is this primitive currently disabled?
    fn is_disabled(&self, state: &State) -> bool {
        !state.is_constraint_enabled(self.constraint_index())
    }

    /// Enables this primitive.
    fn enable(&self, state: &mut State) {
        let _ = state.set_constraint_enabled(self.constraint_index(), true);
    }

    /// Disables this primitive.
    fn disable(&self, state: &mut State) {
        let _ = state.set_constraint_enabled(self.constraint_index(), false);
    }

    /// The index of the `which`-th multiplier of this primitive.
    ///
    /// Returns `None` if the primitive is disabled, or if `which` is out of range.
    fn multiplier_index(&self, state: &State, which: usize) -> Option<MultiplierIndex> {
        let range = state.multiplier_range(self.constraint_index())?;
        let i = range.start + which;
        (i < range.end).then(|| MultiplierIndex::from_usize(i))
    }
}
