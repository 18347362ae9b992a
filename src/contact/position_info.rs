use crate::math::{Point, Real};
use crate::system::State;

/// Capability of contacts whose constraint primitive carries a position-dependent
/// instance parameter.
///
/// Contacts with stiction record where sticking began: an impact handler captures the
/// current contact position with [`Self::position_info`] and, once it decides the
/// contact sticks, stores it back with [`Self::set_instance_parameter`].
pub trait PositionInfo {
    /// The current contact point, in plane coordinates.
    ///
    /// The state must be realized through [`Stage::Position`](crate::system::Stage::Position).
    fn position_info(&self, state: &State) -> Point<Real>;

    /// Stores a position previously obtained from [`Self::position_info`].
    fn set_instance_parameter(&self, state: &mut State, position: &Point<Real>);
}
