use downcast_rs::{impl_downcast, DowncastSync};

use crate::index::{MultiplierIndex, StateLimitedFrictionIndex};
use crate::math::Real;
use crate::system::State;

/// A friction element whose limiting force is computed from the state.
///
/// Unlike contact friction, the normal force here does not come from a unilateral
/// contact multiplier but from some state-dependent quantity, e.g. a preloaded bearing
/// or a clamp. While enabled, the element holds its slip speed at zero; an external
/// driver disables it when the holding force exceeds [`Self::friction_limit`].
pub trait StateLimitedFriction: DowncastSync {
    /// The index assigned to this element by its multibody system, if registered.
    fn my_index(&self) -> Option<StateLimitedFrictionIndex>;

    /// Records the index assigned by the multibody system.
    fn set_my_index(&mut self, index: StateLimitedFrictionIndex);

    /// Makes the element stick. Returns `true` if it was disabled.
    fn enable(&self, state: &mut State) -> bool;

    /// Lets the element slip. Returns `true` if it was enabled.
    fn disable(&self, state: &mut State) -> bool;

    /// Is this element currently sticking?
    fn is_enabled(&self, state: &State) -> bool;

    /// The nonnegative magnitude of the normal force pressing the surfaces together.
    fn normal_force_magnitude(&self, state: &State) -> Real;

    /// The effective coefficient of friction for the given nonnegative slip speed.
    fn calc_effective_cof(
        &self,
        state: &State,
        default_transition_speed: Real,
        slip_speed: Real,
    ) -> Real;

    /// The current nonnegative slip speed.
    fn slip_speed(&self, state: &State) -> Real;

    /// The multiplier holding the slip speed at zero. `None` if the element is disabled.
    fn multiplier_index(&self, state: &State) -> Option<MultiplierIndex>;

    /// The current friction force held by the element. `None` if it is disabled.
    fn friction_multiplier(&self, state: &State) -> Option<Real> {
        state.multiplier(self.multiplier_index(state)?)
    }

    /// The largest friction force this element can currently transmit: `mu * N`.
    fn friction_limit(&self, state: &State, default_transition_speed: Real) -> Real {
        let slip_speed = self.slip_speed(state);
        self.calc_effective_cof(state, default_transition_speed, slip_speed)
            * self.normal_force_magnitude(state)
    }
}

impl_downcast!(sync StateLimitedFriction);

impl dyn StateLimitedFriction {
    /// Converts this abstract friction element to the given concrete type, if it is one.
    pub fn as_friction<T: StateLimitedFriction>(&self) -> Option<&T> {
        self.downcast_ref()
    }

    /// Does the force held by this sticking element stay within its limit, up to `tol`?
    ///
    /// A disabled element holds no force and is always within its limit.
    pub fn holds_within_limit(
        &self,
        state: &State,
        default_transition_speed: Real,
        tol: Real,
    ) -> bool {
        match self.friction_multiplier(state) {
            Some(force) => force.abs() <= self.friction_limit(state, default_transition_speed) + tol,
            None => true,
        }
    }
}
