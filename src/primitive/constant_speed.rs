use crate::index::ConstraintIndex;
use crate::law::CalibrationError;
use crate::math::Real;
use crate::primitive::ConstraintPrimitive;
use crate::system::{MobilizedBody, MultibodySystem, State};

/// Nonholonomic constraint prescribing one generalized speed.
///
/// Its velocity error is `u - speed`; it has no position error.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct ConstantSpeed {
    index: ConstraintIndex,
    u_index: usize,
    speed: Real,
}

impl ConstantSpeed {
    /// Registers a constraint prescribing the `which_u`-th speed of `mobod` to `speed`.
    pub fn new(
        system: &mut MultibodySystem,
        mobod: &MobilizedBody,
        which_u: usize,
        speed: Real,
    ) -> Result<Self, CalibrationError> {
        let u_index = mobod.q_index(which_u)?;
        let index = system.add_constraint(1, true);
        Ok(ConstantSpeed {
            index,
            u_index,
            speed,
        })
    }

    /// The prescribed speed.
    #[inline]
    pub fn speed(&self) -> Real {
        self.speed
    }

    /// The index of the constrained speed in the system-wide `u` array.
    #[inline]
    pub fn u_index(&self) -> usize {
        self.u_index
    }

    /// `u - speed`, whether or not the constraint is enabled.
    pub fn calc_velocity_error(&self, state: &State) -> Real {
        state.u()[self.u_index] - self.speed
    }

    /// `u - speed`, if enabled.
    pub fn velocity_error(&self, state: &State) -> Option<Real> {
        (!self.is_disabled(state)).then(|| self.calc_velocity_error(state))
    }

    /// The speed derivative, if enabled.
    pub fn acceleration_error(&self, state: &State) -> Option<Real> {
        (!self.is_disabled(state)).then(|| state.udot()[self.u_index])
    }
}

impl ConstraintPrimitive for ConstantSpeed {
    fn constraint_index(&self) -> ConstraintIndex {
        self.index
    }

    fn num_multipliers(&self) -> usize {
        1
    }
}
