use crate::index::ConstraintIndex;
use crate::law::CalibrationError;
use crate::math::Real;
use crate::primitive::ConstraintPrimitive;
use crate::system::{MobilizedBody, MultibodySystem, State};

/// Holonomic constraint locking one generalized coordinate at a constant value.
///
/// Its position error is `q - value`, its velocity and acceleration errors are the
/// corresponding speed and speed derivative.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct ConstantCoordinate {
    index: ConstraintIndex,
    q_index: usize,
    value: Real,
}

impl ConstantCoordinate {
    /// Registers a constraint locking the `which_q`-th coordinate of `mobod` at `value`.
    pub fn new(
        system: &mut MultibodySystem,
        mobod: &MobilizedBody,
        which_q: usize,
        value: Real,
    ) -> Result<Self, CalibrationError> {
        let q_index = mobod.q_index(which_q)?;
        let index = system.add_constraint(1, true);
        Ok(ConstantCoordinate {
            index,
            q_index,
            value,
        })
    }

    /// The value the coordinate is locked at.
    #[inline]
    pub fn value(&self) -> Real {
        self.value
    }

    /// The index of the locked coordinate in the system-wide `q` array.
    #[inline]
    pub fn q_index(&self) -> usize {
        self.q_index
    }

    /// `q - value`, if enabled.
    pub fn position_error(&self, state: &State) -> Option<Real> {
        (!self.is_disabled(state)).then(|| state.q()[self.q_index] - self.value)
    }

    /// The coordinate speed, if enabled.
    pub fn velocity_error(&self, state: &State) -> Option<Real> {
        (!self.is_disabled(state)).then(|| state.u()[self.q_index])
    }

    /// The coordinate acceleration, if enabled.
    pub fn acceleration_error(&self, state: &State) -> Option<Real> {
        (!self.is_disabled(state)).then(|| state.udot()[self.q_index])
    }
}

impl ConstraintPrimitive for ConstantCoordinate {
    fn constraint_index(&self) -> ConstraintIndex {
        self.index
    }

    fn num_multipliers(&self) -> usize {
        1
    }
}
