use downcast_rs::{impl_downcast, DowncastSync};

use crate::index::{BoundedSpeedIndex, MultiplierIndex};
use crate::math::Real;
use crate::system::State;

/// Which side of its bounds a bounded speed constraint works on.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum BoundedSpeedRegime {
    /// The speed is held: `lower <= reaction <= upper` and the speed error is zero.
    Holding {
        /// The reaction needed to hold the speed.
        reaction: Real,
    },
    /// The speed is too high and the reaction saturates at the lower bound.
    SlippingAtLower {
        /// The lower bound.
        reaction: Real,
    },
    /// The speed is too low and the reaction saturates at the upper bound.
    SlippingAtUpper {
        /// The upper bound.
        reaction: Real,
    },
}

impl BoundedSpeedRegime {
    /// The reaction applied in this regime.
    #[inline]
    pub fn reaction(&self) -> Real {
        match *self {
            BoundedSpeedRegime::Holding { reaction }
            | BoundedSpeedRegime::SlippingAtLower { reaction }
            | BoundedSpeedRegime::SlippingAtUpper { reaction } => reaction,
        }
    }

    /// Does the constraint hold its speed in this regime?
    #[inline]
    pub fn is_holding(&self) -> bool {
        matches!(self, BoundedSpeedRegime::Holding { .. })
    }
}

/// A constraint on a speed error whose reaction is limited by state-dependent bounds.
///
/// Writing the reaction `-lambda` where `lambda` is the multiplier of the enabled
/// constraint, one of the following holds:
///
/// ```text
///     lower <= -lambda <= upper and verr == 0
///     verr > 0 and -lambda == lower
///     verr < 0 and -lambda == upper
/// ```
///
/// A motor is the typical example: it tracks a target speed as long as the required
/// torque stays within the torque it can deliver.
pub trait BoundedSpeedConstraint: DowncastSync {
    /// The index assigned to this constraint by its multibody system, if registered.
    fn my_index(&self) -> Option<BoundedSpeedIndex>;

    /// Records the index assigned by the multibody system.
    fn set_my_index(&mut self, index: BoundedSpeedIndex);

    /// Makes the constraint hold its speed. Returns `true` if it was disabled.
    fn enable(&self, state: &mut State) -> bool;

    /// Lets the speed deviate. Returns `true` if it was enabled.
    fn disable(&self, state: &mut State) -> bool;

    /// Is the constraint currently holding its speed?
    fn is_enabled(&self, state: &State) -> bool;

    /// The speed error, available whether or not the constraint is enabled.
    fn speed_error(&self, state: &State) -> Real;

    /// The multiplier of the constraint. `None` if it is disabled.
    fn multiplier_index(&self, state: &State) -> Option<MultiplierIndex>;

    /// The current `(lower, upper)` bounds of the reaction, with `lower <= upper`.
    fn calc_effective_bounds(&self, state: &State) -> (Real, Real);

    /// The reaction `-lambda` of the enabled constraint. `None` if it is disabled.
    fn reaction(&self, state: &State) -> Option<Real> {
        state.multiplier(self.multiplier_index(state)?).map(|lambda| -lambda)
    }

    /// Classifies the reaction needed to hold the speed against the current bounds.
    ///
    /// # Panics
    /// Panics if the effective bounds are not ordered.
    fn resolve_reaction(&self, state: &State, holding_reaction: Real) -> BoundedSpeedRegime {
        let (lower, upper) = self.calc_effective_bounds(state);
        assert!(
            lower <= upper,
            "inconsistent reaction bounds: [{}, {}]",
            lower,
            upper
        );

        if holding_reaction < lower {
            BoundedSpeedRegime::SlippingAtLower { reaction: lower }
        } else if holding_reaction > upper {
            BoundedSpeedRegime::SlippingAtUpper { reaction: upper }
        } else {
            BoundedSpeedRegime::Holding {
                reaction: holding_reaction,
            }
        }
    }

    /// Does the given reaction agree with the speed error and the bounds, up to `tol`?
    fn satisfies_conditions(&self, state: &State, reaction: Real, tol: Real) -> bool {
        let (lower, upper) = self.calc_effective_bounds(state);
        let verr = self.speed_error(state);

        if verr > tol {
            (reaction - lower).abs() <= tol
        } else if verr < -tol {
            (reaction - upper).abs() <= tol
        } else {
            lower - tol <= reaction && reaction <= upper + tol
        }
    }
}

impl_downcast!(sync BoundedSpeedConstraint);

impl dyn BoundedSpeedConstraint {
    /// Converts this abstract constraint to the given concrete type, if it is one.
    pub fn as_bounded_speed<T: BoundedSpeedConstraint>(&self) -> Option<&T> {
        self.downcast_ref()
    }
}
