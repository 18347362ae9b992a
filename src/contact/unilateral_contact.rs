use downcast_rs::{impl_downcast, DowncastSync};

use crate::contact::{PositionInfo, SignConvention};
use crate::index::{MultiplierIndex, UnilateralContactIndex};
use crate::law::ConditionalDefaults;
use crate::math::{Point, Real, TangentVector};
use crate::system::State;

/// The condition of a unilateral contact found violated by
/// [`UnilateralContact::violated_condition`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ConditionViolation {
    /// `sign * perr < 0`: the constraint is violated.
    Penetration,
    /// `perr == 0` but `sign * verr < 0`: the contact is approaching further.
    Approach,
    /// `perr == verr == 0` but `sign * aerr < 0`.
    Acceleration,
    /// `-sign * lambda < 0`: the reaction force is attractive.
    AttractiveForce,
    /// `aerr * lambda != 0`: the reaction is nonzero although the contact is separating.
    Complementarity,
}

/// A one-sided constraint on a single position equation, subject to impacts.
///
/// Examples are surface-surface contacts, joint stops and inextensible ropes. The
/// constraint is implemented by wrapping one constraint primitive whose enabled flag lives
/// in the [`State`]: implementors are immutable descriptors.
///
/// The sign convention fixed at construction tells how to interpret the errors and the
/// multiplier. Up to a tolerance, a valid contact satisfies:
///
/// ```text
///     sign * perr >= 0                     (always)
///     sign * verr >= 0                     (if perr == 0)
///     if perr == verr == 0 then:
///         sign * aerr >= 0 && -sign * lambda >= 0 && aerr * lambda == 0
/// ```
///
/// Some contacts are associated with two friction directions driven by the normal
/// reaction. Whenever the contact is disabled, its friction is disabled as well.
pub trait UnilateralContact: DowncastSync {
    /// The sign convention supplied at construction.
    fn sign_convention(&self) -> SignConvention;

    /// The index assigned to this contact by its multibody system, if registered.
    fn my_index(&self) -> Option<UnilateralContactIndex>;

    /// Records the index assigned by the multibody system.
    fn set_my_index(&mut self, index: UnilateralContactIndex);

    /// Disables the normal and friction constraints, if they were enabled.
    ///
    /// Returns `true` if something actually had to be disabled.
    fn disable(&self, state: &mut State) -> bool;

    /// Enables the normal and friction constraints, if they were disabled.
    ///
    /// Returns `true` if something actually had to be enabled.
    fn enable(&self, state: &mut State) -> bool;

    /// Is this contact enabled?
    fn is_enabled(&self, state: &State) -> bool;

    /// A point in ground at which the constraint can be said to be located, for display.
    fn where_to_display(&self, state: &State) -> Point<Real>;

    /// The effective coefficient of restitution for the given nonnegative impact speed.
    ///
    /// The default speed thresholds are used unless this contact carries its own. The
    /// state should be realized through [`Stage::Position`](crate::system::Stage::Position).
    fn calc_effective_cor(
        &self,
        state: &State,
        default_capture_speed: Real,
        default_min_cor_speed: Real,
        impact_speed: Real,
    ) -> Real;

    /// The position error. Apply the sign convention to interpret it.
    ///
    /// This is available even while the contact is disabled, so that proximity can be
    /// tested before enabling it.
    fn perr(&self, state: &State) -> Real;

    /// The time derivative of the position error.
    fn verr(&self, state: &State) -> Real;

    /// The second time derivative of the position error.
    fn aerr(&self, state: &State) -> Real;

    /// Is this contact close enough to touching to be treated as in contact, given the
    /// position tolerance in use?
    fn is_proximal(&self, state: &State, ptol: Real) -> bool {
        self.sign_convention().apply(self.perr(state)) <= ptol
    }

    /// The multiplier of the normal constraint. `None` if the contact is disabled.
    fn contact_multiplier_index(&self, state: &State) -> Option<MultiplierIndex>;

    /// The current value of the normal constraint multiplier. `None` if the contact is
    /// disabled or the state has not been realized since it was enabled.
    fn contact_multiplier(&self, state: &State) -> Option<Real> {
        state.multiplier(self.contact_multiplier_index(state)?)
    }

    /// Does this contact have associated friction?
    ///
    /// If so, [`Self::calc_effective_cof`], [`Self::slip_velocity`] and
    /// [`Self::friction_multiplier_indices`] return `Some` values.
    fn has_friction(&self, _state: &State) -> bool {
        false
    }

    /// The effective coefficient of friction for the given nonnegative slip speed.
    ///
    /// Returns `None` if this contact has no friction.
    fn calc_effective_cof(
        &self,
        _state: &State,
        _default_transition_speed: Real,
        _slip_speed: Real,
    ) -> Option<Real> {
        None
    }

    /// The slip velocity in the contact tangent plane. `None` if there is no friction.
    fn slip_velocity(&self, _state: &State) -> Option<TangentVector<Real>> {
        None
    }

    /// The multipliers of the two friction directions.
    ///
    /// Returns `None` if there is no friction or if the contact is disabled.
    fn friction_multiplier_indices(&self, _state: &State) -> Option<[MultiplierIndex; 2]> {
        None
    }

    /// This contact as a [`PositionInfo`], if it has that capability.
    fn as_position_info(&self) -> Option<&dyn PositionInfo> {
        None
    }

    /// The effective COR, using the given defaults for the impact speed thresholds.
    fn effective_cor(
        &self,
        state: &State,
        defaults: &ConditionalDefaults,
        impact_speed: Real,
    ) -> Real {
        self.calc_effective_cor(
            state,
            defaults.capture_speed,
            defaults.min_cor_speed,
            impact_speed,
        )
    }

    /// The effective COF, using the given default transition speed.
    fn effective_cof(
        &self,
        state: &State,
        defaults: &ConditionalDefaults,
        slip_speed: Real,
    ) -> Option<Real> {
        self.calc_effective_cof(state, defaults.transition_speed, slip_speed)
    }

    /// Finds the first condition of the sign convention violated by more than `tol`.
    ///
    /// Errors are considered zero when their magnitude is within `tol`. The multiplier of
    /// a disabled contact is zero.
    fn violated_condition(&self, state: &State, tol: Real) -> Option<ConditionViolation> {
        let sign = self.sign_convention();

        let perr = sign.apply(self.perr(state));
        if perr < -tol {
            return Some(ConditionViolation::Penetration);
        } else if perr > tol {
            return None;
        }

        let verr = sign.apply(self.verr(state));
        if verr < -tol {
            return Some(ConditionViolation::Approach);
        } else if verr > tol {
            return None;
        }

        let aerr = self.aerr(state);
        let lambda = self.contact_multiplier(state).unwrap_or(0.0);

        if sign.apply(aerr) < -tol {
            Some(ConditionViolation::Acceleration)
        } else if -sign.apply(lambda) < -tol {
            Some(ConditionViolation::AttractiveForce)
        } else if (aerr * lambda).abs() > tol {
            Some(ConditionViolation::Complementarity)
        } else {
            None
        }
    }

    /// Does this contact satisfy its sign convention within `tol`?
    fn satisfies_conditions(&self, state: &State, tol: Real) -> bool {
        self.violated_condition(state, tol).is_none()
    }
}

impl_downcast!(sync UnilateralContact);

impl dyn UnilateralContact {
    /// Converts this abstract contact to the given concrete contact, if it is one.
    pub fn as_contact<T: UnilateralContact>(&self) -> Option<&T> {
        self.downcast_ref()
    }

    /// The contact speed along the normal, positive when separating.
    pub fn separation_speed(&self, state: &State) -> Real {
        self.sign_convention().apply(self.verr(state))
    }
}
