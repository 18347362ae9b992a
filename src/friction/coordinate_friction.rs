use core::fmt;
use std::sync::Arc;

use crate::friction::StateLimitedFriction;
use crate::index::{MultiplierIndex, StateLimitedFrictionIndex};
use crate::law::{CalibrationError, Friction};
use crate::math::Real;
use crate::primitive::{ConstantSpeed, ConstraintPrimitive};
use crate::system::{MobilizedBody, MultibodySystem, State};

/// The normal force driving a [`CoordinateFriction`].
#[derive(Clone)]
pub enum NormalForce {
    /// A constant preload.
    Constant(Real),
    /// A force computed from the state. Only its magnitude is used.
    Function(Arc<dyn Fn(&State) -> Real + Send + Sync>),
}

impl NormalForce {
    /// A constant normal force.
    pub fn try_constant(magnitude: Real) -> Result<Self, CalibrationError> {
        if magnitude.is_finite() && magnitude >= 0.0 {
            Ok(NormalForce::Constant(magnitude))
        } else {
            Err(CalibrationError::InvalidForceLimit {
                name: "normal force",
                value: magnitude,
            })
        }
    }

    /// A normal force computed from the state.
    pub fn function(f: impl Fn(&State) -> Real + Send + Sync + 'static) -> Self {
        NormalForce::Function(Arc::new(f))
    }

    /// The magnitude of this force in the given state.
    pub fn magnitude(&self, state: &State) -> Real {
        match self {
            NormalForce::Constant(magnitude) => magnitude.abs(),
            NormalForce::Function(f) => f(state).abs(),
        }
    }
}

impl fmt::Debug for NormalForce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NormalForce::Constant(magnitude) => f.debug_tuple("Constant").field(magnitude).finish(),
            NormalForce::Function(_) => f.write_str("Function(..)"),
        }
    }
}

/// Coulomb friction acting on one generalized speed of a mobilizer.
///
/// Sticking is modeled by a constraint locking the speed at zero; its multiplier is the
/// friction force, limited by `mu * N` where `N` is given by a [`NormalForce`].
#[derive(Clone, Debug)]
pub struct CoordinateFriction {
    mobod: MobilizedBody,
    which_u: usize,
    friction: Friction,
    normal_force: NormalForce,
    constraint: ConstantSpeed,
    my_index: Option<StateLimitedFrictionIndex>,
}

impl CoordinateFriction {
    /// Creates friction on the `which_u`-th speed of `mobod`.
    pub fn try_new(
        system: &mut MultibodySystem,
        mobod: &MobilizedBody,
        which_u: usize,
        friction: Friction,
        normal_force: NormalForce,
    ) -> Result<Self, CalibrationError> {
        if let NormalForce::Constant(magnitude) = normal_force {
            let _ = NormalForce::try_constant(magnitude)?;
        }

        let constraint = ConstantSpeed::new(system, mobod, which_u, 0.0)?;

        Ok(CoordinateFriction {
            mobod: *mobod,
            which_u,
            friction,
            normal_force,
            constraint,
            my_index: None,
        })
    }

    /// Creates friction on the `which_u`-th speed of `mobod`.
    ///
    /// # Panics
    /// Panics if `which_u` is not a speed of `mobod`, or if a constant normal force is
    /// negative.
    pub fn new(
        system: &mut MultibodySystem,
        mobod: &MobilizedBody,
        which_u: usize,
        friction: Friction,
        normal_force: NormalForce,
    ) -> Self {
        Self::try_new(system, mobod, which_u, friction, normal_force)
            .unwrap_or_else(|e| panic!("{}", e))
    }

    /// The body whose mobilizer speed is subject to friction.
    #[inline]
    pub fn mobilized_body(&self) -> &MobilizedBody {
        &self.mobod
    }

    /// The mobilizer speed subject to friction.
    #[inline]
    pub fn which_u(&self) -> usize {
        self.which_u
    }

    /// The friction calibration.
    #[inline]
    pub fn friction(&self) -> &Friction {
        &self.friction
    }

    /// The normal force.
    #[inline]
    pub fn normal_force(&self) -> &NormalForce {
        &self.normal_force
    }

    /// The signed slip speed.
    pub fn slip_velocity(&self, state: &State) -> Real {
        self.constraint.calc_velocity_error(state)
    }
}

impl StateLimitedFriction for CoordinateFriction {
    fn my_index(&self) -> Option<StateLimitedFrictionIndex> {
        self.my_index
    }

    fn set_my_index(&mut self, index: StateLimitedFrictionIndex) {
        self.my_index = Some(index);
    }

    fn enable(&self, state: &mut State) -> bool {
        if !self.constraint.is_disabled(state) {
            return false;
        }

        self.constraint.enable(state);
        log::trace!("friction {:?} sticks", self.my_index);
        true
    }

    fn disable(&self, state: &mut State) -> bool {
        if self.constraint.is_disabled(state) {
            return false;
        }

        self.constraint.disable(state);
        log::trace!("friction {:?} slips", self.my_index);
        true
    }

    fn is_enabled(&self, state: &State) -> bool {
        !self.constraint.is_disabled(state)
    }

    fn normal_force_magnitude(&self, state: &State) -> Real {
        self.normal_force.magnitude(state)
    }

    fn calc_effective_cof(
        &self,
        _state: &State,
        default_transition_speed: Real,
        slip_speed: Real,
    ) -> Real {
        self.friction
            .effective_cof(default_transition_speed, slip_speed)
    }

    fn slip_speed(&self, state: &State) -> Real {
        self.slip_velocity(state).abs()
    }

    fn multiplier_index(&self, state: &State) -> Option<MultiplierIndex> {
        self.constraint.multiplier_index(state, 0)
    }
}
