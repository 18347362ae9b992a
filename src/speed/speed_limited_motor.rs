use crate::index::{BoundedSpeedIndex, MultiplierIndex};
use crate::law::{check_speed, CalibrationError};
use crate::math::Real;
use crate::primitive::{ConstantSpeed, ConstraintPrimitive};
use crate::speed::BoundedSpeedConstraint;
use crate::system::{MobilizedBody, MultibodySystem, State};

/// A motor driving one generalized speed towards a target with a limited torque.
///
/// The torque available in either direction is `max_torque`. With a no-load speed, it
/// decreases linearly with the magnitude of the current speed and vanishes at the
/// no-load speed.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SpeedLimitedMotor {
    mobod: MobilizedBody,
    which_u: usize,
    max_torque: Real,
    no_load_speed: Option<Real>,
    constraint: ConstantSpeed,
    my_index: Option<BoundedSpeedIndex>,
}

impl SpeedLimitedMotor {
    /// Creates a motor driving the `which_u`-th speed of `mobod` to `target_speed`.
    pub fn try_new(
        system: &mut MultibodySystem,
        mobod: &MobilizedBody,
        which_u: usize,
        target_speed: Real,
        max_torque: Real,
    ) -> Result<Self, CalibrationError> {
        if !(max_torque.is_finite() && max_torque >= 0.0) {
            return Err(CalibrationError::InvalidForceLimit {
                name: "maximum torque",
                value: max_torque,
            });
        }

        if !target_speed.is_finite() {
            return Err(CalibrationError::InvalidSpeed {
                name: "target speed",
                value: target_speed,
            });
        }

        Ok(SpeedLimitedMotor {
            mobod: *mobod,
            which_u,
            max_torque,
            no_load_speed: None,
            constraint: ConstantSpeed::new(system, mobod, which_u, target_speed)?,
            my_index: None,
        })
    }

    /// Creates a motor driving the `which_u`-th speed of `mobod` to `target_speed`.
    ///
    /// # Panics
    /// Panics if `which_u` is not a speed of `mobod` or if `max_torque` is negative.
    pub fn new(
        system: &mut MultibodySystem,
        mobod: &MobilizedBody,
        which_u: usize,
        target_speed: Real,
        max_torque: Real,
    ) -> Self {
        Self::try_new(system, mobod, which_u, target_speed, max_torque)
            .unwrap_or_else(|e| panic!("{}", e))
    }

    /// Makes the available torque vanish at the given positive speed.
    pub fn try_with_no_load_speed(mut self, speed: Real) -> Result<Self, CalibrationError> {
        let speed = check_speed("no-load speed", speed)?;

        if speed == 0.0 {
            return Err(CalibrationError::InvalidSpeed {
                name: "no-load speed",
                value: speed,
            });
        }

        self.no_load_speed = Some(speed);
        Ok(self)
    }

    /// The body whose mobilizer is driven.
    #[inline]
    pub fn mobilized_body(&self) -> &MobilizedBody {
        &self.mobod
    }

    /// The driven mobilizer speed.
    #[inline]
    pub fn which_u(&self) -> usize {
        self.which_u
    }

    /// The speed the motor drives to.
    #[inline]
    pub fn target_speed(&self) -> Real {
        self.constraint.speed()
    }

    /// The stall torque.
    #[inline]
    pub fn max_torque(&self) -> Real {
        self.max_torque
    }

    /// The speed at which no torque is left, if the torque droops.
    #[inline]
    pub fn no_load_speed(&self) -> Option<Real> {
        self.no_load_speed
    }

    /// The torque available at the current speed.
    pub fn available_torque(&self, state: &State) -> Real {
        match self.no_load_speed {
            Some(no_load_speed) => {
                let speed = self.mobod.one_u(state, self.which_u).abs();
                self.max_torque * (1.0 - speed / no_load_speed).max(0.0)
            }
            None => self.max_torque,
        }
    }
}

impl BoundedSpeedConstraint for SpeedLimitedMotor {
    fn my_index(&self) -> Option<BoundedSpeedIndex> {
        self.my_index
    }

    fn set_my_index(&mut self, index: BoundedSpeedIndex) {
        self.my_index = Some(index);
    }

    fn enable(&self, state: &mut State) -> bool {
        if !self.constraint.is_disabled(state) {
            return false;
        }

        self.constraint.enable(state);
        log::trace!("motor {:?} holds its speed", self.my_index);
        true
    }

    fn disable(&self, state: &mut State) -> bool {
        if self.constraint.is_disabled(state) {
            return false;
        }

        self.constraint.disable(state);
        log::trace!("motor {:?} saturates", self.my_index);
        true
    }

    fn is_enabled(&self, state: &State) -> bool {
        !self.constraint.is_disabled(state)
    }

    fn speed_error(&self, state: &State) -> Real {
        self.constraint.calc_velocity_error(state)
    }

    fn multiplier_index(&self, state: &State) -> Option<MultiplierIndex> {
        self.constraint.multiplier_index(state, 0)
    }

    fn calc_effective_bounds(&self, state: &State) -> (Real, Real) {
        let torque = self.available_torque(state);
        (-torque, torque)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::speed::BoundedSpeedRegime;
    use approx::assert_relative_eq;

    fn motor() -> (MultibodySystem, SpeedLimitedMotor) {
        let mut system = MultibodySystem::new();
        let shaft = system.add_mobilized_body(1);
        let motor = SpeedLimitedMotor::new(&mut system, &shaft, 0, 2.0, 10.0)
            .try_with_no_load_speed(4.0)
            .unwrap();
        (system, motor)
    }

    #[test]
    fn torque_droops_with_speed() {
        let (system, motor) = motor();
        let mut state = system.default_state();
        assert_eq!(motor.calc_effective_bounds(&state), (-10.0, 10.0));

        state.u_mut()[0] = -1.0;
        assert_relative_eq!(motor.available_torque(&state), 7.5);
        assert_relative_eq!(motor.speed_error(&state), -3.0);

        state.u_mut()[0] = 5.0;
        assert_eq!(motor.available_torque(&state), 0.0);
    }

    #[test]
    fn regimes() {
        let (system, motor) = motor();
        let mut state = system.default_state();
        state.u_mut()[0] = 2.0;

        assert_eq!(
            motor.resolve_reaction(&state, 3.0),
            BoundedSpeedRegime::Holding { reaction: 3.0 }
        );
        assert_relative_eq!(motor.available_torque(&state), 5.0);
        assert_eq!(
            motor.resolve_reaction(&state, 7.0),
            BoundedSpeedRegime::SlippingAtUpper { reaction: 5.0 }
        );
        assert_eq!(
            motor.resolve_reaction(&state, -7.0),
            BoundedSpeedRegime::SlippingAtLower { reaction: -5.0 }
        );

        assert!(motor.satisfies_conditions(&state, 3.0, 1.0e-6));
        state.u_mut()[0] = 2.5;
        assert!(!motor.satisfies_conditions(&state, 3.0, 1.0e-6));
        let lower = motor.calc_effective_bounds(&state).0;
        assert!(motor.satisfies_conditions(&state, lower, 1.0e-6));
    }

    #[test]
    fn invalid_calibrations() {
        let mut system = MultibodySystem::new();
        let shaft = system.add_mobilized_body(1);
        assert!(SpeedLimitedMotor::try_new(&mut system, &shaft, 0, 1.0, -1.0).is_err());
        assert!(SpeedLimitedMotor::try_new(&mut system, &shaft, 1, 1.0, 1.0).is_err());
        let motor = SpeedLimitedMotor::new(&mut system, &shaft, 0, 1.0, 1.0);
        assert!(motor.try_with_no_load_speed(0.0).is_err());
    }
}
