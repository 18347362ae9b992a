use crate::law::calibration_error::check_speed;
use crate::law::CalibrationError;
use crate::math::Real;

/// Computes the effective coefficient of friction for a given slip speed.
///
/// The result is `mu_v * slip_speed` plus `mu_s` while `slip_speed <= transition_speed`
/// and `mu_d` above it: there is an abrupt drop from the static to the dynamic
/// coefficient at the transition speed.
///
/// # Panics
/// Panics unless all coefficients are nonnegative, `mu_s >= mu_d`, and both speeds are
/// nonnegative.
#[inline]
pub fn effective_cof(
    mu_s: Real,
    mu_d: Real,
    mu_v: Real,
    transition_speed: Real,
    slip_speed: Real,
) -> Real {
    assert!(
        mu_s >= 0.0 && mu_d >= 0.0 && mu_v >= 0.0,
        "negative friction coefficient: mu_s = {}, mu_d = {}, mu_v = {}",
        mu_s,
        mu_d,
        mu_v
    );
    assert!(mu_s >= mu_d, "mu_s = {} is smaller than mu_d = {}", mu_s, mu_d);
    assert!(
        transition_speed >= 0.0 && slip_speed >= 0.0,
        "negative speed: transition = {}, slip = {}",
        transition_speed,
        slip_speed
    );

    let viscous = mu_v * slip_speed; // Typically zero.
    viscous
        + if slip_speed <= transition_speed {
            mu_s
        } else {
            mu_d
        }
}

/// Friction calibration of a contact or of a friction element.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Friction {
    mu_s: Real,
    mu_d: Real,
    mu_v: Real,
    transition_speed: Option<Real>,
}

impl Friction {
    /// Validates and builds a friction calibration.
    ///
    /// # Arguments:
    /// * `mu_s` - the static coefficient, used while slipping slower than the transition speed.
    /// * `mu_d` - the dynamic coefficient, used above the transition speed.
    /// * `mu_v` - the viscous coefficient, multiplied by the slip speed.
    pub fn try_new(mu_s: Real, mu_d: Real, mu_v: Real) -> Result<Self, CalibrationError> {
        for (name, value) in [("mu_s", mu_s), ("mu_d", mu_d), ("mu_v", mu_v)] {
            if !value.is_finite() || value < 0.0 {
                return Err(CalibrationError::InvalidFrictionCoefficient { name, value });
            }
        }

        if mu_s < mu_d {
            return Err(CalibrationError::StaticBelowDynamic { mu_s, mu_d });
        }

        Ok(Friction {
            mu_s,
            mu_d,
            mu_v,
            transition_speed: None,
        })
    }

    /// Builds a friction calibration.
    ///
    /// # Panics
    /// Panics if the coefficients are invalid, see [`Friction::try_new`].
    pub fn new(mu_s: Real, mu_d: Real, mu_v: Real) -> Self {
        Self::try_new(mu_s, mu_d, mu_v).unwrap_or_else(|e| panic!("{}", e))
    }

    /// A calibration without any friction.
    pub fn frictionless() -> Self {
        Friction {
            mu_s: 0.0,
            mu_d: 0.0,
            mu_v: 0.0,
            transition_speed: None,
        }
    }

    /// Overrides the default slip-to-roll transition speed supplied at evaluation time.
    pub fn try_with_transition_speed(mut self, speed: Real) -> Result<Self, CalibrationError> {
        self.transition_speed = Some(check_speed("transition speed", speed)?);
        Ok(self)
    }

    /// The static coefficient.
    #[inline]
    pub fn mu_s(&self) -> Real {
        self.mu_s
    }

    /// The dynamic coefficient.
    #[inline]
    pub fn mu_d(&self) -> Real {
        self.mu_d
    }

    /// The viscous coefficient.
    #[inline]
    pub fn mu_v(&self) -> Real {
        self.mu_v
    }

    /// The transition speed overriding the default, if any.
    #[inline]
    pub fn transition_speed(&self) -> Option<Real> {
        self.transition_speed
    }

    /// The effective COF for the given slip speed.
    ///
    /// The default transition speed is ignored if this calibration carries its own.
    pub fn effective_cof(&self, default_transition_speed: Real, slip_speed: Real) -> Real {
        effective_cof(
            self.mu_s,
            self.mu_d,
            self.mu_v,
            self.transition_speed.unwrap_or(default_transition_speed),
            slip_speed,
        )
    }
}
