use crate::law::calibration_error::check_speed;
use crate::law::CalibrationError;
use crate::math::Real;

/// Computes the effective coefficient of restitution for a given impact speed.
///
/// The COR is zero at or below `capture_speed`, equal to `min_cor` at or above
/// `min_cor_speed`, and follows `1 - slope * impact_speed` in between, with
/// `slope = (1 - min_cor) / min_cor_speed`.
///
/// Note that the value jumps at `capture_speed` unless `capture_speed` is zero: just above
/// it the COR is `1 - slope * capture_speed`, not zero.
///
/// # Panics
/// Panics unless `0 <= min_cor <= 1`, `0 <= capture_speed <= min_cor_speed` and
/// `impact_speed >= 0`.
#[inline]
pub fn effective_cor(
    min_cor: Real,
    capture_speed: Real,
    min_cor_speed: Real,
    impact_speed: Real,
) -> Real {
    assert!(
        0.0 <= min_cor && min_cor <= 1.0,
        "invalid minimum COR: {}",
        min_cor
    );
    assert!(
        0.0 <= capture_speed && capture_speed <= min_cor_speed,
        "invalid capture speed {} for a minimum COR speed of {}",
        capture_speed,
        min_cor_speed
    );
    assert!(impact_speed >= 0.0, "negative impact speed: {}", impact_speed);

    if impact_speed <= capture_speed {
        return 0.0;
    }

    if impact_speed >= min_cor_speed {
        return min_cor;
    }

    // capture_speed < impact_speed < min_cor_speed
    let slope = (1.0 - min_cor) / min_cor_speed;
    1.0 - slope * impact_speed
}

/// The impact speeds delimiting the three regimes of the restitution law.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct ImpactSpeeds {
    capture_speed: Real,
    min_cor_speed: Real,
}

impl ImpactSpeeds {
    /// Validates and builds a pair of impact speeds.
    ///
    /// Requires `0 <= capture_speed <= min_cor_speed`.
    pub fn try_new(capture_speed: Real, min_cor_speed: Real) -> Result<Self, CalibrationError> {
        let capture_speed = check_speed("capture speed", capture_speed)?;
        let min_cor_speed = check_speed("minimum COR speed", min_cor_speed)?;

        if capture_speed > min_cor_speed {
            return Err(CalibrationError::CaptureSpeedOutOfRange {
                capture_speed,
                min_cor_speed,
            });
        }

        Ok(ImpactSpeeds {
            capture_speed,
            min_cor_speed,
        })
    }

    /// Builds a pair of impact speeds.
    ///
    /// # Panics
    /// Panics if the speeds are invalid, see [`ImpactSpeeds::try_new`].
    pub fn new(capture_speed: Real, min_cor_speed: Real) -> Self {
        Self::try_new(capture_speed, min_cor_speed).unwrap_or_else(|e| panic!("{}", e))
    }

    /// Impacts at or below this speed are captured: the COR is zero.
    #[inline]
    pub fn capture_speed(&self) -> Real {
        self.capture_speed
    }

    /// Impacts at or above this speed use the minimum COR.
    #[inline]
    pub fn min_cor_speed(&self) -> Real {
        self.min_cor_speed
    }
}

/// Restitution calibration of a unilateral contact.
///
/// The minimum COR is the value observed at high impact speeds. The impact speeds
/// delimiting the regimes of the law are usually supplied by the caller at evaluation
/// time, but a contact can carry its own.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Restitution {
    min_cor: Real,
    speeds: Option<ImpactSpeeds>,
}

impl Restitution {
    /// Validates and builds a restitution calibration with the given minimum COR.
    pub fn try_new(min_cor: Real) -> Result<Self, CalibrationError> {
        if min_cor >= 0.0 && min_cor <= 1.0 {
            Ok(Restitution {
                min_cor,
                speeds: None,
            })
        } else {
            Err(CalibrationError::MinCorOutOfRange(min_cor))
        }
    }

    /// Builds a restitution calibration with the given minimum COR.
    ///
    /// # Panics
    /// Panics if `min_cor` lies outside of `[0, 1]`.
    pub fn new(min_cor: Real) -> Self {
        Self::try_new(min_cor).unwrap_or_else(|e| panic!("{}", e))
    }

    /// A perfectly plastic calibration: every impact is captured.
    pub fn plastic() -> Self {
        Restitution {
            min_cor: 0.0,
            speeds: None,
        }
    }

    /// Overrides the default impact speeds supplied at evaluation time.
    #[must_use]
    pub fn with_impact_speeds(mut self, speeds: ImpactSpeeds) -> Self {
        self.speeds = Some(speeds);
        self
    }

    /// The COR at high impact speeds.
    #[inline]
    pub fn min_cor(&self) -> Real {
        self.min_cor
    }

    /// The impact speeds overriding the defaults, if any.
    #[inline]
    pub fn impact_speeds(&self) -> Option<ImpactSpeeds> {
        self.speeds
    }

    /// The effective COR for the given impact speed.
    ///
    /// The default speeds are ignored if this calibration carries its own.
    pub fn effective_cor(
        &self,
        default_capture_speed: Real,
        default_min_cor_speed: Real,
        impact_speed: Real,
    ) -> Real {
        let (capture_speed, min_cor_speed) = match self.speeds {
            Some(speeds) => (speeds.capture_speed, speeds.min_cor_speed),
            None => (default_capture_speed, default_min_cor_speed),
        };

        effective_cor(self.min_cor, capture_speed, min_cor_speed, impact_speed)
    }
}
