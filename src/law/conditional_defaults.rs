use crate::law::calibration_error::check_speed;
use crate::law::CalibrationError;
use crate::math::Real;

/// Default speed thresholds used when evaluating the restitution and friction laws of
/// contacts that do not carry their own.
///
/// These are typically owned by whatever drives the activation of the contacts (an
/// impact handler or a time stepper) and passed down at each evaluation.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct ConditionalDefaults {
    /// Impacts at or below this speed are captured.
    pub capture_speed: Real,
    /// Impacts at or above this speed use the minimum COR.
    pub min_cor_speed: Real,
    /// Below this slip speed the static friction coefficient applies.
    pub transition_speed: Real,
}

impl ConditionalDefaults {
    /// Checks that these defaults satisfy the preconditions of the laws.
    pub fn validate(&self) -> Result<(), CalibrationError> {
        let _ = check_speed("default capture speed", self.capture_speed)?;
        let _ = check_speed("default minimum COR speed", self.min_cor_speed)?;
        let _ = check_speed("default transition speed", self.transition_speed)?;

        if self.capture_speed > self.min_cor_speed {
            return Err(CalibrationError::CaptureSpeedOutOfRange {
                capture_speed: self.capture_speed,
                min_cor_speed: self.min_cor_speed,
            });
        }

        Ok(())
    }
}

impl Default for ConditionalDefaults {
    fn default() -> Self {
        ConditionalDefaults {
            capture_speed: 1.0e-4,
            min_cor_speed: 1.0,
            transition_speed: 1.0e-3,
        }
    }
}
