use crate::math::Real;

/// Error raised when a constraint is calibrated with out-of-range parameters.
///
/// These indicate a model-authoring mistake: the panicking constructors (`new`) of this
/// crate report them with this message, the fallible ones (`try_new`) return them.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq)]
pub enum CalibrationError {
    /// A sign convention must be either `1` or `-1`.
    #[error("the sign convention must be 1 or -1, found {0}.")]
    InvalidSignConvention(i32),
    /// The minimum coefficient of restitution must lie in `[0, 1]`.
    #[error("the minimum coefficient of restitution must lie in [0, 1], found {0}.")]
    MinCorOutOfRange(Real),
    /// The capture speed must satisfy `0 <= capture_speed <= min_cor_speed`.
    #[error("the capture speed {capture_speed} must lie in [0, {min_cor_speed}].")]
    CaptureSpeedOutOfRange {
        /// The offending capture speed.
        capture_speed: Real,
        /// The speed at which the minimum COR is attained.
        min_cor_speed: Real,
    },
    /// A speed parameter is negative or not finite.
    #[error("the {name} must be a finite nonnegative speed, found {value}.")]
    InvalidSpeed {
        /// The name of the offending parameter.
        name: &'static str,
        /// The offending value.
        value: Real,
    },
    /// A friction coefficient is negative or not finite.
    #[error("the friction coefficient {name} must be finite and nonnegative, found {value}.")]
    InvalidFrictionCoefficient {
        /// The name of the offending coefficient.
        name: &'static str,
        /// The offending value.
        value: Real,
    },
    /// The static friction coefficient is smaller than the dynamic one.
    #[error("the static friction coefficient {mu_s} is smaller than the dynamic one {mu_d}.")]
    StaticBelowDynamic {
        /// The static friction coefficient.
        mu_s: Real,
        /// The dynamic friction coefficient.
        mu_d: Real,
    },
    /// A geometric length (height, radius) is negative or not finite.
    #[error("the {name} must be finite (and nonnegative if it is a radius), found {value}.")]
    InvalidLength {
        /// The name of the offending parameter.
        name: &'static str,
        /// The offending value.
        value: Real,
    },
    /// A coordinate index exceeds the number of coordinates of its mobilizer.
    #[error("the mobilizer has {nq} coordinates, coordinate {which} does not exist.")]
    CoordinateOutOfRange {
        /// The requested mobilizer coordinate.
        which: usize,
        /// The number of coordinates of the mobilizer.
        nq: usize,
    },
    /// A force or torque limit is negative or not finite.
    #[error("the {name} must be finite and nonnegative, found {value}.")]
    InvalidForceLimit {
        /// The name of the offending parameter.
        name: &'static str,
        /// The offending value.
        value: Real,
    },
}

pub(crate) fn check_speed(name: &'static str, value: Real) -> Result<Real, CalibrationError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(CalibrationError::InvalidSpeed { name, value })
    }
}
