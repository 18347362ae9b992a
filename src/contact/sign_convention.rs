use crate::law::CalibrationError;
use crate::math::Real;

/// Which sign of the constraint errors and multiplier is valid.
///
/// With the [`Positive`](SignConvention::Positive) convention the position error is a
/// signed distance: `perr >= 0` is valid, `verr >= 0` is separation, and since
/// multipliers have the opposite sign of the applied force the multiplier must satisfy
/// `lambda <= 0`. The [`Negative`](SignConvention::Negative) convention flips all of
/// these.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum SignConvention {
    /// `perr, verr, aerr >= 0` and `lambda <= 0` are valid.
    #[default]
    Positive,
    /// `perr, verr, aerr <= 0` and `lambda >= 0` are valid.
    Negative,
}

impl SignConvention {
    /// Converts `1` or `-1` to a sign convention.
    pub fn from_int(sign: i32) -> Result<Self, CalibrationError> {
        match sign {
            1 => Ok(SignConvention::Positive),
            -1 => Ok(SignConvention::Negative),
            _ => Err(CalibrationError::InvalidSignConvention(sign)),
        }
    }

    /// `1` or `-1`.
    #[inline]
    pub fn as_int(self) -> i32 {
        match self {
            SignConvention::Positive => 1,
            SignConvention::Negative => -1,
        }
    }

    /// `1.0` or `-1.0`.
    #[inline]
    pub fn as_real(self) -> Real {
        self.as_int() as Real
    }

    /// Multiplies `value` by this sign, so that valid values become nonnegative.
    #[inline]
    pub fn apply(self, value: Real) -> Real {
        match self {
            SignConvention::Positive => value,
            SignConvention::Negative => -value,
        }
    }
}

impl TryFrom<i32> for SignConvention {
    type Error = CalibrationError;

    fn try_from(sign: i32) -> Result<Self, Self::Error> {
        Self::from_int(sign)
    }
}
