//! Restitution and friction laws.
//!
//! The free functions [`effective_cor`] and [`effective_cof`] are the raw laws. The
//! [`Restitution`] and [`Friction`] records carry the per-contact calibration, validated
//! once at model-assembly time, and evaluate the laws for a measured speed.

pub use self::calibration_error::CalibrationError;
pub(crate) use self::calibration_error::check_speed;
pub use self::conditional_defaults::ConditionalDefaults;
pub use self::friction::{effective_cof, Friction};
pub use self::restitution::{effective_cor, ImpactSpeeds, Restitution};

mod calibration_error;
mod conditional_defaults;
mod friction;
mod restitution;
