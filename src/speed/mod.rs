//! Constraints holding a speed within state-dependent reaction bounds.

pub use self::bounded_speed_constraint::{BoundedSpeedConstraint, BoundedSpeedRegime};
pub use self::speed_limited_motor::SpeedLimitedMotor;

mod bounded_speed_constraint;
mod speed_limited_motor;
