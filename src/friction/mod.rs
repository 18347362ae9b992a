//! Friction elements whose force limit depends on the state rather than on a contact.

pub use self::coordinate_friction::{CoordinateFriction, NormalForce};
pub use self::state_limited_friction::StateLimitedFriction;

mod coordinate_friction;
mod state_limited_friction;
