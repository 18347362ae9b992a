//! The multibody system owning constraint handles, and the state it is evaluated against.
//!
//! Kinematics are inputs written into the [`State`] by the caller or by an external
//! integrator. Nothing here computes forward kinematics or integrates anything.

pub use self::body_kinematics::BodyKinematics;
pub use self::mobilized_body::MobilizedBody;
pub use self::multibody_system::MultibodySystem;
pub use self::state::{Stage, State};

pub(crate) use self::state::ConstraintSlot;

mod body_kinematics;
mod mobilized_body;
mod multibody_system;
mod state;
