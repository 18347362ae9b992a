/*!
unilateral
==========

**unilateral** describes one-sided constraints of a multibody system: joint
stops, point/sphere-on-plane contacts and friction elements that restrict motion
in a single direction and must tolerate impacts characterized by a
state-dependent coefficient of restitution.

The constraint objects of this crate are immutable descriptors. Everything that
changes while the simulation runs (enabled flags, kinematics, multipliers)
lives in a [`system::State`] owned by the caller and passed explicitly to every
query.

*/

#![deny(non_camel_case_types)]
#![deny(unused_parens)]
#![deny(non_upper_case_globals)]
#![deny(unused_results)]
#![warn(missing_docs)]
#![warn(unused_imports)]
#![allow(missing_copy_implementations)]
#![allow(clippy::too_many_arguments)] // Contact constructors mirror the model-authoring API.
#![allow(clippy::module_inception)]
#![allow(clippy::manual_range_contains)] // This usually makes it way more verbose that it could be.
#![warn(unused_qualifications)]

#[cfg(all(feature = "f32", feature = "f64"))]
std::compile_error!("The `f32` and `f64` features are mutually exclusive.");

#[cfg(feature = "serde-serialize")]
#[macro_use]
extern crate serde;

pub extern crate nalgebra as na;

pub mod contact;
pub mod friction;
pub mod index;
pub mod law;
pub mod primitive;
pub mod speed;
pub mod system;

mod real {
    /// The scalar type used throughout this crate.
    #[cfg(feature = "f64")]
    pub use f64 as Real;

    /// The scalar type used throughout this crate.
    #[cfg(feature = "f32")]
    pub use f32 as Real;
}

/// Compilation flags dependent aliases for mathematical types.
#[cfg(feature = "dim3")]
pub mod math {
    pub use super::real::*;
    pub use na::{DVector, Isometry3, Point3, Translation3, UnitVector3, Vector2, Vector3};
    use na::UnitQuaternion;

    /// The point type.
    pub use Point3 as Point;

    /// The vector type.
    pub use Vector3 as Vector;

    /// The unit vector type.
    pub use UnitVector3 as UnitVector;

    /// The vector type of a contact tangent plane.
    pub use Vector2 as TangentVector;

    /// The transformation matrix type.
    pub use Isometry3 as Isometry;

    /// The rotation type.
    pub type Rotation<N> = UnitQuaternion<N>;

    /// The translation type.
    pub use Translation3 as Translation;
}

/// Re-exports of the most commonly used types.
pub mod prelude {
    pub use crate::contact::{
        ConditionViolation, HardStopLower, HardStopUpper, PointPlaneContact,
        PointPlaneFrictionlessContact, PositionInfo, SignConvention, SpherePlaneContact,
        UnilateralContact,
    };
    pub use crate::friction::{CoordinateFriction, NormalForce, StateLimitedFriction};
    pub use crate::index::*;
    pub use crate::law::{
        effective_cof, effective_cor, CalibrationError, ConditionalDefaults, Friction,
        ImpactSpeeds, Restitution,
    };
    pub use crate::math::*;
    pub use crate::speed::{BoundedSpeedConstraint, BoundedSpeedRegime, SpeedLimitedMotor};
    pub use crate::system::{BodyKinematics, MobilizedBody, MultibodySystem, Stage, State};
}
