//! Unilateral contacts: one-sided constraints subject to impacts.

pub use self::hard_stop::{HardStopLower, HardStopUpper};
pub use self::point_plane_contact::{PointPlaneContact, PointPlaneFrictionlessContact};
pub use self::position_info::PositionInfo;
pub use self::sign_convention::SignConvention;
pub use self::sphere_plane_contact::SpherePlaneContact;
pub use self::unilateral_contact::{ConditionViolation, UnilateralContact};

mod hard_stop;
mod point_plane_contact;
mod position_info;
mod sign_convention;
mod sphere_plane_contact;
mod unilateral_contact;
