use crate::contact::point_plane_contact::{impl_plane_contact_with_friction, plane_contact_geometry};
use crate::contact::{PositionInfo, SignConvention, UnilateralContact};
use crate::index::{MultiplierIndex, UnilateralContactIndex};
use crate::law::{CalibrationError, Friction, Restitution};
use crate::math::{Point, Real, TangentVector, UnitVector};
use crate::primitive::{
    ConstraintPrimitive, PlaneContactGeometry, PointInPlaneWithStiction, SphereOnPlane, NORMAL,
    TANGENT_X, TANGENT_Y,
};
use crate::system::{MobilizedBody, MultibodySystem, State};

/// A contact between a sphere fixed on one body and a plane fixed on another, with friction.
///
/// The position error is the distance between the sphere surface and the plane. Slip is
/// measured at the contact point, the point of the sphere closest to the plane, so that a
/// sphere rolling without slipping has no slip velocity. The sign convention is
/// [`SignConvention::Positive`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SpherePlaneContact {
    constraint: SphereOnPlane,
    restitution: Restitution,
    friction: Friction,
    my_index: Option<UnilateralContactIndex>,
}

impl SpherePlaneContact {
    /// Creates a contact between the sphere of center `center` (in the frame of
    /// `follower`) and the plane of normal `plane_normal` and height `plane_height` (in the
    /// frame of `plane_body`).
    pub fn try_new(
        system: &mut MultibodySystem,
        plane_body: &MobilizedBody,
        plane_normal: UnitVector<Real>,
        plane_height: Real,
        follower: &MobilizedBody,
        center: Point<Real>,
        radius: Real,
        restitution: Restitution,
        friction: Friction,
    ) -> Result<Self, CalibrationError> {
        let geometry = plane_contact_geometry(
            plane_body,
            plane_normal,
            plane_height,
            follower,
            center,
            radius,
        )?;

        Ok(SpherePlaneContact {
            constraint: SphereOnPlane::new(system, geometry),
            restitution,
            friction,
            my_index: None,
        })
    }

    /// Creates a sphere-plane contact.
    ///
    /// # Panics
    /// Panics if the radius is negative or if a length is not finite.
    pub fn new(
        system: &mut MultibodySystem,
        plane_body: &MobilizedBody,
        plane_normal: UnitVector<Real>,
        plane_height: Real,
        follower: &MobilizedBody,
        center: Point<Real>,
        radius: Real,
        restitution: Restitution,
        friction: Friction,
    ) -> Self {
        Self::try_new(
            system,
            plane_body,
            plane_normal,
            plane_height,
            follower,
            center,
            radius,
            restitution,
            friction,
        )
        .unwrap_or_else(|e| panic!("{}", e))
    }

    /// The sphere radius.
    #[inline]
    pub fn radius(&self) -> Real {
        self.geometry().radius
    }
}

impl_plane_contact_with_friction!(SpherePlaneContact, contact_point);
