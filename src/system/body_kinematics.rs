use crate::math::{Isometry, Point, Real, Vector};

/// The spatial kinematics of a rigid body, expressed in the ground frame.
///
/// Velocities and accelerations are those of the body origin (the translation part of
/// `pose`), plus the angular velocity and acceleration of the body frame.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct BodyKinematics {
    /// The body frame, measured and expressed in ground.
    pub pose: Isometry<Real>,
    /// The velocity of the body origin.
    pub linvel: Vector<Real>,
    /// The angular velocity of the body frame.
    pub angvel: Vector<Real>,
    /// The acceleration of the body origin.
    pub linacc: Vector<Real>,
    /// The angular acceleration of the body frame.
    pub angacc: Vector<Real>,
}

impl Default for BodyKinematics {
    fn default() -> Self {
        Self::at_rest(Isometry::identity())
    }
}

impl BodyKinematics {
    /// A body at the given pose, with zero velocity and acceleration.
    pub fn at_rest(pose: Isometry<Real>) -> Self {
        BodyKinematics {
            pose,
            linvel: Vector::zeros(),
            angvel: Vector::zeros(),
            linacc: Vector::zeros(),
            angacc: Vector::zeros(),
        }
    }

    /// The location of the body origin in ground.
    #[inline]
    pub fn origin(&self) -> Point<Real> {
        Point::from(self.pose.translation.vector)
    }

    /// The ground location of a station given in the body frame.
    #[inline]
    pub fn station_location(&self, station: &Point<Real>) -> Point<Real> {
        self.pose.transform_point(station)
    }

    /// Re-expresses a body-frame vector in ground.
    #[inline]
    pub fn direction(&self, dir: &Vector<Real>) -> Vector<Real> {
        self.pose.rotation.transform_vector(dir)
    }

    /// Velocity of the material point of this body currently located at `point` (in ground).
    #[inline]
    pub fn velocity_at(&self, point: &Point<Real>) -> Vector<Real> {
        self.linvel + self.angvel.cross(&(point - self.origin()))
    }

    /// Acceleration of the material point of this body currently located at `point`.
    #[inline]
    pub fn acceleration_at(&self, point: &Point<Real>) -> Vector<Real> {
        let r = point - self.origin();
        self.linacc + self.angacc.cross(&r) + self.angvel.cross(&self.angvel.cross(&r))
    }

    /// Time derivative of the velocity of the material point of this body coinciding with
    /// a spatial point that moves at `point_vel`.
    ///
    /// This is [`Self::acceleration_at`] plus the transport term due to the spatial point
    /// sliding over the body.
    #[inline]
    pub fn coincident_velocity_derivative(
        &self,
        point: &Point<Real>,
        point_vel: &Vector<Real>,
    ) -> Vector<Real> {
        let r = point - self.origin();
        self.linacc + self.angacc.cross(&r) + self.angvel.cross(&(point_vel - self.linvel))
    }

    /// Time derivative of a ground-expressed vector fixed in this body.
    #[inline]
    pub fn direction_derivative(&self, dir: &Vector<Real>) -> Vector<Real> {
        self.angvel.cross(dir)
    }

    /// Second time derivative of a ground-expressed vector fixed in this body.
    #[inline]
    pub fn direction_second_derivative(&self, dir: &Vector<Real>) -> Vector<Real> {
        self.angacc.cross(dir) + self.angvel.cross(&self.angvel.cross(dir))
    }
}
