//! Plane fixed on a body, against which contacts are defined.
use crate::law::CalibrationError;
use crate::math::{Real, Rotation, UnitVector, Vector};
use crate::system::BodyKinematics;

/// A plane fixed on a body, delimiting the half-space a follower point must stay out of.
///
/// The plane is described in the body frame by its outward normal and its height along
/// that normal. Its frame has its `z` axis along the normal; the `x` and `y` axes span the
/// tangent directions friction acts along.
#[derive(PartialEq, Debug, Clone, Copy)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct ContactPlane {
    frame: Rotation<Real>,
    height: Real,
}

impl ContactPlane {
    /// Builds a plane from its outward normal and its height, both in the body frame.
    pub fn try_new(normal: UnitVector<Real>, height: Real) -> Result<Self, CalibrationError> {
        if !height.is_finite() {
            return Err(CalibrationError::InvalidLength {
                name: "plane height",
                value: height,
            });
        }

        let frame = Rotation::rotation_between(&Vector::z(), normal.as_ref()).unwrap_or_else(|| {
            // The normal is -z.
            Rotation::from_axis_angle(&Vector::x_axis(), core::f64::consts::PI as Real)
        });

        Ok(ContactPlane { frame, height })
    }

    /// The outward normal, expressed in the body frame.
    #[inline]
    pub fn normal(&self) -> UnitVector<Real> {
        UnitVector::new_unchecked(self.frame * Vector::z())
    }

    /// The height of the plane along its normal, from the body origin.
    #[inline]
    pub fn height(&self) -> Real {
        self.height
    }

    /// The orientation of the plane frame relative to the body frame.
    #[inline]
    pub fn frame(&self) -> &Rotation<Real> {
        &self.frame
    }

    /// The tangent `x`, tangent `y` and normal axes of the plane frame, in ground.
    pub fn axes_in_ground(&self, body: &BodyKinematics) -> [Vector<Real>; 3] {
        let rot = body.pose.rotation * self.frame;
        [rot * Vector::x(), rot * Vector::y(), rot * Vector::z()]
    }
}
