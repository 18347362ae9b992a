use crate::index::MobodIndex;
use crate::math::{Point, Real, TangentVector, Vector};
use crate::primitive::ContactPlane;
use crate::system::{BodyKinematics, State};

/// Kinematics of a follower sphere against a plane fixed on another body.
///
/// A point contact is a sphere with a zero radius. All the quantities are computed from
/// the body kinematics stored in the state, regardless of whether any constraint is
/// enabled.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct PlaneContactGeometry {
    /// The body the plane is fixed on.
    pub plane_body: MobodIndex,
    /// The plane, expressed in the frame of `plane_body`.
    pub plane: ContactPlane,
    /// The body carrying the point or sphere.
    pub follower: MobodIndex,
    /// The point, or sphere center, in the frame of `follower`.
    pub station: Point<Real>,
    /// The sphere radius, zero for a point.
    pub radius: Real,
}

impl PlaneContactGeometry {
    fn bodies<'a>(&self, state: &'a State) -> (&'a BodyKinematics, &'a BodyKinematics) {
        (state.body(self.plane_body), state.body(self.follower))
    }

    /// The signed distance between the follower surface and the plane.
    pub fn separation(&self, state: &State) -> Real {
        let (b, f) = self.bodies(state);
        let n = b.direction(self.plane.normal().as_ref());
        let d = f.station_location(&self.station) - b.origin();
        n.dot(&d) - self.plane.height() - self.radius
    }

    /// The separation and its first and second time derivatives.
    pub fn normal_errors(&self, state: &State) -> [Real; 3] {
        let (b, f) = self.bodies(state);
        let n = b.direction(self.plane.normal().as_ref());
        let n_dot = b.direction_derivative(&n);
        let n_ddot = b.direction_second_derivative(&n);

        let p = f.station_location(&self.station);
        let d = p - b.origin();
        let d_dot = f.velocity_at(&p) - b.linvel;
        let d_ddot = f.acceleration_at(&p) - b.linacc;

        [
            n.dot(&d) - self.plane.height() - self.radius,
            n_dot.dot(&d) + n.dot(&d_dot),
            n_ddot.dot(&d) + 2.0 * n_dot.dot(&d_dot) + n.dot(&d_ddot),
        ]
    }

    /// The point of the follower surface closest to the plane, in ground.
    pub fn contact_point(&self, state: &State) -> Point<Real> {
        let (b, f) = self.bodies(state);
        let n = b.direction(self.plane.normal().as_ref());
        f.station_location(&self.station) - n * self.radius
    }

    /// The projection of the point (or sphere center) on the plane, in ground.
    pub fn projected_point(&self, state: &State) -> Point<Real> {
        let (b, f) = self.bodies(state);
        let n = b.direction(self.plane.normal().as_ref());
        let p = f.station_location(&self.station);
        p - n * (n.dot(&(p - b.origin())) - self.plane.height())
    }

    /// Tangential velocity of the follower material point at the contact point, relative
    /// to the plane body, along the plane `x` and `y` axes.
    pub fn slip_velocity(&self, state: &State) -> TangentVector<Real> {
        let (b, f) = self.bodies(state);
        let c = self.contact_point(state);
        let [x, y, _] = self.plane.axes_in_ground(b);
        let v = f.velocity_at(&c) - b.velocity_at(&c);
        TangentVector::new(v.dot(&x), v.dot(&y))
    }

    /// Time derivative of [`Self::slip_velocity`].
    ///
    /// Accounts for the contact point moving over both bodies and for the plane axes
    /// rotating with the plane body.
    pub fn slip_acceleration(&self, state: &State) -> TangentVector<Real> {
        let (b, f) = self.bodies(state);
        let n = b.direction(self.plane.normal().as_ref());
        let p = f.station_location(&self.station);
        let c = p - n * self.radius;
        let c_dot = f.velocity_at(&p) - b.direction_derivative(&n) * self.radius;

        let w = f.velocity_at(&c) - b.velocity_at(&c);
        let w_dot = f.coincident_velocity_derivative(&c, &c_dot)
            - b.coincident_velocity_derivative(&c, &c_dot);

        let [x, y, _] = self.plane.axes_in_ground(b);
        TangentVector::new(
            b.direction_derivative(&x).dot(&w) + x.dot(&w_dot),
            b.direction_derivative(&y).dot(&w) + y.dot(&w_dot),
        )
    }

    /// Expresses a ground point in the plane frame, whose origin lies on the plane surface
    /// right above the plane body origin.
    pub fn plane_coordinates(&self, state: &State, point: &Point<Real>) -> Point<Real> {
        let b = state.body(self.plane_body);
        let rot = b.pose.rotation * self.plane.frame();
        let local: Vector<Real> = rot.inverse_transform_vector(&(point - b.origin()));
        Point::new(local.x, local.y, local.z - self.plane.height())
    }
}
