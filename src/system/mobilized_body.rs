use crate::index::MobodIndex;
use crate::law::CalibrationError;
use crate::math::{Point, Real};
use crate::system::{BodyKinematics, State};

/// Handle to a body of a multibody system and the generalized coordinates of its mobilizer.
///
/// Each mobilizer owns `nq` consecutive entries of the generalized coordinate array `q`,
/// and the same entries of the generalized speed array `u` (`u` is the time derivative of
/// `q` here).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct MobilizedBody {
    index: MobodIndex,
    first_q: usize,
    nq: usize,
}

impl MobilizedBody {
    pub(crate) fn new(index: MobodIndex, first_q: usize, nq: usize) -> Self {
        MobilizedBody { index, first_q, nq }
    }

    /// The index of this body in its system.
    #[inline]
    pub fn index(&self) -> MobodIndex {
        self.index
    }

    /// Is this the ground body?
    #[inline]
    pub fn is_ground(&self) -> bool {
        self.index == MobodIndex::GROUND
    }

    /// The number of generalized coordinates of this body's mobilizer.
    #[inline]
    pub fn nq(&self) -> usize {
        self.nq
    }

    /// The index, in the system-wide `q` array, of the `which`-th coordinate of this mobilizer.
    pub fn q_index(&self, which: usize) -> Result<usize, CalibrationError> {
        if which < self.nq {
            Ok(self.first_q + which)
        } else {
            Err(CalibrationError::CoordinateOutOfRange { which, nq: self.nq })
        }
    }

    fn checked_q_index(&self, which: usize) -> usize {
        self.q_index(which).unwrap_or_else(|e| panic!("{}", e))
    }

    /// The current value of the `which`-th coordinate of this mobilizer.
    pub fn one_q(&self, state: &State, which: usize) -> Real {
        state.q()[self.checked_q_index(which)]
    }

    /// The current value of the `which`-th speed of this mobilizer.
    pub fn one_u(&self, state: &State, which: usize) -> Real {
        state.u()[self.checked_q_index(which)]
    }

    /// The current time derivative of the `which`-th speed of this mobilizer.
    pub fn one_udot(&self, state: &State, which: usize) -> Real {
        state.udot()[self.checked_q_index(which)]
    }

    /// The spatial kinematics of this body.
    #[inline]
    pub fn kinematics<'a>(&self, state: &'a State) -> &'a BodyKinematics {
        state.body(self.index)
    }

    /// The location of this body's origin, in ground.
    pub fn body_origin_location(&self, state: &State) -> Point<Real> {
        self.kinematics(state).origin()
    }
}
