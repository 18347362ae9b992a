//! Opaque handles assigned by the [`MultibodySystem`](crate::system::MultibodySystem).
//!
//! Handles are plain indices into storage owned by the system or by the
//! [`State`](crate::system::State). A handle that has not been assigned yet, or that
//! refers to something currently absent (e.g. the multiplier of a disabled constraint),
//! is represented as `None` by the APIs returning it.

use core::fmt;

macro_rules! define_index {
    ($(#[$meta: meta])* $Index: ident, $label: expr) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
        pub struct $Index(u32);

        impl $Index {
            /// Creates a handle from its raw index.
            #[inline]
            pub const fn from_raw(id: u32) -> Self {
                $Index(id)
            }

            /// The raw index of this handle.
            #[inline]
            pub const fn into_raw(self) -> u32 {
                self.0
            }

            #[inline]
            #[allow(dead_code)]
            pub(crate) fn from_usize(id: usize) -> Self {
                debug_assert!(id <= u32::MAX as usize, "index overflow");
                $Index(id as u32)
            }

            #[inline]
            #[allow(dead_code)]
            pub(crate) fn as_usize(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $Index {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}#{}", $label, self.0)
            }
        }
    };
}

define_index!(
    /// Index of a mobilized body. The ground always has index `0`.
    MobodIndex,
    "mobod"
);
define_index!(
    /// Index of a constraint primitive registered in a multibody system.
    ConstraintIndex,
    "constraint"
);
define_index!(
    /// Index of a multiplier in the multiplier array of a realized state.
    ///
    /// Multipliers are only assigned to enabled constraints, so the multiplier index of a
    /// given constraint may change whenever any constraint is enabled or disabled.
    MultiplierIndex,
    "multiplier"
);
define_index!(
    /// Index of a unilateral contact registered in a multibody system.
    UnilateralContactIndex,
    "unilateral contact"
);
define_index!(
    /// Index of a state-limited friction element registered in a multibody system.
    StateLimitedFrictionIndex,
    "state-limited friction"
);
define_index!(
    /// Index of a bounded speed constraint registered in a multibody system.
    BoundedSpeedIndex,
    "bounded speed constraint"
);

impl MobodIndex {
    /// The index of the ground body.
    pub const GROUND: MobodIndex = MobodIndex(0);
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn raw_roundtrip_and_display() {
        let ix = MultiplierIndex::from_raw(7);
        assert_eq!(ix.into_raw(), 7);
        assert_eq!(ix.as_usize(), 7);
        assert_eq!(format!("{}", ix), "multiplier#7");
        assert!(MobodIndex::GROUND < MobodIndex::from_raw(1));
    }
}
