use crate::contact::{SignConvention, UnilateralContact};
use crate::index::{MultiplierIndex, UnilateralContactIndex};
use crate::law::{CalibrationError, Restitution};
use crate::math::{Point, Real};
use crate::primitive::{ConstantCoordinate, ConstraintPrimitive};
use crate::system::{MobilizedBody, MultibodySystem, State};

/// The part shared by both hard stops: a coordinate, a limit, and the constraint locking
/// the coordinate at that limit while the stop is engaged.
#[derive(Copy, Clone, Debug, PartialEq)]
struct CoordinateStop {
    mobod: MobilizedBody,
    which_q: usize,
    limit: Real,
    restitution: Restitution,
    coordinate: ConstantCoordinate,
}

impl CoordinateStop {
    fn try_new(
        system: &mut MultibodySystem,
        mobod: &MobilizedBody,
        which_q: usize,
        limit: Real,
        restitution: Restitution,
    ) -> Result<Self, CalibrationError> {
        if !limit.is_finite() {
            return Err(CalibrationError::InvalidLength {
                name: "coordinate limit",
                value: limit,
            });
        }

        let coordinate = ConstantCoordinate::new(system, mobod, which_q, limit)?;

        Ok(CoordinateStop {
            mobod: *mobod,
            which_q,
            limit,
            restitution,
            coordinate,
        })
    }

    fn disable(&self, state: &mut State) -> bool {
        if self.coordinate.is_disabled(state) {
            return false;
        }

        self.coordinate.disable(state);
        log::trace!("disabled the stop on q{} of {}", self.which_q, self.mobod.index());
        true
    }

    fn enable(&self, state: &mut State) -> bool {
        if !self.coordinate.is_disabled(state) {
            return false;
        }

        self.coordinate.enable(state);
        log::trace!("enabled the stop on q{} of {}", self.which_q, self.mobod.index());
        true
    }

    // The primitive only computes errors while enabled; otherwise they are read
    // straight from the coordinate arrays.
    fn perr(&self, state: &State) -> Real {
        self.coordinate
            .position_error(state)
            .unwrap_or_else(|| self.mobod.one_q(state, self.which_q) - self.limit)
    }

    fn verr(&self, state: &State) -> Real {
        self.coordinate
            .velocity_error(state)
            .unwrap_or_else(|| self.mobod.one_u(state, self.which_q))
    }

    fn aerr(&self, state: &State) -> Real {
        self.coordinate
            .acceleration_error(state)
            .unwrap_or_else(|| self.mobod.one_udot(state, self.which_q))
    }
}

macro_rules! impl_hard_stop(
    ($HardStop: ident, $sign: expr) => {
        impl $HardStop {
            /// The body whose mobilizer coordinate is limited.
            #[inline]
            pub fn mobilized_body(&self) -> &MobilizedBody {
                &self.stop.mobod
            }

            /// The limited coordinate of the mobilizer.
            #[inline]
            pub fn which_q(&self) -> usize {
                self.stop.which_q
            }

            /// The restitution calibration of this stop.
            #[inline]
            pub fn restitution(&self) -> &Restitution {
                &self.stop.restitution
            }

            /// The primitive locking the coordinate while the stop is engaged.
            #[inline]
            pub fn constraint(&self) -> &ConstantCoordinate {
                &self.stop.coordinate
            }
        }

        impl UnilateralContact for $HardStop {
            fn sign_convention(&self) -> SignConvention {
                $sign
            }

            fn my_index(&self) -> Option<UnilateralContactIndex> {
                self.my_index
            }

            fn set_my_index(&mut self, index: UnilateralContactIndex) {
                self.my_index = Some(index);
            }

            fn disable(&self, state: &mut State) -> bool {
                self.stop.disable(state)
            }

            fn enable(&self, state: &mut State) -> bool {
                self.stop.enable(state)
            }

            fn is_enabled(&self, state: &State) -> bool {
                !self.stop.coordinate.is_disabled(state)
            }

            fn where_to_display(&self, state: &State) -> Point<Real> {
                self.stop.mobod.body_origin_location(state)
            }

            fn calc_effective_cor(
                &self,
                _state: &State,
                default_capture_speed: Real,
                default_min_cor_speed: Real,
                impact_speed: Real,
            ) -> Real {
                self.stop.restitution.effective_cor(
                    default_capture_speed,
                    default_min_cor_speed,
                    impact_speed,
                )
            }

            fn perr(&self, state: &State) -> Real {
                self.stop.perr(state)
            }

            fn verr(&self, state: &State) -> Real {
                self.stop.verr(state)
            }

            fn aerr(&self, state: &State) -> Real {
                self.stop.aerr(state)
            }

            fn contact_multiplier_index(&self, state: &State) -> Option<MultiplierIndex> {
                self.stop.coordinate.multiplier_index(state, 0)
            }
        }
    }
);

/// A hard limit on the maximum value of a generalized coordinate.
///
/// A generalized force opposes further excursion of the coordinate, and a generalized
/// impulse is produced when the stop is hit with a nonzero speed. The restitution
/// calibration gives the COR at high impact speeds; it is higher at lower impact speeds
/// but zero at very small ones.
///
/// The sign convention is [`SignConvention::Negative`]: `perr = q - upper <= 0` is valid.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct HardStopUpper {
    stop: CoordinateStop,
    my_index: Option<UnilateralContactIndex>,
}

impl HardStopUpper {
    /// Creates a stop keeping the `which_q`-th coordinate of `mobod` below `upper_limit`.
    pub fn try_new(
        system: &mut MultibodySystem,
        mobod: &MobilizedBody,
        which_q: usize,
        upper_limit: Real,
        restitution: Restitution,
    ) -> Result<Self, CalibrationError> {
        Ok(HardStopUpper {
            stop: CoordinateStop::try_new(system, mobod, which_q, upper_limit, restitution)?,
            my_index: None,
        })
    }

    /// Creates a stop keeping the `which_q`-th coordinate of `mobod` below `upper_limit`.
    ///
    /// # Panics
    /// Panics if `which_q` is not a coordinate of `mobod` or if the limit is not finite.
    pub fn new(
        system: &mut MultibodySystem,
        mobod: &MobilizedBody,
        which_q: usize,
        upper_limit: Real,
        restitution: Restitution,
    ) -> Self {
        Self::try_new(system, mobod, which_q, upper_limit, restitution)
            .unwrap_or_else(|e| panic!("{}", e))
    }

    /// The maximum value of the coordinate.
    #[inline]
    pub fn upper_limit(&self) -> Real {
        self.stop.limit
    }
}

impl_hard_stop!(HardStopUpper, SignConvention::Negative);

/// A hard limit on the minimum value of a generalized coordinate.
///
/// This is the mirror of [`HardStopUpper`]. The sign convention is
/// [`SignConvention::Positive`]: `perr = q - lower >= 0` is valid.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct HardStopLower {
    stop: CoordinateStop,
    my_index: Option<UnilateralContactIndex>,
}

impl HardStopLower {
    /// Creates a stop keeping the `which_q`-th coordinate of `mobod` above `lower_limit`.
    pub fn try_new(
        system: &mut MultibodySystem,
        mobod: &MobilizedBody,
        which_q: usize,
        lower_limit: Real,
        restitution: Restitution,
    ) -> Result<Self, CalibrationError> {
        Ok(HardStopLower {
            stop: CoordinateStop::try_new(system, mobod, which_q, lower_limit, restitution)?,
            my_index: None,
        })
    }

    /// Creates a stop keeping the `which_q`-th coordinate of `mobod` above `lower_limit`.
    ///
    /// # Panics
    /// Panics if `which_q` is not a coordinate of `mobod` or if the limit is not finite.
    pub fn new(
        system: &mut MultibodySystem,
        mobod: &MobilizedBody,
        which_q: usize,
        lower_limit: Real,
        restitution: Restitution,
    ) -> Self {
        Self::try_new(system, mobod, which_q, lower_limit, restitution)
            .unwrap_or_else(|e| panic!("{}", e))
    }

    /// The minimum value of the coordinate.
    #[inline]
    pub fn lower_limit(&self) -> Real {
        self.stop.limit
    }
}

impl_hard_stop!(HardStopLower, SignConvention::Positive);
