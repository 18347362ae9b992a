use core::ops::Range;

use crate::index::{ConstraintIndex, MobodIndex, MultiplierIndex};
use crate::math::{DVector, Point, Real};
use crate::system::BodyKinematics;

/// The computation stages a [`State`] goes through during one step.
///
/// Queries made while the state is realized below the stage they need get stale values:
/// this is not detected.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum Stage {
    /// The state has just been allocated.
    Topology,
    /// The set of enabled constraints (hence the multiplier layout) may have changed.
    Model,
    /// Positions are valid and multipliers are assigned.
    Position,
    /// Velocities are valid.
    Velocity,
    /// Accelerations and multiplier values are valid.
    Acceleration,
}

impl Stage {
    /// The stage immediately preceding this one.
    pub fn prev(self) -> Stage {
        match self {
            Stage::Topology | Stage::Model => Stage::Topology,
            Stage::Position => Stage::Model,
            Stage::Velocity => Stage::Position,
            Stage::Acceleration => Stage::Velocity,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct ConstraintSlot {
    pub enabled: bool,
    pub nmultipliers: usize,
    pub instance_parameter: Option<Point<Real>>,
}

/// The mutable simulation state the constraints of a multibody system are evaluated against.
///
/// A state is created by [`MultibodySystem::default_state`](crate::system::MultibodySystem::default_state)
/// and is only meaningful for the system that created it.
#[derive(Clone, Debug)]
pub struct State {
    time: Real,
    q: DVector<Real>,
    u: DVector<Real>,
    udot: DVector<Real>,
    bodies: Vec<BodyKinematics>,
    constraints: Vec<ConstraintSlot>,
    multipliers: DVector<Real>,
    // Set when a constraint is enabled or disabled, cleared when multipliers are reassigned.
    layout_changed: bool,
    stage: Stage,
}

impl State {
    pub(crate) fn new(nq: usize, nbodies: usize, constraints: Vec<ConstraintSlot>) -> Self {
        let mut state = State {
            time: 0.0,
            q: DVector::zeros(nq),
            u: DVector::zeros(nq),
            udot: DVector::zeros(nq),
            bodies: vec![BodyKinematics::default(); nbodies],
            constraints,
            multipliers: DVector::zeros(0),
            layout_changed: true,
            stage: Stage::Model,
        };
        state.resize_multipliers();
        state
    }

    /// The current simulation time.
    #[inline]
    pub fn time(&self) -> Real {
        self.time
    }

    /// Sets the current simulation time.
    pub fn set_time(&mut self, time: Real) {
        self.time = time;
        self.invalidate(Stage::Position);
    }

    /// The highest stage this state has been realized through.
    #[inline]
    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub(crate) fn set_stage(&mut self, stage: Stage) {
        self.stage = stage;
    }

    /// Marks `stage` and every later stage as no longer realized.
    pub fn invalidate(&mut self, stage: Stage) {
        if self.stage >= stage {
            self.stage = stage.prev();
        }
    }

    /// The generalized coordinates.
    #[inline]
    pub fn q(&self) -> &DVector<Real> {
        &self.q
    }

    /// Mutable access to the generalized coordinates. Invalidates [`Stage::Position`].
    pub fn q_mut(&mut self) -> &mut DVector<Real> {
        self.invalidate(Stage::Position);
        &mut self.q
    }

    /// The generalized speeds.
    #[inline]
    pub fn u(&self) -> &DVector<Real> {
        &self.u
    }

    /// Mutable access to the generalized speeds. Invalidates [`Stage::Velocity`].
    pub fn u_mut(&mut self) -> &mut DVector<Real> {
        self.invalidate(Stage::Velocity);
        &mut self.u
    }

    /// The time derivatives of the generalized speeds.
    #[inline]
    pub fn udot(&self) -> &DVector<Real> {
        &self.udot
    }

    /// Mutable access to the generalized accelerations. Invalidates [`Stage::Acceleration`].
    pub fn udot_mut(&mut self) -> &mut DVector<Real> {
        self.invalidate(Stage::Acceleration);
        &mut self.udot
    }

    /// The number of bodies, ground included.
    #[inline]
    pub fn nbodies(&self) -> usize {
        self.bodies.len()
    }

    /// The spatial kinematics of the given body.
    #[inline]
    pub fn body(&self, body: MobodIndex) -> &BodyKinematics {
        &self.bodies[body.as_usize()]
    }

    /// Mutable access to the spatial kinematics of the given body. Invalidates [`Stage::Position`].
    pub fn body_mut(&mut self, body: MobodIndex) -> &mut BodyKinematics {
        self.invalidate(Stage::Position);
        &mut self.bodies[body.as_usize()]
    }

    /// The number of constraint primitives, enabled or not.
    #[inline]
    pub fn nconstraints(&self) -> usize {
        self.constraints.len()
    }

    /// Is the given constraint primitive currently enabled?
    #[inline]
    pub fn is_constraint_enabled(&self, constraint: ConstraintIndex) -> bool {
        self.constraints[constraint.as_usize()].enabled
    }

    /// Sets the enabled flag of a constraint primitive.
    ///
    /// Returns `true` if the flag actually changed, in which case the multiplier layout
    /// changed as well and [`Stage::Position`] is invalidated.
    pub(crate) fn set_constraint_enabled(
        &mut self,
        constraint: ConstraintIndex,
        enabled: bool,
    ) -> bool {
        let slot = &mut self.constraints[constraint.as_usize()];

        if slot.enabled == enabled {
            return false;
        }

        slot.enabled = enabled;
        self.layout_changed = true;
        self.invalidate(Stage::Position);
        true
    }

    pub(crate) fn instance_parameter(&self, constraint: ConstraintIndex) -> Option<Point<Real>> {
        self.constraints[constraint.as_usize()].instance_parameter
    }

    pub(crate) fn set_instance_parameter(
        &mut self,
        constraint: ConstraintIndex,
        value: Option<Point<Real>>,
    ) {
        self.constraints[constraint.as_usize()].instance_parameter = value;
        self.invalidate(Stage::Position);
    }

    /// The total number of multipliers of the enabled constraints.
    pub fn num_multipliers(&self) -> usize {
        self.constraints
            .iter()
            .filter(|slot| slot.enabled)
            .map(|slot| slot.nmultipliers)
            .sum()
    }

    /// The range of the multiplier array assigned to the given constraint.
    ///
    /// Multipliers are laid out contiguously, in registration order, for the enabled
    /// constraints only. Returns `None` if the constraint is disabled, or if some constraint
    /// was enabled or disabled since the multipliers were last assigned.
    pub fn multiplier_range(&self, constraint: ConstraintIndex) -> Option<Range<usize>> {
        let i = constraint.as_usize();

        if self.layout_changed || !self.constraints[i].enabled {
            return None;
        }

        let start: usize = self.constraints[..i]
            .iter()
            .filter(|slot| slot.enabled)
            .map(|slot| slot.nmultipliers)
            .sum();
        Some(start..start + self.constraints[i].nmultipliers)
    }

    /// The multiplier values, as last written by the constraint solver.
    #[inline]
    pub fn multipliers(&self) -> &DVector<Real> {
        &self.multipliers
    }

    /// Mutable access to the multiplier values.
    pub fn multipliers_mut(&mut self) -> &mut DVector<Real> {
        &mut self.multipliers
    }

    /// The value of a single multiplier, if this state has it.
    pub fn multiplier(&self, multiplier: MultiplierIndex) -> Option<Real> {
        self.multipliers.get(multiplier.as_usize()).copied()
    }

    /// Reassigns the multipliers if the set of enabled constraints changed.
    ///
    /// Values written for the previous layout are discarded: they would otherwise be read
    /// by whichever constraint now occupies their slot.
    pub(crate) fn resize_multipliers(&mut self) {
        if self.layout_changed {
            self.multipliers = DVector::zeros(self.num_multipliers());
            self.layout_changed = false;
        }
    }

    pub(crate) fn is_compatible_with(&self, nq: usize, nbodies: usize, nconstraints: usize) -> bool {
        self.q.len() == nq && self.bodies.len() == nbodies && self.constraints.len() == nconstraints
    }
}
