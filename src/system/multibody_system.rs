use crate::contact::UnilateralContact;
use crate::friction::StateLimitedFriction;
use crate::index::{
    BoundedSpeedIndex, ConstraintIndex, MobodIndex, StateLimitedFrictionIndex,
    UnilateralContactIndex,
};
use crate::math::Real;
use crate::speed::BoundedSpeedConstraint;
use crate::system::{ConstraintSlot, MobilizedBody, Stage, State};

#[derive(Copy, Clone, Debug)]
struct ConstraintInfo {
    nmultipliers: usize,
    disabled_by_default: bool,
}

/// The arena owning every handle of a multibody model.
///
/// Bodies and constraint primitives are registered here during model assembly; the
/// conditional constraints wrapping those primitives are then handed over to the system
/// which assigns them their own index. Once assembly is done, [`Self::default_state`]
/// allocates a [`State`] sized for this model.
pub struct MultibodySystem {
    bodies: Vec<MobilizedBody>,
    nq: usize,
    constraints: Vec<ConstraintInfo>,
    contacts: Vec<Box<dyn UnilateralContact>>,
    frictions: Vec<Box<dyn StateLimitedFriction>>,
    speed_constraints: Vec<Box<dyn BoundedSpeedConstraint>>,
}

impl Default for MultibodySystem {
    fn default() -> Self {
        Self::new()
    }
}

impl MultibodySystem {
    /// Creates a system containing only the ground body.
    pub fn new() -> Self {
        MultibodySystem {
            bodies: vec![MobilizedBody::new(MobodIndex::GROUND, 0, 0)],
            nq: 0,
            constraints: Vec::new(),
            contacts: Vec::new(),
            frictions: Vec::new(),
            speed_constraints: Vec::new(),
        }
    }

    /// The ground body.
    #[inline]
    pub fn ground(&self) -> MobilizedBody {
        self.bodies[0]
    }

    /// Adds a body whose mobilizer has `nq` generalized coordinates.
    pub fn add_mobilized_body(&mut self, nq: usize) -> MobilizedBody {
        let body = MobilizedBody::new(MobodIndex::from_usize(self.bodies.len()), self.nq, nq);
        self.nq += nq;
        self.bodies.push(body);
        body
    }

    /// The body with the given index.
    pub fn mobilized_body(&self, index: MobodIndex) -> Option<MobilizedBody> {
        self.bodies.get(index.as_usize()).copied()
    }

    /// The total number of generalized coordinates.
    #[inline]
    pub fn nq(&self) -> usize {
        self.nq
    }

    /// Registers a constraint primitive generating `nmultipliers` multipliers when enabled.
    pub(crate) fn add_constraint(
        &mut self,
        nmultipliers: usize,
        disabled_by_default: bool,
    ) -> ConstraintIndex {
        let index = ConstraintIndex::from_usize(self.constraints.len());
        self.constraints.push(ConstraintInfo {
            nmultipliers,
            disabled_by_default,
        });
        index
    }

    /// The number of registered constraint primitives.
    #[inline]
    pub fn nconstraints(&self) -> usize {
        self.constraints.len()
    }

    /// Hands a unilateral contact over to this system.
    pub fn add_unilateral_contact(
        &mut self,
        mut contact: impl UnilateralContact,
    ) -> UnilateralContactIndex {
        let index = UnilateralContactIndex::from_usize(self.contacts.len());
        if let Some(previous) = contact.my_index() {
            log::warn!("the contact registered as {} is registered again", previous);
        }
        contact.set_my_index(index);
        self.contacts.push(Box::new(contact));
        log::debug!("registered {}", index);
        index
    }

    /// The unilateral contact with the given index.
    pub fn unilateral_contact(
        &self,
        index: UnilateralContactIndex,
    ) -> Option<&(dyn UnilateralContact + 'static)> {
        self.contacts.get(index.as_usize()).map(|c| &**c)
    }

    /// Iterates through all the unilateral contacts of this system.
    pub fn unilateral_contacts(
        &self,
    ) -> impl ExactSizeIterator<Item = (UnilateralContactIndex, &(dyn UnilateralContact + 'static))>
    {
        self.contacts
            .iter()
            .enumerate()
            .map(|(i, c)| (UnilateralContactIndex::from_usize(i), &**c))
    }

    /// Iterates through the contacts close enough to touching, enabled or not.
    ///
    /// The state must be realized through [`Stage::Position`].
    pub fn proximal_contacts<'a>(
        &'a self,
        state: &'a State,
        ptol: Real,
    ) -> impl Iterator<Item = UnilateralContactIndex> + 'a {
        self.unilateral_contacts()
            .filter(move |(_, c)| c.is_proximal(state, ptol))
            .map(|(i, _)| i)
    }

    /// Hands a state-limited friction element over to this system.
    pub fn add_state_limited_friction(
        &mut self,
        mut friction: impl StateLimitedFriction,
    ) -> StateLimitedFrictionIndex {
        let index = StateLimitedFrictionIndex::from_usize(self.frictions.len());
        if let Some(previous) = friction.my_index() {
            log::warn!("the friction element registered as {} is registered again", previous);
        }
        friction.set_my_index(index);
        self.frictions.push(Box::new(friction));
        log::debug!("registered {}", index);
        index
    }

    /// The state-limited friction element with the given index.
    pub fn state_limited_friction(
        &self,
        index: StateLimitedFrictionIndex,
    ) -> Option<&(dyn StateLimitedFriction + 'static)> {
        self.frictions.get(index.as_usize()).map(|f| &**f)
    }

    /// Iterates through all the state-limited friction elements of this system.
    pub fn state_limited_frictions(
        &self,
    ) -> impl ExactSizeIterator<Item = (StateLimitedFrictionIndex, &(dyn StateLimitedFriction + 'static))>
    {
        self.frictions
            .iter()
            .enumerate()
            .map(|(i, f)| (StateLimitedFrictionIndex::from_usize(i), &**f))
    }

    /// Hands a bounded speed constraint over to this system.
    pub fn add_bounded_speed_constraint(
        &mut self,
        mut constraint: impl BoundedSpeedConstraint,
    ) -> BoundedSpeedIndex {
        let index = BoundedSpeedIndex::from_usize(self.speed_constraints.len());
        if let Some(previous) = constraint.my_index() {
            log::warn!("the bounded speed constraint registered as {} is registered again", previous);
        }
        constraint.set_my_index(index);
        self.speed_constraints.push(Box::new(constraint));
        log::debug!("registered {}", index);
        index
    }

    /// The bounded speed constraint with the given index.
    pub fn bounded_speed_constraint(
        &self,
        index: BoundedSpeedIndex,
    ) -> Option<&(dyn BoundedSpeedConstraint + 'static)> {
        self.speed_constraints.get(index.as_usize()).map(|c| &**c)
    }

    /// Iterates through all the bounded speed constraints of this system.
    pub fn bounded_speed_constraints(
        &self,
    ) -> impl ExactSizeIterator<Item = (BoundedSpeedIndex, &(dyn BoundedSpeedConstraint + 'static))>
    {
        self.speed_constraints
            .iter()
            .enumerate()
            .map(|(i, c)| (BoundedSpeedIndex::from_usize(i), &**c))
    }

    /// Allocates a state for this system.
    ///
    /// Coordinates, speeds and accelerations are zero, every body sits at the origin at
    /// rest, and every constraint primitive has its default enabled flag (the primitives
    /// wrapped by conditional constraints are disabled by default).
    pub fn default_state(&self) -> State {
        let slots = self
            .constraints
            .iter()
            .map(|info| ConstraintSlot {
                enabled: !info.disabled_by_default,
                nmultipliers: info.nmultipliers,
                instance_parameter: None,
            })
            .collect();

        State::new(self.nq, self.bodies.len(), slots)
    }

    /// Realizes the state through the given stage.
    ///
    /// Realizing [`Stage::Position`] assigns multipliers to the enabled constraints. This
    /// must happen after any enabling or disabling, and before errors, multipliers or
    /// coefficients are queried.
    ///
    /// # Panics
    /// Panics if the state was not allocated by this system (or if bodies or constraints
    /// were added since).
    pub fn realize(&self, state: &mut State, stage: Stage) {
        assert!(
            state.is_compatible_with(self.nq, self.bodies.len(), self.constraints.len()),
            "the state does not match the topology of this multibody system"
        );

        if stage >= Stage::Position && state.stage() < Stage::Position {
            state.resize_multipliers();
            log::trace!(
                "assigned {} multipliers at t = {}",
                state.multipliers().len(),
                state.time()
            );
        }

        if state.stage() < stage {
            state.set_stage(stage);
        }
    }
}
