//! Planner families, the planner registry, and per-agent planner selection.
//!
//! # Ownership
//!
//! Planners live in a [`PlannerRegistry`] owned by the driver.  Each state
//! machine holds only [`PlannerHandles`] (one `PlannerId` per family) and a
//! [`PlannerSelector`] recording which of them currently has control.  The
//! machine never owns a planner's lifetime.
//!
//! # Hand-over
//!
//! Switching planners always deactivates the old one before the new one is
//! activated, and `deactivate` must drop the planner's target, so a planner
//! never resumes with a goal from an earlier episode.

use std::fmt;

use ped_core::{AgentId, AreaId, GroupId, PlannerId, SimTime};

use crate::{BehaviorError, BehaviorResult, BehaviorState};

// ── PlannerFamily ─────────────────────────────────────────────────────────────

/// The four motion-planning strategies a behavior can select.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlannerFamily {
    Individual,
    Queueing,
    Group,
    Shopping,
}

impl PlannerFamily {
    pub const ALL: [PlannerFamily; 4] = [
        PlannerFamily::Individual,
        PlannerFamily::Queueing,
        PlannerFamily::Group,
        PlannerFamily::Shopping,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            PlannerFamily::Individual => "individual",
            PlannerFamily::Queueing   => "queueing",
            PlannerFamily::Group      => "group",
            PlannerFamily::Shopping   => "shopping",
        }
    }
}

impl fmt::Display for PlannerFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ── WaypointPlanner ───────────────────────────────────────────────────────────

/// Everything a planner is told when it becomes current for an agent.
#[derive(Clone, Debug, PartialEq)]
pub struct PlannerActivation {
    pub agent:      AgentId,
    pub state:      BehaviorState,
    pub episode:    u64,
    pub group:      Option<GroupId>,
    /// Attraction the agent is responding to (shopping planner only).
    pub attraction: Option<AreaId>,
    pub at:         SimTime,
}

/// A motion-planning strategy.  Path computation is the implementor's
/// business; the state machine only switches planners on and off.
pub trait WaypointPlanner {
    fn family(&self) -> PlannerFamily;

    /// Become current for `activation.agent`.
    fn activate(&mut self, activation: &PlannerActivation);

    /// Stop planning for `agent` and forget its target.
    fn deactivate(&mut self, agent: AgentId);

    /// Target currently being planned toward, as handed over on activation.
    fn target(&self) -> Option<&PlannerActivation>;
}

/// Stock planner that keeps the activation it was handed and drops it on
/// deactivation.  Motion code reads the goal back through
/// [`WaypointPlanner::target`].
#[derive(Clone, Debug)]
pub struct TargetPlanner {
    family:      PlannerFamily,
    target:      Option<PlannerActivation>,
    activations: u64,
}

impl TargetPlanner {
    pub fn new(family: PlannerFamily) -> Self {
        Self { family, target: None, activations: 0 }
    }

    pub fn boxed(family: PlannerFamily) -> Box<dyn WaypointPlanner> {
        Box::new(Self::new(family))
    }

    /// How many times this planner has been activated.
    pub fn activations(&self) -> u64 {
        self.activations
    }
}

impl WaypointPlanner for TargetPlanner {
    fn family(&self) -> PlannerFamily {
        self.family
    }

    fn activate(&mut self, activation: &PlannerActivation) {
        self.activations += 1;
        self.target = Some(activation.clone());
    }

    fn deactivate(&mut self, agent: AgentId) {
        if self.target.as_ref().is_some_and(|t| t.agent == agent) {
            self.target = None;
        }
    }

    fn target(&self) -> Option<&PlannerActivation> {
        self.target.as_ref()
    }
}

// ── PlannerRegistry ───────────────────────────────────────────────────────────

/// Owner of every planner instance in a run.
#[derive(Default)]
pub struct PlannerRegistry {
    planners: Vec<Box<dyn WaypointPlanner>>,
}

impl PlannerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of `planner` and return its handle.
    pub fn register(&mut self, planner: Box<dyn WaypointPlanner>) -> PlannerId {
        let id = PlannerId(self.planners.len() as u32);
        self.planners.push(planner);
        id
    }

    /// Register one planner per family, built by `make`, and return the
    /// handle set for a state machine.
    pub fn register_set<F>(&mut self, mut make: F) -> PlannerHandles
    where
        F: FnMut(PlannerFamily) -> Box<dyn WaypointPlanner>,
    {
        PlannerHandles {
            individual: self.register(make(PlannerFamily::Individual)),
            queueing:   self.register(make(PlannerFamily::Queueing)),
            group:      self.register(make(PlannerFamily::Group)),
            shopping:   self.register(make(PlannerFamily::Shopping)),
        }
    }

    pub fn get(&self, id: PlannerId) -> Option<&dyn WaypointPlanner> {
        self.planners.get(id.index()).map(|p| p.as_ref())
    }

    pub fn get_mut(&mut self, id: PlannerId) -> Option<&mut (dyn WaypointPlanner + 'static)> {
        self.planners.get_mut(id.index()).map(|p| p.as_mut())
    }

    pub fn len(&self) -> usize {
        self.planners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.planners.is_empty()
    }
}

// ── PlannerHandles / PlannerSelector ──────────────────────────────────────────

/// Non-owning references to one planner per family.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PlannerHandles {
    pub individual: PlannerId,
    pub queueing:   PlannerId,
    pub group:      PlannerId,
    pub shopping:   PlannerId,
}

impl PlannerHandles {
    #[inline]
    pub fn handle(&self, family: PlannerFamily) -> PlannerId {
        match family {
            PlannerFamily::Individual => self.individual,
            PlannerFamily::Queueing   => self.queueing,
            PlannerFamily::Group      => self.group,
            PlannerFamily::Shopping   => self.shopping,
        }
    }
}

/// Tracks which of an agent's planners has control.
#[derive(Clone, Debug)]
pub struct PlannerSelector {
    handles: PlannerHandles,
    active:  Option<(PlannerFamily, PlannerId)>,
}

impl PlannerSelector {
    pub fn new(handles: PlannerHandles) -> Self {
        Self { handles, active: None }
    }

    #[inline]
    pub fn handles(&self) -> &PlannerHandles {
        &self.handles
    }

    #[inline]
    pub fn active_family(&self) -> Option<PlannerFamily> {
        self.active.map(|(family, _)| family)
    }

    #[inline]
    pub fn active_handle(&self) -> Option<PlannerId> {
        self.active.map(|(_, id)| id)
    }

    /// Give control to the planner of `family`, or to nobody for `None`.
    ///
    /// Any planner still in control is released first.
    pub fn select(
        &mut self,
        family:     Option<PlannerFamily>,
        activation: &PlannerActivation,
        registry:   &mut PlannerRegistry,
    ) -> BehaviorResult<()> {
        self.release(activation.agent, registry)?;

        let Some(family) = family else {
            return Ok(());
        };
        let id = self.handles.handle(family);
        let planner = registry.get_mut(id).ok_or(BehaviorError::UnknownPlanner(id))?;
        if planner.family() != family {
            return Err(BehaviorError::PlannerFamilyMismatch {
                id,
                expected: family,
                found:    planner.family(),
            });
        }
        planner.activate(activation);
        self.active = Some((family, id));
        tracing::trace!(agent = %activation.agent, %family, planner = %id, "planner selected");
        Ok(())
    }

    /// Take control away from the current planner.  No-op when none is
    /// active, so repeated calls are harmless.
    pub fn release(&mut self, agent: AgentId, registry: &mut PlannerRegistry) -> BehaviorResult<()> {
        if let Some((family, id)) = self.active.take() {
            registry
                .get_mut(id)
                .ok_or(BehaviorError::UnknownPlanner(id))?
                .deactivate(agent);
            tracing::trace!(%agent, %family, planner = %id, "planner released");
        }
        Ok(())
    }
}
