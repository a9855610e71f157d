//! Read-only simulation state passed to every state-machine evaluation.

use ped_agent::{AgentStore, Destination};
use ped_core::{AgentId, Clock, GroupId, Point2, SimTime};
use ped_spatial::AttractionIndex;

/// What the state machine needs to know about the agent that owns it and
/// that agent's social context.
///
/// [`AgentStore`] implements it; tests and embedding applications can supply
/// their own.
pub trait AgentContext {
    /// Group of `agent`, or `None` when it walks alone.
    fn group_of(&self, agent: AgentId) -> Option<GroupId>;

    /// Members of `group`, in a stable order.
    fn group_members(&self, group: GroupId) -> &[AgentId];

    /// Current position, or `None` if the context does not know the agent.
    fn position(&self, agent: AgentId) -> Option<Point2>;

    /// Kind of destination the agent is heading for.
    fn destination(&self, agent: AgentId) -> Destination;

    /// `true` once navigation reports the current destination reached.
    fn needs_new_destination(&self, agent: AgentId) -> bool;
}

impl AgentContext for AgentStore {
    #[inline]
    fn group_of(&self, agent: AgentId) -> Option<GroupId> {
        AgentStore::group_of(self, agent)
    }

    #[inline]
    fn group_members(&self, group: GroupId) -> &[AgentId] {
        self.members(group)
    }

    #[inline]
    fn position(&self, agent: AgentId) -> Option<Point2> {
        self.position_of(agent)
    }

    #[inline]
    fn destination(&self, agent: AgentId) -> Destination {
        self.destination.get(agent.index()).copied().unwrap_or_default()
    }

    #[inline]
    fn needs_new_destination(&self, agent: AgentId) -> bool {
        self.needs_destination.get(agent.index()).copied().unwrap_or(false)
    }
}

/// A read-only snapshot handed to [`AgentStateMachine`][crate::AgentStateMachine]
/// calls.
///
/// Built once per tick by the driver and shared by all agents.  The clock is
/// sampled exactly once, at construction, so every agent evaluated in the
/// same tick sees the same `now`.
pub struct BehaviorContext<'a> {
    /// Current simulation time.
    pub now: SimTime,

    /// Agent positions, groups and destinations.
    pub agents: &'a dyn AgentContext,

    /// Attraction areas of the scene.
    pub attractions: &'a AttractionIndex,
}

impl<'a> BehaviorContext<'a> {
    #[inline]
    pub fn new(
        clock:       &impl Clock,
        agents:      &'a dyn AgentContext,
        attractions: &'a AttractionIndex,
    ) -> Self {
        Self { now: clock.now(), agents, attractions }
    }
}
