//! Core agent storage.
//!
//! Every per-agent array has exactly `count` elements and is indexed by
//! `AgentId`.  Writers (kinematics, navigation, scene setup) mutate the `pub`
//! arrays between ticks; the behavior layer reads them during a tick.
//! Group membership is the one exception: it has a reverse index, so it is
//! only changed through [`AgentStore::join_group`] / [`AgentStore::leave_group`].

use ped_core::{AgentId, GroupId, PedError, PedResult, Point2};

use crate::Groups;

// ── Destination ───────────────────────────────────────────────────────────────

/// What kind of place the agent is currently heading for.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Destination {
    /// No destination assigned; the agent idles where it is.
    #[default]
    None,
    /// An ordinary waypoint.
    Waypoint,
    /// A waiting queue (ticket counter, checkout).
    Queue,
}

// ── AgentStore ────────────────────────────────────────────────────────────────

/// Structure-of-Arrays storage for all agent state the behavior layer reads.
///
/// ```ignore
/// let p = store.position[agent.index()];  // O(1), cache-friendly
/// ```
#[derive(Clone, Debug)]
pub struct AgentStore {
    /// Number of agents.  Equals the length of every SoA `Vec`.
    pub count: usize,

    /// Current position on the floor plan, in metres.
    pub position: Vec<Point2>,

    /// Current destination kind.
    pub destination: Vec<Destination>,

    /// Set by navigation when the agent reached its destination and wants a
    /// new one; cleared by navigation once a new one is assigned.
    pub needs_destination: Vec<bool>,

    /// Social group of each agent.  `GroupId::INVALID` when walking alone.
    group: Vec<GroupId>,

    groups: Groups,
}

impl AgentStore {
    /// `true` if there are no agents.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Iterator over all `AgentId`s in ascending index order.
    pub fn agent_ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        (0..self.count as u32).map(AgentId)
    }

    #[inline]
    pub fn contains(&self, agent: AgentId) -> bool {
        agent.index() < self.count
    }

    /// Position of `agent`, or `None` for an out-of-range id.
    #[inline]
    pub fn position_of(&self, agent: AgentId) -> Option<Point2> {
        self.position.get(agent.index()).copied()
    }

    // ── Groups ────────────────────────────────────────────────────────────

    /// The agent's group, or `None` when it walks alone.
    #[inline]
    pub fn group_of(&self, agent: AgentId) -> Option<GroupId> {
        self.group.get(agent.index()).copied().filter(|g| g.is_valid())
    }

    /// Members of `group` in ascending `AgentId` order.
    #[inline]
    pub fn members(&self, group: GroupId) -> &[AgentId] {
        self.groups.members(group)
    }

    /// Read-only view of the membership index.
    pub fn groups(&self) -> &Groups {
        &self.groups
    }

    /// Move `agent` into `group`, leaving its previous group if any.
    pub fn join_group(&mut self, agent: AgentId, group: GroupId) -> PedResult<()> {
        if !self.contains(agent) {
            return Err(PedError::AgentNotFound(agent));
        }
        if !group.is_valid() {
            return Err(PedError::GroupNotFound(group));
        }
        self.leave_group(agent)?;
        self.group[agent.index()] = group;
        self.groups.insert(group, agent);
        tracing::trace!(%agent, %group, "joined group");
        Ok(())
    }

    /// Remove `agent` from its group.  No-op when it has none.
    pub fn leave_group(&mut self, agent: AgentId) -> PedResult<()> {
        if !self.contains(agent) {
            return Err(PedError::AgentNotFound(agent));
        }
        let old = std::mem::take(&mut self.group[agent.index()]);
        if old.is_valid() {
            self.groups.remove(old, agent);
            tracing::trace!(%agent, group = %old, "left group");
        }
        Ok(())
    }

    // ── Package-private constructor used by AgentStoreBuilder ─────────────

    pub(crate) fn new(count: usize) -> Self {
        Self {
            count,
            position:          vec![Point2::default(); count],
            destination:       vec![Destination::None; count],
            needs_destination: vec![false; count],
            group:             vec![GroupId::INVALID; count],
            groups:            Groups::new(),
        }
    }
}
