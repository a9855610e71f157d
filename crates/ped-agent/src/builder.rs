//! Fluent builder for constructing an `AgentStore`.
//!
//! # Usage
//!
//! ```rust
//! use ped_agent::{AgentStoreBuilder, Destination};
//! use ped_core::{AgentId, GroupId, Point2};
//!
//! let store = AgentStoreBuilder::new(3)
//!     .position(AgentId(0), Point2::new(1.0, 2.0))
//!     .destination(AgentId(0), Destination::Waypoint)
//!     .group(GroupId(0), &[AgentId(1), AgentId(2)])
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(store.count, 3);
//! assert_eq!(store.members(GroupId(0)), &[AgentId(1), AgentId(2)]);
//! ```

use ped_core::{AgentId, GroupId, PedError, PedResult, Point2};

use crate::{AgentStore, Destination};

/// Fluent builder for [`AgentStore`].
///
/// Per-agent settings are buffered and validated in [`build`](Self::build),
/// so an out-of-range id surfaces as an error rather than a panic.
pub struct AgentStoreBuilder {
    count:        usize,
    positions:    Vec<(AgentId, Point2)>,
    destinations: Vec<(AgentId, Destination)>,
    groups:       Vec<(GroupId, Vec<AgentId>)>,
}

impl AgentStoreBuilder {
    /// Create a builder for `count` agents.  Every agent starts at the
    /// origin, alone, with no destination.
    pub fn new(count: usize) -> Self {
        Self {
            count,
            positions:    Vec::new(),
            destinations: Vec::new(),
            groups:       Vec::new(),
        }
    }

    pub fn position(mut self, agent: AgentId, at: Point2) -> Self {
        self.positions.push((agent, at));
        self
    }

    pub fn destination(mut self, agent: AgentId, destination: Destination) -> Self {
        self.destinations.push((agent, destination));
        self
    }

    /// Put `members` into `group`.  Later calls win if an agent is listed
    /// in several groups.
    pub fn group(mut self, group: GroupId, members: &[AgentId]) -> Self {
        self.groups.push((group, members.to_vec()));
        self
    }

    /// Construct the `AgentStore`.
    pub fn build(self) -> PedResult<AgentStore> {
        let mut store = AgentStore::new(self.count);

        for (agent, at) in self.positions {
            let slot = store
                .position
                .get_mut(agent.index())
                .ok_or(PedError::AgentNotFound(agent))?;
            *slot = at;
        }

        for (agent, destination) in self.destinations {
            let slot = store
                .destination
                .get_mut(agent.index())
                .ok_or(PedError::AgentNotFound(agent))?;
            *slot = destination;
        }

        for (group, members) in self.groups {
            for agent in members {
                store.join_group(agent, group)?;
            }
        }

        Ok(store)
    }
}
