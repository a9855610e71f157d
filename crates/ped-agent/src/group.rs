//! Social group membership.
//!
//! Groups are small (2–6 pedestrians walking together), so each group keeps
//! a sorted `Vec<AgentId>`.  Sorted order gives the attraction scanner a
//! deterministic member iteration order for free.

use std::collections::BTreeMap;

use ped_core::{AgentId, GroupId};

/// `GroupId → members` index.
///
/// Owned by [`AgentStore`][crate::AgentStore], which keeps it consistent with
/// the per-agent `group` array.  Read it through the store's accessors.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Groups {
    members: BTreeMap<GroupId, Vec<AgentId>>,
}

impl Groups {
    pub fn new() -> Self {
        Self::default()
    }

    /// Members of `group` in ascending `AgentId` order.  Empty for unknown
    /// groups.
    pub fn members(&self, group: GroupId) -> &[AgentId] {
        self.members.get(&group).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of non-empty groups.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Iterator over `(group, members)` in ascending `GroupId` order.
    pub fn iter(&self) -> impl Iterator<Item = (GroupId, &[AgentId])> + '_ {
        self.members.iter().map(|(&g, m)| (g, m.as_slice()))
    }

    pub(crate) fn insert(&mut self, group: GroupId, agent: AgentId) {
        let members = self.members.entry(group).or_default();
        if let Err(pos) = members.binary_search(&agent) {
            members.insert(pos, agent);
        }
    }

    pub(crate) fn remove(&mut self, group: GroupId, agent: AgentId) {
        if let Some(members) = self.members.get_mut(&group) {
            members.retain(|&a| a != agent);
            if members.is_empty() {
                self.members.remove(&group);
            }
        }
    }
}
