//! Group attraction scanner.

use ped_core::{AgentId, AreaId};

use crate::BehaviorContext;

/// An attraction area reached by a member of the agent's group.
#[derive(Clone, Debug, PartialEq)]
pub struct AttractionHit {
    pub area:     AreaId,
    pub name:     String,
    /// The group member standing inside the area.
    pub member:   AgentId,
    /// Distance from that member to the area's centre, in metres.
    pub distance: f64,
}

/// Does any member of `agent`'s group stand inside an attraction area?
///
/// An agent without a group is scanned as a group of one.  Members for which
/// the context reports no position are skipped.  An
/// [`AgentStore`](ped_agent::AgentStore) reports one for every agent it holds,
/// the origin until the agent is moved.  When several (member, area) pairs
/// qualify, the pair with the smallest member-to-centre distance wins; equal
/// distances go to the smaller `AreaId`, so the answer never depends on
/// R-tree iteration order.
///
/// Pure query: neither the members nor the context are touched.
pub fn check_group_for_attractions(
    agent: AgentId,
    ctx:   &BehaviorContext<'_>,
) -> Option<AttractionHit> {
    if ctx.attractions.is_empty() {
        return None;
    }

    let solo = [agent];
    let members = match ctx.agents.group_of(agent) {
        Some(group) => ctx.agents.group_members(group),
        None => &solo[..],
    };

    let mut best: Option<AttractionHit> = None;
    for &member in members {
        let Some(position) = ctx.agents.position(member) else {
            continue;
        };
        for area in ctx.attractions.covering(position) {
            let distance = area.center.distance(position);
            let better = match &best {
                None => true,
                Some(b) => distance
                    .total_cmp(&b.distance)
                    .then(area.id.cmp(&b.area))
                    .is_lt(),
            };
            if better {
                best = Some(AttractionHit {
                    area: area.id,
                    name: area.name.clone(),
                    member,
                    distance,
                });
            }
        }
    }
    best
}
