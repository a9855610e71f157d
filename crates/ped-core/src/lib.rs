//! `ped-core`: foundational types for the pedestrian behavior framework.
//!
//! This crate is a dependency of every other `ped-*` crate.  It intentionally
//! has no `ped-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`, `GroupId`, `AreaId`, `PlannerId`           |
//! | [`geo`]         | `Point2`, planar distance                             |
//! | [`time`]        | `Tick`, `SimTime`, `SimClock`, `Clock`, `SimConfig`   |
//! | [`rng`]         | `AgentRng` (per-agent), `SimRng` (global)             |
//! | [`error`]       | `PedError`, `PedResult`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                        |
//! |---------|------------------------------------------------------------   |
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.           |

pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{PedError, PedResult};
pub use geo::Point2;
pub use ids::{AgentId, AreaId, GroupId, PlannerId};
pub use rng::{AgentRng, SimRng};
pub use time::{Clock, SimClock, SimConfig, SimTime, Tick};
