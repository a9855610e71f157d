//! `ped-agent`: Structure-of-Arrays agent storage for the pedestrian
//! behavior framework.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                      |
//! |---------------|---------------------------------------------------------------|
//! | [`store`]     | `AgentStore` (SoA arrays), `Destination`                      |
//! | [`group`]     | `Groups`: `GroupId → members` index kept in sync by the store |
//! | [`builder`]   | `AgentStoreBuilder` (fluent construction)                     |
//!
//! The store is the "owning agent" side of the behavior layer: kinematics
//! write positions into it, navigation writes destinations, and the state
//! machines only ever read from it.
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                           |
//! |------------|------------------------------------------------------------      |
//! | `serde`    | Derives `Serialize`/`Deserialize` on all public types.           |

pub mod builder;
pub mod group;
pub mod store;

#[cfg(test)]
mod tests;

pub use builder::AgentStoreBuilder;
pub use group::Groups;
pub use store::{AgentStore, Destination};
