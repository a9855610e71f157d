//! `ped-sim`: tick driver for the pedestrian behavior framework.
//!
//! # Tick loop
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   ① Observe  : on_tick_start(tick)
//!   ② Context  : sample the clock once; one BehaviorContext for all agents
//!   ③ Evaluate : do_state_transition for each agent, ascending AgentId;
//!                 every activation is reported via on_state_change
//!   ④ Observe  : on_tick_end(tick, changes); advance the clock
//! ```
//!
//! Movement is not simulated here.  The embedding application updates
//! `sim.agents` (positions, destinations, `needs_destination`) between ticks
//! and reads planner targets back from `sim.planners`.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use ped_agent::AgentStoreBuilder;
//! use ped_core::SimConfig;
//! use ped_sim::{SimBuilder, TracingObserver};
//!
//! let store = AgentStoreBuilder::new(100).build()?;
//! let mut sim = SimBuilder::new(SimConfig::default(), store).build()?;
//! sim.run(&mut TracingObserver::new())?;
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod sim;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver, TracingObserver};
pub use sim::Sim;
