//! Simulation observer trait for progress reporting and data collection.

use ped_behavior::StateChange;
use ped_core::Tick;

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: occupancy counter
///
/// ```rust,ignore
/// struct ShopperCount(usize);
///
/// impl SimObserver for ShopperCount {
///     fn on_state_change(&mut self, change: &StateChange) {
///         if change.state == BehaviorState::Shopping {
///             self.0 += 1;
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any machine runs.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called for every activation produced by a tick, in ascending
    /// `AgentId` order.
    fn on_state_change(&mut self, _change: &StateChange) {}

    /// Called at the end of each tick.  `changes` counts the activations
    /// reported through [`on_state_change`](Self::on_state_change).
    fn on_tick_end(&mut self, _tick: Tick, _changes: usize) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}

/// Reports every state change through `tracing` at `info` level.
#[derive(Debug, Default)]
pub struct TracingObserver {
    changes: u64,
}

impl TracingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total changes seen so far.
    pub fn changes(&self) -> u64 {
        self.changes
    }
}

impl SimObserver for TracingObserver {
    fn on_state_change(&mut self, change: &StateChange) {
        self.changes += 1;
        tracing::info!(
            agent = %change.agent,
            from = %change.previous,
            to = %change.state,
            episode = change.episode,
            at = %change.at,
            "state change"
        );
    }

    fn on_tick_end(&mut self, tick: Tick, changes: usize) {
        if changes > 0 {
            tracing::debug!(%tick, changes, "tick complete");
        }
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        tracing::info!(%final_tick, changes = self.changes, "simulation finished");
    }
}
