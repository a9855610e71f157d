//! State-change notification.

use ped_core::{AgentId, SimTime};

use crate::BehaviorState;

/// Emitted after every successful activation of a new state.
#[derive(Clone, Debug, PartialEq)]
pub struct StateChange {
    pub agent:    AgentId,
    pub previous: BehaviorState,
    pub state:    BehaviorState,
    /// Episode number of the activation that produced this change.
    pub episode:  u64,
    pub at:       SimTime,
}

/// Listener registered on a state machine.
///
/// Called synchronously, in registration order, once the activation's
/// bookkeeping (timestamp, episode, planner hand-over) is complete.
/// Closures `FnMut(&StateChange)` implement this trait directly.
pub trait StateObserver {
    fn on_state_changed(&mut self, change: &StateChange);
}

impl<F> StateObserver for F
where
    F: FnMut(&StateChange),
{
    fn on_state_changed(&mut self, change: &StateChange) {
        self(change)
    }
}
