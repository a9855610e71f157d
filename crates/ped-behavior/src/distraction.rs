//! The distraction overlay: a second, independent state machine layered over
//! the primary behavior state.
//!
//! A distraction does not replace the agent's behavior directly.  Activating
//! one only records an *onset*; the next tick of the primary machine reacts
//! to it by moving the agent into the distraction's behavior branch.  When the
//! distraction clears, the overlay remembers which branch it sent the agent
//! to so the primary machine can bring the agent back to its NormalState.

use std::fmt;

use ped_core::SimTime;

use crate::BehaviorState;

// ── DistractionState ──────────────────────────────────────────────────────────

/// Kind of transient distraction affecting an agent.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DistractionState {
    #[default]
    None,
    Kremer,
    Pam,
    PamModified,
}

impl DistractionState {
    pub const ALL: [DistractionState; 4] = [
        DistractionState::None,
        DistractionState::Kremer,
        DistractionState::Pam,
        DistractionState::PamModified,
    ];

    /// Stable human-readable name, for logs and debug UIs only.
    pub const fn name(self) -> &'static str {
        match self {
            DistractionState::None        => "None",
            DistractionState::Kremer      => "Kremer",
            DistractionState::Pam         => "Pam",
            DistractionState::PamModified => "PamModified",
        }
    }

    /// Behavior the agent is sent to while this distraction holds.
    ///
    /// Kremer and Pam stop the agent until the distraction clears;
    /// PamModified only pauses it for one waiting period.
    pub const fn branch(self) -> Option<BehaviorState> {
        match self {
            DistractionState::None        => None,
            DistractionState::Kremer      => Some(BehaviorState::WaitForTrigger),
            DistractionState::Pam         => Some(BehaviorState::WaitForTrigger),
            DistractionState::PamModified => Some(BehaviorState::Waiting),
        }
    }
}

impl fmt::Display for DistractionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ── DistractionOverlay ────────────────────────────────────────────────────────

/// Per-agent distraction bookkeeping owned by the state machine.
#[derive(Clone, Debug, Default)]
pub struct DistractionOverlay {
    state:           DistractionState,
    onset_pending:   bool,
    started_at:      Option<SimTime>,
    max_duration:    Option<f64>,
    /// Branch the current distraction sent the agent to.
    branch:          Option<BehaviorState>,
    /// Branch to leave on the next tick, set when a distraction clears.
    release_pending: Option<BehaviorState>,
}

impl DistractionOverlay {
    #[inline]
    pub fn current(&self) -> DistractionState {
        self.state
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.state != DistractionState::None
    }

    /// When the running distraction started, once its onset was processed.
    #[inline]
    pub fn started_at(&self) -> Option<SimTime> {
        self.started_at
    }

    #[inline]
    pub fn max_duration(&self) -> Option<f64> {
        self.max_duration
    }

    /// Switch to `distraction`.  `None` behaves like [`deactivate`](Self::deactivate).
    ///
    /// Returns `false` when nothing changed.
    pub fn activate(&mut self, distraction: DistractionState) -> bool {
        if distraction == DistractionState::None {
            return self.deactivate();
        }
        if distraction == self.state {
            return false;
        }
        self.state = distraction;
        self.onset_pending = true;
        self.started_at = None;
        self.max_duration = None;
        self.release_pending = None;
        true
    }

    /// Clear back to `None`.  Returns `false` if no distraction was active.
    pub fn deactivate(&mut self) -> bool {
        if !self.is_active() {
            return false;
        }
        self.state = DistractionState::None;
        self.onset_pending = false;
        self.started_at = None;
        self.max_duration = None;
        self.release_pending = self.branch.take();
        true
    }

    /// Consume a pending onset.
    pub(crate) fn take_onset(&mut self) -> Option<DistractionState> {
        std::mem::take(&mut self.onset_pending).then_some(self.state)
    }

    /// Start the time budget of the distraction whose onset was just consumed.
    pub(crate) fn start(&mut self, now: SimTime, max_duration: f64, branch: Option<BehaviorState>) {
        self.started_at = Some(now);
        self.max_duration = Some(max_duration);
        self.branch = branch;
    }

    /// `true` once the running distraction has used up its budget.
    pub(crate) fn expired(&self, now: SimTime) -> bool {
        match (self.started_at, self.max_duration) {
            (Some(start), Some(max)) => now.since(start) >= max,
            _ => false,
        }
    }

    /// Consume the branch to leave after a distraction cleared.
    pub(crate) fn take_release(&mut self) -> Option<BehaviorState> {
        self.release_pending.take()
    }
}
