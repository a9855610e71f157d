//! Behavior tuning knobs.
//!
//! Typically deserialized from the application's scene file (enable the
//! `serde` feature) and shared by every agent's state machine behind an
//! `Arc`.  Missing fields fall back to [`BehaviorConfig::default`].

use std::collections::BTreeMap;

use crate::{BehaviorError, BehaviorResult, BehaviorState};

pub(crate) const DEFAULT_JITTER_FRACTION: f64 = 0.25;

/// Configuration shared by all state machines of a run.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BehaviorConfig {
    /// Half-width of the uniform duration jitter, as a fraction of the base
    /// time.  `0.25` means ±25 %.  `0` disables jitter.
    pub jitter_fraction: f64,

    /// Per-state overrides of the default time budgets (seconds).  Only
    /// time-bounded states may appear here.
    pub durations: BTreeMap<BehaviorState, f64>,

    /// Base time budget of a distraction episode (seconds).
    pub distraction_duration: f64,

    /// After an attraction episode ends, ignore that same area for this
    /// many seconds.
    pub attraction_cooldown: f64,

    /// NormalState of a freshly created machine.  Must be a base state.
    pub default_normal_state: BehaviorState,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            jitter_fraction:      DEFAULT_JITTER_FRACTION,
            durations:            BTreeMap::new(),
            distraction_duration: 6.0,
            attraction_cooldown:  30.0,
            default_normal_state: BehaviorState::Walking,
        }
    }
}

impl BehaviorConfig {
    /// Base budget of `state`, or `None` if it is not time-bounded.
    pub fn base_duration(&self, state: BehaviorState) -> Option<f64> {
        let default = state.traits().base_secs?;
        Some(self.durations.get(&state).copied().unwrap_or(default))
    }

    /// Builder-style override of one state's base budget.
    pub fn with_duration(mut self, state: BehaviorState, secs: f64) -> Self {
        self.durations.insert(state, secs);
        self
    }

    pub fn with_jitter(mut self, jitter_fraction: f64) -> Self {
        self.jitter_fraction = jitter_fraction;
        self
    }

    pub fn validate(&self) -> BehaviorResult<()> {
        if !(0.0..=1.0).contains(&self.jitter_fraction) {
            return Err(BehaviorError::Config(format!(
                "jitter_fraction must lie in [0, 1], got {}",
                self.jitter_fraction
            )));
        }
        for (&state, &secs) in &self.durations {
            if !state.is_time_bounded() {
                return Err(BehaviorError::Config(format!(
                    "state {state} is not time-bounded; it cannot have a duration"
                )));
            }
            if !secs.is_finite() || secs < 0.0 {
                return Err(BehaviorError::Config(format!(
                    "duration of {state} must be a non-negative finite number, got {secs}"
                )));
            }
        }
        if !self.distraction_duration.is_finite() || self.distraction_duration <= 0.0 {
            return Err(BehaviorError::Config(format!(
                "distraction_duration must be positive, got {}",
                self.distraction_duration
            )));
        }
        if !self.attraction_cooldown.is_finite() || self.attraction_cooldown < 0.0 {
            return Err(BehaviorError::Config(format!(
                "attraction_cooldown must be non-negative, got {}",
                self.attraction_cooldown
            )));
        }
        if !self.default_normal_state.is_base() {
            return Err(BehaviorError::Config(format!(
                "default_normal_state {} is not a base behavior",
                self.default_normal_state
            )));
        }
        Ok(())
    }
}
