//! Jittered time budgets for time-bounded states.
//!
//! Agents sharing a nominal duration would otherwise leave their states on
//! the same tick.  Each budget is the base time scaled by a uniform factor:
//!
//!   duration = base * (1 + u),   u ~ Uniform[-jitter, +jitter]
//!
//! so every result lies in `[base * (1 - jitter), base * (1 + jitter)]`.

use ped_core::AgentRng;

/// Bounded symmetric jitter policy.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DurationPolicy {
    jitter_fraction: f64,
}

impl DurationPolicy {
    /// `jitter_fraction` is clamped to `[0, 1]` so a budget is never negative.
    pub fn new(jitter_fraction: f64) -> Self {
        let jitter_fraction = if jitter_fraction.is_finite() {
            jitter_fraction.clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self { jitter_fraction }
    }

    /// No jitter: every budget equals its base time.
    pub fn fixed() -> Self {
        Self { jitter_fraction: 0.0 }
    }

    #[inline]
    pub fn jitter_fraction(&self) -> f64 {
        self.jitter_fraction
    }

    /// Inclusive `(min, max)` a budget for `base` can take.
    pub fn bounds(&self, base: f64) -> (f64, f64) {
        let base = base.max(0.0);
        (base * (1.0 - self.jitter_fraction), base * (1.0 + self.jitter_fraction))
    }

    /// `base` perturbed by the jitter policy, drawn from the agent's RNG.
    pub fn random_duration(&self, base: f64, rng: &mut AgentRng) -> f64 {
        if self.jitter_fraction == 0.0 || base <= 0.0 {
            return base.max(0.0);
        }
        let j = self.jitter_fraction;
        let u: f64 = rng.gen_range(-j..=j);
        (base * (1.0 + u)).max(0.0)
    }
}

impl Default for DurationPolicy {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_JITTER_FRACTION)
    }
}
