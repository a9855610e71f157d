//! Simulation time model.
//!
//! # Design
//!
//! The driver advances an integer `Tick` counter; behavior logic reasons in
//! seconds.  `SimClock` holds the mapping:
//!
//!   now = tick * time_step_secs
//!
//! Keeping the tick integral means the driver never accumulates
//! floating-point drift across a long run, while state durations (which are
//! jittered reals anyway) are compared against `SimTime` seconds.
//!
//! Behavior code never owns a clock.  It receives something implementing
//! [`Clock`] and queries it once per evaluation.

use std::fmt;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }

    /// Ticks elapsed from `earlier` to `self`.
    ///
    /// # Panics
    /// Panics in debug mode if `earlier > self`.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0 - earlier.0
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimTime ───────────────────────────────────────────────────────────────────

/// A point in simulated time, in seconds since the start of the run.
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimTime(pub f64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0.0);

    #[inline]
    pub fn secs(self) -> f64 {
        self.0
    }

    /// Seconds elapsed from `earlier` to `self`, clamped at zero so a clock
    /// that was reset never yields a negative age.
    #[inline]
    pub fn since(self, earlier: SimTime) -> f64 {
        (self.0 - earlier.0).max(0.0)
    }
}

impl std::ops::Add<f64> for SimTime {
    type Output = SimTime;
    #[inline]
    fn add(self, rhs: f64) -> SimTime {
        SimTime(self.0 + rhs)
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}s", self.0)
    }
}

// ── Clock ─────────────────────────────────────────────────────────────────────

/// Monotonic source of "current time".
pub trait Clock {
    fn now(&self) -> SimTime;
}

/// A bare `SimTime` is a clock frozen at that instant.  Handy for tests and
/// for callers that already sampled the time.
impl Clock for SimTime {
    #[inline]
    fn now(&self) -> SimTime {
        *self
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Tick counter plus the tick → seconds mapping.
///
/// `SimClock` is cheap to copy and intentionally holds no heap data.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// How many simulated seconds one tick represents.
    pub time_step_secs: f64,
    /// The current tick, advanced by `SimClock::advance()` each iteration.
    pub current_tick: Tick,
}

impl SimClock {
    /// Create a clock at tick 0 with the given resolution.
    pub fn new(time_step_secs: f64) -> Self {
        Self {
            time_step_secs,
            current_tick: Tick::ZERO,
        }
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    /// Elapsed simulated seconds since tick 0.
    #[inline]
    pub fn elapsed_secs(&self) -> f64 {
        self.current_tick.0 as f64 * self.time_step_secs
    }

    /// How many ticks span `secs` seconds? (rounds up)
    #[inline]
    pub fn ticks_for_secs(&self, secs: f64) -> u64 {
        if secs <= 0.0 {
            return 0;
        }
        (secs / self.time_step_secs).ceil() as u64
    }
}

impl Clock for SimClock {
    #[inline]
    fn now(&self) -> SimTime {
        SimTime(self.elapsed_secs())
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.current_tick, self.now())
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
///
/// Typically loaded from a TOML/JSON file by the application crate and passed
/// to the simulation runner.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Seconds per tick.  Pedestrian models typically run at 0.1 s.
    pub time_step_secs: f64,

    /// Total ticks to simulate.
    pub total_ticks: u64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            time_step_secs: 0.1,
            total_ticks:    6_000,
            seed:           0,
        }
    }
}

impl SimConfig {
    /// The tick at which the simulation ends (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.time_step_secs)
    }

    /// Reject time steps that would stall or reverse the clock.
    pub fn validate(&self) -> crate::PedResult<()> {
        if !self.time_step_secs.is_finite() || self.time_step_secs <= 0.0 {
            return Err(crate::PedError::Config(format!(
                "time_step_secs must be a positive finite number, got {}",
                self.time_step_secs
            )));
        }
        Ok(())
    }
}
