//! The per-agent behavior state machine.
//!
//! # Tick evaluation
//!
//! [`AgentStateMachine::do_state_transition`] runs once per agent per tick
//! and performs at most one activation.  Conditions are checked in priority
//! order; the first that fires wins the tick:
//!
//! ```text
//!   ① distraction  : onset sends the agent to the distraction's branch;
//!                     a cleared distraction brings it back to NormalState
//!   ② attraction   : a pending lose-attraction request ends an
//!                     attraction-driven Shopping episode;
//!                     otherwise a group member inside an area starts it
//!   ③ expiry       : trigger fired in WaitForTrigger, or the state's time
//!                     budget is spent → table successor
//!   ④ destination  : fresh machine, or base state whose destination was
//!                     reached → state matching the next destination
//!   ⑤ nothing      : no field of the machine changes
//! ```
//!
//! External requests ([`lose_attraction`](AgentStateMachine::lose_attraction),
//! [`fire_trigger`](AgentStateMachine::fire_trigger), distraction changes)
//! only set pending flags.  The next evaluation consumes them, so the
//! machine's state is written from one place only.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use ped_agent::Destination;
use ped_core::{AgentId, AgentRng, AreaId, SimTime};

use crate::{
    check_group_for_attractions, AttractionHit, BehaviorConfig, BehaviorContext, BehaviorResult,
    BehaviorState, DistractionOverlay, DistractionState, DurationPolicy, PlannerActivation,
    PlannerFamily, PlannerHandles, PlannerRegistry, PlannerSelector, StateChange, StateObserver,
    Successor,
};

/// State entered when a group attraction takes hold.
pub const ATTRACTION_RESPONSE: BehaviorState = BehaviorState::Shopping;

// ── LoseAttractionHandle ──────────────────────────────────────────────────────

/// Cloneable handle that asks a machine to drop its current attraction.
///
/// Safe to hold and fire from anywhere (a timer, a neighbouring agent's
/// observer, another thread); it only raises a flag that the owning machine
/// consumes on its next tick.
#[derive(Clone, Debug, Default)]
pub struct LoseAttractionHandle(Arc<AtomicBool>);

impl LoseAttractionHandle {
    pub fn request(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_pending(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    fn take(&self) -> bool {
        self.0.swap(false, Ordering::AcqRel)
    }

    fn clear(&self) {
        self.0.store(false, Ordering::Release);
    }
}

// ── AgentStateMachine ─────────────────────────────────────────────────────────

/// Behavior state of one agent, for the agent's whole lifetime.
pub struct AgentStateMachine {
    agent:  AgentId,
    config: Arc<BehaviorConfig>,
    timing: DurationPolicy,
    rng:    AgentRng,

    state:              BehaviorState,
    normal_state:       BehaviorState,
    start_timestamp:    SimTime,
    state_max_duration: Option<f64>,
    current_episode:    u64,

    distraction: DistractionOverlay,
    planners:    PlannerSelector,

    group_attraction:    Option<AttractionHit>,
    released_attraction: Option<AreaId>,
    cooldown:            Option<(AreaId, SimTime)>,
    lose_attraction:     LoseAttractionHandle,
    trigger_pending:     bool,

    observers: Vec<Box<dyn StateObserver>>,
}

impl AgentStateMachine {
    /// Create the machine for `agent` in state `None`.
    ///
    /// `seed` is the run's global seed; the machine derives its own RNG
    /// stream from it so jittered durations are reproducible per agent.
    /// `config` is expected to have passed [`BehaviorConfig::validate`].
    pub fn new(
        agent:    AgentId,
        handles:  PlannerHandles,
        config:   Arc<BehaviorConfig>,
        seed:     u64,
    ) -> Self {
        Self {
            agent,
            timing: DurationPolicy::new(config.jitter_fraction),
            normal_state: config.default_normal_state,
            config,
            rng: AgentRng::new(seed, agent),
            state: BehaviorState::None,
            start_timestamp: SimTime::ZERO,
            state_max_duration: None,
            current_episode: 0,
            distraction: DistractionOverlay::default(),
            planners: PlannerSelector::new(handles),
            group_attraction: None,
            released_attraction: None,
            cooldown: None,
            lose_attraction: LoseAttractionHandle::default(),
            trigger_pending: false,
            observers: Vec::new(),
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn agent(&self) -> AgentId {
        self.agent
    }

    #[inline]
    pub fn current_state(&self) -> BehaviorState {
        self.state
    }

    #[inline]
    pub fn normal_state(&self) -> BehaviorState {
        self.normal_state
    }

    #[inline]
    pub fn current_episode(&self) -> u64 {
        self.current_episode
    }

    #[inline]
    pub fn start_timestamp(&self) -> SimTime {
        self.start_timestamp
    }

    /// Time budget of the current state; `None` if it is not time-bounded.
    #[inline]
    pub fn state_max_duration(&self) -> Option<f64> {
        self.state_max_duration
    }

    /// Seconds left before the current state expires.
    pub fn remaining(&self, now: SimTime) -> Option<f64> {
        self.state_max_duration
            .map(|max| (max - now.since(self.start_timestamp)).max(0.0))
    }

    #[inline]
    pub fn current_distraction(&self) -> DistractionState {
        self.distraction.current()
    }

    #[inline]
    pub fn distraction(&self) -> &DistractionOverlay {
        &self.distraction
    }

    /// Attraction recorded for the current (or upcoming) Shopping episode.
    #[inline]
    pub fn current_attraction(&self) -> Option<&AttractionHit> {
        self.group_attraction.as_ref()
    }

    #[inline]
    pub fn active_planner(&self) -> Option<PlannerFamily> {
        self.planners.active_family()
    }

    #[inline]
    pub fn planner_selector(&self) -> &PlannerSelector {
        &self.planners
    }

    pub fn config(&self) -> &BehaviorConfig {
        &self.config
    }

    // ── Diagnostics ───────────────────────────────────────────────────────

    pub fn state_to_name(state: BehaviorState) -> &'static str {
        state.name()
    }

    pub fn distraction_to_name(distraction: DistractionState) -> &'static str {
        distraction.name()
    }

    // ── Observers ─────────────────────────────────────────────────────────

    /// Register a listener for state changes.  Listeners run in
    /// registration order.
    pub fn subscribe(&mut self, observer: impl StateObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    // ── External requests ─────────────────────────────────────────────────

    /// Ask the machine to drop its attraction on the next tick.
    pub fn lose_attraction(&self) {
        self.lose_attraction.request();
    }

    /// A handle that can fire [`lose_attraction`](Self::lose_attraction)
    /// without access to the machine.
    pub fn lose_attraction_handle(&self) -> LoseAttractionHandle {
        self.lose_attraction.clone()
    }

    /// Release a `WaitForTrigger` on the next tick.  Discarded if the agent
    /// is in any other state by then.
    pub fn fire_trigger(&mut self) {
        self.trigger_pending = true;
    }

    /// Set the distraction overlay.  The behavior reacts on the next tick.
    pub fn activate_distraction(&mut self, distraction: DistractionState) {
        let previous = self.distraction.current();
        if self.distraction.activate(distraction) {
            tracing::debug!(
                agent = %self.agent,
                from = %previous,
                to = %distraction,
                "distraction changed"
            );
        }
    }

    /// Clear the distraction overlay.  No-op when none is active.
    pub fn deactivate_distraction(&mut self) {
        let previous = self.distraction.current();
        if self.distraction.deactivate() {
            tracing::debug!(agent = %self.agent, from = %previous, "distraction cleared");
        }
    }

    // ── Durations ─────────────────────────────────────────────────────────

    /// `base_time` with this machine's jitter applied.
    pub fn get_random_duration(&mut self, base_time: f64) -> f64 {
        self.timing.random_duration(base_time, &mut self.rng)
    }

    // ── Activation ────────────────────────────────────────────────────────

    /// Make `state` the current state.
    ///
    /// Re-activating the current state starts a fresh episode (timestamp,
    /// episode number, time budget) without notifying observers or touching
    /// the planner.  Otherwise the old state is fully deactivated first, then
    /// the new one is set up and observers are notified.
    pub fn activate_state(
        &mut self,
        state:    BehaviorState,
        ctx:      &BehaviorContext<'_>,
        planners: &mut PlannerRegistry,
    ) -> BehaviorResult<Option<StateChange>> {
        let now = ctx.now;

        if state == self.state {
            self.start_episode(now);
            tracing::debug!(
                agent = %self.agent,
                %state,
                episode = self.current_episode,
                "state re-activated"
            );
            return Ok(None);
        }

        let previous = self.state;
        self.deactivate_state(previous, planners)?;
        if let Some(area) = self.released_attraction.take() {
            self.cooldown = Some((area, now));
        }

        self.state = state;
        if state.is_base() {
            self.normal_state = state;
        }
        self.start_episode(now);

        let activation = PlannerActivation {
            agent:      self.agent,
            state,
            episode:    self.current_episode,
            group:      ctx.agents.group_of(self.agent),
            attraction: self.group_attraction.as_ref().map(|hit| hit.area),
            at:         now,
        };
        self.planners.select(state.planner_family(), &activation, planners)?;

        let change = StateChange {
            agent: self.agent,
            previous,
            state,
            episode: self.current_episode,
            at: now,
        };
        tracing::debug!(
            agent = %self.agent,
            from = %previous,
            to = %state,
            episode = self.current_episode,
            budget = ?self.state_max_duration,
            "state activated"
        );
        for observer in &mut self.observers {
            observer.on_state_changed(&change);
        }
        Ok(Some(change))
    }

    /// Clean up after `state`: release its planner, drop its attraction and
    /// its time budget, and fall back to `None`.
    ///
    /// Only [`activate_state`](Self::activate_state) calls this, as the first
    /// half of a switch.  Ignored unless `state` is the current state.
    pub(crate) fn deactivate_state(
        &mut self,
        state:    BehaviorState,
        planners: &mut PlannerRegistry,
    ) -> BehaviorResult<()> {
        if state != self.state {
            tracing::trace!(agent = %self.agent, %state, current = %self.state, "deactivation of inactive state ignored");
            return Ok(());
        }

        self.planners.release(self.agent, planners)?;
        self.state = BehaviorState::None;
        self.state_max_duration = None;

        if state == ATTRACTION_RESPONSE {
            if let Some(hit) = self.group_attraction.take() {
                tracing::debug!(agent = %self.agent, area = %hit.area, name = %hit.name, "attraction released");
                self.released_attraction = Some(hit.area);
            }
            // A loss requested during this episode must not leak into the next.
            self.lose_attraction.clear();
        }
        Ok(())
    }

    fn start_episode(&mut self, now: SimTime) {
        self.start_timestamp = now;
        self.current_episode += 1;
        self.state_max_duration = self
            .config
            .base_duration(self.state)
            .map(|base| self.timing.random_duration(base, &mut self.rng));
    }

    // ── Tick evaluation ───────────────────────────────────────────────────

    /// Evaluate transition conditions for this tick.  See the module docs for
    /// the priority order.  Returns the change if an activation happened.
    pub fn do_state_transition(
        &mut self,
        ctx:      &BehaviorContext<'_>,
        planners: &mut PlannerRegistry,
    ) -> BehaviorResult<Option<StateChange>> {
        let now = ctx.now;
        let lose_requested = self.lose_attraction.take();
        let trigger_fired = std::mem::take(&mut self.trigger_pending);

        // ── ① Distraction overlay ─────────────────────────────────────────
        if self.distraction.expired(now) {
            tracing::debug!(agent = %self.agent, distraction = %self.distraction.current(), "distraction budget spent");
            self.deactivate_distraction();
        }
        if let Some(distraction) = self.distraction.take_onset() {
            let budget = self.get_random_duration(self.config.distraction_duration);
            let branch = distraction.branch();
            self.distraction.start(now, budget, branch);
            if let Some(branch) = branch.filter(|&b| b != self.state) {
                return self.activate_state(branch, ctx, planners);
            }
        }
        if let Some(branch) = self.distraction.take_release() {
            if branch == self.state {
                return self.activate_state(self.normal_state, ctx, planners);
            }
        }

        // ── ② Attraction ──────────────────────────────────────────────────
        if lose_requested {
            if self.state == ATTRACTION_RESPONSE && self.group_attraction.is_some() {
                return self.activate_state(self.normal_state, ctx, planners);
            }
            tracing::trace!(agent = %self.agent, state = %self.state, "no attraction to lose; request ignored");
        }
        if !self.distraction.is_active() && self.state.is_attractable() {
            if let Some(hit) = check_group_for_attractions(self.agent, ctx) {
                if self.cooling_down(hit.area, now) {
                    tracing::trace!(agent = %self.agent, area = %hit.area, "attraction on cooldown");
                } else {
                    tracing::debug!(
                        agent = %self.agent,
                        area = %hit.area,
                        name = %hit.name,
                        member = %hit.member,
                        "group attraction detected"
                    );
                    self.group_attraction = Some(hit);
                    return self.activate_state(ATTRACTION_RESPONSE, ctx, planners);
                }
            }
        }

        // ── ③ Trigger / time budget ───────────────────────────────────────
        if trigger_fired {
            if self.state == BehaviorState::WaitForTrigger {
                return self.activate_successor(ctx, planners);
            }
            tracing::warn!(agent = %self.agent, state = %self.state, "trigger fired outside WaitForTrigger; discarded");
        }
        if let Some(max) = self.state_max_duration {
            if now.since(self.start_timestamp) >= max {
                return self.activate_successor(ctx, planners);
            }
        }

        // ── ④ Destination ─────────────────────────────────────────────────
        if !self.distraction.is_active() {
            if let Some(next) = self.state_for_destination(ctx).filter(|&s| s != self.state) {
                return self.activate_state(next, ctx, planners);
            }
        }

        tracing::trace!(agent = %self.agent, state = %self.state, "no transition");
        Ok(None)
    }

    fn activate_successor(
        &mut self,
        ctx:      &BehaviorContext<'_>,
        planners: &mut PlannerRegistry,
    ) -> BehaviorResult<Option<StateChange>> {
        let next = match self.state.successor() {
            Successor::Stay => return Ok(None),
            Successor::Normal => self.normal_state,
            Successor::State(next) => next,
        };
        self.activate_state(next, ctx, planners)
    }

    fn cooling_down(&self, area: AreaId, now: SimTime) -> bool {
        match self.cooldown {
            Some((cooled, since)) => cooled == area && now.since(since) < self.config.attraction_cooldown,
            None => false,
        }
    }

    /// State to adopt for the agent's destination, when one should be picked.
    fn state_for_destination(&self, ctx: &BehaviorContext<'_>) -> Option<BehaviorState> {
        let routable = self.state == BehaviorState::None
            || (self.state.is_base() && ctx.agents.needs_new_destination(self.agent));
        if !routable {
            return None;
        }

        let next = match ctx.agents.destination(self.agent) {
            Destination::None => BehaviorState::Waiting,
            Destination::Queue => BehaviorState::Queueing,
            Destination::Waypoint => {
                let in_group = ctx
                    .agents
                    .group_of(self.agent)
                    .is_some_and(|g| ctx.agents.group_members(g).len() >= 2);
                if in_group {
                    BehaviorState::GroupWalking
                } else {
                    BehaviorState::Walking
                }
            }
        };
        Some(next)
    }
}

impl std::fmt::Debug for AgentStateMachine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentStateMachine")
            .field("agent", &self.agent)
            .field("state", &self.state)
            .field("normal_state", &self.normal_state)
            .field("distraction", &self.distraction.current())
            .field("episode", &self.current_episode)
            .field("start_timestamp", &self.start_timestamp)
            .field("state_max_duration", &self.state_max_duration)
            .field("observers", &self.observers.len())
            .finish()
    }
}
