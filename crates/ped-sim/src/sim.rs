//! The `Sim` struct and its tick loop.

use ped_agent::AgentStore;
use ped_behavior::{
    AgentStateMachine, BehaviorContext, BehaviorState, DistractionState, PlannerRegistry,
    StateChange,
};
use ped_core::{AgentId, Clock, PedError, SimClock, SimConfig, SimTime, Tick};
use ped_spatial::AttractionIndex;

use crate::{SimObserver, SimResult};

/// The main simulation runner.
///
/// Each tick samples the clock once, builds a single [`BehaviorContext`]
/// and evaluates every agent's [`AgentStateMachine`] in ascending `AgentId`
/// order.  Positions, destinations and groups in [`agents`](Self::agents)
/// are written by the embedding application between ticks.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim {
    /// Global configuration (time step, total ticks, seed).
    pub config: SimConfig,

    /// Simulation clock: tracks the current tick and maps it to seconds.
    pub clock: SimClock,

    /// Agent state the machines read: positions, groups, destinations.
    pub agents: AgentStore,

    /// Attraction areas of the scene.
    pub attractions: AttractionIndex,

    /// Owner of every agent's planners.
    pub planners: PlannerRegistry,

    pub(crate) machines: Vec<AgentStateMachine>,
}

impl Sim {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run the simulation from the current tick to `config.end_tick()`.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        while self.clock.current_tick < self.config.end_tick() {
            self.step(observer)?;
        }
        observer.on_sim_end(self.clock.current_tick);
        Ok(())
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.step(observer)?;
        }
        Ok(())
    }

    /// Current simulated time.
    #[inline]
    pub fn now(&self) -> SimTime {
        self.clock.now()
    }

    pub fn machines(&self) -> &[AgentStateMachine] {
        &self.machines
    }

    pub fn machine(&self, agent: AgentId) -> Option<&AgentStateMachine> {
        self.machines.get(agent.index())
    }

    /// Mutable access, e.g. to subscribe per-agent observers.
    pub fn machine_mut(&mut self, agent: AgentId) -> SimResult<&mut AgentStateMachine> {
        self.machines
            .get_mut(agent.index())
            .ok_or_else(|| PedError::AgentNotFound(agent).into())
    }

    pub fn state_of(&self, agent: AgentId) -> Option<BehaviorState> {
        self.machine(agent).map(AgentStateMachine::current_state)
    }

    // ── External requests ─────────────────────────────────────────────────

    /// Activate `state` for `agent` right away, at the current time.
    pub fn activate_state(
        &mut self,
        agent: AgentId,
        state: BehaviorState,
    ) -> SimResult<Option<StateChange>> {
        let machine = self
            .machines
            .get_mut(agent.index())
            .ok_or(PedError::AgentNotFound(agent))?;
        let ctx = BehaviorContext::new(&self.clock, &self.agents, &self.attractions);
        Ok(machine.activate_state(state, &ctx, &mut self.planners)?)
    }

    pub fn lose_attraction(&mut self, agent: AgentId) -> SimResult<()> {
        self.machine_mut(agent)?.lose_attraction();
        Ok(())
    }

    pub fn activate_distraction(&mut self, agent: AgentId, distraction: DistractionState) -> SimResult<()> {
        self.machine_mut(agent)?.activate_distraction(distraction);
        Ok(())
    }

    pub fn deactivate_distraction(&mut self, agent: AgentId) -> SimResult<()> {
        self.machine_mut(agent)?.deactivate_distraction();
        Ok(())
    }

    pub fn fire_trigger(&mut self, agent: AgentId) -> SimResult<()> {
        self.machine_mut(agent)?.fire_trigger();
        Ok(())
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn step<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);
        let changes = self.process_tick(now, observer)?;
        observer.on_tick_end(now, changes);
        self.clock.advance();
        Ok(())
    }

    fn process_tick<O: SimObserver>(&mut self, tick: Tick, observer: &mut O) -> SimResult<usize> {
        let ctx = BehaviorContext::new(&self.clock, &self.agents, &self.attractions);
        let mut changes = 0;

        // Machines are stored by AgentId, so this is ascending-id order.
        for machine in &mut self.machines {
            if let Some(change) = machine.do_state_transition(&ctx, &mut self.planners)? {
                observer.on_state_change(&change);
                changes += 1;
            }
        }

        tracing::trace!(%tick, now = %ctx.now, changes, "tick processed");
        Ok(changes)
    }
}
