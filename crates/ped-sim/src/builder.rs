//! Fluent builder for constructing a [`Sim`].

use std::sync::Arc;

use ped_agent::AgentStore;
use ped_behavior::{
    AgentStateMachine, BehaviorConfig, BehaviorContext, BehaviorState, PlannerFamily,
    PlannerRegistry, TargetPlanner, WaypointPlanner,
};
use ped_core::SimConfig;
use ped_spatial::AttractionIndex;

use crate::{Sim, SimError, SimResult};

type PlannerFactory = Box<dyn FnMut(PlannerFamily) -> Box<dyn WaypointPlanner>>;

/// Fluent builder for [`Sim`].
///
/// # Required inputs
///
/// - [`SimConfig`]: time step, total ticks, seed
/// - [`AgentStore`]: from [`ped_agent::AgentStoreBuilder`]
///
/// # Optional inputs (have defaults)
///
/// | Method                   | Default                               |
/// |--------------------------|---------------------------------------|
/// | `.behavior(c)`           | `BehaviorConfig::default()`           |
/// | `.attractions(i)`        | `AttractionIndex::empty()`            |
/// | `.planners(f)`           | one `TargetPlanner` per family        |
/// | `.initial_states(v)`     | every agent starts in `None`          |
///
/// # Example
///
/// ```rust,ignore
/// let store = AgentStoreBuilder::new(n).build()?;
/// let mut sim = SimBuilder::new(config, store)
///     .attractions(load_attractions_csv("shops.csv")?)
///     .build()?;
/// sim.run(&mut TracingObserver::new())?;
/// ```
pub struct SimBuilder {
    config:         SimConfig,
    agents:         AgentStore,
    behavior:       BehaviorConfig,
    attractions:    Option<AttractionIndex>,
    planners:       Option<PlannerFactory>,
    initial_states: Option<Vec<BehaviorState>>,
}

impl SimBuilder {
    pub fn new(config: SimConfig, agents: AgentStore) -> Self {
        Self {
            config,
            agents,
            behavior:       BehaviorConfig::default(),
            attractions:    None,
            planners:       None,
            initial_states: None,
        }
    }

    pub fn behavior(mut self, behavior: BehaviorConfig) -> Self {
        self.behavior = behavior;
        self
    }

    pub fn attractions(mut self, attractions: AttractionIndex) -> Self {
        self.attractions = Some(attractions);
        self
    }

    /// Planner constructor, called once per agent per family.
    pub fn planners<F>(mut self, make: F) -> Self
    where
        F: FnMut(PlannerFamily) -> Box<dyn WaypointPlanner> + 'static,
    {
        self.planners = Some(Box::new(make));
        self
    }

    /// State each agent is put in before the first tick (must be length
    /// `agent_count`).  `None` entries are left for destination routing.
    pub fn initial_states(mut self, states: Vec<BehaviorState>) -> Self {
        self.initial_states = Some(states);
        self
    }

    /// Validate inputs, register planners, create one machine per agent and
    /// apply the initial states at t = 0.
    pub fn build(self) -> SimResult<Sim> {
        self.config.validate()?;
        self.behavior.validate()?;

        let agent_count = self.agents.count;
        if let Some(states) = &self.initial_states {
            if states.len() != agent_count {
                return Err(SimError::AgentCountMismatch {
                    expected: agent_count,
                    got:      states.len(),
                    what:     "initial states",
                });
            }
        }

        // ── Planners and machines ─────────────────────────────────────────
        let mut make: PlannerFactory = match self.planners {
            Some(make) => make,
            None => Box::new(TargetPlanner::boxed),
        };
        let mut planners = PlannerRegistry::new();
        let behavior = Arc::new(self.behavior);
        let machines: Vec<AgentStateMachine> = self
            .agents
            .agent_ids()
            .map(|agent| {
                let handles = planners.register_set(&mut make);
                AgentStateMachine::new(agent, handles, Arc::clone(&behavior), self.config.seed)
            })
            .collect();

        if planners.len() != agent_count * PlannerFamily::ALL.len() {
            return Err(SimError::Config(format!(
                "expected {} planners, registered {}",
                agent_count * PlannerFamily::ALL.len(),
                planners.len()
            )));
        }

        let mut sim = Sim {
            clock:       self.config.make_clock(),
            config:      self.config,
            agents:      self.agents,
            attractions: self.attractions.unwrap_or_default(),
            planners,
            machines,
        };

        // ── Initial states ────────────────────────────────────────────────
        if let Some(states) = self.initial_states {
            let ctx = BehaviorContext::new(&sim.clock, &sim.agents, &sim.attractions);
            for (machine, state) in sim.machines.iter_mut().zip(states) {
                if state != BehaviorState::None {
                    machine.activate_state(state, &ctx, &mut sim.planners)?;
                }
            }
        }

        tracing::debug!(
            agents = agent_count,
            attractions = sim.attractions.len(),
            total_ticks = sim.config.total_ticks,
            "simulation built"
        );
        Ok(sim)
    }
}
