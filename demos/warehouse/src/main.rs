//! warehouse: a small mixed-traffic floor for the pedestrian behavior
//! framework.
//!
//! A 40 m aisle with a bakery stand and a tool counter along one side.
//! Four pedestrians walk the aisle on their own, a couple strolls past the
//! bakery, one customer queues at the counter and a forklift runs its
//! lift / load / lower cycle.  Movement is a toy model: anyone whose planner
//! is moving them steps along +x at walking speed and wraps at the far wall.
//!
//! Run with `RUST_LOG=debug` to see every activation.

use std::collections::BTreeMap;
use std::io::Cursor;

use anyhow::Result;

use ped_agent::{AgentStoreBuilder, Destination};
use ped_behavior::{BehaviorConfig, BehaviorState, DistractionState, PlannerFamily, StateChange};
use ped_core::{AgentId, GroupId, Point2, SimConfig, SimRng, Tick};
use ped_sim::{SimBuilder, SimObserver, TracingObserver};
use ped_spatial::load_attractions_reader;

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:           u64 = 42;
const TIME_STEP_SECS: f64 = 0.5;
const TOTAL_TICKS:    u64 = 240; // two minutes
const AISLE_LENGTH:   f64 = 40.0;
const WALK_SPEED:     f64 = 1.2; // m/s

const WALKERS:  [AgentId; 4] = [AgentId(0), AgentId(1), AgentId(2), AgentId(3)];
const COUPLE:   [AgentId; 2] = [AgentId(4), AgentId(5)];
const CUSTOMER: AgentId      = AgentId(6);
const FORKLIFT: AgentId      = AgentId(7);
const AGENT_COUNT: usize     = 8;

// ── Attraction areas ──────────────────────────────────────────────────────────

const ATTRACTIONS_CSV: &str = "\
id,name,x,y,radius\n\
0,bakery stand,18.0,1.5,2.0\n\
1,tool counter,32.0,1.5,1.5\n\
";

// ── Observer ──────────────────────────────────────────────────────────────────

/// Counts entries per state and forwards everything to the tracing log.
#[derive(Default)]
struct EntryCounter {
    log:     TracingObserver,
    entries: BTreeMap<BehaviorState, usize>,
}

impl SimObserver for EntryCounter {
    fn on_state_change(&mut self, change: &StateChange) {
        *self.entries.entry(change.state).or_default() += 1;
        self.log.on_state_change(change);
    }

    fn on_tick_end(&mut self, tick: Tick, changes: usize) {
        self.log.on_tick_end(tick, changes);
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.log.on_sim_end(final_tick);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    println!("=== warehouse: pedestrian behavior demo ===");
    println!("Agents: {AGENT_COUNT}  |  Ticks: {TOTAL_TICKS} × {TIME_STEP_SECS} s  |  Seed: {SEED}");
    println!();

    // 1. Scene.
    let attractions = load_attractions_reader(Cursor::new(ATTRACTIONS_CSV))?;
    println!("Loaded {} attraction areas", attractions.len());

    let mut layout = SimRng::new(SEED);
    let mut builder = AgentStoreBuilder::new(AGENT_COUNT);
    for agent in WALKERS {
        // Walkers use the far side of the aisle, clear of the stands.
        let at = Point2::new(layout.gen_range(0.0..AISLE_LENGTH), layout.gen_range(5.0..6.0));
        builder = builder.position(agent, at).destination(agent, Destination::Waypoint);
    }
    for (i, agent) in COUPLE.into_iter().enumerate() {
        builder = builder
            .position(agent, Point2::new(2.0 + i as f64 * 0.6, 1.5))
            .destination(agent, Destination::Waypoint);
    }
    let store = builder
        .group(GroupId(0), &COUPLE)
        .position(CUSTOMER, Point2::new(34.0, 4.0))
        .destination(CUSTOMER, Destination::Queue)
        .position(FORKLIFT, Point2::new(10.0, 8.0))
        .build()?;

    // 2. Sim.
    let config = SimConfig {
        time_step_secs: TIME_STEP_SECS,
        total_ticks:    TOTAL_TICKS,
        seed:           SEED,
    };
    let mut initial = vec![BehaviorState::None; AGENT_COUNT];
    initial[FORKLIFT.index()] = BehaviorState::LiftingForks;

    let mut sim = SimBuilder::new(config, store)
        .behavior(BehaviorConfig::default())
        .attractions(attractions)
        .initial_states(initial)
        .build()?;

    // 3. Run, moving agents between ticks.
    let mut observer = EntryCounter::default();
    let distracted = WALKERS[0];
    while sim.clock.current_tick < sim.config.end_tick() {
        match sim.clock.current_tick.0 {
            20 => sim.activate_distraction(distracted, DistractionState::Pam)?,
            40 => sim.deactivate_distraction(distracted)?,
            _ => {}
        }
        sim.run_ticks(1, &mut observer)?;
        step_positions(&mut sim);
    }
    observer.on_sim_end(sim.clock.current_tick);

    // 4. Summary.
    println!();
    println!("{:<22} {:>7}", "State", "Entries");
    println!("{}", "-".repeat(30));
    for (state, count) in &observer.entries {
        println!("{:<22} {:>7}", state.name(), count);
    }

    println!();
    println!("{:<8} {:<16} {:<16} {:>8}", "Agent", "State", "Normal", "x (m)");
    println!("{}", "-".repeat(52));
    for machine in sim.machines() {
        let agent = machine.agent();
        println!(
            "{:<8} {:<16} {:<16} {:>8.1}",
            agent.0,
            machine.current_state().name(),
            machine.normal_state().name(),
            sim.agents.position[agent.index()].x,
        );
    }

    Ok(())
}

/// Toy navigation: moving planners advance their agent along the aisle.
/// Reaching the far wall counts as arriving; the agent is sent back to the
/// start with a fresh waypoint.
fn step_positions(sim: &mut ped_sim::Sim) {
    let dx = WALK_SPEED * sim.config.time_step_secs;
    let moving: Vec<(AgentId, bool)> = sim
        .machines()
        .iter()
        .map(|m| {
            let walks = matches!(
                m.active_planner(),
                Some(PlannerFamily::Individual | PlannerFamily::Group)
            ) && m.current_state().is_base();
            (m.agent(), walks)
        })
        .collect();

    for (agent, walks) in moving {
        let i = agent.index();
        sim.agents.needs_destination[i] = false;
        if !walks || agent == FORKLIFT {
            continue;
        }
        let p = &mut sim.agents.position[i];
        p.x += dx;
        if p.x >= AISLE_LENGTH {
            p.x -= AISLE_LENGTH;
            sim.agents.needs_destination[i] = true;
        }
    }
}
