//! Integration tests for ped-sim.

use ped_agent::{AgentStore, AgentStoreBuilder, Destination};
use ped_behavior::{BehaviorConfig, BehaviorState, StateChange};
use ped_core::{AgentId, AreaId, GroupId, Point2, SimConfig, Tick};
use ped_spatial::{AttractionArea, AttractionIndex};

use crate::{NoopObserver, SimBuilder, SimError, SimObserver, TracingObserver};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// One-second ticks keep the arithmetic exact.
fn test_config(total_ticks: u64) -> SimConfig {
    SimConfig {
        time_step_secs: 1.0,
        total_ticks,
        seed: 42,
    }
}

fn exact() -> BehaviorConfig {
    BehaviorConfig::default().with_jitter(0.0)
}

fn idle_store(n: usize) -> AgentStore {
    AgentStoreBuilder::new(n).build().unwrap()
}

fn bakery() -> AttractionIndex {
    AttractionIndex::new(vec![AttractionArea::new(
        AreaId(0),
        "bakery",
        Point2::new(10.0, 0.0),
        2.0,
    )])
    .unwrap()
}

#[derive(Default)]
struct Recorder {
    started:  Vec<Tick>,
    changes:  Vec<StateChange>,
    per_tick: Vec<usize>,
    ended:    Option<Tick>,
}

impl SimObserver for Recorder {
    fn on_tick_start(&mut self, tick: Tick) {
        self.started.push(tick);
    }
    fn on_state_change(&mut self, change: &StateChange) {
        self.changes.push(change.clone());
    }
    fn on_tick_end(&mut self, _tick: Tick, changes: usize) {
        self.per_tick.push(changes);
    }
    fn on_sim_end(&mut self, final_tick: Tick) {
        self.ended = Some(final_tick);
    }
}

// ── SimBuilder validation ─────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use ped_behavior::TargetPlanner;

    use super::*;

    #[test]
    fn builds_successfully_with_defaults() {
        let sim = SimBuilder::new(test_config(10), idle_store(3)).build().unwrap();
        assert_eq!(sim.machines().len(), 3);
        assert_eq!(sim.planners.len(), 12);
        assert!(sim.attractions.is_empty());
        for machine in sim.machines() {
            assert_eq!(machine.current_state(), BehaviorState::None);
        }
    }

    #[test]
    fn zero_time_step_errors() {
        let config = SimConfig { time_step_secs: 0.0, ..test_config(10) };
        let result = SimBuilder::new(config, idle_store(1)).build();
        assert!(matches!(result, Err(SimError::Core(_))));
    }

    #[test]
    fn invalid_behavior_config_errors() {
        let result = SimBuilder::new(test_config(10), idle_store(1))
            .behavior(BehaviorConfig::default().with_jitter(2.0))
            .build();
        assert!(matches!(result, Err(SimError::Behavior(_))));
    }

    #[test]
    fn initial_state_count_mismatch_errors() {
        let result = SimBuilder::new(test_config(10), idle_store(3))
            .initial_states(vec![BehaviorState::Working; 2])
            .build();
        assert!(matches!(
            result,
            Err(SimError::AgentCountMismatch { expected: 3, got: 2, .. })
        ));
    }

    #[test]
    fn initial_states_applied() {
        let sim = SimBuilder::new(test_config(10), idle_store(2))
            .initial_states(vec![BehaviorState::LiftingForks, BehaviorState::None])
            .build()
            .unwrap();
        assert_eq!(sim.state_of(AgentId(0)), Some(BehaviorState::LiftingForks));
        assert_eq!(sim.state_of(AgentId(1)), Some(BehaviorState::None));
    }

    #[test]
    fn planner_factory_called_per_agent_and_family() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let sim = SimBuilder::new(test_config(10), idle_store(5))
            .planners(move |family| {
                counter.set(counter.get() + 1);
                TargetPlanner::boxed(family)
            })
            .build()
            .unwrap();
        assert_eq!(calls.get(), 20);
        assert_eq!(sim.planners.len(), 20);
    }
}

// ── Tick loop ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod run_tests {
    use super::*;

    #[test]
    fn run_reaches_end_tick() {
        let mut sim = SimBuilder::new(test_config(10), idle_store(1)).build().unwrap();
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();
        assert_eq!(rec.started, (0..10).map(Tick).collect::<Vec<_>>());
        assert_eq!(rec.ended, Some(Tick(10)));
        assert_eq!(sim.clock.current_tick, Tick(10));
    }

    #[test]
    fn run_ticks_ignores_end_tick() {
        let mut sim = SimBuilder::new(test_config(2), idle_store(1)).build().unwrap();
        sim.run_ticks(5, &mut NoopObserver).unwrap();
        assert_eq!(sim.clock.current_tick, Tick(5));
    }

    #[test]
    fn first_tick_routes_in_agent_order() {
        let store = AgentStoreBuilder::new(3)
            .destination(AgentId(0), Destination::None)
            .destination(AgentId(1), Destination::Queue)
            .destination(AgentId(2), Destination::Waypoint)
            .build()
            .unwrap();
        let mut sim = SimBuilder::new(test_config(1), store).behavior(exact()).build().unwrap();
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();

        let got: Vec<_> = rec.changes.iter().map(|c| (c.agent, c.state)).collect();
        assert_eq!(
            got,
            [
                (AgentId(0), BehaviorState::Waiting),
                (AgentId(1), BehaviorState::Queueing),
                (AgentId(2), BehaviorState::Walking),
            ]
        );
        assert_eq!(rec.per_tick, [3]);
    }

    #[test]
    fn waiting_leaves_after_five_seconds() {
        let mut sim = SimBuilder::new(test_config(8), idle_store(1)).behavior(exact()).build().unwrap();
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();

        let got: Vec<_> = rec.changes.iter().map(|c| (c.at.secs(), c.state)).collect();
        assert_eq!(got, [(0.0, BehaviorState::Waiting), (5.0, BehaviorState::Walking)]);
    }

    #[test]
    fn forklift_cycle() {
        let mut sim = SimBuilder::new(test_config(20), idle_store(1))
            .behavior(exact())
            .initial_states(vec![BehaviorState::LiftingForks])
            .build()
            .unwrap();
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();

        let got: Vec<_> = rec.changes.iter().map(|c| (c.at.secs(), c.state)).collect();
        assert_eq!(
            got,
            [
                (3.0, BehaviorState::Loading),
                (11.0, BehaviorState::LoweringForks),
                (14.0, BehaviorState::Driving),
            ]
        );
    }

    #[test]
    fn same_seed_same_history() {
        let history = || {
            let config = SimConfig { time_step_secs: 0.5, total_ticks: 200, seed: 9 };
            let mut sim = SimBuilder::new(config, idle_store(20)).build().unwrap();
            let mut rec = Recorder::default();
            sim.run(&mut rec).unwrap();
            rec.changes
        };
        let first = history();
        assert!(!first.is_empty());
        assert_eq!(first, history());
    }

    #[test]
    fn tracing_observer_counts_changes() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
        let mut sim = SimBuilder::new(test_config(6), idle_store(2)).behavior(exact()).build().unwrap();
        let mut observer = TracingObserver::new();
        sim.run(&mut observer).unwrap();
        assert_eq!(observer.changes(), 4);
    }
}

// ── External requests ─────────────────────────────────────────────────────────

#[cfg(test)]
mod scenario_tests {
    use ped_behavior::DistractionState;

    use super::*;

    fn strolling_couple() -> crate::Sim {
        let store = AgentStoreBuilder::new(2)
            .position(AgentId(0), Point2::new(0.0, 0.0))
            .position(AgentId(1), Point2::new(1.0, 0.0))
            .destination(AgentId(0), Destination::Waypoint)
            .destination(AgentId(1), Destination::Waypoint)
            .group(GroupId(4), &[AgentId(0), AgentId(1)])
            .build()
            .unwrap();
        SimBuilder::new(test_config(100), store)
            .behavior(exact())
            .attractions(bakery())
            .build()
            .unwrap()
    }

    #[test]
    fn couple_stops_at_bakery_and_moves_on() {
        let mut sim = strolling_couple();
        sim.run_ticks(1, &mut NoopObserver).unwrap();
        assert_eq!(sim.state_of(AgentId(0)), Some(BehaviorState::GroupWalking));
        assert_eq!(sim.state_of(AgentId(1)), Some(BehaviorState::GroupWalking));

        sim.agents.position[1] = Point2::new(9.0, 0.5);
        sim.run_ticks(1, &mut NoopObserver).unwrap();
        for agent in [AgentId(0), AgentId(1)] {
            let machine = sim.machine(agent).unwrap();
            assert_eq!(machine.current_state(), BehaviorState::Shopping);
            assert_eq!(machine.current_attraction().map(|h| h.member), Some(AgentId(1)));
        }

        sim.lose_attraction(AgentId(0)).unwrap();
        sim.run_ticks(1, &mut NoopObserver).unwrap();
        assert_eq!(sim.state_of(AgentId(0)), Some(BehaviorState::GroupWalking));
        assert_eq!(sim.state_of(AgentId(1)), Some(BehaviorState::Shopping));
    }

    #[test]
    fn distraction_round_trip() {
        let mut sim = strolling_couple();
        sim.run_ticks(1, &mut NoopObserver).unwrap();

        sim.activate_distraction(AgentId(0), DistractionState::Kremer).unwrap();
        sim.run_ticks(1, &mut NoopObserver).unwrap();
        assert_eq!(sim.state_of(AgentId(0)), Some(BehaviorState::WaitForTrigger));

        sim.deactivate_distraction(AgentId(0)).unwrap();
        sim.run_ticks(1, &mut NoopObserver).unwrap();
        assert_eq!(sim.state_of(AgentId(0)), Some(BehaviorState::GroupWalking));
    }

    #[test]
    fn trigger_and_direct_activation() {
        let mut sim = SimBuilder::new(test_config(10), idle_store(1)).behavior(exact()).build().unwrap();
        let change = sim.activate_state(AgentId(0), BehaviorState::WaitForTrigger).unwrap().unwrap();
        assert_eq!(change.previous, BehaviorState::None);

        sim.run_ticks(3, &mut NoopObserver).unwrap();
        assert_eq!(sim.state_of(AgentId(0)), Some(BehaviorState::WaitForTrigger));

        sim.fire_trigger(AgentId(0)).unwrap();
        sim.run_ticks(1, &mut NoopObserver).unwrap();
        assert_eq!(sim.state_of(AgentId(0)), Some(BehaviorState::Walking));
    }

    #[test]
    fn unknown_agent_errors() {
        let mut sim = SimBuilder::new(test_config(10), idle_store(1)).build().unwrap();
        assert!(matches!(sim.lose_attraction(AgentId(5)), Err(SimError::Core(_))));
        assert!(sim.activate_state(AgentId(5), BehaviorState::Walking).is_err());
        assert!(sim.machine(AgentId(5)).is_none());
    }
}
