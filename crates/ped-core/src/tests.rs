//! Unit tests for ped-core primitives.

#[cfg(test)]
mod ids {
    use crate::{AgentId, AreaId, GroupId, PlannerId};

    #[test]
    fn index_roundtrip() {
        let id = AgentId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(AgentId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn ordering() {
        assert!(AgentId(0) < AgentId(1));
        assert!(AreaId(100) > AreaId(99));
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(AgentId::INVALID.0, u32::MAX);
        assert_eq!(GroupId::INVALID.0, u32::MAX);
        assert_eq!(PlannerId::default(), PlannerId::INVALID);
        assert!(!GroupId::default().is_valid());
        assert!(GroupId(0).is_valid());
    }

    #[test]
    fn display() {
        assert_eq!(AgentId(7).to_string(), "AgentId(7)");
        assert_eq!(AreaId(3).to_string(), "AreaId(3)");
    }
}

#[cfg(test)]
mod geo {
    use crate::Point2;

    #[test]
    fn zero_distance() {
        let p = Point2::new(3.0, -8.0);
        assert_eq!(p.distance(p), 0.0);
    }

    #[test]
    fn pythagorean_distance() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(3.0, 4.0);
        assert!((a.distance(b) - 5.0).abs() < 1e-12);
        assert!((a.distance_sq(b) - 25.0).abs() < 1e-12);
    }

    #[test]
    fn array_conversion() {
        let p = Point2::from([1.5, 2.5]);
        assert_eq!(p.to_array(), [1.5, 2.5]);
    }
}

#[cfg(test)]
mod time {
    use crate::{Clock, SimClock, SimConfig, SimTime, Tick};

    #[test]
    fn tick_arithmetic() {
        let t = Tick(10);
        assert_eq!(t + 5, Tick(15));
        assert_eq!(t.offset(3), Tick(13));
        assert_eq!(Tick(15).since(Tick(10)), 5u64);
    }

    #[test]
    fn clock_now_follows_ticks() {
        let mut clock = SimClock::new(0.5);
        assert_eq!(clock.now(), SimTime::ZERO);
        clock.advance();
        clock.advance();
        assert_eq!(clock.now(), SimTime(1.0));
        assert_eq!(clock.current_tick, Tick(2));
    }

    #[test]
    fn sim_time_since_never_negative() {
        assert_eq!(SimTime(2.0).since(SimTime(5.0)), 0.0);
        assert!((SimTime(5.1).since(SimTime(0.0)) - 5.1).abs() < 1e-12);
    }

    #[test]
    fn frozen_clock() {
        let t = SimTime(4.9);
        assert_eq!(t.now(), t);
    }

    #[test]
    fn ticks_for_secs_rounds_up() {
        let clock = SimClock::new(0.1);
        assert_eq!(clock.ticks_for_secs(1.0), 10);
        assert_eq!(clock.ticks_for_secs(0.05), 1);
        assert_eq!(clock.ticks_for_secs(0.0), 0);
    }

    #[test]
    fn sim_config_end_tick() {
        let cfg = SimConfig { time_step_secs: 0.1, total_ticks: 600, seed: 42 };
        assert_eq!(cfg.end_tick(), Tick(600));
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn sim_config_rejects_bad_step() {
        let cfg = SimConfig { time_step_secs: 0.0, ..SimConfig::default() };
        assert!(cfg.validate().is_err());
        let cfg = SimConfig { time_step_secs: f64::NAN, ..SimConfig::default() };
        assert!(cfg.validate().is_err());
    }
}

#[cfg(test)]
mod rng {
    use crate::{AgentId, AgentRng, SimRng};

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = AgentRng::new(12345, AgentId(0));
        let mut r2 = AgentRng::new(12345, AgentId(0));
        for _ in 0..100 {
            let a: f64 = r1.gen_range(0.0..1.0);
            let b: f64 = r2.gen_range(0.0..1.0);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn different_agents_differ() {
        let mut r0 = AgentRng::new(1, AgentId(0));
        let mut r1 = AgentRng::new(1, AgentId(1));
        let a: Vec<u64> = (0..4).map(|_| r0.gen_range(0..u64::MAX)).collect();
        let b: Vec<u64> = (0..4).map(|_| r1.gen_range(0..u64::MAX)).collect();
        assert_ne!(a, b, "seeds for adjacent agents should diverge");
    }

    #[test]
    fn gen_range_in_bounds() {
        let mut rng = AgentRng::new(0, AgentId(0));
        for _ in 0..1000 {
            let v = rng.gen_range(-0.25f64..=0.25);
            assert!((-0.25..=0.25).contains(&v));
        }
    }

    #[test]
    fn sim_rng_is_reproducible() {
        let mut a = SimRng::new(9);
        let mut b = SimRng::new(9);
        for _ in 0..10 {
            let x: f64 = a.gen_range(0.0..40.0);
            let y: f64 = b.gen_range(0.0..40.0);
            assert_eq!(x, y);
        }
    }
}
