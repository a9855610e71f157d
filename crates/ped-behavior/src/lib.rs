//! `ped-behavior`: the per-agent behavior state machine.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                        |
//! |-----------------|-----------------------------------------------------------------|
//! | [`state`]       | `BehaviorState`: the closed set of high-level behaviors         |
//! | [`table`]       | Classification table: family, base, duration, successor, planner|
//! | [`distraction`] | `DistractionState`, `DistractionOverlay`                        |
//! | [`duration`]    | `DurationPolicy`: jittered time budgets                         |
//! | [`config`]      | `BehaviorConfig`: durations, jitter, cooldown                   |
//! | [`context`]     | `BehaviorContext<'a>`, `AgentContext`: read-only tick snapshot  |
//! | [`attraction`]  | `check_group_for_attractions`, `AttractionHit`                  |
//! | [`planner`]     | `WaypointPlanner` trait, registry, per-agent selector           |
//! | [`observer`]    | `StateChange`, `StateObserver`                                  |
//! | [`machine`]     | `AgentStateMachine`, `LoseAttractionHandle`                     |
//! | [`error`]       | `BehaviorError`, `BehaviorResult<T>`                            |
//!
//! # Design notes
//!
//! The driver (see `ped-sim`) owns every planner in a [`PlannerRegistry`] and
//! every agent's [`AgentStateMachine`].  Once per tick it builds one
//! [`BehaviorContext`] and calls `do_state_transition` for each agent in
//! ascending `AgentId` order.  A machine changes state only from inside that
//! call or an explicit `activate_state`; everything else (lose-attraction,
//! triggers, distractions) is a request picked up on the next evaluation.

pub mod attraction;
pub mod config;
pub mod context;
pub mod distraction;
pub mod duration;
pub mod error;
pub mod machine;
pub mod observer;
pub mod planner;
pub mod state;
pub mod table;


pub use attraction::{check_group_for_attractions, AttractionHit};
pub use config::BehaviorConfig;
pub use context::{AgentContext, BehaviorContext};
pub use distraction::{DistractionOverlay, DistractionState};
pub use duration::DurationPolicy;
pub use error::{BehaviorError, BehaviorResult};
pub use machine::{AgentStateMachine, LoseAttractionHandle, ATTRACTION_RESPONSE};
pub use observer::{StateChange, StateObserver};
pub use planner::{
    PlannerActivation, PlannerFamily, PlannerHandles, PlannerRegistry, PlannerSelector,
    TargetPlanner, WaypointPlanner,
};
pub use state::BehaviorState;
pub use table::{BehaviorFamily, StateTraits, Successor};
