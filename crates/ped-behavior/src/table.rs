//! Static classification of every [`BehaviorState`].
//!
//! One exhaustive `match` answers every per-state question the machine asks:
//!
//! | Column        | Meaning                                                   |
//! |---------------|-----------------------------------------------------------|
//! | `family`      | Grouping used for logs and policy                         |
//! | `is_base`     | May be recorded as the agent's NormalState                |
//! | `base_secs`   | Default time budget; `Some` ⇔ the state is time-bounded   |
//! | `successor`   | Where the agent goes when the state's exit condition fires|
//! | `planner`     | Planner family handed control; `None` = stand still       |
//! | `attractable` | A group attraction may pre-empt this state                |
//!
//! Adding a variant to `BehaviorState` without a row here is a compile error.

use crate::{BehaviorState, PlannerFamily};

/// Coarse grouping of behavior states.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum BehaviorFamily {
    Sentinel,
    Social,
    Locomotion,
    Task,
    Vehicle,
    Guidance,
    WaitPrimitive,
}

/// Exit target of a state.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Successor {
    /// No automatic exit.
    Stay,
    /// Return to the agent's recorded NormalState.
    Normal,
    /// A fixed next state.
    State(BehaviorState),
}

/// One row of the classification table.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct StateTraits {
    pub family:      BehaviorFamily,
    pub is_base:     bool,
    pub base_secs:   Option<f64>,
    pub successor:   Successor,
    pub planner:     Option<PlannerFamily>,
    pub attractable: bool,
}

impl StateTraits {
    const fn of(family: BehaviorFamily, planner: Option<PlannerFamily>) -> Self {
        Self {
            family,
            is_base:     false,
            base_secs:   None,
            successor:   Successor::Stay,
            planner,
            attractable: false,
        }
    }

    const fn base(mut self) -> Self {
        self.is_base = true;
        self
    }

    const fn timed(mut self, secs: f64, successor: Successor) -> Self {
        self.base_secs = Some(secs);
        self.successor = successor;
        self
    }

    const fn exits_to(mut self, successor: Successor) -> Self {
        self.successor = successor;
        self
    }

    const fn attractable(mut self) -> Self {
        self.attractable = true;
        self
    }
}

use BehaviorFamily as F;
use PlannerFamily as P;
use Successor::{Normal, State};

const INDIVIDUAL: Option<PlannerFamily> = Some(P::Individual);
const STILL:      Option<PlannerFamily> = None;

impl BehaviorState {
    /// The classification row for this state.
    pub const fn traits(self) -> StateTraits {
        use BehaviorState as S;
        match self {
            S::None                 => StateTraits::of(F::Sentinel, STILL),

            S::Waiting              => StateTraits::of(F::Social, STILL).timed(5.0, Normal).attractable(),
            S::Talking              => StateTraits::of(F::Social, INDIVIDUAL).timed(20.0, Normal).attractable(),
            S::GroupTalking         => StateTraits::of(F::Social, Some(P::Group)).timed(30.0, Normal).attractable(),
            S::TellStory            => StateTraits::of(F::Social, INDIVIDUAL).timed(15.0, Normal).attractable(),
            S::Listening            => StateTraits::of(F::Social, INDIVIDUAL).timed(15.0, Normal).attractable(),

            S::Walking              => StateTraits::of(F::Locomotion, INDIVIDUAL).base().attractable(),
            S::Running              => StateTraits::of(F::Locomotion, INDIVIDUAL).base().attractable(),
            S::BackUp               => StateTraits::of(F::Locomotion, INDIVIDUAL).timed(2.0, Normal),
            S::GroupWalking         => StateTraits::of(F::Locomotion, Some(P::Group)).base().attractable(),
            S::TalkingAndWalking    => StateTraits::of(F::Locomotion, INDIVIDUAL).base().attractable(),
            S::ListeningAndWalking  => StateTraits::of(F::Locomotion, INDIVIDUAL).base().attractable(),

            S::Queueing             => StateTraits::of(F::Task, Some(P::Queueing)).base(),
            S::Shopping             => StateTraits::of(F::Task, Some(P::Shopping)).timed(30.0, Normal),
            S::ReachedShelf         => StateTraits::of(F::Task, Some(P::Shopping)).timed(4.0, Normal),
            S::Working              => StateTraits::of(F::Task, INDIVIDUAL).base(),

            S::LiftingForks         => StateTraits::of(F::Vehicle, INDIVIDUAL).timed(3.0, State(S::Loading)),
            S::Loading              => StateTraits::of(F::Vehicle, INDIVIDUAL).timed(8.0, State(S::LoweringForks)),
            S::LoweringForks        => StateTraits::of(F::Vehicle, INDIVIDUAL).timed(3.0, State(S::Driving)),
            S::Driving              => StateTraits::of(F::Vehicle, INDIVIDUAL).base(),
            S::DrivingToInteraction => StateTraits::of(F::Vehicle, INDIVIDUAL),
            S::RequestingService    => StateTraits::of(F::Vehicle, INDIVIDUAL),
            S::ReceivingService     => StateTraits::of(F::Vehicle, INDIVIDUAL).timed(10.0, Normal),
            S::ProvidingService     => StateTraits::of(F::Vehicle, INDIVIDUAL).timed(10.0, State(S::Driving)),

            S::RequestingGuide      => StateTraits::of(F::Guidance, INDIVIDUAL),
            S::FollowingGuide       => StateTraits::of(F::Guidance, INDIVIDUAL),
            S::RequestingFollower   => StateTraits::of(F::Guidance, INDIVIDUAL),
            S::GuideToGoal          => StateTraits::of(F::Guidance, INDIVIDUAL),
            S::ClearingGoal         => StateTraits::of(F::Guidance, INDIVIDUAL),

            S::WaitForTrigger       => StateTraits::of(F::WaitPrimitive, STILL).exits_to(Normal),
            S::WaitForTimer         => StateTraits::of(F::WaitPrimitive, STILL).timed(10.0, Normal),
        }
    }

    #[inline]
    pub const fn family(self) -> BehaviorFamily {
        self.traits().family
    }

    /// `true` if the state may be recorded as NormalState.
    #[inline]
    pub const fn is_base(self) -> bool {
        self.traits().is_base
    }

    #[inline]
    pub const fn is_time_bounded(self) -> bool {
        self.traits().base_secs.is_some()
    }

    #[inline]
    pub const fn successor(self) -> Successor {
        self.traits().successor
    }

    #[inline]
    pub const fn planner_family(self) -> Option<PlannerFamily> {
        self.traits().planner
    }

    #[inline]
    pub const fn is_attractable(self) -> bool {
        self.traits().attractable
    }
}
