//! The closed set of high-level behaviors an agent can be in.

use std::fmt;

/// An agent's current discrete high-level activity.
///
/// Exactly one is active per agent.  Everything that varies by state
/// (time budget, successor, planner, family) lives in the classification
/// table in [`crate::table`], not in `match` arms scattered across the
/// state machine.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BehaviorState {
    /// Sentinel: freshly created, nothing decided yet.
    #[default]
    None,

    // ── Idle / social ─────────────────────────────────────────────────────
    Waiting,
    Talking,
    GroupTalking,
    TellStory,
    Listening,

    // ── Locomotion ────────────────────────────────────────────────────────
    Walking,
    Running,
    BackUp,
    GroupWalking,
    TalkingAndWalking,
    ListeningAndWalking,

    // ── Task-oriented ─────────────────────────────────────────────────────
    Queueing,
    Shopping,
    ReachedShelf,
    Working,

    // ── Vehicle / service ─────────────────────────────────────────────────
    LiftingForks,
    Loading,
    LoweringForks,
    Driving,
    DrivingToInteraction,
    RequestingService,
    ReceivingService,
    ProvidingService,

    // ── Guidance ──────────────────────────────────────────────────────────
    RequestingGuide,
    FollowingGuide,
    RequestingFollower,
    GuideToGoal,
    ClearingGoal,

    // ── Waiting primitives ────────────────────────────────────────────────
    WaitForTrigger,
    WaitForTimer,
}

impl BehaviorState {
    /// Every variant, in declaration order.
    pub const ALL: [BehaviorState; 31] = [
        BehaviorState::None,
        BehaviorState::Waiting,
        BehaviorState::Talking,
        BehaviorState::GroupTalking,
        BehaviorState::TellStory,
        BehaviorState::Listening,
        BehaviorState::Walking,
        BehaviorState::Running,
        BehaviorState::BackUp,
        BehaviorState::GroupWalking,
        BehaviorState::TalkingAndWalking,
        BehaviorState::ListeningAndWalking,
        BehaviorState::Queueing,
        BehaviorState::Shopping,
        BehaviorState::ReachedShelf,
        BehaviorState::Working,
        BehaviorState::LiftingForks,
        BehaviorState::Loading,
        BehaviorState::LoweringForks,
        BehaviorState::Driving,
        BehaviorState::DrivingToInteraction,
        BehaviorState::RequestingService,
        BehaviorState::ReceivingService,
        BehaviorState::ProvidingService,
        BehaviorState::RequestingGuide,
        BehaviorState::FollowingGuide,
        BehaviorState::RequestingFollower,
        BehaviorState::GuideToGoal,
        BehaviorState::ClearingGoal,
        BehaviorState::WaitForTrigger,
        BehaviorState::WaitForTimer,
    ];

    /// Stable human-readable name, for logs and debug UIs only.
    pub const fn name(self) -> &'static str {
        match self {
            BehaviorState::None                 => "None",
            BehaviorState::Waiting              => "Waiting",
            BehaviorState::Talking              => "Talking",
            BehaviorState::GroupTalking         => "GroupTalking",
            BehaviorState::TellStory            => "TellStory",
            BehaviorState::Listening            => "Listening",
            BehaviorState::Walking              => "Walking",
            BehaviorState::Running              => "Running",
            BehaviorState::BackUp               => "BackUp",
            BehaviorState::GroupWalking         => "GroupWalking",
            BehaviorState::TalkingAndWalking    => "TalkingAndWalking",
            BehaviorState::ListeningAndWalking  => "ListeningAndWalking",
            BehaviorState::Queueing             => "Queueing",
            BehaviorState::Shopping             => "Shopping",
            BehaviorState::ReachedShelf         => "ReachedShelf",
            BehaviorState::Working              => "Working",
            BehaviorState::LiftingForks         => "LiftingForks",
            BehaviorState::Loading              => "Loading",
            BehaviorState::LoweringForks        => "LoweringForks",
            BehaviorState::Driving              => "Driving",
            BehaviorState::DrivingToInteraction => "DrivingToInteraction",
            BehaviorState::RequestingService    => "RequestingService",
            BehaviorState::ReceivingService     => "ReceivingService",
            BehaviorState::ProvidingService     => "ProvidingService",
            BehaviorState::RequestingGuide      => "RequestingGuide",
            BehaviorState::FollowingGuide       => "FollowingGuide",
            BehaviorState::RequestingFollower   => "RequestingFollower",
            BehaviorState::GuideToGoal          => "GuideToGoal",
            BehaviorState::ClearingGoal         => "ClearingGoal",
            BehaviorState::WaitForTrigger       => "WaitForTrigger",
            BehaviorState::WaitForTimer         => "WaitForTimer",
        }
    }
}

impl fmt::Display for BehaviorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
