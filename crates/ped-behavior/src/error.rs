use thiserror::Error;

use ped_core::PlannerId;

use crate::PlannerFamily;

#[derive(Debug, Error)]
pub enum BehaviorError {
    #[error("behavior configuration error: {0}")]
    Config(String),

    /// A machine holds a handle the registry never issued.  The planner
    /// wiring is broken; the machine cannot hand control to anyone.
    #[error("planner {0} is not registered")]
    UnknownPlanner(PlannerId),

    #[error("planner {id} is a {found} planner, expected {expected}")]
    PlannerFamilyMismatch {
        id:       PlannerId,
        expected: PlannerFamily,
        found:    PlannerFamily,
    },
}

pub type BehaviorResult<T> = Result<T, BehaviorError>;
