use ped_behavior::BehaviorError;
use ped_core::PedError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("{what} length {got} does not match agent count {expected}")]
    AgentCountMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },

    #[error("behavior error: {0}")]
    Behavior(#[from] BehaviorError),

    #[error(transparent)]
    Core(#[from] PedError),
}

pub type SimResult<T> = Result<T, SimError>;
