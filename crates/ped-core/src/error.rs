//! Framework error type.
//!
//! Sub-crates define their own error enums and wrap `PedError` as one
//! variant via `#[from]`, so core failures bubble up through `?` unchanged.

use thiserror::Error;

use crate::{AgentId, GroupId};

/// The top-level error type for `ped-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum PedError {
    #[error("agent {0} not found")]
    AgentNotFound(AgentId),

    #[error("group {0} not found")]
    GroupNotFound(GroupId),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for all `ped-*` crates.
pub type PedResult<T> = Result<T, PedError>;
