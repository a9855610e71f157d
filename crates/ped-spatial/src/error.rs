//! Spatial-subsystem error type.

use thiserror::Error;

use ped_core::AreaId;

/// Errors produced by `ped-spatial`.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("attraction {0} defined more than once")]
    DuplicateArea(AreaId),

    #[error("attraction {id} has invalid radius {radius}")]
    InvalidRadius { id: AreaId, radius: f64 },

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type SpatialResult<T> = Result<T, SpatialError>;
