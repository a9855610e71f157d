//! `ped-spatial`: attraction areas and the coverage index behind them.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                   |
//! |----------------|------------------------------------------------------------|
//! | [`attraction`] | `AttractionArea`, `AttractionIndex` (R-tree over areas)    |
//! | [`loader`]     | `load_attractions_csv`, `load_attractions_reader`          |
//! | [`error`]      | `SpatialError`, `SpatialResult<T>`                         |
//!
//! The behavior layer only asks two questions of this crate: "which areas
//! cover this point?" and "what is area N?".  Containment is a disc test
//! against each area's effect radius.

pub mod attraction;
pub mod error;
pub mod loader;


pub use attraction::{AttractionArea, AttractionIndex};
pub use error::{SpatialError, SpatialResult};
pub use loader::{load_attractions_csv, load_attractions_reader};
