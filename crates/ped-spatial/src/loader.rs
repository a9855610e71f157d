//! CSV attraction loader.
//!
//! # CSV format
//!
//! One row per attraction area, coordinates and radius in metres:
//!
//! ```csv
//! id,name,x,y,radius
//! 0,bakery,12.0,4.5,3.0
//! 1,newsstand,30.0,4.5,2.0
//! ```
//!
//! Ids must be unique; duplicates are rejected when the index is built.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use ped_core::{AreaId, Point2};

use crate::{AttractionArea, AttractionIndex, SpatialError};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct AttractionRecord {
    id:     u32,
    name:   String,
    x:      f64,
    y:      f64,
    radius: f64,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load all attraction areas in a CSV file and index them.
pub fn load_attractions_csv(path: &Path) -> Result<AttractionIndex, SpatialError> {
    let file = std::fs::File::open(path)?;
    load_attractions_reader(file)
}

/// Like [`load_attractions_csv`] but accepts any `Read` source.
///
/// Useful for testing (pass a `std::io::Cursor`) or for scenes embedded in
/// the binary.
pub fn load_attractions_reader<R: Read>(reader: R) -> Result<AttractionIndex, SpatialError> {
    let mut csv_reader = csv::Reader::from_reader(reader);

    let areas = csv_reader
        .deserialize::<AttractionRecord>()
        .map(|result| {
            let row = result.map_err(|e| SpatialError::Parse(e.to_string()))?;
            Ok(AttractionArea::new(
                AreaId(row.id),
                row.name.trim(),
                Point2::new(row.x, row.y),
                row.radius,
            ))
        })
        .collect::<Result<Vec<_>, SpatialError>>()?;

    AttractionIndex::new(areas)
}
