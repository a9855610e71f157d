//! Attraction areas and their coverage index.
//!
//! # Spatial index
//!
//! Areas are discs (centre + effect radius).  Each disc is stored in an
//! R-tree (via `rstar`) under its bounding square, so a coverage query only
//! descends into nodes whose envelope contains the query point and then runs
//! the exact disc test on the few surviving leaves.

use std::collections::HashMap;

use rstar::{Envelope, RTree, RTreeObject, SelectionFunction, AABB};

use ped_core::{AreaId, Point2};

use crate::{SpatialError, SpatialResult};

// ── AttractionArea ────────────────────────────────────────────────────────────

/// A named region that can pull passing pedestrians toward it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttractionArea {
    pub id:     AreaId,
    pub name:   String,
    pub center: Point2,
    /// Effect radius in metres.  A point at exactly this distance is inside.
    pub radius: f64,
}

impl AttractionArea {
    pub fn new(id: AreaId, name: impl Into<String>, center: Point2, radius: f64) -> Self {
        Self { id, name: name.into(), center, radius }
    }

    /// `true` if `point` lies within the effect radius (inclusive).
    #[inline]
    pub fn covers(&self, point: Point2) -> bool {
        self.center.distance_sq(point) <= self.radius * self.radius
    }
}

// ── R-tree entry ──────────────────────────────────────────────────────────────

/// Entry stored in the R-tree: the bounding square of one area's disc plus
/// its slot in `AttractionIndex::areas`.
#[derive(Clone)]
struct AreaEntry {
    slot:   usize,
    center: [f64; 2],
    radius: f64,
}

impl RTreeObject for AreaEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        let [x, y] = self.center;
        AABB::from_corners([x - self.radius, y - self.radius], [x + self.radius, y + self.radius])
    }
}

/// Selects entries whose disc covers a single point.
struct CoversPoint {
    point: [f64; 2],
}

impl SelectionFunction<AreaEntry> for CoversPoint {
    fn should_unpack_parent(&self, envelope: &AABB<[f64; 2]>) -> bool {
        envelope.contains_point(&self.point)
    }

    fn should_unpack_leaf(&self, leaf: &AreaEntry) -> bool {
        let dx = leaf.center[0] - self.point[0];
        let dy = leaf.center[1] - self.point[1];
        dx * dx + dy * dy <= leaf.radius * leaf.radius
    }
}

// ── AttractionIndex ───────────────────────────────────────────────────────────

/// All attraction areas of a scene plus a spatial index for coverage tests.
///
/// Immutable once built; rebuild the index if the scene changes.
pub struct AttractionIndex {
    areas:   Vec<AttractionArea>,
    by_id:   HashMap<AreaId, usize>,
    tree:    RTree<AreaEntry>,
}

impl AttractionIndex {
    /// An index with no areas.  Every coverage query returns nothing.
    pub fn empty() -> Self {
        Self { areas: Vec::new(), by_id: HashMap::new(), tree: RTree::new() }
    }

    /// Validate `areas` and bulk-load them into the R-tree.
    ///
    /// # Errors
    ///
    /// [`SpatialError::DuplicateArea`] if two areas share an id, and
    /// [`SpatialError::InvalidRadius`] for negative or non-finite radii.
    pub fn new(areas: Vec<AttractionArea>) -> SpatialResult<Self> {
        let mut by_id = HashMap::with_capacity(areas.len());
        let mut entries = Vec::with_capacity(areas.len());

        for (slot, area) in areas.iter().enumerate() {
            if !area.radius.is_finite() || area.radius < 0.0 {
                return Err(SpatialError::InvalidRadius { id: area.id, radius: area.radius });
            }
            if by_id.insert(area.id, slot).is_some() {
                return Err(SpatialError::DuplicateArea(area.id));
            }
            entries.push(AreaEntry { slot, center: area.center.to_array(), radius: area.radius });
        }

        tracing::debug!(areas = areas.len(), "built attraction index");
        Ok(Self { areas, by_id, tree: RTree::bulk_load(entries) })
    }

    pub fn len(&self) -> usize {
        self.areas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }

    /// Look up an area by id.
    pub fn get(&self, id: AreaId) -> Option<&AttractionArea> {
        self.by_id.get(&id).map(|&slot| &self.areas[slot])
    }

    /// All areas, in insertion order.
    pub fn areas(&self) -> &[AttractionArea] {
        &self.areas
    }

    /// Every area whose effect radius covers `point`, in no particular order.
    pub fn covering(&self, point: Point2) -> impl Iterator<Item = &AttractionArea> + '_ {
        self.tree
            .locate_with_selection_function(CoversPoint { point: point.to_array() })
            .map(move |entry| &self.areas[entry.slot])
    }
}

impl Default for AttractionIndex {
    fn default() -> Self {
        Self::empty()
    }
}
