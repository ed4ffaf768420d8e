//! Append-only shape pools and per-frame reconciliation.
//!
//! Each slot walks `nonexistent → visible ⇄ hidden` and never goes back:
//! shapes are registered once and afterwards only updated or hidden, so a
//! hand flickering between three and five fingers costs no allocation
//! after the first time five are seen.

use tracing::{debug, trace};

use crate::error::SurfaceError;
use crate::observation::{Category, Observation};
use crate::projection::{project, ProjectionInput};
use crate::surface::{DrawingSurface, ShapeId};

/// What one `reconcile` call did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Reconciled {
    /// Existing slots refreshed in place.
    pub updated: usize,
    /// Slots registered with the surface this frame.
    pub created: usize,
    /// Surplus slots hidden.
    pub hidden:  usize,
}

impl Reconciled {
    /// Slots showing a current observation.
    pub fn visible(&self) -> usize { self.updated + self.created }
}

// ════════════════════════════════════════════════════════════════════════════
// ShapePool
// ════════════════════════════════════════════════════════════════════════════

/// Ordered, never-shrinking sequence of shape handles for one category.
#[derive(Debug, Clone)]
pub struct ShapePool {
    category: Category,
    shapes:   Vec<ShapeId>,
}

impl ShapePool {
    pub fn new(category: Category) -> Self {
        ShapePool { category, shapes: Vec::new() }
    }

    pub fn category(&self) -> Category { self.category }
    pub fn len(&self) -> usize { self.shapes.len() }
    pub fn is_empty(&self) -> bool { self.shapes.is_empty() }
    pub fn ids(&self) -> &[ShapeId] { &self.shapes }
    pub fn get(&self, index: usize) -> Option<ShapeId> { self.shapes.get(index).copied() }

    /// Map `observations` onto the pool by index.
    ///
    /// Slot *i* takes observation *i*: existing slots are re-projected in
    /// place, missing ones are registered with `surface` and appended, and
    /// every slot past the end of the list is hidden. The first surface
    /// error aborts the call and is returned unchanged.
    ///
    /// Every observation must belong to the pool's category; debug builds
    /// panic otherwise.
    pub fn reconcile<S, F>(
        &mut self,
        surface:      &mut S,
        observations: &[Observation],
        params_fn:    F,
    ) -> Result<Reconciled, SurfaceError>
    where
        S: DrawingSurface + ?Sized,
        F: Fn(&Observation) -> ProjectionInput,
    {
        let center = surface.center();
        let mut stats = Reconciled::default();

        for (i, obs) in observations.iter().enumerate() {
            debug_assert_eq!(
                obs.category, self.category,
                "observation {i} does not belong in the {:?} pool", self.category,
            );
            let params = project(params_fn(obs), center);
            match self.shapes.get(i) {
                Some(&id) => {
                    surface.set(id, params)?;
                    stats.updated += 1;
                }
                None => {
                    let id = surface.add(params)?;
                    self.shapes.push(id);
                    stats.created += 1;
                }
            }
        }

        for &id in self.shapes.iter().skip(observations.len()) {
            surface.set_visible(id, false)?;
            stats.hidden += 1;
        }

        if stats.created > 0 {
            debug!(category = ?self.category, len = self.shapes.len(), created = stats.created, "pool grew");
        }
        trace!(category = ?self.category, ?stats, "reconciled");
        Ok(stats)
    }
}
