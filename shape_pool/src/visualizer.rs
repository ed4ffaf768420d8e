//! The per-frame driver: two pools, one surface, one redraw.

use crate::error::SurfaceError;
use crate::observation::{Category, Frame};
use crate::pool::{Reconciled, ShapePool};
use crate::projection::ProjectionInput;
use crate::surface::DrawingSurface;

/// Outcome of one [`Visualizer::handle_frame`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameReport {
    pub fingers: Reconciled,
    pub palms:   Reconciled,
}

/// Owns the drawing surface together with the finger and palm pools.
///
/// The two pools never interact; they only share the surface they
/// register shapes with.
#[derive(Debug)]
pub struct Visualizer<S> {
    surface: S,
    fingers: ShapePool,
    palms:   ShapePool,
}

impl<S: DrawingSurface> Visualizer<S> {
    pub fn new(surface: S) -> Self {
        Visualizer {
            surface,
            fingers: ShapePool::new(Category::Finger),
            palms:   ShapePool::new(Category::Palm),
        }
    }

    /// Reconcile both categories against `frame`, then redraw once.
    ///
    /// Fingers are projected with the defaults; palms with the palm
    /// overrides (radius 40, blue near, purple far) on every slot, new or
    /// reused. If anything fails the frame is abandoned before the redraw.
    pub fn handle_frame(&mut self, frame: &Frame) -> Result<FrameReport, SurfaceError> {
        let fingers = self.fingers.reconcile(
            &mut self.surface,
            &frame.fingers,
            |o| ProjectionInput::finger(o.position),
        )?;
        let palms = self.palms.reconcile(
            &mut self.surface,
            &frame.palms,
            |o| ProjectionInput::palm(o.position),
        )?;
        self.surface.render_all()?;
        Ok(FrameReport { fingers, palms })
    }

    pub fn surface(&self) -> &S { &self.surface }
    pub fn surface_mut(&mut self) -> &mut S { &mut self.surface }
    pub fn fingers(&self) -> &ShapePool { &self.fingers }
    pub fn palms(&self) -> &ShapePool { &self.palms }

    pub fn pool(&self, category: Category) -> &ShapePool {
        match category {
            Category::Finger => &self.fingers,
            Category::Palm   => &self.palms,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
