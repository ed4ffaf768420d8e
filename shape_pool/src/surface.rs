//! The drawing-surface boundary and an in-memory retained scene.
//!
//! A surface keeps every registered circle for as long as it lives; the
//! pools above it only ever hold [`ShapeId`] handles.

use crate::error::SurfaceError;
use crate::projection::{CircleParams, Point2};

/// Handle to a shape registered with a surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShapeId(pub usize);

// ════════════════════════════════════════════════════════════════════════════
// DrawingSurface
// ════════════════════════════════════════════════════════════════════════════

/// Anything circles can be registered with and redrawn on.
pub trait DrawingSurface {
    /// Register a new shape. Failure here is fatal to the visualization.
    fn add(&mut self, params: CircleParams) -> Result<ShapeId, SurfaceError>;

    /// Replace every attribute of an existing shape.
    fn set(&mut self, id: ShapeId, params: CircleParams) -> Result<(), SurfaceError>;

    /// Toggle visibility, leaving position, radius and fill untouched.
    fn set_visible(&mut self, id: ShapeId, visible: bool) -> Result<(), SurfaceError>;

    /// Redraw everything once.
    fn render_all(&mut self) -> Result<(), SurfaceError>;

    /// Reference centre used by the projection.
    fn center(&self) -> Point2;
}

impl<S: DrawingSurface + ?Sized> DrawingSurface for &mut S {
    fn add(&mut self, params: CircleParams) -> Result<ShapeId, SurfaceError> {
        (**self).add(params)
    }
    fn set(&mut self, id: ShapeId, params: CircleParams) -> Result<(), SurfaceError> {
        (**self).set(id, params)
    }
    fn set_visible(&mut self, id: ShapeId, visible: bool) -> Result<(), SurfaceError> {
        (**self).set_visible(id, visible)
    }
    fn render_all(&mut self) -> Result<(), SurfaceError> {
        (**self).render_all()
    }
    fn center(&self) -> Point2 {
        (**self).center()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Canvas: retained in-memory scene
// ════════════════════════════════════════════════════════════════════════════

/// Retained scene of circles in registration (= paint) order.
///
/// Used directly in tests and as the bookkeeping layer of windowed
/// surfaces. An optional `max_shapes` cap makes registration fail with
/// [`SurfaceError::Exhausted`] once reached.
#[derive(Debug, Clone)]
pub struct Canvas {
    width:      usize,
    height:     usize,
    shapes:     Vec<CircleParams>,
    max_shapes: Option<usize>,
    renders:    u64,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Canvas { width, height, shapes: Vec::new(), max_shapes: None, renders: 0 }
    }

    pub fn with_max_shapes(mut self, max: usize) -> Self {
        self.max_shapes = Some(max);
        self
    }

    pub fn width(&self)  -> usize { self.width }
    pub fn height(&self) -> usize { self.height }

    pub fn shape(&self, id: ShapeId) -> Option<&CircleParams> {
        self.shapes.get(id.0)
    }

    /// All registered shapes, visible or not, in paint order.
    pub fn shapes(&self) -> &[CircleParams] { &self.shapes }

    pub fn len(&self) -> usize { self.shapes.len() }

    pub fn is_empty(&self) -> bool { self.shapes.is_empty() }

    pub fn visible_count(&self) -> usize {
        self.shapes.iter().filter(|s| s.visible).count()
    }

    /// Number of `render_all` calls so far.
    pub fn renders(&self) -> u64 { self.renders }

    fn slot(&mut self, id: ShapeId) -> Result<&mut CircleParams, SurfaceError> {
        self.shapes.get_mut(id.0).ok_or(SurfaceError::UnknownShape(id))
    }
}

impl DrawingSurface for Canvas {
    fn add(&mut self, params: CircleParams) -> Result<ShapeId, SurfaceError> {
        if let Some(capacity) = self.max_shapes {
            if self.shapes.len() >= capacity {
                return Err(SurfaceError::Exhausted { capacity });
            }
        }
        self.shapes.push(params);
        Ok(ShapeId(self.shapes.len() - 1))
    }

    fn set(&mut self, id: ShapeId, params: CircleParams) -> Result<(), SurfaceError> {
        *self.slot(id)? = params;
        Ok(())
    }

    fn set_visible(&mut self, id: ShapeId, visible: bool) -> Result<(), SurfaceError> {
        self.slot(id)?.visible = visible;
        Ok(())
    }

    fn render_all(&mut self) -> Result<(), SurfaceError> {
        self.renders += 1;
        Ok(())
    }

    fn center(&self) -> Point2 {
        Point2::new(self.width as f64 / 2.0, self.height as f64 / 2.0)
    }
}
