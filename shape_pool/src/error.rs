//! Error types.
//!
//! Reconciliation never recovers locally: a surface that refuses a shape
//! ends the frame and the error travels up to whoever dispatched it.

use crate::surface::ShapeId;

/// Failures reported by a [`DrawingSurface`](crate::DrawingSurface).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SurfaceError {
    /// The surface cannot hold any more shapes.
    #[error("drawing surface is full ({capacity} shapes registered)")]
    Exhausted { capacity: usize },

    /// A handle that was never issued by this surface.
    #[error("unknown shape {0:?}")]
    UnknownShape(ShapeId),

    /// Backend-specific failure (window closed, buffer upload failed, …).
    #[error("drawing backend failed: {0}")]
    Backend(String),
}

/// Failures bubbling out of a [`FrameHandler`](crate::FrameHandler).
#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    #[error(transparent)]
    Surface(#[from] SurfaceError),

    #[error("{0}")]
    Other(String),
}
