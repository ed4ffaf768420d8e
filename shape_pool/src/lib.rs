//! # shape_pool
//!
//! Maps the tracked points of each sensor frame onto a stable pool of
//! drawable circles.
//!
//! Every frame carries a variable number of finger and palm observations.
//! Rather than creating and destroying circles as counts fluctuate, each
//! category owns an append-only [`ShapePool`]: slot *i* is reassigned to
//! whatever observation currently sits at index *i*, new slots are
//! registered only when a frame has more points than ever before, and
//! surplus slots are hidden.
//!
//! ```text
//!   Frame ──► Visualizer::handle_frame
//!                ├─ fingers.reconcile(surface, frame.fingers, finger params)
//!                ├─ palms  .reconcile(surface, frame.palms,   palm params)
//!                └─ surface.render_all()          (exactly once per frame)
//! ```
//!
//! ## Quick start
//!
//! ```rust
//! use shape_pool::{Canvas, Frame, Vec3, Visualizer};
//!
//! let mut vis = Visualizer::new(Canvas::new(800, 600));
//! let frame = Frame::new(1, 0)
//!     .with_finger(Vec3::new(0.0, 150.0, 20.0))
//!     .with_palm(Vec3::new(10.0, 120.0, -30.0));
//!
//! let report = vis.handle_frame(&frame).unwrap();
//! assert_eq!(report.fingers.created, 1);
//! assert_eq!(vis.surface().visible_count(), 2);
//! ```

pub mod error;
pub mod observation;
pub mod projection;
pub mod surface;
pub mod pool;
pub mod visualizer;
pub mod subscription;

pub use error::{HandlerError, SurfaceError};
pub use observation::{Category, Frame, Observation, Vec3};
pub use projection::{project, CircleParams, Color, Point2, ProjectionInput};
pub use surface::{Canvas, DrawingSurface, ShapeId};
pub use pool::{Reconciled, ShapePool};
pub use visualizer::{FrameReport, Visualizer};
pub use subscription::{FrameHandler, Subscribers, Throttle, Throttled};
