//! # leap_canvas
//!
//! Real-time LeapMotion visualizer: every tracked finger tip and palm is
//! drawn as a circle on a software-rendered canvas.
//!
//! ## Mapping
//!
//! | Sensor | Canvas |
//! |---|---|
//! | `x` (±200 mm) | horizontal position around the centre |
//! | `y` (0–400 mm) | vertical position, flipped, `y = 0` on the bottom edge |
//! | `z < 0` | far colour (fingers red, palms purple) |
//! | `z ≥ 0` | near colour (fingers green, palms blue) |
//! | `|z|` | radius grows by `|z| / 3` |
//!
//! Circles are never deleted. Each category keeps a pool of shapes that
//! grows when more points are tracked than ever before and hides its
//! surplus when fewer are, see [`shape_pool`].
//!
//! ## Feature flags
//!
//! * (default): **Simulation mode**: two synthetic hands.
//! * `leap`: **Hardware mode**: polls a real LeapMotion controller via LeapC.
//!
//! ## Keys
//!
//! | Key | Action |
//! |---|---|
//! | `Q` / `Escape` | Quit |
//!
//! ## Logging
//!
//! Uses `tracing`; set `RUST_LOG=leap_canvas=debug` to see the throttled
//! JSON frame dumps.

pub mod error;
pub mod source;
pub mod window;
pub mod debug;
pub mod app;

pub use error::AppError;
