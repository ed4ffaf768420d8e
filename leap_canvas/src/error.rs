//! Application-level errors.

use shape_pool::HandlerError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The window could not be created.
    #[error("window error: {0}")]
    Window(String),

    /// The tracking device could not be reached.
    #[error("device error: {0}")]
    Device(String),

    /// A frame handler failed; the visualization cannot continue.
    #[error("frame handling failed: {0}")]
    Handler(#[from] HandlerError),
}
