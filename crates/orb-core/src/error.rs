//! Orb error types.
//!
//! Nothing in the orb is allowed to break the surrounding application, so
//! these errors are only surfaced at construction/parsing boundaries. Callers
//! log them and fall back to an inert orb.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OrbError {
    /// The drawing surface (canvas 2D context) could not be acquired.
    #[error("drawing surface unavailable: {0}")]
    SurfaceUnavailable(String),

    /// A bus payload was missing, not an object, or had no string `type`.
    #[error("malformed orb event: {0}")]
    MalformedEvent(String),

    /// Orb or dock configuration JSON could not be parsed.
    #[error("invalid orb configuration: {0}")]
    InvalidConfig(String),
}

pub type OrbResult<T> = Result<T, OrbError>;
