//! Error type shared by grid construction, system assembly and config IO.

use glam::{UVec3, Vec3};
use thiserror::Error;

/// Result alias used throughout the crate.
pub type GridResult<T> = Result<T, GridError>;

/// Errors raised by grid geometry checks, assembly and configuration IO.
#[derive(Error, Debug)]
pub enum GridError {
    /// Resolution is partially zero, or zero where a non-empty grid is required.
    #[error("invalid resolution {resolution}: components must be all zero or all non-zero")]
    InvalidResolution {
        /// The rejected resolution
        resolution: UVec3,
    },

    /// Grid spacing is non-finite or not strictly positive.
    #[error("invalid grid spacing {spacing}: components must be finite and positive")]
    InvalidSpacing {
        /// The rejected spacing
        spacing: Vec3,
    },

    /// Two fields that must share a size do not.
    #[error("resolution mismatch: expected {expected}, found {found}")]
    ResolutionMismatch {
        /// Size of the reference field
        expected: UVec3,
        /// Size of the offending field
        found: UVec3,
    },

    /// Reading or writing a configuration file failed.
    #[error("config IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A configuration file could not be parsed.
    #[error("config parse error: {0}")]
    Json(#[from] serde_json::Error),
}

impl GridError {
    /// Shorthand for [`GridError::ResolutionMismatch`].
    pub fn mismatch(expected: UVec3, found: UVec3) -> Self {
        Self::ResolutionMismatch { expected, found }
    }
}
