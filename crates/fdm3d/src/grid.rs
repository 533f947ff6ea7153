//! Regular 3D grid geometry: resolution, spacing and origin.
//!
//! Cells are indexed `(i, j, k)` along X, Y, Z. Cell `(i, j, k)` spans
//! `origin + spacing * (i, j, k)` to `origin + spacing * (i + 1, j + 1, k + 1)`.

use glam::{UVec3, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::{GridError, GridResult};
use crate::serde_utils::{deserialize_uvec3, deserialize_vec3, serialize_uvec3, serialize_vec3};

/// Pure geometric description of a regular 3D grid.
///
/// Only changes through [`RegularGrid3::new`] or the owning grid's resize.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RegularGrid3 {
    /// Number of cells along each axis
    #[serde(serialize_with = "serialize_uvec3", deserialize_with = "deserialize_uvec3")]
    resolution: UVec3,
    /// Cell size along each axis in world units
    #[serde(serialize_with = "serialize_vec3", deserialize_with = "deserialize_vec3")]
    spacing: Vec3,
    /// World position of the lower corner of cell (0, 0, 0)
    #[serde(serialize_with = "serialize_vec3", deserialize_with = "deserialize_vec3")]
    origin: Vec3,
}

impl Default for RegularGrid3 {
    /// Empty grid with unit spacing at the world origin.
    fn default() -> Self {
        Self {
            resolution: UVec3::ZERO,
            spacing: Vec3::ONE,
            origin: Vec3::ZERO,
        }
    }
}

impl RegularGrid3 {
    /// Create validated grid geometry.
    pub fn new(resolution: UVec3, spacing: Vec3, origin: Vec3) -> GridResult<Self> {
        validate_resolution(resolution)?;
        validate_spacing(spacing)?;
        Ok(Self {
            resolution,
            spacing,
            origin,
        })
    }

    /// Number of cells along each axis.
    #[inline]
    pub fn resolution(&self) -> UVec3 {
        self.resolution
    }

    /// Cell size along each axis in world units.
    #[inline]
    pub fn spacing(&self) -> Vec3 {
        self.spacing
    }

    /// World position of the lower corner of cell (0, 0, 0).
    #[inline]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// True when the grid has no cells.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.resolution == UVec3::ZERO
    }

    /// Axis-aligned world bounds as (lower, upper) corners.
    pub fn bounding_box(&self) -> (Vec3, Vec3) {
        (
            self.origin,
            self.origin + self.spacing * self.resolution.as_vec3(),
        )
    }

    /// World position of cell center at grid indices (i, j, k).
    #[inline]
    pub fn cell_center(&self, i: usize, j: usize, k: usize) -> Vec3 {
        self.origin + self.spacing * (Vec3::new(i as f32, j as f32, k as f32) + 0.5)
    }
}

/// Check that resolution components are jointly zero or jointly non-zero.
pub fn validate_resolution(resolution: UVec3) -> GridResult<()> {
    let zero_axes = resolution.cmpeq(UVec3::ZERO);
    if zero_axes.any() && !zero_axes.all() {
        return Err(GridError::InvalidResolution { resolution });
    }
    Ok(())
}

/// Check that every spacing component is finite and strictly positive.
pub fn validate_spacing(spacing: Vec3) -> GridResult<()> {
    if !spacing.is_finite() || spacing.cmple(Vec3::ZERO).any() {
        return Err(GridError::InvalidSpacing { spacing });
    }
    Ok(())
}
