//! Runtime-tagged scalar grid for code that handles several layouts.
//!
//! [`ScalarGrid3::swap`](crate::ScalarGrid3::swap) only accepts a grid of the same layout. When the
//! layout is only known at runtime, [`AnyScalarGrid3::swap`] does the same
//! check on the tag: grids of different variants are left as they are.

use glam::{UVec3, Vec3};

use crate::cell_centered::CellCenteredScalarGrid3;
use crate::vertex_centered::VertexCenteredScalarGrid3;

/// A scalar grid of any supported layout.
#[derive(Clone, Debug, PartialEq)]
pub enum AnyScalarGrid3 {
    VertexCentered(VertexCenteredScalarGrid3),
    CellCentered(CellCenteredScalarGrid3),
}

impl AnyScalarGrid3 {
    /// Stable name of the wrapped grid variant.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::VertexCentered(grid) => grid.type_name(),
            Self::CellCentered(grid) => grid.type_name(),
        }
    }

    /// Number of cells along each axis.
    pub fn resolution(&self) -> UVec3 {
        match self {
            Self::VertexCentered(grid) => grid.resolution(),
            Self::CellCentered(grid) => grid.resolution(),
        }
    }

    /// Number of samples along each axis.
    pub fn data_size(&self) -> UVec3 {
        match self {
            Self::VertexCentered(grid) => grid.data_size(),
            Self::CellCentered(grid) => grid.data_size(),
        }
    }

    /// World position of sample (0, 0, 0).
    pub fn data_origin(&self) -> Vec3 {
        match self {
            Self::VertexCentered(grid) => grid.data_origin(),
            Self::CellCentered(grid) => grid.data_origin(),
        }
    }

    /// Swap contents with `other` if both wrap the same variant.
    ///
    /// Returns whether a swap happened; mismatched variants are not an error.
    pub fn swap(&mut self, other: &mut Self) -> bool {
        match (self, other) {
            (Self::VertexCentered(a), Self::VertexCentered(b)) => {
                a.swap(b);
                true
            }
            (Self::CellCentered(a), Self::CellCentered(b)) => {
                a.swap(b);
                true
            }
            (this, other) => {
                log::debug!(
                    "Skipping swap between {} and {}",
                    this.type_name(),
                    other.type_name()
                );
                false
            }
        }
    }
}

impl From<VertexCenteredScalarGrid3> for AnyScalarGrid3 {
    fn from(grid: VertexCenteredScalarGrid3) -> Self {
        Self::VertexCentered(grid)
    }
}

impl From<CellCenteredScalarGrid3> for AnyScalarGrid3 {
    fn from(grid: CellCenteredScalarGrid3) -> Self {
        Self::CellCentered(grid)
    }
}
