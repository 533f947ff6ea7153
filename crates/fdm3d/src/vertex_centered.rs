//! Vertex-centered scalar grid.
//!
//! Samples sit on grid vertices (cell corners), so an `A x B x C` grid
//! holds `(A+1) x (B+1) x (C+1)` samples and sample (0, 0, 0) is the grid
//! origin itself.

use glam::{UVec3, Vec3};

use crate::grid::RegularGrid3;
use crate::scalar_grid::{DataLayout, ScalarGrid3};

/// Layout marker: one sample per grid vertex.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VertexCentered;

impl DataLayout for VertexCentered {
    const TYPE_NAME: &'static str = "VertexCenteredScalarGrid3";

    fn data_size(resolution: UVec3) -> Option<UVec3> {
        // An empty grid has no vertices at all, not one.
        if resolution == UVec3::ZERO {
            return Some(UVec3::ZERO);
        }
        Some(UVec3::new(
            resolution.x.checked_add(1)?,
            resolution.y.checked_add(1)?,
            resolution.z.checked_add(1)?,
        ))
    }

    fn data_origin(grid: &RegularGrid3) -> Vec3 {
        grid.origin()
    }
}

/// 3D scalar grid with samples on cell corners.
pub type VertexCenteredScalarGrid3 = ScalarGrid3<VertexCentered>;
