//! Cell-centered scalar grid.
//!
//! One sample per cell, located at the cell center, so sample (0, 0, 0)
//! is offset from the grid origin by half a cell.

use glam::{UVec3, Vec3};

use crate::grid::RegularGrid3;
use crate::scalar_grid::{DataLayout, ScalarGrid3};

/// Layout marker: one sample per cell center.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CellCentered;

impl DataLayout for CellCentered {
    const TYPE_NAME: &'static str = "CellCenteredScalarGrid3";

    fn data_size(resolution: UVec3) -> Option<UVec3> {
        Some(resolution)
    }

    fn data_origin(grid: &RegularGrid3) -> Vec3 {
        grid.cell_center(0, 0, 0)
    }
}

/// 3D scalar grid with samples at cell centers.
pub type CellCenteredScalarGrid3 = ScalarGrid3<CellCentered>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GridError;

    #[test]
    fn test_cell_centered_layout() {
        let grid = CellCenteredScalarGrid3::new(
            UVec3::new(4, 2, 3),
            Vec3::new(1.0, 0.5, 2.0),
            Vec3::new(-1.0, 0.0, 1.0),
            0.0,
        )
        .unwrap();

        assert_eq!(grid.data_size(), UVec3::new(4, 2, 3));
        assert_eq!(grid.data_origin(), Vec3::new(-0.5, 0.25, 2.0));
        assert_eq!(grid.data_position(1, 1, 1), grid.geometry().cell_center(1, 1, 1));
        assert_eq!(grid.type_name(), "CellCenteredScalarGrid3");
    }

    #[test]
    fn test_sample_count_overflow_rejected() {
        if usize::BITS != 64 {
            return;
        }
        let result = CellCenteredScalarGrid3::new(
            UVec3::new(1 << 22, 1 << 21, 1 << 21),
            Vec3::ONE,
            Vec3::ZERO,
            0.0,
        );
        assert!(matches!(result, Err(GridError::InvalidResolution { .. })));
    }
}
