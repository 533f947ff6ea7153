//! Assembly of the negative discrete Laplacian on a regular 3D grid.
//!
//! Uses the 6-neighbor stencil. For each axis, every neighbor that exists
//! adds 1 to the cell's diagonal, and the upper neighbor also gets a -1
//! coupling (`right`, `up` or `front`). A missing neighbor is handled by the
//! axis' [`AxisBoundary`]:
//! - `Neumann`: nothing else, zero flux through the boundary
//! - `Forcing`: a fixed value is added to the right-hand side instead
//!
//! Every cell writes only its own matrix row and right-hand-side entry, so
//! cells are assembled in parallel.

use std::path::Path;

use glam::UVec3;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::array3::unravel;
use crate::error::{GridError, GridResult};
use crate::fdm::{FdmLinearSystem3, FdmMatrixRow3};

/// Treatment of the two grid boundaries along one axis.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AxisBoundary {
    /// Zero flux: the missing coupling is dropped.
    Neumann,
    /// Fixed source: `lower` is added to `b` at index 0, `upper` at the last index.
    Forcing { lower: f32, upper: f32 },
}

impl AxisBoundary {
    /// Right-hand-side contribution at the lower boundary.
    #[inline]
    fn lower_source(self) -> f32 {
        match self {
            Self::Neumann => 0.0,
            Self::Forcing { lower, .. } => lower,
        }
    }

    /// Right-hand-side contribution at the upper boundary.
    #[inline]
    fn upper_source(self) -> f32 {
        match self {
            Self::Neumann => 0.0,
            Self::Forcing { upper, .. } => upper,
        }
    }
}

/// Boundary treatment for each axis.
///
/// The default is Neumann in X and Z with a unit forcing along Y
/// (`+1` at the bottom, `-1` at the top), i.e. a constant field pushing
/// along the vertical axis.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoundaryPolicy {
    pub x: AxisBoundary,
    pub y: AxisBoundary,
    pub z: AxisBoundary,
}

impl Default for BoundaryPolicy {
    fn default() -> Self {
        Self {
            x: AxisBoundary::Neumann,
            y: AxisBoundary::Forcing {
                lower: 1.0,
                upper: -1.0,
            },
            z: AxisBoundary::Neumann,
        }
    }
}

impl BoundaryPolicy {
    /// Zero flux on every boundary.
    pub fn neumann() -> Self {
        Self {
            x: AxisBoundary::Neumann,
            y: AxisBoundary::Neumann,
            z: AxisBoundary::Neumann,
        }
    }

    /// Parse a policy from JSON. Missing axes keep their default.
    pub fn from_json_str(json: &str) -> GridResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a policy from a JSON file.
    pub fn load_json(path: &Path) -> GridResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Save the policy to a JSON file.
    pub fn save_json(&self, path: &Path) -> GridResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

/// Fills an [`FdmLinearSystem3`] with the discrete Laplacian for a grid size.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SystemAssembler {
    policy: BoundaryPolicy,
}

impl SystemAssembler {
    /// Assembler that applies `policy` on the domain boundary.
    pub fn new(policy: BoundaryPolicy) -> Self {
        Self { policy }
    }

    /// Boundary policy used by [`SystemAssembler::assemble`].
    pub fn policy(&self) -> &BoundaryPolicy {
        &self.policy
    }

    /// Resize `system` to `size` cells and assemble `A` and `b`.
    ///
    /// Fails without touching `system` if its fields already disagree in
    /// size or if any component of `size` is zero. `x` is left zeroed.
    pub fn assemble(&self, system: &mut FdmLinearSystem3, size: UVec3) -> GridResult<()> {
        if let Err(err) = system.size() {
            log::warn!("Refusing to assemble into inconsistent system: {}", err);
            return Err(err);
        }
        if size.cmpeq(UVec3::ZERO).any() {
            log::warn!("Refusing to assemble empty system of size {}", size);
            return Err(GridError::InvalidResolution { resolution: size });
        }

        system.resize(size)?;

        let policy = self.policy;
        let (width, height, depth) = (size.x as usize, size.y as usize, size.z as usize);

        system
            .a
            .as_mut_slice()
            .par_iter_mut()
            .zip(system.b.as_mut_slice().par_iter_mut())
            .enumerate()
            .for_each(|(idx, (row, rhs))| {
                let (i, j, k) = unravel(idx, width, height);
                let FdmMatrixRow3 {
                    center,
                    right,
                    up,
                    front,
                } = row;
                assemble_axis(policy.x, i, width, center, right, rhs);
                assemble_axis(policy.y, j, height, center, up, rhs);
                assemble_axis(policy.z, k, depth, center, front, rhs);
            });

        log::debug!(
            "Assembled {}x{}x{} system ({} cells) with {:?}",
            width,
            height,
            depth,
            system.a.len(),
            policy
        );
        Ok(())
    }
}

/// Assemble with the default boundary policy.
pub fn assemble(system: &mut FdmLinearSystem3, size: UVec3) -> GridResult<()> {
    SystemAssembler::default().assemble(system, size)
}

/// Contribution of one axis to a cell at `idx` along an axis of `len` cells.
#[inline]
fn assemble_axis(
    boundary: AxisBoundary,
    idx: usize,
    len: usize,
    center: &mut f32,
    upper: &mut f32,
    rhs: &mut f32,
) {
    // Lower neighbor; its coupling is stored in that neighbor's row.
    if idx > 0 {
        *center += 1.0;
    } else {
        *rhs += boundary.lower_source();
    }

    // Upper neighbor
    if idx + 1 < len {
        *center += 1.0;
        *upper -= 1.0;
    } else {
        *rhs += boundary.upper_source();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corner_cells_2x2x2() {
        let mut system = FdmLinearSystem3::default();
        assemble(&mut system, UVec3::splat(2)).unwrap();

        assert_eq!(
            system.a[(0, 0, 0)],
            FdmMatrixRow3 {
                center: 3.0,
                right: -1.0,
                up: -1.0,
                front: -1.0,
            }
        );
        assert_eq!(system.b[(0, 0, 0)], 1.0);

        assert_eq!(
            system.a[(1, 1, 1)],
            FdmMatrixRow3 {
                center: 3.0,
                right: 0.0,
                up: 0.0,
                front: 0.0,
            }
        );
        assert_eq!(system.b[(1, 1, 1)], -1.0);
    }

    #[test]
    fn test_interior_cell_has_full_stencil() {
        let mut system = FdmLinearSystem3::default();
        assemble(&mut system, UVec3::splat(3)).unwrap();

        assert_eq!(
            system.a[(1, 1, 1)],
            FdmMatrixRow3 {
                center: 6.0,
                right: -1.0,
                up: -1.0,
                front: -1.0,
            }
        );
        assert_eq!(system.b[(1, 1, 1)], 0.0);
    }

    #[test]
    fn test_neumann_policy_leaves_rhs_zero() {
        let mut system = FdmLinearSystem3::default();
        SystemAssembler::new(BoundaryPolicy::neumann())
            .assemble(&mut system, UVec3::new(3, 4, 2))
            .unwrap();

        assert!(system.b.as_slice().iter().all(|&v| v == 0.0));
        assert_eq!(system.a[(0, 0, 0)].center, 3.0);
    }

    #[test]
    fn test_forcing_on_x_axis() {
        let policy = BoundaryPolicy {
            x: AxisBoundary::Forcing {
                lower: 2.0,
                upper: -0.5,
            },
            ..BoundaryPolicy::neumann()
        };
        let mut system = FdmLinearSystem3::default();
        SystemAssembler::new(policy)
            .assemble(&mut system, UVec3::new(3, 2, 2))
            .unwrap();

        for k in 0..2 {
            for j in 0..2 {
                assert_eq!(system.b[(0, j, k)], 2.0);
                assert_eq!(system.b[(1, j, k)], 0.0);
                assert_eq!(system.b[(2, j, k)], -0.5);
            }
        }
    }

    #[test]
    fn test_single_cell_axis_gets_both_sources() {
        let mut system = FdmLinearSystem3::default();
        assemble(&mut system, UVec3::new(2, 1, 2)).unwrap();

        // Only one layer in Y: +1 and -1 cancel, no Y coupling.
        system.a.for_each_index(|i, j, k| {
            assert_eq!(system.b[(i, j, k)], 0.0);
            assert_eq!(system.a[(i, j, k)].up, 0.0);
            assert_eq!(system.a[(i, j, k)].center, 2.0);
        });
    }

    #[test]
    fn test_zero_size_rejected() {
        let mut system = FdmLinearSystem3::default();
        let result = assemble(&mut system, UVec3::new(2, 0, 2));
        assert!(matches!(result, Err(GridError::InvalidResolution { .. })));
        assert!(system.a.is_empty());
    }

    #[test]
    fn test_policy_json_partial() {
        let policy = BoundaryPolicy::from_json_str(
            r#"{ "y": { "kind": "neumann" }, "z": { "kind": "forcing", "lower": 0.5, "upper": 0.5 } }"#,
        )
        .unwrap();

        assert_eq!(policy.x, AxisBoundary::Neumann);
        assert_eq!(policy.y, AxisBoundary::Neumann);
        assert_eq!(
            policy.z,
            AxisBoundary::Forcing {
                lower: 0.5,
                upper: 0.5,
            }
        );
    }

    #[test]
    fn test_policy_json_invalid() {
        let result = BoundaryPolicy::from_json_str(r#"{ "x": { "kind": "periodic" } }"#);
        assert!(matches!(result, Err(GridError::Json(_))));
    }
}
