//! Finite-difference linear system on a regular 3D grid.
//!
//! The matrix is the symmetric 7-point face stencil. Each cell stores only
//! its diagonal and the couplings toward the +X, +Y and +Z neighbors:
//!
//! ```text
//! A[i,j,k] -> (i+1,j,k) = a[i,j,k].right
//! A[i,j,k] -> (i-1,j,k) = a[i-1,j,k].right
//! ```
//!
//! and likewise for `up` (Y) and `front` (Z). The BLAS helpers below
//! rebuild the lower couplings this way, which is what any solver consuming
//! the system has to do as well.

use glam::UVec3;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::array3::{checked_len, Array3};
use crate::error::{GridError, GridResult};
use crate::grid::validate_resolution;

/// One row of the 7-point stencil matrix.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FdmMatrixRow3 {
    /// Diagonal coefficient
    pub center: f32,
    /// Coupling to (i+1, j, k)
    pub right: f32,
    /// Coupling to (i, j+1, k)
    pub up: f32,
    /// Coupling to (i, j, k+1)
    pub front: f32,
}

/// Per-cell scalar vector.
pub type FdmVector3 = Array3<f32>;

/// Per-cell stencil matrix.
pub type FdmMatrix3 = Array3<FdmMatrixRow3>;

/// Linear system `A x = b` over the cells of a 3D grid.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FdmLinearSystem3 {
    /// System matrix
    pub a: FdmMatrix3,
    /// Solution vector
    pub x: FdmVector3,
    /// Right-hand side
    pub b: FdmVector3,
}

impl FdmLinearSystem3 {
    /// Create a zeroed system of `size` cells.
    pub fn new(size: UVec3) -> GridResult<Self> {
        let mut system = Self::default();
        system.resize(size)?;
        Ok(system)
    }

    /// Resize all three fields to `size` and zero them.
    pub fn resize(&mut self, size: UVec3) -> GridResult<()> {
        validate_resolution(size)?;
        if checked_len(size).is_none() {
            return Err(GridError::InvalidResolution { resolution: size });
        }
        self.a.resize(size, FdmMatrixRow3::default());
        self.x.resize(size, 0.0);
        self.b.resize(size, 0.0);
        Ok(())
    }

    /// Zero all three fields without changing their size.
    pub fn clear(&mut self) {
        self.a.fill(FdmMatrixRow3::default());
        self.x.fill(0.0);
        self.b.fill(0.0);
    }

    /// Common size of the three fields, or the first mismatch found.
    pub fn size(&self) -> GridResult<UVec3> {
        let expected = self.a.size();
        for found in [self.x.size(), self.b.size()] {
            if found != expected {
                return Err(GridError::mismatch(expected, found));
            }
        }
        Ok(expected)
    }

    /// Number of cells along X.
    pub fn width(&self) -> usize {
        self.a.width()
    }

    /// Number of cells along Y.
    pub fn height(&self) -> usize {
        self.a.height()
    }

    /// Number of cells along Z.
    pub fn depth(&self) -> usize {
        self.a.depth()
    }
}

fn ensure_same_size(expected: UVec3, found: UVec3) -> GridResult<()> {
    if expected != found {
        return Err(GridError::mismatch(expected, found));
    }
    Ok(())
}

/// Matrix-vector product `A x`.
pub fn mvm(a: &FdmMatrix3, x: &FdmVector3) -> GridResult<FdmVector3> {
    ensure_same_size(a.size(), x.size())?;

    let mut result = FdmVector3::new(a.size(), 0.0);
    result.par_for_each_mut(|i, j, k, out| *out = row_product(a, x, i, j, k));
    Ok(result)
}

/// Residual `b - A x`.
pub fn residual(a: &FdmMatrix3, x: &FdmVector3, b: &FdmVector3) -> GridResult<FdmVector3> {
    ensure_same_size(a.size(), x.size())?;
    ensure_same_size(a.size(), b.size())?;

    let mut result = FdmVector3::new(a.size(), 0.0);
    result.par_for_each_mut(|i, j, k, out| *out = b[(i, j, k)] - row_product(a, x, i, j, k));
    Ok(result)
}

/// Inner product of two vectors.
pub fn dot(a: &FdmVector3, b: &FdmVector3) -> GridResult<f32> {
    ensure_same_size(a.size(), b.size())?;

    let sum: f64 = a
        .as_slice()
        .par_iter()
        .zip(b.as_slice().par_iter())
        .map(|(&u, &v)| u as f64 * v as f64)
        .sum();
    Ok(sum as f32)
}

/// Euclidean norm of a vector.
pub fn l2_norm(v: &FdmVector3) -> f32 {
    let sum: f64 = v.as_slice().par_iter().map(|&u| u as f64 * u as f64).sum();
    sum.sqrt() as f32
}

/// Row (i, j, k) of `A` applied to `x`, lower couplings read from the neighbors.
#[inline]
fn row_product(a: &FdmMatrix3, x: &FdmVector3, i: usize, j: usize, k: usize) -> f32 {
    let row = a[(i, j, k)];
    let mut sum = row.center * x[(i, j, k)];

    // -X / +X
    if i > 0 {
        sum += a[(i - 1, j, k)].right * x[(i - 1, j, k)];
    }
    if i + 1 < a.width() {
        sum += row.right * x[(i + 1, j, k)];
    }

    // -Y / +Y
    if j > 0 {
        sum += a[(i, j - 1, k)].up * x[(i, j - 1, k)];
    }
    if j + 1 < a.height() {
        sum += row.up * x[(i, j + 1, k)];
    }

    // -Z / +Z
    if k > 0 {
        sum += a[(i, j, k - 1)].front * x[(i, j, k - 1)];
    }
    if k + 1 < a.depth() {
        sum += row.front * x[(i, j, k + 1)];
    }

    sum
}
