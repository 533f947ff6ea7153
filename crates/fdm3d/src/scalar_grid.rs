//! Scalar grids whose sample placement is chosen by a data-layout policy.
//!
//! A [`ScalarGrid3`] owns a dense array of `f32` samples. How many samples
//! there are and where sample (0, 0, 0) sits in world space is decided by
//! the layout type `L`:
//! - [`VertexCentered`](crate::VertexCentered): samples on cell corners
//! - [`CellCentered`](crate::CellCentered): samples at cell centers
//!
//! The layout is part of the type, so two grids can only be swapped or
//! copied into each other when they share a layout.

use std::fmt::Debug;
use std::marker::PhantomData;
use std::ops::{Index, IndexMut};

use glam::{UVec3, Vec3};
use rayon::prelude::*;

use crate::array3::{checked_len, unravel, Array3};
use crate::error::{GridError, GridResult};
use crate::grid::RegularGrid3;

/// Placement policy for scalar samples on a regular grid.
pub trait DataLayout: Copy + Default + Debug + PartialEq + Send + Sync + 'static {
    /// Stable name of the concrete grid variant.
    const TYPE_NAME: &'static str;

    /// Number of samples along each axis for a grid of `resolution` cells,
    /// or `None` when a component does not fit in `u32`.
    fn data_size(resolution: UVec3) -> Option<UVec3>;

    /// World position of sample (0, 0, 0).
    fn data_origin(grid: &RegularGrid3) -> Vec3;
}

/// 3D scalar grid with samples laid out by `L`.
#[derive(Clone, Debug, PartialEq)]
pub struct ScalarGrid3<L: DataLayout> {
    geometry: RegularGrid3,
    data: Array3<f32>,
    layout: PhantomData<L>,
}

impl<L: DataLayout> Default for ScalarGrid3<L> {
    /// Zero-sized grid.
    fn default() -> Self {
        Self {
            geometry: RegularGrid3::default(),
            data: Array3::default(),
            layout: PhantomData,
        }
    }
}

impl<L: DataLayout> ScalarGrid3<L> {
    /// Create a grid with the given resolution, spacing, origin and initial value.
    pub fn new(
        resolution: UVec3,
        grid_spacing: Vec3,
        origin: Vec3,
        initial_value: f32,
    ) -> GridResult<Self> {
        let mut grid = Self::default();
        grid.resize(resolution, grid_spacing, origin, initial_value)?;
        Ok(grid)
    }

    /// Component-wise form of [`ScalarGrid3::new`].
    #[allow(clippy::too_many_arguments)]
    pub fn new_xyz(
        resolution_x: u32,
        resolution_y: u32,
        resolution_z: u32,
        grid_spacing_x: f32,
        grid_spacing_y: f32,
        grid_spacing_z: f32,
        origin_x: f32,
        origin_y: f32,
        origin_z: f32,
        initial_value: f32,
    ) -> GridResult<Self> {
        Self::new(
            UVec3::new(resolution_x, resolution_y, resolution_z),
            Vec3::new(grid_spacing_x, grid_spacing_y, grid_spacing_z),
            Vec3::new(origin_x, origin_y, origin_z),
            initial_value,
        )
    }

    /// Reallocate storage for new geometry and fill it with `initial_value`.
    ///
    /// Old samples are discarded. On error the grid is left untouched.
    /// A resolution whose sample count overflows is rejected with
    /// [`GridError::InvalidResolution`].
    pub fn resize(
        &mut self,
        resolution: UVec3,
        grid_spacing: Vec3,
        origin: Vec3,
        initial_value: f32,
    ) -> GridResult<()> {
        let geometry = RegularGrid3::new(resolution, grid_spacing, origin)?;
        let size = L::data_size(resolution)
            .filter(|&size| checked_len(size).is_some())
            .ok_or(GridError::InvalidResolution { resolution })?;

        self.geometry = geometry;
        self.data.resize(size, initial_value);

        log::debug!(
            "{}: resized to {} cells, {} samples",
            L::TYPE_NAME,
            resolution,
            self.data.size()
        );
        Ok(())
    }

    /// Component-wise form of [`ScalarGrid3::resize`].
    #[allow(clippy::too_many_arguments)]
    pub fn resize_xyz(
        &mut self,
        resolution_x: u32,
        resolution_y: u32,
        resolution_z: u32,
        grid_spacing_x: f32,
        grid_spacing_y: f32,
        grid_spacing_z: f32,
        origin_x: f32,
        origin_y: f32,
        origin_z: f32,
        initial_value: f32,
    ) -> GridResult<()> {
        self.resize(
            UVec3::new(resolution_x, resolution_y, resolution_z),
            Vec3::new(grid_spacing_x, grid_spacing_y, grid_spacing_z),
            Vec3::new(origin_x, origin_y, origin_z),
            initial_value,
        )
    }

    /// Stable name of this grid variant.
    pub fn type_name(&self) -> &'static str {
        L::TYPE_NAME
    }

    /// Geometry shared by every layout: resolution, spacing and origin.
    pub fn geometry(&self) -> &RegularGrid3 {
        &self.geometry
    }

    /// Number of cells along each axis.
    pub fn resolution(&self) -> UVec3 {
        self.geometry.resolution()
    }

    /// Cell size along each axis.
    pub fn grid_spacing(&self) -> Vec3 {
        self.geometry.spacing()
    }

    /// World position of the lower grid corner.
    pub fn origin(&self) -> Vec3 {
        self.geometry.origin()
    }

    /// Number of samples along each axis.
    pub fn data_size(&self) -> UVec3 {
        self.data.size()
    }

    /// World position of sample (0, 0, 0).
    pub fn data_origin(&self) -> Vec3 {
        L::data_origin(&self.geometry)
    }

    /// World position of sample (i, j, k).
    #[inline]
    pub fn data_position(&self, i: usize, j: usize, k: usize) -> Vec3 {
        self.data_origin() + self.grid_spacing() * Vec3::new(i as f32, j as f32, k as f32)
    }

    /// Read-only view of the samples.
    pub fn data(&self) -> &Array3<f32> {
        &self.data
    }

    /// Overwrite every sample with `value`.
    pub fn fill(&mut self, value: f32) {
        self.data.fill(value);
    }

    /// Overwrite every sample with `func(position)` of that sample.
    pub fn fill_with<F>(&mut self, func: F)
    where
        F: Fn(Vec3) -> f32 + Send + Sync,
    {
        let origin = self.data_origin();
        let spacing = self.grid_spacing();
        let (width, height) = (self.data.width(), self.data.height());

        self.data
            .as_mut_slice()
            .par_iter_mut()
            .enumerate()
            .for_each(|(idx, value)| {
                let (i, j, k) = unravel(idx, width, height);
                *value = func(origin + spacing * Vec3::new(i as f32, j as f32, k as f32));
            });
    }

    /// Visit every sample index exactly once, X fastest, then Y, then Z.
    pub fn for_each_index<F>(&self, visit: F)
    where
        F: FnMut(usize, usize, usize),
    {
        self.data.for_each_index(visit);
    }

    /// Visit every sample index exactly once from rayon workers.
    pub fn par_for_each_index<F>(&self, visit: F)
    where
        F: Fn(usize, usize, usize) + Send + Sync,
    {
        self.data.par_for_each_index(visit);
    }

    /// Exchange geometry and samples with another grid of the same layout.
    pub fn swap(&mut self, other: &mut Self) {
        std::mem::swap(&mut self.geometry, &mut other.geometry);
        self.data.swap(&mut other.data);
    }

    /// Copy geometry and samples from another grid of the same layout.
    pub fn set(&mut self, other: &Self) {
        self.geometry = other.geometry;
        self.data.clone_from(&other.data);
    }
}

impl<L: DataLayout> Index<(usize, usize, usize)> for ScalarGrid3<L> {
    type Output = f32;

    #[inline]
    fn index(&self, index: (usize, usize, usize)) -> &f32 {
        &self.data[index]
    }
}

impl<L: DataLayout> IndexMut<(usize, usize, usize)> for ScalarGrid3<L> {
    #[inline]
    fn index_mut(&mut self, index: (usize, usize, usize)) -> &mut f32 {
        &mut self.data[index]
    }
}
