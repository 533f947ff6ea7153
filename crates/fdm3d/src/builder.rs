//! Value-type builder for scalar grids.
//!
//! The builder is plain data: every `with_*` call consumes it and returns
//! an updated copy, so one builder can seed several differently configured
//! grids without shared mutable state. It also (de)serializes, which makes
//! it usable as a grid section in a JSON config.

use std::marker::PhantomData;

use glam::{UVec3, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::GridResult;
use crate::scalar_grid::{DataLayout, ScalarGrid3};
use crate::serde_utils::{deserialize_uvec3, deserialize_vec3, serialize_uvec3, serialize_vec3};

/// Named, order-independent configuration for a [`ScalarGrid3`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, bound = "")]
pub struct ScalarGridBuilder3<L: DataLayout> {
    /// Number of cells along each axis
    #[serde(serialize_with = "serialize_uvec3", deserialize_with = "deserialize_uvec3")]
    pub resolution: UVec3,
    /// Cell size along each axis
    #[serde(serialize_with = "serialize_vec3", deserialize_with = "deserialize_vec3")]
    pub grid_spacing: Vec3,
    /// World position of the grid's lower corner
    #[serde(serialize_with = "serialize_vec3", deserialize_with = "deserialize_vec3")]
    pub origin: Vec3,
    /// Value every sample starts with
    pub initial_value: f32,
    #[serde(skip)]
    layout: PhantomData<L>,
}

impl<L: DataLayout> Default for ScalarGridBuilder3<L> {
    fn default() -> Self {
        Self {
            resolution: UVec3::ONE,
            grid_spacing: Vec3::ONE,
            origin: Vec3::ZERO,
            initial_value: 0.0,
            layout: PhantomData,
        }
    }
}

impl<L: DataLayout> ScalarGridBuilder3<L> {
    /// Builder preset to a 1x1x1 unit grid at the origin.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of cells along each axis.
    pub fn with_resolution(self, resolution: UVec3) -> Self {
        Self { resolution, ..self }
    }

    /// Component-wise form of [`ScalarGridBuilder3::with_resolution`].
    pub fn with_resolution_xyz(self, x: u32, y: u32, z: u32) -> Self {
        self.with_resolution(UVec3::new(x, y, z))
    }

    /// Set the cell size along each axis.
    pub fn with_grid_spacing(self, grid_spacing: Vec3) -> Self {
        Self {
            grid_spacing,
            ..self
        }
    }

    /// Component-wise form of [`ScalarGridBuilder3::with_grid_spacing`].
    pub fn with_grid_spacing_xyz(self, x: f32, y: f32, z: f32) -> Self {
        self.with_grid_spacing(Vec3::new(x, y, z))
    }

    /// Set the world position of the lower grid corner.
    pub fn with_origin(self, origin: Vec3) -> Self {
        Self { origin, ..self }
    }

    /// Component-wise form of [`ScalarGridBuilder3::with_origin`].
    pub fn with_origin_xyz(self, x: f32, y: f32, z: f32) -> Self {
        self.with_origin(Vec3::new(x, y, z))
    }

    /// Set the value every sample starts with.
    pub fn with_initial_value(self, initial_value: f32) -> Self {
        Self {
            initial_value,
            ..self
        }
    }

    /// Build a fully resized grid from the accumulated settings.
    pub fn build(&self) -> GridResult<ScalarGrid3<L>> {
        self.build_with(
            self.resolution,
            self.grid_spacing,
            self.origin,
            self.initial_value,
        )
    }

    /// Build a grid from explicit settings, ignoring the accumulated ones.
    ///
    /// Lets generic code hold a builder per layout and still choose the
    /// geometry at the call site.
    pub fn build_with(
        &self,
        resolution: UVec3,
        grid_spacing: Vec3,
        origin: Vec3,
        initial_value: f32,
    ) -> GridResult<ScalarGrid3<L>> {
        ScalarGrid3::new(resolution, grid_spacing, origin, initial_value)
    }
}

impl<L: DataLayout> ScalarGrid3<L> {
    /// Builder for this grid variant, preset to a 1x1x1 unit grid.
    pub fn builder() -> ScalarGridBuilder3<L> {
        ScalarGridBuilder3::default()
    }
}
