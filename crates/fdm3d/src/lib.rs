//! Vertex-centered scalar grids and finite-difference system assembly.
//!
//! Regular 3D grids whose samples are placed by a layout policy
//! (vertex- or cell-centered), plus assembly of the symmetric 7-point
//! Laplacian into an [`FdmLinearSystem3`] ready for an external solver.
//!
//! # Example
//!
//! ```
//! use fdm3d::{assemble, FdmLinearSystem3, UVec3, Vec3, VertexCenteredScalarGrid3};
//!
//! let grid = VertexCenteredScalarGrid3::builder()
//!     .with_resolution(UVec3::new(8, 8, 8))
//!     .with_grid_spacing(Vec3::splat(0.1))
//!     .build()
//!     .unwrap();
//! assert_eq!(grid.data_size(), UVec3::new(9, 9, 9));
//!
//! let mut system = FdmLinearSystem3::default();
//! assemble(&mut system, grid.resolution()).unwrap();
//! assert_eq!(system.a[(0, 0, 0)].center, 3.0);
//! assert_eq!(system.b[(0, 0, 0)], 1.0);
//! ```

pub mod array3;
pub mod assembler;
pub mod builder;
pub mod cell_centered;
pub mod error;
pub mod fdm;
pub mod grid;
pub mod scalar_grid;
pub mod serde_utils;
pub mod variant;
pub mod vertex_centered;

pub use array3::Array3;
pub use assembler::{assemble, AxisBoundary, BoundaryPolicy, SystemAssembler};
pub use builder::ScalarGridBuilder3;
pub use cell_centered::{CellCentered, CellCenteredScalarGrid3};
pub use error::{GridError, GridResult};
pub use fdm::{FdmLinearSystem3, FdmMatrix3, FdmMatrixRow3, FdmVector3};
pub use glam::{UVec3, Vec3};
pub use grid::RegularGrid3;
pub use scalar_grid::{DataLayout, ScalarGrid3};
pub use variant::AnyScalarGrid3;
pub use vertex_centered::{VertexCentered, VertexCenteredScalarGrid3};
