//! # sweepdist
//!
//! `sweepdist` is a Rust library for exact signed Euclidean distance
//! transforms on n-dimensional grids, designed to be used in Rust as well
//! as compiled to WebAssembly (WASM). Given a label grid split into
//! foreground and background, it computes for every cell the exact
//! (optionally squared, optionally signed) distance to the nearest cell of
//! the opposite class.
//!
//! ## Features
//!
//! - **Exact**: a separable lower-envelope merge per 1-D line, not a
//!   chamfer approximation; squared results are integer-exact on unit
//!   grids.
//! - **Parallel**: each sweep pass fans its lines out over the rayon pool;
//!   results are independent of the worker count.
//! - **Calibrated**: optional per-axis physical spacing, so distances can
//!   be geometric rather than index-based.
//! - **WASM-first**: `DistanceField2`/`DistanceField3` wrappers built with
//!   `wasm-bindgen` for seamless integration with JavaScript and
//!   TypeScript.
//!
//! ## Example
//!
//! ```
//! use sweepdist::{DistanceTransform, GridShape, ScalarGrid, TransformConfig};
//!
//! // A 2x2 grid with a single feature cell in the corner.
//! let labels = ScalarGrid::from_vec(GridShape::new(&[2, 2]), vec![1u8, 0, 0, 0]);
//! let engine = DistanceTransform::new(TransformConfig {
//!     squared_distance: true,
//!     ..TransformConfig::default()
//! });
//! let field = engine.transform::<f64>(&labels).unwrap();
//! assert_eq!(field.as_slice(), &[0.0, 1.0, 1.0, 2.0]);
//! ```
//!
//! ## Main Interface
//!
//! The primary entry point is the [`DistanceTransform`] struct, configured
//! through [`TransformConfig`] and fed a [`ScalarGrid`] of labels.

mod envelope;
mod error;
mod field;
mod grid;
mod partition;
mod shape;
mod transform;

pub use error::TransformError;
pub use field::DistanceField2;
pub use field::DistanceField3;
pub use grid::ScalarGrid;
pub use partition::Region;
pub use partition::split_lines;
pub use shape::GridShape;
pub use transform::Distance;
pub use transform::DistanceTransform;
pub use transform::TransformConfig;

#[cfg(target_arch = "wasm32")]
pub use field::init_threads;
