//! # Core Module
//!
//! Stateless building blocks of the measurement engine.
//!
//! - **Molecular Representation** ([`models`]) - Picked atoms and completed measurement records
//! - **Measurement Geometry** ([`measure`]) - Distance, angle and torsion calculation with
//!   explicit degeneracy reporting
//! - **Vector Math** ([`utils`]) - Guarded vector helpers over `nalgebra` types
//!
//! Nothing in this module holds state or performs I/O, so every function can be
//! tested without a rendering environment.

pub mod measure;
pub mod models;
pub mod utils;
