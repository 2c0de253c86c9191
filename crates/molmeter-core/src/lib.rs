//! # molmeter Core Library
//!
//! Geometric measurement engine for interactive molecular viewers: users pick atoms
//! in a 3D scene and the engine turns those picks into distance, bond angle and
//! torsion measurements.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer architecture so that the geometry can be
//! tested in isolation from the interaction state machine and the embedding host.
//!
//! - **[`core`]: The Foundation.** Stateless data models (`AtomInfo`, `Measurement`),
//!   guarded vector helpers and the pure measurement calculator.
//!
//! - **[`engine`]: The Logic Core.** The stateful layer: the active tool mode, the
//!   pick accumulator that decides when a measurement is complete, and the ordered
//!   store of completed measurements with its export shape.
//!
//! - **[`workflows`]: The Public API.** `MeasurementSession` ties the engine together
//!   behind the three entry points a viewer needs (pick, mode change, clear/export),
//!   and the replay workflow drives a session from a recorded pick script.

pub mod core;
pub mod engine;
pub mod workflows;
