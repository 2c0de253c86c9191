//! # Engine Module
//!
//! The stateful half of the measurement engine: which tool is active, which atoms
//! have been picked so far, and which measurements have been completed.
//!
//! - [`mode`] - The closed set of toolbar modes and their required atom counts
//! - [`selection`] - The pick accumulator state machine
//! - [`store`] - Ordered storage of completed measurements and the export record shape
//! - [`events`] - Optional callbacks for presentation layers
//! - [`error`] - Errors for operations that address a measurement by id
//!
//! All mutation is driven through `&mut self`; the engine never locks and never
//! performs I/O.

pub mod error;
pub mod events;
pub mod mode;
pub mod selection;
pub mod store;
