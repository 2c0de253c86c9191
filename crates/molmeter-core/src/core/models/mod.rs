//! # Core Models Module
//!
//! Data structures describing what the user picked and what was measured.
//!
//! - [`atom`] - [`atom::AtomInfo`], the immutable atom snapshot delivered with each pick
//! - [`measurement`] - [`measurement::MeasurementKind`] and the completed [`measurement::Measurement`] record
//! - [`ids`] - Time-derived, strictly increasing measurement identifiers
//!
//! ```ignore
//! use molmeter::core::models::{atom::AtomInfo, ids::MeasurementId, measurement::*};
//!
//! let atoms = vec![
//!     AtomInfo::new("CA", "ALA", 1, Point3::new(0.0, 0.0, 0.0)),
//!     AtomInfo::new("CA", "GLY", 2, Point3::new(3.8, 0.0, 0.0)),
//! ];
//! let m = Measurement::new(MeasurementId::new(1), MeasurementKind::Distance, atoms, Utc::now())?;
//! assert_eq!(m.formatted_value(), "3.80 Å");
//! ```

pub mod atom;
pub mod ids;
pub mod measurement;
