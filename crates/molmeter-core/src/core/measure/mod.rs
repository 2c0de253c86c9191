//! # Measurement Geometry
//!
//! Pure functions that turn an ordered list of atom coordinates into a distance,
//! bond angle, or signed torsion angle.
//!
//! The calculator never fails across its interface: wrong atom counts and
//! degenerate geometry (coincident atoms, collinear torsion chains, non-finite
//! coordinates) collapse to a
//! `0.0` sentinel in [`calculator::compute`]. Callers that need to tell a genuine
//! zero from a fallback use [`calculator::evaluate`], which reports the reason as
//! a [`Degeneracy`].

pub mod calculator;

use crate::core::models::measurement::MeasurementKind;
use thiserror::Error;

/// Why a measurement has no well-defined value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Degeneracy {
    #[error("{kind} requires {expected} atoms, got {found}")]
    AtomCountMismatch {
        kind: MeasurementKind,
        expected: usize,
        found: usize,
    },

    #[error("atom coordinates are not finite")]
    NonFiniteCoordinates,

    #[error("angle arm has zero length (vertex coincides with a neighbouring atom)")]
    CoincidentAtoms,

    #[error("torsion chain is collinear; the dihedral is undefined")]
    CollinearChain,
}
