use super::atom::AtomInfo;
use super::ids::MeasurementId;
use crate::core::measure::Degeneracy;
use crate::core::measure::calculator;
use chrono::{DateTime, Utc};
use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The geometric quantity a measurement reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeasurementKind {
    /// Euclidean distance between two atoms, in Angstroms.
    Distance,
    /// Bond angle at the middle of three atoms, in degrees.
    Angle,
    /// Signed dihedral angle of a four-atom chain, in degrees.
    Torsion,
}

impl MeasurementKind {
    pub const ALL: [MeasurementKind; 3] = [Self::Distance, Self::Angle, Self::Torsion];

    /// Number of picked atoms that completes a measurement of this kind.
    ///
    /// This is the only place the atom counts are defined; adding a kind means
    /// adding a row here and a branch in [`calculator::evaluate`].
    pub const fn required_atoms(self) -> usize {
        match self {
            Self::Distance => 2,
            Self::Angle => 3,
            Self::Torsion => 4,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Distance => "distance",
            Self::Angle => "angle",
            Self::Torsion => "torsion",
        }
    }

    /// Display unit for values of this kind.
    pub const fn unit(self) -> &'static str {
        match self {
            Self::Distance => "Å",
            Self::Angle | Self::Torsion => "°",
        }
    }

    /// Formats a value the way the measurement panel shows it.
    pub fn format_value(self, value: f64) -> String {
        match self {
            Self::Distance => format!("{:.2} {}", value, self.unit()),
            Self::Angle | Self::Torsion => format!("{:.1}{}", value, self.unit()),
        }
    }
}

impl fmt::Display for MeasurementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MeasurementKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "distance" => Ok(Self::Distance),
            "angle" => Ok(Self::Angle),
            "torsion" | "dihedral" => Ok(Self::Torsion),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum MeasurementError {
    #[error("A {kind} measurement needs exactly {expected} atoms, but {found} were given")]
    AtomCount {
        kind: MeasurementKind,
        expected: usize,
        found: usize,
    },
}

/// A completed geometric measurement.
///
/// The atom list always holds exactly [`MeasurementKind::required_atoms`] atoms in
/// pick order, which determines the vertex of an angle and the sign of a torsion.
/// Everything except the highlight flag is fixed at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    id: MeasurementId,
    kind: MeasurementKind,
    atoms: Vec<AtomInfo>,
    value: f64,
    degeneracy: Option<Degeneracy>,
    timestamp: DateTime<Utc>,
    highlighted: bool,
}

impl Measurement {
    /// Builds a measurement and computes its value from the atom coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`MeasurementError::AtomCount`] if `atoms` does not hold exactly the
    /// number of atoms `kind` requires.
    pub fn new(
        id: MeasurementId,
        kind: MeasurementKind,
        atoms: Vec<AtomInfo>,
        timestamp: DateTime<Utc>,
    ) -> Result<Self, MeasurementError> {
        let expected = kind.required_atoms();
        if atoms.len() != expected {
            return Err(MeasurementError::AtomCount {
                kind,
                expected,
                found: atoms.len(),
            });
        }

        let points: Vec<Point3<f64>> = atoms.iter().map(|a| a.position).collect();
        let (value, degeneracy) = match calculator::evaluate(&points, kind) {
            Ok(value) => (value, None),
            Err(reason) => (0.0, Some(reason)),
        };

        Ok(Self {
            id,
            kind,
            atoms,
            value,
            degeneracy,
            timestamp,
            highlighted: false,
        })
    }

    pub fn id(&self) -> MeasurementId {
        self.id
    }

    pub fn kind(&self) -> MeasurementKind {
        self.kind
    }

    pub fn atoms(&self) -> &[AtomInfo] {
        &self.atoms
    }

    /// Distance in Angstroms or angle in degrees; `0.0` when degenerate.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Why the value fell back to the `0.0` sentinel, if it did.
    pub fn degeneracy(&self) -> Option<Degeneracy> {
        self.degeneracy
    }

    pub fn is_degenerate(&self) -> bool {
        self.degeneracy.is_some()
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    pub(crate) fn set_highlighted(&mut self, highlighted: bool) {
        self.highlighted = highlighted;
    }

    pub fn formatted_value(&self) -> String {
        self.kind.format_value(self.value)
    }

    /// Atom labels joined in pick order, e.g. `ALA1.CA - GLY2.N`.
    pub fn atom_chain_label(&self) -> String {
        self.atoms
            .iter()
            .map(AtomInfo::display_label)
            .collect::<Vec<_>>()
            .join(" - ")
    }

    /// Residue labels joined with an arrow in pick order, e.g. `ALA1 → GLY2`.
    pub fn export_label(&self) -> String {
        self.atoms
            .iter()
            .map(AtomInfo::residue_label)
            .collect::<Vec<_>>()
            .join(" → ")
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} {}",
            self.kind,
            self.atom_chain_label(),
            self.formatted_value()
        )
    }
}
