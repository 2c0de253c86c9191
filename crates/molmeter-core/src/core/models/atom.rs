use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// An atom as reported by the structure source when the user picks it in the viewport.
///
/// The measurement core treats this as an immutable snapshot: it only reads the
/// coordinates for geometry and the residue fields for labels. On the wire the
/// position is flattened to `x`, `y`, `z` and field names are camelCase, matching
/// the pick events emitted by the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "AtomRecord", into = "AtomRecord")]
pub struct AtomInfo {
    /// Identifier assigned by the structure source (e.g. the serial number).
    pub id: String,
    /// Chemical element symbol (e.g. "C", "N", "FE").
    pub element: String,
    /// Residue name (e.g. "ALA").
    pub residue: String,
    /// Residue sequence number.
    pub residue_number: isize,
    /// Chain identifier.
    pub chain: String,
    /// Cartesian coordinates in Angstroms.
    pub position: Point3<f64>,
    /// Atom name within its residue (e.g. "CA").
    pub atom_name: String,
    /// Crystallographic temperature factor, if the source provides one.
    pub b_factor: Option<f64>,
    /// Occupancy, if the source provides one.
    pub occupancy: Option<f64>,
}

impl AtomInfo {
    /// Creates an atom with the fields needed for measurement and labelling.
    ///
    /// The identifier, element and chain start out empty and the optional
    /// crystallographic fields are unset; use the `with_*` methods to fill them.
    pub fn new(
        atom_name: &str,
        residue: &str,
        residue_number: isize,
        position: Point3<f64>,
    ) -> Self {
        Self {
            id: String::new(),
            element: String::new(),
            residue: residue.to_string(),
            residue_number,
            chain: String::new(),
            position,
            atom_name: atom_name.to_string(),
            b_factor: None,
            occupancy: None,
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = id.to_string();
        self
    }

    pub fn with_element(mut self, element: &str) -> Self {
        self.element = element.to_string();
        self
    }

    pub fn with_chain(mut self, chain: &str) -> Self {
        self.chain = chain.to_string();
        self
    }

    pub fn with_b_factor(mut self, b_factor: f64) -> Self {
        self.b_factor = Some(b_factor);
        self
    }

    pub fn with_occupancy(mut self, occupancy: f64) -> Self {
        self.occupancy = Some(occupancy);
        self
    }

    /// Residue name followed by residue number, e.g. `ALA12`.
    pub fn residue_label(&self) -> String {
        format!("{}{}", self.residue, self.residue_number)
    }

    /// Residue label plus atom name, e.g. `ALA12.CA`.
    pub fn display_label(&self) -> String {
        format!("{}.{}", self.residue_label(), self.atom_name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AtomRecord {
    #[serde(default)]
    id: String,
    #[serde(default)]
    element: String,
    residue: String,
    residue_number: isize,
    #[serde(default)]
    chain: String,
    x: f64,
    y: f64,
    z: f64,
    atom_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    b_factor: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    occupancy: Option<f64>,
}

impl From<AtomRecord> for AtomInfo {
    fn from(r: AtomRecord) -> Self {
        Self {
            id: r.id,
            element: r.element,
            residue: r.residue,
            residue_number: r.residue_number,
            chain: r.chain,
            position: Point3::new(r.x, r.y, r.z),
            atom_name: r.atom_name,
            b_factor: r.b_factor,
            occupancy: r.occupancy,
        }
    }
}

impl From<AtomInfo> for AtomRecord {
    fn from(a: AtomInfo) -> Self {
        Self {
            id: a.id,
            element: a.element,
            residue: a.residue,
            residue_number: a.residue_number,
            chain: a.chain,
            x: a.position.x,
            y: a.position.y,
            z: a.position.z,
            atom_name: a.atom_name,
            b_factor: a.b_factor,
            occupancy: a.occupancy,
        }
    }
}
