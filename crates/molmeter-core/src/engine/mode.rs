use crate::core::models::measurement::MeasurementKind;
use phf::{Map, phf_map};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The toolbar tool that decides what an atom pick means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ToolMode {
    /// Picks inspect a single atom; nothing is measured.
    #[default]
    Select,
    MeasureDistance,
    MeasureAngle,
    MeasureTorsion,
}

static MODE_NAMES: Map<&'static str, ToolMode> = phf_map! {
    "select" => ToolMode::Select,
    "measure-distance" => ToolMode::MeasureDistance,
    "measure-angle" => ToolMode::MeasureAngle,
    "measure-torsion" => ToolMode::MeasureTorsion,
    "measure-dihedral" => ToolMode::MeasureTorsion,
    "distance" => ToolMode::MeasureDistance,
    "angle" => ToolMode::MeasureAngle,
    "torsion" => ToolMode::MeasureTorsion,
    "dihedral" => ToolMode::MeasureTorsion,
};

#[derive(Debug, Error, PartialEq, Eq, Clone)]
#[error(
    "Unknown tool mode '{0}'. Expected one of 'select', 'measure-distance', 'measure-angle', 'measure-torsion'."
)]
pub struct ParseModeError(pub String);

impl ToolMode {
    pub const ALL: [ToolMode; 4] = [
        Self::Select,
        Self::MeasureDistance,
        Self::MeasureAngle,
        Self::MeasureTorsion,
    ];

    /// The measurement this mode collects atoms for, or `None` in select mode.
    pub const fn measurement_kind(self) -> Option<MeasurementKind> {
        match self {
            Self::Select => None,
            Self::MeasureDistance => Some(MeasurementKind::Distance),
            Self::MeasureAngle => Some(MeasurementKind::Angle),
            Self::MeasureTorsion => Some(MeasurementKind::Torsion),
        }
    }

    /// Atoms needed to complete a measurement in this mode.
    pub fn required_atoms(self) -> Option<usize> {
        self.measurement_kind().map(MeasurementKind::required_atoms)
    }

    pub const fn for_kind(kind: MeasurementKind) -> Self {
        match kind {
            MeasurementKind::Distance => Self::MeasureDistance,
            MeasurementKind::Angle => Self::MeasureAngle,
            MeasurementKind::Torsion => Self::MeasureTorsion,
        }
    }

    pub const fn is_measuring(self) -> bool {
        !matches!(self, Self::Select)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Select => "select",
            Self::MeasureDistance => "measure-distance",
            Self::MeasureAngle => "measure-angle",
            Self::MeasureTorsion => "measure-torsion",
        }
    }
}

impl fmt::Display for ToolMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToolMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace('_', "-");
        MODE_NAMES
            .get(key.as_str())
            .copied()
            .ok_or_else(|| ParseModeError(s.to_string()))
    }
}

impl TryFrom<String> for ToolMode {
    type Error = ParseModeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ToolMode> for String {
    fn from(mode: ToolMode) -> Self {
        mode.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_mode_is_select() {
        assert_eq!(ToolMode::default(), ToolMode::Select);
    }

    #[test]
    fn required_atoms_follow_measurement_kind() {
        assert_eq!(ToolMode::Select.required_atoms(), None);
        assert_eq!(ToolMode::MeasureDistance.required_atoms(), Some(2));
        assert_eq!(ToolMode::MeasureAngle.required_atoms(), Some(3));
        assert_eq!(ToolMode::MeasureTorsion.required_atoms(), Some(4));
    }

    #[test]
    fn for_kind_round_trips_measurement_kind() {
        for kind in MeasurementKind::ALL {
            assert_eq!(ToolMode::for_kind(kind).measurement_kind(), Some(kind));
        }
    }

    #[test]
    fn canonical_names_parse_back() {
        for mode in ToolMode::ALL {
            assert_eq!(mode.as_str().parse::<ToolMode>(), Ok(mode));
        }
    }

    #[test]
    fn aliases_and_case_variants_are_accepted() {
        assert_eq!("Distance".parse(), Ok(ToolMode::MeasureDistance));
        assert_eq!("dihedral".parse(), Ok(ToolMode::MeasureTorsion));
        assert_eq!("MEASURE_ANGLE".parse(), Ok(ToolMode::MeasureAngle));
        assert_eq!("  select ".parse(), Ok(ToolMode::Select));
    }

    #[test]
    fn unknown_mode_is_rejected() {
        assert_eq!(
            "measure-area".parse::<ToolMode>(),
            Err(ParseModeError("measure-area".to_string()))
        );
    }

    #[test]
    fn serde_uses_canonical_names() {
        #[derive(Serialize, Deserialize, PartialEq, Debug)]
        struct Wrapper {
            mode: ToolMode,
        }
        let parsed: Wrapper = toml::from_str(r#"mode = "angle""#).unwrap();
        assert_eq!(parsed.mode, ToolMode::MeasureAngle);
        let written = toml::to_string(&parsed).unwrap();
        assert_eq!(written.trim(), r#"mode = "measure-angle""#);
    }
}
