use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RenderQuality {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorScheme {
    #[serde(rename = "chainid")]
    ChainId,
    #[serde(rename = "element")]
    Element,
    #[serde(rename = "residue")]
    Residue,
    #[serde(rename = "bfactor")]
    BFactor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Theme {
    Dark,
    Light,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViewMode {
    Cartoon,
    BallStick,
    Surface,
    Ribbon,
}

macro_rules! named_choice {
    ($ty:ident, $what:literal, { $($variant:ident => $name:literal),+ $(,)? }) => {
        impl $ty {
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = CliError;

            fn from_str(s: &str) -> Result<Self> {
                match s.trim().to_ascii_lowercase().as_str() {
                    $($name => Ok(Self::$variant),)+
                    _ => Err(CliError::Config(format!(
                        "Invalid {} '{}'. Expected one of: {}.",
                        $what,
                        s,
                        [$($name),+].join(", ")
                    ))),
                }
            }
        }
    };
}

named_choice!(RenderQuality, "quality", {
    Low => "low",
    Medium => "medium",
    High => "high",
});
named_choice!(ColorScheme, "color scheme", {
    ChainId => "chainid",
    Element => "element",
    Residue => "residue",
    BFactor => "bfactor",
});
named_choice!(Theme, "theme", { Dark => "dark", Light => "light" });
named_choice!(ViewMode, "view mode", {
    Cartoon => "cartoon",
    BallStick => "ball-stick",
    Surface => "surface",
    Ribbon => "ribbon",
});

/// Display preferences for the viewer, persisted between sessions.
///
/// Keys absent from a stored document take their default, so older files keep
/// loading after new settings are added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields, default)]
pub struct ViewerSettings {
    /// `#rrggbb`.
    pub background_color: String,
    pub ambient_lighting: f64,
    pub quality: RenderQuality,
    pub antialiasing: bool,
    pub shadows: bool,
    pub auto_rotate: bool,
    /// Radians per frame.
    pub rotation_speed: f64,
    pub atom_scale: f64,
    pub bond_scale: f64,
    pub show_hydrogens: bool,
    pub show_water: bool,
    pub color_scheme: ColorScheme,
    pub transparency: f64,
    pub sound_enabled: bool,
    pub theme: Theme,
    pub view_mode: ViewMode,
}

impl ViewerSettings {
    /// # Errors
    ///
    /// Returns [`CliError::Config`] naming the first setting that is out of range.
    pub fn validate(&self) -> Result<()> {
        if !is_hex_color(&self.background_color) {
            return Err(CliError::Config(format!(
                "`background-color` must be a '#rrggbb' color, got '{}'.",
                self.background_color
            )));
        }
        for (key, value) in [
            ("ambient-lighting", self.ambient_lighting),
            ("transparency", self.transparency),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(CliError::Config(format!(
                    "`{}` must be between 0 and 1, got {}.",
                    key, value
                )));
            }
        }
        for (key, value) in [
            ("atom-scale", self.atom_scale),
            ("bond-scale", self.bond_scale),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(CliError::Config(format!(
                    "`{}` must be a positive number, got {}.",
                    key, value
                )));
            }
        }
        if !(self.rotation_speed.is_finite() && self.rotation_speed >= 0.0) {
            return Err(CliError::Config(format!(
                "`rotation-speed` must be non-negative, got {}.",
                self.rotation_speed
            )));
        }
        Ok(())
    }
}

fn is_hex_color(s: &str) -> bool {
    s.len() == 7
        && s.starts_with('#')
        && s[1..].chars().all(|c| c.is_ascii_hexdigit())
}
