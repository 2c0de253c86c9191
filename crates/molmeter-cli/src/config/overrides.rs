use super::models::ViewerSettings;
use crate::error::{CliError, Result};
use std::str::FromStr;
use tracing::debug;

fn parse_value<T: FromStr>(key: &str, value: &str, what: &str) -> Result<T> {
    value.trim().parse().map_err(|_| {
        CliError::Config(format!("Invalid {} value for {}: {}", what, key, value))
    })
}

/// Applies `KEY=VALUE` pairs to `settings` in order. Keys use the kebab-case
/// names of the stored document.
///
/// The result is not validated here; callers validate once after all pairs
/// have been applied.
pub fn apply_set_values(settings: &mut ViewerSettings, set_values: &[String]) -> Result<()> {
    for kv_pair in set_values {
        let Some((key, value_str)) = kv_pair.split_once('=') else {
            return Err(CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            )));
        };
        let key = key.trim();
        debug!("Applying setting override {} = {}", key, value_str);

        match key {
            "background-color" => settings.background_color = value_str.trim().to_string(),
            "ambient-lighting" => {
                settings.ambient_lighting = parse_value(key, value_str, "float")?
            }
            "quality" => settings.quality = value_str.parse()?,
            "antialiasing" => settings.antialiasing = parse_value(key, value_str, "boolean")?,
            "shadows" => settings.shadows = parse_value(key, value_str, "boolean")?,
            "auto-rotate" => settings.auto_rotate = parse_value(key, value_str, "boolean")?,
            "rotation-speed" => settings.rotation_speed = parse_value(key, value_str, "float")?,
            "atom-scale" => settings.atom_scale = parse_value(key, value_str, "float")?,
            "bond-scale" => settings.bond_scale = parse_value(key, value_str, "float")?,
            "show-hydrogens" => {
                settings.show_hydrogens = parse_value(key, value_str, "boolean")?
            }
            "show-water" => settings.show_water = parse_value(key, value_str, "boolean")?,
            "color-scheme" => settings.color_scheme = value_str.parse()?,
            "transparency" => settings.transparency = parse_value(key, value_str, "float")?,
            "sound-enabled" => settings.sound_enabled = parse_value(key, value_str, "boolean")?,
            "theme" => settings.theme = value_str.parse()?,
            "view-mode" => settings.view_mode = value_str.parse()?,
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported settings key: '{}'",
                    key
                )));
            }
        }
    }
    Ok(())
}
