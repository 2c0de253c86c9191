use crate::error::{CliError, Result};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Resolves the settings directory: an explicit `--settings-dir` wins,
/// otherwise the OS-specific configuration directory is used.
pub fn settings_dir(custom: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = custom {
        debug!("Using custom settings directory: {:?}", path);
        return Ok(path.to_path_buf());
    }
    default_settings_dir()
}

fn default_settings_dir() -> Result<PathBuf> {
    ProjectDirs::from("edu", "caltech", "molmeter")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| {
            CliError::Settings("Could not determine the default settings directory.".to_string())
        })
}
