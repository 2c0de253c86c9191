use super::models::ViewerSettings;
use crate::error::{CliError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Key under which the viewer settings document is stored.
pub const SETTINGS_KEY: &str = "protein-viewer-settings";

/// String-valued persistent storage, one value per key.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// Stores each key as `<dir>/<key>.toml`.
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    dir: PathBuf,
}

impl FileKeyValueStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.toml", key))
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(CliError::Io(e)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path_for(key), value).map_err(CliError::from)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CliError::Io(e)),
        }
    }
}

#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct MemoryKeyValueStore {
    entries: std::collections::HashMap<String, String>,
}

#[cfg(test)]
impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// The loaded settings together with the store they persist to.
///
/// Every change goes through [`update`](Self::update), which validates the new
/// value and writes it back before it becomes visible.
#[derive(Debug)]
pub struct SettingsHandle<S: KeyValueStore> {
    store: S,
    settings: ViewerSettings,
}

impl<S: KeyValueStore> SettingsHandle<S> {
    /// Loads settings from `store`. A missing entry yields the defaults; an
    /// entry that no longer parses is reported and replaced by the defaults.
    pub fn load(store: S) -> Result<Self> {
        let settings = match store.get(SETTINGS_KEY)? {
            None => {
                debug!("No stored settings found, using defaults.");
                ViewerSettings::default()
            }
            Some(text) => match toml::from_str::<ViewerSettings>(&text) {
                Ok(settings) => match settings.validate() {
                    Ok(()) => settings,
                    Err(e) => {
                        warn!("Stored settings are invalid ({}), using defaults.", e);
                        ViewerSettings::default()
                    }
                },
                Err(e) => {
                    warn!("Could not parse stored settings, using defaults: {}", e);
                    ViewerSettings::default()
                }
            },
        };
        Ok(Self { store, settings })
    }

    pub fn settings(&self) -> &ViewerSettings {
        &self.settings
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Applies `change` to a copy of the current settings, validates it and saves it.
    /// On any error the current settings are left untouched.
    pub fn update<F>(&mut self, change: F) -> Result<()>
    where
        F: FnOnce(&mut ViewerSettings) -> Result<()>,
    {
        let mut next = self.settings.clone();
        change(&mut next)?;
        next.validate()?;
        self.save(&next)?;
        self.settings = next;
        Ok(())
    }

    /// Forgets the stored settings and returns to the defaults.
    pub fn reset(&mut self) -> Result<()> {
        self.store.remove(SETTINGS_KEY)?;
        self.settings = ViewerSettings::default();
        info!("Settings reset to defaults.");
        Ok(())
    }

    fn save(&mut self, settings: &ViewerSettings) -> Result<()> {
        let text = toml::to_string_pretty(settings)
            .map_err(|e| CliError::Settings(format!("Failed to serialize settings: {}", e)))?;
        self.store.set(SETTINGS_KEY, &text)?;
        debug!("Settings saved under '{}'.", SETTINGS_KEY);
        Ok(())
    }
}
