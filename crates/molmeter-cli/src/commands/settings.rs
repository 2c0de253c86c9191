use crate::cli::{SettingsArgs, SettingsCommands};
use crate::config::models::ViewerSettings;
use crate::config::overrides::apply_set_values;
use crate::config::store::{FileKeyValueStore, KeyValueStore, SettingsHandle};
use crate::error::{CliError, Result};
use crate::paths;
use std::path::Path;
use tracing::info;

pub fn run(args: SettingsArgs, settings_dir: Option<&Path>) -> Result<()> {
    let store = FileKeyValueStore::new(paths::settings_dir(settings_dir)?);
    let mut handle = SettingsHandle::load(store)?;
    let dir = handle.store().dir().to_path_buf();
    let output = execute(args.command, &mut handle, &dir)?;
    print!("{}", output);
    Ok(())
}

fn execute<S: KeyValueStore>(
    command: SettingsCommands,
    handle: &mut SettingsHandle<S>,
    dir: &Path,
) -> Result<String> {
    match command {
        SettingsCommands::Show => render(handle.settings()),
        SettingsCommands::Set { values } => {
            handle.update(|s| apply_set_values(s, &values))?;
            info!("Updated {} setting(s).", values.len());
            Ok(format!("✓ Updated {} setting(s).\n", values.len()))
        }
        SettingsCommands::Reset => {
            handle.reset()?;
            Ok("✓ Settings restored to defaults.\n".to_string())
        }
        SettingsCommands::Path => Ok(format!("{}\n", dir.display())),
    }
}

fn render(settings: &ViewerSettings) -> Result<String> {
    toml::to_string_pretty(settings)
        .map_err(|e| CliError::Settings(format!("Failed to serialize settings: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::models::Theme;
    use crate::config::store::{MemoryKeyValueStore, SETTINGS_KEY};

    fn handle() -> SettingsHandle<MemoryKeyValueStore> {
        SettingsHandle::load(MemoryKeyValueStore::new()).unwrap()
    }

    #[test]
    fn show_prints_current_settings_as_toml() {
        let mut handle = handle();
        let text = execute(SettingsCommands::Show, &mut handle, Path::new("/x")).unwrap();
        assert!(text.contains("theme = \"dark\""));
        assert!(text.contains("ambient-lighting = 0.4"));
    }

    #[test]
    fn set_then_reset() {
        let mut handle = handle();
        let set = SettingsCommands::Set {
            values: vec!["theme=light".to_string(), "sound-enabled=false".to_string()],
        };
        let text = execute(set, &mut handle, Path::new("/x")).unwrap();
        assert_eq!(text, "✓ Updated 2 setting(s).\n");
        assert_eq!(handle.settings().theme, Theme::Light);
        assert!(!handle.settings().sound_enabled);
        assert!(handle.store().get(SETTINGS_KEY).unwrap().is_some());

        execute(SettingsCommands::Reset, &mut handle, Path::new("/x")).unwrap();
        assert_eq!(handle.settings(), &ViewerSettings::default());
    }

    #[test]
    fn invalid_set_is_reported_and_not_saved() {
        let mut handle = handle();
        let set = SettingsCommands::Set {
            values: vec!["transparency=3".to_string()],
        };
        assert!(matches!(
            execute(set, &mut handle, Path::new("/x")),
            Err(CliError::Config(_))
        ));
        assert_eq!(handle.store().get(SETTINGS_KEY).unwrap(), None);
    }

    #[test]
    fn path_prints_directory() {
        let mut handle = handle();
        let text = execute(SettingsCommands::Path, &mut handle, Path::new("/tmp/mm")).unwrap();
        assert_eq!(text, "/tmp/mm\n");
    }
}
