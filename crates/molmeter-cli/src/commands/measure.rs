use crate::cli::MeasureArgs;
use crate::config::store::{FileKeyValueStore, SettingsHandle};
use crate::error::{CliError, Result};
use crate::export;
use crate::panel;
use crate::paths;
use crate::ui::{CliProgressHandler, UiEvent};
use molmeter::engine::events::EventReporter;
use molmeter::engine::mode::ToolMode;
use molmeter::workflows::replay::{self, PickScript};
use molmeter::workflows::session::MeasurementSession;
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;
use tokio::sync::mpsc;
use tracing::info;

pub async fn run(
    args: MeasureArgs,
    settings_dir: Option<&Path>,
    ui_sender: mpsc::Sender<UiEvent>,
) -> Result<()> {
    let dir = paths::settings_dir(settings_dir)?;
    let settings = SettingsHandle::load(FileKeyValueStore::new(dir))?;
    info!(
        "Loaded viewer settings (theme: {}, sound: {}).",
        settings.settings().theme,
        settings.settings().sound_enabled
    );

    let mut script = load_script(&args.picks)?;
    if let Some(mode) = parse_start_mode(args.mode.as_deref())? {
        info!("Starting mode overridden from the command line: {}", mode);
        script.mode = Some(mode);
    }

    let handler =
        CliProgressHandler::new(ui_sender).with_sound(settings.settings().sound_enabled);
    let mut session = MeasurementSession::new()
        .with_reporter(EventReporter::with_callback(handler.event_callback()));

    info!("Invoking the replay workflow...");
    let summary = tokio::task::block_in_place(|| {
        replay::run(&mut session, &script, handler.progress_callback())
    })?;
    info!(
        "Replay complete: {} step(s), {} measurement(s), {} rejected.",
        summary.steps, summary.completed, summary.rejected
    );

    let panel = panel::render(session.measurements(), &session.summary());
    let records = session.export_measurements();

    match args.output_path() {
        Some(path) => {
            print!("{}", panel);
            let file = File::create(&path)?;
            export::write_records(&records, args.format, BufWriter::new(file))?;
            println!(
                "✓ Exported {} measurement(s) to: {}",
                records.len(),
                path.display()
            );
        }
        None => {
            eprint!("{}", panel);
            export::write_records(&records, args.format, io::stdout().lock())?;
        }
    }
    Ok(())
}

pub fn load_script(path: &Path) -> Result<PickScript> {
    info!("Loading pick script from {:?}", path);
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|e| CliError::FileParsing {
        path: path.to_path_buf(),
        source: e.into(),
    })
}

fn parse_start_mode(mode: Option<&str>) -> Result<Option<ToolMode>> {
    mode.map(str::parse::<ToolMode>)
        .transpose()
        .map_err(|e| CliError::Argument(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::ExportFormat;
    use std::fs;
    use tempfile::tempdir;

    const SCRIPT: &str = r#"
        [[step]]
        action = "pick"
        at = "2024-05-01T12:00:00Z"
        atom = { residue = "ALA", residueNumber = 1, atomName = "CA", x = 0.0, y = 0.0, z = 0.0 }

        [[step]]
        action = "pick"
        at = "2024-05-01T12:00:00.500Z"
        atom = { residue = "GLY", residueNumber = 2, atomName = "CA", x = 3.0, y = 4.0, z = 0.0 }
    "#;

    fn measure_args(picks: &Path, output: &Path, format: ExportFormat) -> MeasureArgs {
        MeasureArgs {
            picks: picks.to_path_buf(),
            mode: Some("distance".to_string()),
            output: Some(Some(output.to_path_buf())),
            format,
        }
    }

    #[test]
    fn start_mode_accepts_aliases_and_rejects_unknown_names() {
        assert_eq!(parse_start_mode(None).unwrap(), None);
        assert_eq!(
            parse_start_mode(Some("torsion")).unwrap(),
            Some(ToolMode::MeasureTorsion)
        );
        assert!(matches!(
            parse_start_mode(Some("volume")),
            Err(CliError::Argument(_))
        ));
    }

    #[test]
    fn malformed_script_reports_the_file() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("broken.toml");
        fs::write(&path, "[[step]]\naction = \"teleport\"\n").unwrap();

        match load_script(&path) {
            Err(CliError::FileParsing { path: p, .. }) => assert_eq!(p, path),
            other => panic!("Expected a parsing error, got {other:?}"),
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn replay_writes_json_export() {
        let temp_dir = tempdir().unwrap();
        let picks = temp_dir.path().join("picks.toml");
        let output = temp_dir.path().join("out.json");
        fs::write(&picks, SCRIPT).unwrap();
        let (sender, _receiver) = mpsc::channel(64);

        run(
            measure_args(&picks, &output, ExportFormat::Json),
            Some(temp_dir.path()),
            sender,
        )
        .await
        .unwrap();

        let parsed: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        let records = parsed.as_array().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["type"], "distance");
        assert_eq!(records[0]["atoms"], "ALA1 → GLY2");
        assert_eq!(records[0]["timestamp"], "2024-05-01T12:00:00.500Z");
        assert!((records[0]["value"].as_f64().unwrap() - 5.0).abs() < 1e-12);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn replay_writes_csv_export() {
        let temp_dir = tempdir().unwrap();
        let picks = temp_dir.path().join("picks.toml");
        let output = temp_dir.path().join("out.csv");
        fs::write(&picks, SCRIPT).unwrap();
        let (sender, _receiver) = mpsc::channel(64);

        run(
            measure_args(&picks, &output, ExportFormat::Csv),
            Some(temp_dir.path()),
            sender,
        )
        .await
        .unwrap();

        let text = fs::read_to_string(&output).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "type,value,atoms,timestamp");
        assert!(lines[1].starts_with("distance,5"));
    }
}
