use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Tony Kan, Ted Yu, William A. Goddard III, Victor Wai Tak Kam",
    version,
    about = "molmeter CLI - Distance, bond angle and torsion measurements from atom picks recorded in a molecular viewer.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Directory holding persisted viewer settings.
    /// Defaults to the OS-specific configuration directory.
    #[arg(long, global = true, value_name = "PATH")]
    pub settings_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replay a recorded pick script and report the resulting measurements.
    Measure(MeasureArgs),
    /// Inspect or change the persisted viewer settings.
    Settings(SettingsArgs),
}

/// Arguments for the `measure` subcommand.
#[derive(Args, Debug)]
pub struct MeasureArgs {
    /// Path to the pick script in TOML format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub picks: PathBuf,

    /// Tool mode to start in, overriding the `mode` key of the script.
    /// Accepts 'select', 'measure-distance', 'measure-angle', 'measure-torsion' or a short alias.
    #[arg(short, long, value_name = "MODE")]
    pub mode: Option<String>,

    /// Write the exported measurements to a file instead of stdout.
    /// Without a value the file is named 'measurements.json' or 'measurements.csv' to match --format.
    #[arg(short, long, value_name = "PATH", num_args = 0..=1)]
    pub output: Option<Option<PathBuf>>,

    /// Format of the exported document.
    #[arg(short, long, value_enum, default_value_t = ExportFormat::Json)]
    pub format: ExportFormat,
}

impl MeasureArgs {
    /// The export file, if any. A bare `--output` names it after the format.
    pub fn output_path(&self) -> Option<PathBuf> {
        self.output.as_ref().map(|path| {
            path.clone().unwrap_or_else(|| {
                PathBuf::from(format!("measurements.{}", self.format.extension()))
            })
        })
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }
}

/// Arguments for the `settings` subcommand.
#[derive(Args, Debug)]
pub struct SettingsArgs {
    #[command(subcommand)]
    pub command: SettingsCommands,
}

/// Available commands for settings management.
#[derive(Subcommand, Debug)]
pub enum SettingsCommands {
    /// Print the current settings as TOML.
    Show,
    /// Change one or more settings. Example: molmeter settings set theme=light atom-scale=1.2
    Set {
        #[arg(required = true, value_name = "KEY=VALUE")]
        values: Vec<String>,
    },
    /// Restore every setting to its default.
    Reset,
    /// Show the absolute path of the settings directory.
    Path,
}
