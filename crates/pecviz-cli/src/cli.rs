use clap::{Args, Parser, Subcommand};
use pecviz::engine::store::Slot;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "PECViz Contributors",
    version,
    about = "PECViz CLI - Summarize VQE potential energy curves and drive the animated H2 model headlessly.",
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

    /// Set the number of threads for parallel frame sampling.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load the three datasets and print equilibrium, deviation and noise statistics.
    Summary(SummaryArgs),
    /// Run the H2 model headlessly and write the per-frame scene as a CSV trajectory.
    Animate(AnimateArgs),
    /// Export the plotted series of each loaded dataset as CSV.
    Chart(ChartArgs),
    /// Inspect the configuration file location.
    Config(ConfigArgs),
}

/// Options shared by every command that reads the configuration file.
#[derive(Args, Debug, Clone, Default)]
pub struct SettingsArgs {
    /// Path to a configuration file in TOML format.
    /// Defaults to the per-user config file if it exists.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S control.step=0.01
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE")]
    pub set_values: Vec<String>,
}

/// Where the datasets are read from.
#[derive(Args, Debug, Clone, Default)]
pub struct DataSourceArgs {
    /// Local directory containing `results/csv/`.
    #[arg(short, long, value_name = "DIR", conflicts_with = "base_url")]
    pub data_dir: Option<PathBuf>,

    /// HTTP base URL serving `results/csv/`.
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Load the H2 curve from this file instead of the well-known location.
    #[arg(long, value_name = "PATH")]
    pub h2: Option<PathBuf>,

    /// Load the LiH curve from this file instead of the well-known location.
    #[arg(long, value_name = "PATH")]
    pub lih: Option<PathBuf>,

    /// Load the noisy-run log from this file instead of the well-known location.
    #[arg(long, value_name = "PATH")]
    pub noise: Option<PathBuf>,
}

/// Arguments for the `summary` subcommand.
#[derive(Args, Debug)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub sources: DataSourceArgs,

    #[command(flatten)]
    pub settings: SettingsArgs,
}

/// Arguments for the `animate` subcommand.
#[derive(Args, Debug)]
pub struct AnimateArgs {
    /// Path for the output trajectory CSV file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Bond length in Angstroms, snapped to the control step.
    #[arg(short, long, value_name = "FLOAT")]
    pub bond_length: Option<f64>,

    /// Number of frames to render.
    #[arg(short = 'n', long, value_name = "INT")]
    pub frames: Option<usize>,

    /// Frames per second of the animation clock.
    #[arg(long, value_name = "FLOAT")]
    pub fps: Option<f64>,

    /// Clock value of the first frame, in seconds.
    #[arg(long, value_name = "SECONDS")]
    pub start_clock: Option<f64>,

    /// Pace frames in real time instead of sampling them as a batch.
    #[arg(long)]
    pub realtime: bool,

    #[command(flatten)]
    pub settings: SettingsArgs,
}

/// Arguments for the `chart` subcommand.
#[derive(Args, Debug)]
pub struct ChartArgs {
    /// Directory the series files are written to.
    #[arg(short, long, required = true, value_name = "DIR")]
    pub output_dir: PathBuf,

    /// Only export this dataset ('h2', 'lih' or 'noise').
    #[arg(long, value_name = "SLOT")]
    pub slot: Option<Slot>,

    /// Also write the full parsed dataset next to each series file.
    #[arg(long)]
    pub with_data: bool,

    #[command(flatten)]
    pub sources: DataSourceArgs,

    #[command(flatten)]
    pub settings: SettingsArgs,
}

/// Arguments for the `config` subcommand.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the absolute path of the default configuration file.
    Path,
}
