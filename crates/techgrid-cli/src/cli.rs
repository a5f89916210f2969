use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "techgrid CLI - A command-line interface for optimizing technology module layouts on bounded grids via simulated annealing.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Optimize the placement of technology modules on a grid.
    Solve(SolveArgs),
    /// Score an existing layout without modifying it.
    Score(ScoreArgs),
}

/// Arguments for the `solve` subcommand.
#[derive(Args, Debug)]
pub struct SolveArgs {
    // --- Core Arguments ---
    /// Path to the input layout file in TOML format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path for the solved layout file. Omit to print the result only.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Path to a solver configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Path to an additional module catalog in CSV format, appended to the
    /// modules declared in the layout file.
    #[arg(long, value_name = "PATH")]
    pub catalog: Option<PathBuf>,

    /// Path to a scoring policy file in TOML format, overriding the policy
    /// from the solver configuration.
    #[arg(long, value_name = "PATH")]
    pub policy: Option<PathBuf>,

    // --- Solver Overrides ---
    /// Override the random seed for a reproducible run.
    #[arg(long, value_name = "INT")]
    pub seed: Option<u64>,

    /// Override the wall-clock budget, in milliseconds.
    #[arg(long, value_name = "INT")]
    pub max_time_ms: Option<u64>,

    /// Override the starting temperature.
    #[arg(long, value_name = "FLOAT")]
    pub initial_temperature: Option<f64>,

    /// Override the geometric cooling rate.
    #[arg(long, value_name = "FLOAT")]
    pub cooling_rate: Option<f64>,

    /// Override the stopping temperature.
    #[arg(long, value_name = "FLOAT")]
    pub stopping_temperature: Option<f64>,

    /// Override the number of move trials per temperature step.
    #[arg(long, value_name = "INT")]
    pub iterations_per_temperature: Option<usize>,

    /// Override the hard cap on total move trials (0 disables the cap).
    #[arg(long, value_name = "INT")]
    pub max_iterations: Option<usize>,

    /// Start annealing from the placement recorded in the layout file
    /// instead of a fresh randomized one.
    #[arg(long)]
    pub seed_from_current: bool,
}

/// Arguments for the `score` subcommand.
#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// Path to the layout file in TOML format, with placements filled in.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path to a scoring policy file in TOML format.
    #[arg(long, value_name = "PATH")]
    pub policy: Option<PathBuf>,
}
