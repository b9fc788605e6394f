//! Clink OpenCode - normalize OpenCode CLI output into uniform agent responses.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use clink_opencode::commands::{
    finalize_capture, parse_capture, render_json, CapturedRun, CommandError, RunFacts,
};
use clink_opencode::config::{ClinkConfig, ConfigLoader};

#[derive(Parser)]
#[command(
    name = "clink-opencode",
    about = "Normalize OpenCode CLI output into uniform agent responses",
    version
)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to a config file (defaults to .clink-opencode.toml, then the user config dir).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse the output of a successful run.
    Parse {
        /// File with captured stdout (`-` for stdin).
        #[arg(long)]
        stdout: PathBuf,
        /// File with captured stderr.
        #[arg(long)]
        stderr: Option<PathBuf>,
    },
    /// Normalize a finished run, recovering structured errors from failures.
    Finalize {
        /// Exit code of the CLI process.
        #[arg(long, allow_negative_numbers = true)]
        returncode: i32,
        /// File with captured stdout (`-` for stdin).
        #[arg(long)]
        stdout: PathBuf,
        /// File with captured stderr.
        #[arg(long)]
        stderr: Option<PathBuf>,
        /// File the CLI wrote its final answer to.
        #[arg(long)]
        output_file: Option<PathBuf>,
        /// Run duration in seconds.
        #[arg(long, default_value_t = 0.0)]
        duration: f64,
        /// Sanitized command line of the run.
        #[arg(last = true)]
        command: Vec<String>,
    },
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn load_config(path: Option<PathBuf>) -> Result<ClinkConfig, CommandError> {
    let loader = path.map_or_else(ConfigLoader::new, ConfigLoader::with_path);
    Ok(loader.load()?)
}

fn run(cli: Cli) -> Result<String, CommandError> {
    let config = load_config(cli.config)?;

    match cli.command {
        Commands::Parse { stdout, stderr } => {
            let run = CapturedRun {
                stdout,
                stderr,
                output_file: None,
            };
            render_json(&parse_capture(&config, &run)?)
        }
        Commands::Finalize {
            returncode,
            stdout,
            stderr,
            output_file,
            duration,
            command,
        } => {
            let run = CapturedRun {
                stdout,
                stderr,
                output_file,
            };
            let facts = RunFacts {
                returncode,
                duration_seconds: duration,
                command,
            };
            render_json(&finalize_capture(&config, &run, facts)?)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Command failed");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
