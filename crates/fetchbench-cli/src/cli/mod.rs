//! CLI for fetchbench.

mod commands;
mod console;

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use fetchbench_core::config::{self, FetchBenchConfig, WriteMode};
use fetchbench_core::strategy::Strategy;
use std::path::PathBuf;

use commands::{run_compare, run_completions, run_fetch_one, run_single};

/// Top-level CLI. Without a subcommand, compares all four strategies.
#[derive(Debug, Parser)]
#[command(name = "fetchbench")]
#[command(
    about = "Fetch URLs under sequential, threaded, multi-process and async strategies and compare timings",
    long_about = None
)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Config file (default: ~/.config/fetchbench/config.toml, created if missing).
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<CliCommand>,

    #[command(flatten)]
    pub run: RunArgs,
}

/// Inputs and overrides shared by the compare and run modes.
#[derive(Debug, Clone, Default, Args)]
pub struct RunArgs {
    /// URLs to fetch. Uses the built-in sample images when none are given.
    #[arg(value_name = "URL")]
    pub urls: Vec<String>,

    /// Read additional URLs from a file (one per line, `#` comments allowed).
    #[arg(long, value_name = "PATH")]
    pub url_file: Option<PathBuf>,

    /// Directory to write files into (default: current directory).
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Worker threads for the threaded strategy.
    #[arg(long, value_name = "N")]
    pub threads: Option<usize>,

    /// Concurrent child processes for the multi-process strategy.
    #[arg(long, value_name = "N")]
    pub processes: Option<usize>,

    /// In-flight fetches for the async strategy.
    #[arg(long, value_name = "N")]
    pub tasks: Option<usize>,

    /// "atomic" (temp file + rename) or "in-place".
    #[arg(long, value_name = "MODE")]
    pub write_mode: Option<WriteMode>,
}

impl RunArgs {
    /// Applies command-line overrides on top of the loaded config.
    pub fn apply_to(&self, cfg: &mut FetchBenchConfig) {
        if let Some(n) = self.threads {
            cfg.thread_workers = n;
        }
        if let Some(n) = self.processes {
            cfg.process_workers = n;
        }
        if let Some(n) = self.tasks {
            cfg.async_tasks = n;
        }
        if let Some(mode) = self.write_mode {
            cfg.write_mode = Some(mode);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    Sequential,
    Threaded,
    MultiProcess,
    Async,
}

impl From<StrategyArg> for Strategy {
    fn from(value: StrategyArg) -> Self {
        match value {
            StrategyArg::Sequential => Strategy::Sequential,
            StrategyArg::Threaded => Strategy::Threaded,
            StrategyArg::MultiProcess => Strategy::MultiProcess,
            StrategyArg::Async => Strategy::Async,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Run a single strategy instead of the full comparison.
    Run {
        /// Strategy to run.
        #[arg(long, short, value_enum)]
        strategy: StrategyArg,

        #[command(flatten)]
        args: RunArgs,
    },

    /// Print a shell completion script.
    Completions {
        /// Target shell.
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },

    /// Fetch one URL and print the result as a JSON line (multi-process worker).
    #[command(hide = true)]
    FetchOne {
        /// URL to fetch.
        url: String,

        /// Directory to write the file into.
        #[arg(long, value_name = "DIR")]
        output_dir: PathBuf,

        #[arg(long, value_name = "MODE", default_value = "atomic")]
        write_mode: WriteMode,

        #[arg(long, value_name = "SECS")]
        connect_timeout_secs: Option<u64>,

        #[arg(long, value_name = "SECS")]
        request_timeout_secs: Option<u64>,
    },
}

impl Cli {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        match cli.command {
            Some(CliCommand::Completions { shell }) => run_completions(shell),
            Some(CliCommand::FetchOne {
                url,
                output_dir,
                write_mode,
                connect_timeout_secs,
                request_timeout_secs,
            }) => run_fetch_one(
                &url,
                output_dir,
                write_mode,
                connect_timeout_secs,
                request_timeout_secs,
            ),
            Some(CliCommand::Run { strategy, args }) => {
                let cfg = load_config(cli.config.as_ref())?;
                run_single(&cfg, &args, strategy.into())
            }
            None => {
                let cfg = load_config(cli.config.as_ref())?;
                run_compare(&cfg, &cli.run)
            }
        }
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<FetchBenchConfig> {
    let cfg = match path {
        Some(p) => config::load_or_init_at(p)?,
        None => config::load_or_init()?,
    };
    tracing::debug!("loaded config: {:?}", cfg);
    Ok(cfg)
}

#[cfg(test)]
mod tests;
