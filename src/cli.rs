// src/cli.rs

//! Command-line interface of the `jobdag` harness.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::loader::default_config_path;

#[derive(Debug, Clone, Parser)]
#[command(
    name = "jobdag",
    version,
    about = "Compile a job graph once and execute it repeatedly.",
    long_about = None
)]
pub struct CliArgs {
    /// Job graph file (TOML). Defaults to `Jobdag.toml` in the working
    /// directory.
    #[arg(long, short = 'c', value_name = "PATH", default_value_os_t = default_config_path())]
    pub config: PathBuf,

    /// How many times to execute the compiled plan.
    #[arg(
        long,
        short = 'n',
        value_name = "N",
        default_value_t = 1,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub runs: u64,

    /// Log level for every target. Overrides `JOBDAG_LOG`.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Print the compiled plan and exit without running it.
    #[arg(long)]
    pub dry_run: bool,

    /// Print the precedence graph as Graphviz DOT and exit.
    #[arg(long, conflicts_with = "dry_run")]
    pub dot: bool,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

pub fn parse() -> CliArgs {
    CliArgs::parse()
}
