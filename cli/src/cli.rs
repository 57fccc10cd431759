//! CLI argument parsing with clap derive

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::app::{AppContext, AppFlags};
use crate::commands;

/// Exit code telling the orchestrator this component does not apply.
///
/// The phase protocol reserves 0 for "applicable", this code for "not
/// applicable", and anything else for real failures.
pub const DETECT_FAIL_CODE: u8 = 100;

/// Checkmarx IAST agent staging pipeline
#[derive(Parser)]
#[command(
    name = "cxpack",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(
        long,
        global = true,
        env = "NO_COLOR",
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    pub no_color: bool,

    /// Show phase-internal detail
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Report whether a bound service activates the agent
    Detect {
        /// Application directory being staged
        build_dir: PathBuf,
    },

    /// Download the agent and populate the buildpack sandbox
    #[command(visible_alias = "compile")]
    Stage {
        /// Application directory being staged
        build_dir: PathBuf,
        /// Platform cache directory persisted across builds
        cache_dir: PathBuf,
    },

    /// Contribute launch flags and agent override properties
    Release {
        /// Application directory being staged
        build_dir: PathBuf,
    },
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error when the selected phase fails. "Not applicable" is
    /// not an error: `detect` signals it through [`DETECT_FAIL_CODE`], the
    /// other phases exit 0 after doing nothing.
    pub fn run(self) -> Result<ExitCode> {
        let app = AppContext::new(&AppFlags {
            no_color: self.no_color,
            quiet: self.quiet,
            verbose: self.verbose,
        })?;

        match self.command {
            Command::Detect { build_dir } => commands::detect::run(&app, &build_dir),
            Command::Stage {
                build_dir,
                cache_dir,
            } => commands::stage::run(&app, &build_dir, &cache_dir),
            Command::Release { build_dir } => commands::release::run(&app, &build_dir),
        }
    }
}
