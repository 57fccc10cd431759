//! cxpack - Checkmarx IAST agent staging pipeline

use std::process::ExitCode;

use clap::Parser;

use cxpack_cli::cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match cli.run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
