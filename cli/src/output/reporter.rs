//! `TerminalBuildLog` — presentation-layer implementation of `BuildLog`.
//!
//! Wraps `&OutputContext` and implements the `application::ports::BuildLog`
//! trait so application services can emit build-log events without depending
//! on any presentation type directly.

use owo_colors::OwoColorize as _;

use crate::application::ports::BuildLog;
use crate::output::OutputContext;

/// Terminal build log that wraps an `OutputContext`.
///
/// - `debug()` prints dimmed detail, only with `--verbose`
/// - `step()` prints `"  → {message}"` (suppressed when `ctx.quiet`)
/// - `success()` prints `"  ✓ {message}"` (suppressed when `ctx.quiet`)
/// - `warn()` prints `"  ! {message}"` (suppressed when `ctx.quiet`)
///
/// Everything goes to stderr; stdout stays clean for the phase protocol.
pub struct TerminalBuildLog<'a> {
    ctx: &'a OutputContext,
}

impl<'a> TerminalBuildLog<'a> {
    /// Create a new `TerminalBuildLog` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }
}

impl BuildLog for TerminalBuildLog<'_> {
    fn debug(&self, message: &str) {
        self.ctx.debug(message);
    }

    fn step(&self, message: &str) {
        if !self.ctx.quiet {
            eprintln!("  {} {message}", "→".cyan());
        }
    }

    fn success(&self, message: &str) {
        if !self.ctx.quiet {
            eprintln!("  {} {message}", "✓".green());
        }
    }

    fn warn(&self, message: &str) {
        if !self.ctx.quiet {
            eprintln!("  {} {message}", "!".yellow());
        }
    }
}
