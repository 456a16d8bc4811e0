//! CLI module for kokascan
//!
//! ## Commands
//!
//! - `tokens <file>` - Run the layout scanner over a file and print the token stream
//! - `checkpoints <file>` - Print every serialized checkpoint and verify it round-trips
//!
//! ## Modules
//!
//! - `commands` - Command implementations and output rendering
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};
use kokascan_core::lang::layout::SERIALIZATION_CAPACITY;

use crate::config::{AcceptancePolicy, DriverConfig};
use crate::version::KOKASCAN_VERSION;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Layout scanner for Koka
#[derive(Parser, Debug)]
#[command(name = "kokascan")]
#[command(version = KOKASCAN_VERSION)]
#[command(about = "Layout scanner for Koka: synthetic braces and semicolons from indentation", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by every command that drives the scanner.
#[derive(Args, Debug, Clone)]
pub struct DriveArgs {
    /// Source file to scan
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
    /// How the stand-in host decides which external tokens are acceptable
    #[arg(long, value_enum, default_value_t = AcceptancePolicy::Permissive)]
    pub policy: AcceptancePolicy,
    /// Checkpoint buffer size in bytes
    #[arg(long, value_name = "BYTES", default_value_t = SERIALIZATION_CAPACITY)]
    pub capacity: usize,
}

impl DriveArgs {
    pub fn config(&self) -> DriverConfig {
        DriverConfig::new()
            .with_policy(self.policy)
            .with_checkpoint_capacity(self.capacity)
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the token stream
    Tokens {
        #[command(flatten)]
        drive: DriveArgs,
        /// Emit JSON instead of text
        #[arg(long, conflicts_with = "compact")]
        json: bool,
        /// Print the stream on one line
        #[arg(long)]
        compact: bool,
        /// Include the checkpoint saved after each external token
        #[arg(long)]
        checkpoints: bool,
    },

    /// Print and verify serialized checkpoints
    Checkpoints {
        #[command(flatten)]
        drive: DriveArgs,
    },
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    match cli.command {
        Command::Tokens {
            drive,
            json,
            compact,
            checkpoints,
        } => {
            let format = if json {
                commands::OutputFormat::Json
            } else if compact {
                commands::OutputFormat::Compact
            } else {
                commands::OutputFormat::Text
            };
            commands::print_tokens(&drive.file.to_string_lossy(), &drive.config(), format, checkpoints)
        }
        Command::Checkpoints { drive } => commands::print_checkpoints(&drive.file.to_string_lossy(), &drive.config()),
    }
}

// ============================================================================
// Tests
// ============================================================================
