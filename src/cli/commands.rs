//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::fmt::Write as _;
use std::fs;

use kokascan_syntax::ScannerState;
use serde_json::{Value, json};

use super::{CliError, CliResult, ExitCode};
use crate::config::DriverConfig;
use crate::driver::{Checkpoint, DriverError, LayoutStream, Lexeme, LexemeKind, tokenize};

/// Maximum source file size (100 MB)
const MAX_SOURCE_SIZE: u64 = 100 * 1024 * 1024;

/// How `tokens` prints its stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// One lexeme per line with its span and origin
    Text,
    /// All lexemes on one line
    Compact,
    Json,
}

// ============================================================================
// Commands
// ============================================================================

/// Scan a file and print its token stream.
pub fn print_tokens(
    file_path: &str,
    config: &DriverConfig,
    format: OutputFormat,
    with_checkpoints: bool,
) -> CliResult<ExitCode> {
    let source = read_source(file_path)?;
    let stream = drive(file_path, &source, config)?;

    let output = match format {
        OutputFormat::Text => render_text(&source, &stream, with_checkpoints),
        OutputFormat::Compact => stream.compact(&source),
        OutputFormat::Json => render_json(&source, &stream, with_checkpoints)?,
    };
    println!("{output}");
    Ok(ExitCode::SUCCESS)
}

/// Scan a file, print every checkpoint and fail if any of them does not survive a round trip.
pub fn print_checkpoints(file_path: &str, config: &DriverConfig) -> CliResult<ExitCode> {
    let source = read_source(file_path)?;
    let stream = drive(file_path, &source, config)?;

    for checkpoint in &stream.checkpoints {
        println!("{}", render_checkpoint(checkpoint));
    }

    stream
        .verify_checkpoints(config.checkpoint_capacity)
        .map_err(|e| report(file_path, &source, e))?;
    println!("{} checkpoints verified", stream.checkpoints.len());
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// Helpers
// ============================================================================

/// Read a source file with size limits.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be accessed
/// - The file exceeds `MAX_SOURCE_SIZE` (100 MB)
pub fn read_source(file_path: &str) -> CliResult<String> {
    let metadata =
        fs::metadata(file_path).map_err(|e| CliError::failure(format!("Cannot access file '{}': {}", file_path, e)))?;

    if metadata.len() > MAX_SOURCE_SIZE {
        return Err(CliError::failure(format!(
            "Source file '{}' is too large ({} bytes, max {} bytes)",
            file_path,
            metadata.len(),
            MAX_SOURCE_SIZE
        )));
    }

    fs::read_to_string(file_path).map_err(|e| CliError::failure(format!("Error reading file '{}': {}", file_path, e)))
}

fn drive(file_path: &str, source: &str, config: &DriverConfig) -> CliResult<LayoutStream> {
    tokenize(source, config).map_err(|e| report(file_path, source, e))
}

/// Render a driver error against the file it happened in.
fn report(file_path: &str, source: &str, error: DriverError) -> CliError {
    tracing::warn!(file = file_path, %error, "layout scan failed");
    let report = miette::Report::new(error).with_source_code(miette::NamedSource::new(file_path, source.to_string()));
    CliError::failure(format!("{report:?}"))
}

fn kind_name(lexeme: &Lexeme) -> &'static str {
    match lexeme.kind {
        LexemeKind::External(symbol) => symbol.grammar_name(),
        LexemeKind::Text => "text",
    }
}

/// `start..end  kind  text`, one lexeme per line.
pub fn render_text(source: &str, stream: &LayoutStream, with_checkpoints: bool) -> String {
    // checkpoints[0] is the starting point; checkpoints[i + 1] follows the i-th external token.
    let mut saved = stream.checkpoints.iter().skip(1);
    let mut out = String::new();
    for lexeme in &stream.lexemes {
        let span = format!("{}..{}", lexeme.span.start, lexeme.span.end);
        let _ = writeln!(out, "{span:<12} {:<26} {:?}", kind_name(lexeme), lexeme.render(source));
        if with_checkpoints && lexeme.symbol().is_some() {
            if let Some(checkpoint) = saved.next() {
                let _ = writeln!(out, "{:13}{}", "", render_checkpoint(checkpoint));
            }
        }
    }
    out.truncate(out.trim_end().len());
    out
}

/// Stream as a JSON document: `{"lexemes": [...], "checkpoints": [...]}`.
pub fn render_json(source: &str, stream: &LayoutStream, with_checkpoints: bool) -> CliResult<String> {
    let lexemes: Vec<Value> = stream
        .lexemes
        .iter()
        .map(|lexeme| {
            json!({
                "kind": kind_name(lexeme),
                "start": lexeme.span.start,
                "end": lexeme.span.end,
                "text": lexeme.render(source),
                "synthetic": lexeme.symbol().is_some() && lexeme.span.is_empty(),
            })
        })
        .collect();

    let mut doc = json!({ "lexemes": lexemes });
    if with_checkpoints {
        let checkpoints: Vec<Value> = stream
            .checkpoints
            .iter()
            .map(|c| json!({ "offset": c.offset, "state": hex(&c.state) }))
            .collect();
        doc["checkpoints"] = Value::Array(checkpoints);
    }

    serde_json::to_string_pretty(&doc).map_err(|e| CliError::failure(format!("Error encoding JSON: {}", e)))
}

fn render_checkpoint(checkpoint: &Checkpoint) -> String {
    let depth = ScannerState::deserialize(&checkpoint.state)
        .map(|state| state.layout().len().to_string())
        .unwrap_or_else(|_| "?".to_string());
    format!("@{} depth={} [{}]", checkpoint.offset, depth, hex(&checkpoint.state))
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().fold(String::with_capacity(bytes.len() * 2), |mut s, b| {
        let _ = write!(s, "{b:02x}");
        s
    })
}
