#![deny(missing_docs)]

//! # Parser Bridge
//!
//! Obtains the IR either from a file or by running the external source parser
//! and decoding its standard output.

use autodoc_core::{AppError, AppResult, Ir};
use std::fs;
use std::path::Path;
use std::process::Command;
use tracing::{debug, info};

/// Parser command used when `--parser` is not given.
pub const DEFAULT_PARSER_COMMAND: &str = "autodoc-parser";

/// Runs the parser command with `source` appended as its last argument.
///
/// `command` is split on whitespace, so `java -jar parser.jar` works.
///
/// # Errors
///
/// Returns `AppError::Parser` when the command is empty, cannot be spawned or
/// exits unsuccessfully, and `AppError::Json` when its output is not a valid IR.
pub fn run_parser(command: &str, source: &Path) -> AppResult<Ir> {
    let mut parts = command.split_whitespace();
    let program = parts
        .next()
        .ok_or_else(|| AppError::Parser("Parser command is empty".into()))?;

    info!(parser = %command, source = %source.display(), "Running source parser");
    let output = Command::new(program)
        .args(parts)
        .arg(source)
        .output()
        .map_err(|e| AppError::Parser(format!("Failed to run '{}': {}", program, e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(AppError::Parser(format!(
            "'{}' exited with {}: {}",
            command,
            output.status,
            stderr.trim()
        )));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    debug!(bytes = stdout.len(), "Parser finished");
    Ir::from_json(&stdout)
}

/// Reads an IR document from disk.
pub fn read_ir_file(path: &Path) -> AppResult<Ir> {
    info!(path = %path.display(), "Reading IR file");
    let json = fs::read_to_string(path)?;
    Ir::from_json(&json)
}

/// Loads the IR from `ir_file` when given, otherwise by parsing `source`.
///
/// # Arguments
///
/// * `ir_file` - Pre-computed IR JSON.
/// * `source` - Source tree handed to the parser.
/// * `parser` - Parser command line.
pub fn load_ir(ir_file: Option<&Path>, source: Option<&Path>, parser: &str) -> AppResult<Ir> {
    match (ir_file, source) {
        (Some(path), _) => read_ir_file(path),
        (None, Some(source)) => {
            if !source.exists() {
                return Err(AppError::Parser(format!(
                    "Source directory not found: {}",
                    source.display()
                )));
            }
            run_parser(parser, source)
        }
        (None, None) => Err(AppError::General(
            "Either --ir or --source must be given".into(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_inputs() {
        let err = load_ir(None, None, DEFAULT_PARSER_COMMAND).unwrap_err();
        assert!(matches!(err, AppError::General(_)));
    }

    #[test]
    fn test_empty_command() {
        let dir = tempdir().unwrap();
        let err = run_parser("   ", dir.path()).unwrap_err();
        assert!(matches!(err, AppError::Parser(_)));
    }

    #[test]
    fn test_unknown_command_is_parser_error() {
        let dir = tempdir().unwrap();
        let err = run_parser("autodoc-parser-that-does-not-exist", dir.path()).unwrap_err();
        assert!(format!("{}", err).contains("Failed to run"));
    }

    #[test]
    fn test_missing_source_dir() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope");
        let err = load_ir(None, Some(&missing), DEFAULT_PARSER_COMMAND).unwrap_err();
        assert!(format!("{}", err).contains("Source directory not found"));
    }

    #[test]
    fn test_read_ir_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ir.json");
        fs::write(&path, r#"{"models":[{"name":"User"}]}"#).unwrap();
        let ir = load_ir(Some(&path), None, DEFAULT_PARSER_COMMAND).unwrap();
        assert_eq!(ir.models[0].name, "User");
    }

    #[cfg(unix)]
    #[test]
    fn test_parser_stdout_is_decoded() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ir.json");
        fs::write(&path, r#"{"endpoints":[{"path":"/ping","method":"GET"}]}"#).unwrap();
        // `cat <file>` stands in for a parser that prints its IR
        let ir = run_parser("cat", &path).unwrap();
        assert_eq!(ir.endpoints[0].path, "/ping");
    }

    #[cfg(unix)]
    #[test]
    fn test_parser_failure_and_bad_output() {
        let dir = tempdir().unwrap();
        let err = run_parser("false", dir.path()).unwrap_err();
        assert!(matches!(err, AppError::Parser(_)));

        let path = dir.path().join("notes.txt");
        fs::write(&path, "not json").unwrap();
        let err = run_parser("cat", &path).unwrap_err();
        assert!(matches!(err, AppError::Json(_)));
    }
}
