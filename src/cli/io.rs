//! JSON I/O handling for CLI
//!
//! - Input: a single JSON value from a file or stdin
//! - Output: a single JSON object on stdout
//! - UTF-8 only

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use serde_json::Value;

use super::errors::{CliError, CliResult};

/// Read a JSON document from `path`, or from stdin when `None`.
pub fn read_document(path: Option<&Path>) -> CliResult<Value> {
    let content = match path {
        Some(path) => fs::read_to_string(path).map_err(|e| {
            CliError::io_error(format!("Failed to read {}: {}", path.display(), e))
        })?,
        None => {
            let mut buf = String::new();
            io::stdin().lock().read_to_string(&mut buf)?;
            buf
        }
    };

    parse_document(&content)
}

/// Parse a JSON document, rejecting empty input.
pub fn parse_document(content: &str) -> CliResult<Value> {
    if content.trim().is_empty() {
        return Err(CliError::io_error("Empty input"));
    }
    Ok(serde_json::from_str(content)?)
}

/// Write a JSON value to stdout on one line
pub fn write_json(value: &Value) -> CliResult<()> {
    let mut stdout = io::stdout();
    serde_json::to_writer(&mut stdout, value)?;
    writeln!(stdout)?;
    stdout.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_rejects_empty() {
        let err = parse_document("  \n").unwrap_err();
        assert!(err.message().contains("Empty"));
    }

    #[test]
    fn test_read_document_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"city": "Lima"}}"#).unwrap();

        let value = read_document(Some(file.path())).unwrap();
        assert_eq!(value["city"], "Lima");
    }

    #[test]
    fn test_read_document_missing_file() {
        let err = read_document(Some(Path::new("/definitely/not/here.json"))).unwrap_err();
        assert_eq!(err.code_str(), "CLI_IO_ERROR");
    }
}
