//! CLI command implementations

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::http_server::{HttpServer, HttpServerConfig};
use crate::schema::{self, all_shapes, ShapeName};

use super::args::Command;
use super::errors::{CliError, CliResult};
use super::io::{read_document, write_json};
use super::logging::{init_logging, LoggingConfig};

/// Configuration file structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server settings
    #[serde(default)]
    pub server: HttpServerConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Load configuration from `path`, or defaults when no path is given.
    pub fn load_or_default(path: Option<&Path>) -> CliResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    fn validate(&self) -> CliResult<()> {
        if self.server.host.trim().is_empty() {
            return Err(CliError::config_error("server.host must not be empty"));
        }

        if self.server.people.iter().any(|id| *id <= 0) {
            return Err(CliError::config_error("server.people ids must be > 0"));
        }

        Ok(())
    }
}

/// Parse CLI args and run the selected command
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve { config, host, port } => serve(config.as_deref(), host, port),
        Command::Validate {
            shape,
            input,
            exclude,
            config,
        } => validate(&shape, input.as_deref(), &exclude, config.as_deref()),
        Command::Shapes => shapes(),
    }
}

/// Start the HTTP server and serve until interrupted
pub fn serve(config_path: Option<&Path>, host: Option<String>, port: Option<u16>) -> CliResult<()> {
    let mut config = Config::load_or_default(config_path)?;
    init_logging(&config.logging);

    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    let server = HttpServer::with_config(config.server);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })?;

    Ok(())
}

/// Validate one JSON document and print the outcome
pub fn validate(
    shape: &str,
    input: Option<&Path>,
    exclude: &[String],
    config_path: Option<&Path>,
) -> CliResult<()> {
    let config = Config::load_or_default(config_path)?;
    init_logging(&config.logging);

    let shape: ShapeName = shape.parse()?;
    let document = read_document(input)?;

    let (envelope, violation_count) = validation_envelope(shape, &document, exclude);
    write_json(&envelope)?;

    if violation_count > 0 {
        tracing::debug!(%shape, violation_count, "input rejected");
        return Err(CliError::validation_failed(violation_count));
    }
    Ok(())
}

/// Builds the printed result of a validation.
///
/// Returns the envelope and the number of violations found.
pub fn validation_envelope(
    shape: ShapeName,
    document: &Value,
    exclude: &[String],
) -> (Value, usize) {
    match schema::validate_document(shape, document) {
        Ok(record) => (
            json!({
                "status": "ok",
                "shape": shape,
                "data": record.exclude(exclude),
            }),
            0,
        ),
        Err(violations) => {
            let count = violations.len();
            (
                json!({
                    "status": "error",
                    "code": "VALIDATION_FAILED",
                    "shape": shape,
                    "violations": violations,
                }),
                count,
            )
        }
    }
}

/// Print every built-in shape
pub fn shapes() -> CliResult<()> {
    let listing: Vec<Value> = all_shapes()
        .map(|shape| json!({ "name": shape.name, "fields": shape.fields }))
        .collect();
    write_json(&json!({ "status": "ok", "data": listing }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_config_with_defaults() {
        let file = write_config(r#"{"server": {"port": 9001}}"#);
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.server.port, 9001);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn test_load_invalid_json() {
        let file = write_config("{not json");
        let err = Config::load(file.path()).unwrap_err();
        assert_eq!(err.code_str(), "CLI_CONFIG_ERROR");
    }

    #[test]
    fn test_reject_non_positive_people() {
        let file = write_config(r#"{"server": {"people": [1, 0]}}"#);
        let err = Config::load(file.path()).unwrap_err();
        assert!(err.message().contains("people"));
    }

    #[test]
    fn test_missing_path_gives_defaults() {
        assert_eq!(Config::load_or_default(None).unwrap(), Config::default());
    }

    #[test]
    fn test_envelope_ok_hides_excluded() {
        let doc = json!({
            "first_name": "Pedro",
            "last_name": "Monroy",
            "age": 14,
            "password": "1234Abcd/"
        });
        let (envelope, count) =
            validation_envelope(ShapeName::Person, &doc, &["password".to_string()]);
        assert_eq!(count, 0);
        assert_eq!(envelope["status"], "ok");
        assert_eq!(envelope["shape"], "person");
        assert_eq!(envelope["data"]["first_name"], "Pedro");
        assert!(envelope["data"].get("password").is_none());
    }

    #[test]
    fn test_envelope_lists_violations() {
        let (envelope, count) = validation_envelope(ShapeName::Location, &json!({}), &[]);
        assert_eq!(count, 3);
        assert_eq!(envelope["status"], "error");
        assert_eq!(envelope["violations"][0]["field"], "city");
        assert_eq!(envelope["violations"][0]["kind"], "missing");
    }
}
