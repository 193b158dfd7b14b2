//! CLI command implementations
//!
//! Boot sequence shared by every serving command:
//! 1. Configuration load and validation
//! 2. Log level applied
//! 3. Store opened (file mode replays the log)
//! 4. Form service constructed

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::api::ApiHandler;
use crate::core::FormService;
use crate::http_server::{HttpServer, HttpServerConfig};
use crate::observability::{log_event, log_event_with_fields, Event, Logger, Severity};
use crate::schema::FormId;
use crate::storage::{FileFormStore, FormStore, InMemoryFormStore};

use super::args::Command;
use super::errors::{CliError, CliResult};
use super::io::{read_answers, read_lines, write_error, write_json, write_response};

/// Configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Data directory (required)
    pub data_dir: String,

    /// Storage backend: "file" or "memory" (default "file")
    #[serde(default = "default_storage")]
    pub storage: String,

    /// Minimum log severity: trace, info, warn or error (default "info")
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub http: HttpServerConfig,
}

fn default_storage() -> String {
    "file".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| CliError::ConfigUnreadable {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Config =
            serde_json::from_str(&content).map_err(|source| CliError::ConfigMalformed {
                path: path.to_path_buf(),
                source,
            })?;

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        if self.data_dir.trim().is_empty() {
            return Err(CliError::ConfigInvalid("data_dir must not be empty".into()));
        }

        if self.storage != "file" && self.storage != "memory" {
            return Err(CliError::ConfigInvalid(format!(
                "storage must be \"file\" or \"memory\", got \"{}\"",
                self.storage
            )));
        }

        self.log_severity()?;
        Ok(())
    }

    pub fn data_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir)
    }

    pub fn log_severity(&self) -> CliResult<Severity> {
        self.log_level
            .parse()
            .map_err(|e: String| CliError::ConfigInvalid(format!("log_level: {}", e)))
    }

    fn is_memory(&self) -> bool {
        self.storage == "memory"
    }
}

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Init { config } => init(&config),
        Command::Start { config } => start(&config),
        Command::Serve { config, port } => serve(&config, port),
        Command::Validate { config, form } => validate(&config, &form),
    }
}

/// Initialize a new data directory.
///
/// Creates `<data_dir>/data`. Does not create the log file.
pub fn init(config_path: &Path) -> CliResult<()> {
    let config = Config::load(config_path)?;
    let data_dir = config.data_path();

    if is_initialized(&data_dir) {
        return Err(CliError::AlreadyInitialized(data_dir));
    }

    let data_subdir = data_dir.join("data");
    fs::create_dir_all(&data_subdir).map_err(|source| CliError::CreateDataDir {
        path: data_subdir.clone(),
        source,
    })?;

    write_response(&serde_json::json!({"initialized": true}))
}

/// Serve the JSON-lines API.
///
/// Reads one request per stdin line and writes one response per stdout
/// line until stdin closes. Logs go to stderr so stdout stays parseable.
pub fn start(config_path: &Path) -> CliResult<()> {
    Logger::route_all_to_stderr();
    let config = Config::load(config_path)?;
    let service = boot(&config)?;
    let handler = ApiHandler::new(service);

    log_event_with_fields(Event::Serving, &[("transport", "stdio")]);

    for line in read_lines() {
        match line {
            Ok(request) => write_json(&handler.handle(&request).to_json())?,
            Err(e) => {
                write_error(e.code().as_str(), &e.to_string())?;
                return Err(e);
            }
        }
    }

    Ok(())
}

/// Serve the HTTP API
pub fn serve(config_path: &Path, port: Option<u16>) -> CliResult<()> {
    let config = Config::load(config_path)?;
    let service = boot(&config)?;

    let mut http_config = config.http.clone();
    if let Some(port) = port {
        http_config.port = port;
    }
    let server = HttpServer::with_config(http_config, service);

    let rt = tokio::runtime::Runtime::new().map_err(CliError::Runtime)?;

    rt.block_on(async { server.start().await.map_err(CliError::Http) })
}

/// Validate an answer map read from stdin against a stored form.
///
/// Prints the resolved (prompt, answer) pairs. Nothing is persisted.
pub fn validate(config_path: &Path, form: &str) -> CliResult<()> {
    Logger::route_all_to_stderr();
    let config = Config::load(config_path)?;
    let service = boot(&config)?;
    let answers = read_answers()?;

    match service.dry_run(&FormId::new(form), &answers) {
        Ok(pairs) => write_response(&pairs),
        Err(e) => {
            let message = e.message();
            write_error(e.code(), &message)?;
            Err(CliError::Rejected {
                form: FormId::new(form),
                message,
            })
        }
    }
}

fn is_initialized(data_dir: &Path) -> bool {
    data_dir.join("data").exists()
}

/// Boot the form service.
///
/// File mode requires an initialized data directory. A corrupt log fails
/// the boot; nothing is served from a partially replayed store.
fn boot(config: &Config) -> CliResult<Arc<FormService>> {
    Logger::set_min_severity(config.log_severity()?);
    log_event(Event::BootStart);

    let data_dir_str = config.data_dir.as_str();
    log_event_with_fields(
        Event::ConfigLoaded,
        &[("data_dir", data_dir_str), ("storage", config.storage.as_str())],
    );

    let store: Arc<dyn FormStore> = if config.is_memory() {
        Arc::new(InMemoryFormStore::new())
    } else {
        let data_dir = config.data_path();
        if !is_initialized(&data_dir) {
            return Err(CliError::NotInitialized(data_dir));
        }
        let store = FileFormStore::open(&data_dir).map_err(CliError::StoreOpen)?;
        Arc::new(store)
    };

    log_event(Event::BootComplete);
    Ok(Arc::new(FormService::new(store)))
}

#[cfg(test)]
mod tests {
    use super::super::errors::CliErrorCode;
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn write_config(temp_dir: &TempDir, extra: serde_json::Value) -> PathBuf {
        let config_path = temp_dir.path().join("aeroforms.json");
        let mut config = json!({
            "data_dir": temp_dir.path().join("forms").to_string_lossy()
        });
        if let (Some(base), Some(extra)) = (config.as_object_mut(), extra.as_object()) {
            for (k, v) in extra {
                base.insert(k.clone(), v.clone());
            }
        }
        fs::write(&config_path, config.to_string()).unwrap();
        config_path
    }

    #[test]
    fn test_init_creates_data_directory() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = write_config(&temp_dir, json!({}));

        init(&config_path).unwrap();

        assert!(temp_dir.path().join("forms").join("data").exists());
    }

    #[test]
    fn test_init_refuses_reinit() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = write_config(&temp_dir, json!({}));

        init(&config_path).unwrap();
        let err = init(&config_path).unwrap_err();

        assert_eq!(err.code(), CliErrorCode::AlreadyInitialized);
    }

    #[test]
    fn test_file_boot_requires_init() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::load(&write_config(&temp_dir, json!({}))).unwrap();

        let err = boot(&config).unwrap_err();
        assert_eq!(err.code(), CliErrorCode::NotInitialized);
    }

    #[test]
    fn test_boot_after_init_serves() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = write_config(&temp_dir, json!({}));
        init(&config_path).unwrap();

        let service = boot(&Config::load(&config_path).unwrap()).unwrap();
        let form = service
            .create_form("T", crate::schema::FieldMap::new())
            .unwrap();
        assert_eq!(service.get_form(&form.id).unwrap(), form);
    }

    #[test]
    fn test_memory_boot_needs_no_init() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::load(&write_config(&temp_dir, json!({"storage": "memory"}))).unwrap();
        assert!(boot(&config).is_ok());
    }

    #[test]
    fn test_config_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::load(&write_config(&temp_dir, json!({}))).unwrap();

        assert_eq!(config.storage, "file");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.http, HttpServerConfig::default());
    }

    #[test]
    fn test_config_rejects_bad_values() {
        let temp_dir = TempDir::new().unwrap();

        for extra in [
            json!({"storage": "postgres"}),
            json!({"log_level": "chatty"}),
            json!({"data_dir": "  "}),
        ] {
            let err = Config::load(&write_config(&temp_dir, extra)).unwrap_err();
            assert_eq!(err.code(), CliErrorCode::ConfigError);
        }
    }

    #[test]
    fn test_missing_config_file() {
        let err = Config::load(Path::new("/nonexistent/aeroforms.json")).unwrap_err();
        assert_eq!(err.code(), CliErrorCode::ConfigError);
    }
}
