use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug)]
pub struct StorageConfig {
    pub state_file: PathBuf,
    pub disabled: bool,
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub state_file: Option<PathBuf>,
    pub storage_disabled: Option<bool>,
    pub log_level: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
    pub overrides: ConfigOverrides,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage: StorageConfig {
                state_file: PathBuf::from("printmarket-quote.json"),
                disabled: false,
            },
            logging: LoggingConfig { level: "info".to_string(), format: LogFormat::Compact },
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

impl AppConfig {
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let maybe_path = resolve_config_path(options.config_path.as_deref());

        if let Some(path) = maybe_path {
            let patch = read_patch(&path)?;
            config.apply_patch(patch);
        } else if let Some(expected) = options.config_path {
            // An explicitly requested config file must exist; falling back to
            // defaults would hide a typo'd path.
            return Err(ConfigError::MissingConfigFile(expected));
        } else if options.require_file {
            return Err(ConfigError::MissingConfigFile(PathBuf::from("printmarket.toml")));
        }

        config.apply_env_overrides()?;
        config.apply_overrides(options.overrides);
        config.validate()?;

        Ok(config)
    }

    fn apply_patch(&mut self, patch: ConfigPatch) {
        if let Some(storage) = patch.storage {
            if let Some(state_file) = storage.state_file {
                self.storage.state_file = state_file;
            }
            if let Some(disabled) = storage.disabled {
                self.storage.disabled = disabled;
            }
        }

        if let Some(logging) = patch.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(format) = logging.format {
                self.logging.format = format;
            }
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(value) = read_env("PRINTMARKET_STATE_FILE") {
            self.storage.state_file = PathBuf::from(value);
        }
        if let Some(value) = read_env("PRINTMARKET_STORAGE_DISABLED") {
            self.storage.disabled = parse_bool("PRINTMARKET_STORAGE_DISABLED", &value)?;
        }

        let log_level =
            read_env("PRINTMARKET_LOGGING_LEVEL").or_else(|| read_env("PRINTMARKET_LOG_LEVEL"));
        if let Some(value) = log_level {
            self.logging.level = value;
        }
        let log_format =
            read_env("PRINTMARKET_LOGGING_FORMAT").or_else(|| read_env("PRINTMARKET_LOG_FORMAT"));
        if let Some(value) = log_format {
            self.logging.format = value.parse()?;
        }

        Ok(())
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(state_file) = overrides.state_file {
            self.storage.state_file = state_file;
        }
        if let Some(disabled) = overrides.storage_disabled {
            self.storage.disabled = disabled;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.storage.state_file.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "storage.state_file must not be empty (set storage.disabled = true to run memory-only)"
                    .to_string(),
            ));
        }

        let level = self.logging.level.trim().to_ascii_lowercase();
        if !matches!(level.as_str(), "trace" | "debug" | "info" | "warn" | "error") {
            return Err(ConfigError::Validation(format!(
                "logging.level `{}` is not one of trace|debug|info|warn|error",
                self.logging.level
            )));
        }

        Ok(())
    }
}

fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        if path.exists() {
            return Some(path.to_path_buf());
        }
        return None;
    }

    let root = PathBuf::from("printmarket.toml");
    if root.exists() {
        return Some(root);
    }

    let nested = PathBuf::from("config/printmarket.toml");
    if nested.exists() {
        return Some(nested);
    }

    None
}

fn read_patch(path: &Path) -> Result<ConfigPatch, ConfigError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;
    toml::from_str(&raw)
        .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().map(|value| value.trim().to_string()).filter(|value| !value.is_empty())
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(ConfigError::InvalidEnvOverride { key: key.to_string(), value: value.to_string() }),
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    storage: Option<StoragePatch>,
    logging: Option<LoggingPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct StoragePatch {
    state_file: Option<PathBuf>,
    disabled: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<LogFormat>,
}

#[cfg(test)]
mod tests {
    use std::env;
    use std::fs;
    use std::path::PathBuf;
    use std::sync::{Mutex, OnceLock};

    use tempfile::TempDir;

    use super::{AppConfig, ConfigError, ConfigOverrides, LoadOptions, LogFormat};

    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

    fn env_lock() -> &'static Mutex<()> {
        ENV_LOCK.get_or_init(|| Mutex::new(()))
    }

    fn clear_vars(vars: &[&str]) {
        for var in vars {
            env::remove_var(var);
        }
    }

    const ALL_VARS: &[&str] = &[
        "PRINTMARKET_STATE_FILE",
        "PRINTMARKET_STORAGE_DISABLED",
        "PRINTMARKET_LOGGING_LEVEL",
        "PRINTMARKET_LOG_LEVEL",
        "PRINTMARKET_LOGGING_FORMAT",
        "PRINTMARKET_LOG_FORMAT",
    ];

    #[test]
    fn defaults_apply_without_file_or_env() {
        let _guard = env_lock().lock().expect("env lock");
        clear_vars(ALL_VARS);

        let config = AppConfig::load(LoadOptions::default()).expect("load defaults");
        assert_eq!(config.storage.state_file, PathBuf::from("printmarket-quote.json"));
        assert!(!config.storage.disabled);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Compact);
    }

    #[test]
    fn precedence_is_overrides_env_file_defaults() {
        let _guard = env_lock().lock().expect("env lock");
        clear_vars(ALL_VARS);

        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("printmarket.toml");
        fs::write(
            &path,
            r#"
[storage]
state_file = "from-file.json"

[logging]
level = "warn"
format = "pretty"
"#,
        )
        .expect("write config file");

        env::set_var("PRINTMARKET_STATE_FILE", "from-env.json");

        let config = AppConfig::load(LoadOptions {
            config_path: Some(path),
            overrides: ConfigOverrides {
                log_level: Some("debug".to_string()),
                ..ConfigOverrides::default()
            },
            ..LoadOptions::default()
        })
        .expect("load config");

        clear_vars(ALL_VARS);

        assert_eq!(config.storage.state_file, PathBuf::from("from-env.json"));
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn logging_env_aliases_are_supported() {
        let _guard = env_lock().lock().expect("env lock");
        clear_vars(ALL_VARS);

        env::set_var("PRINTMARKET_LOG_LEVEL", "warn");
        env::set_var("PRINTMARKET_LOG_FORMAT", "json");

        let config = AppConfig::load(LoadOptions::default()).expect("load config");
        clear_vars(ALL_VARS);

        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn invalid_log_level_fails_validation() {
        let _guard = env_lock().lock().expect("env lock");
        clear_vars(ALL_VARS);

        env::set_var("PRINTMARKET_LOGGING_LEVEL", "loud");
        let error = AppConfig::load(LoadOptions::default()).expect_err("invalid level");
        clear_vars(ALL_VARS);

        assert!(matches!(
            error,
            ConfigError::Validation(ref message) if message.contains("logging.level")
        ));
    }

    #[test]
    fn invalid_log_format_fails_validation() {
        let _guard = env_lock().lock().expect("env lock");
        clear_vars(ALL_VARS);

        env::set_var("PRINTMARKET_LOGGING_FORMAT", "loud");
        let error = AppConfig::load(LoadOptions::default()).expect_err("invalid format");
        clear_vars(ALL_VARS);

        assert!(matches!(
            error,
            ConfigError::Validation(ref message) if message.contains("log format")
        ));

        assert_eq!("json".parse::<LogFormat>().expect("json parses"), LogFormat::Json);
    }

    #[test]
    fn explicit_config_path_must_exist() {
        let _guard = env_lock().lock().expect("env lock");
        clear_vars(ALL_VARS);

        // No require_file: naming the path on its own is enough to demand it.
        let missing = PathBuf::from("no-such-dir/printmarket.toml");
        let error = AppConfig::load(LoadOptions {
            config_path: Some(missing.clone()),
            ..LoadOptions::default()
        })
        .expect_err("explicit missing config path");

        assert!(matches!(error, ConfigError::MissingConfigFile(path) if path == missing));
    }

    #[test]
    fn require_file_fails_when_missing() {
        let _guard = env_lock().lock().expect("env lock");
        clear_vars(ALL_VARS);

        let missing = PathBuf::from("definitely-not-here/printmarket.toml");
        let error = AppConfig::load(LoadOptions {
            config_path: Some(missing.clone()),
            require_file: true,
            ..LoadOptions::default()
        })
        .expect_err("missing required file");

        assert!(matches!(error, ConfigError::MissingConfigFile(path) if path == missing));
    }
}
