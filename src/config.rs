//! Layered configuration for the console.
//!
//! Settings are read from `.botdeck/botdeck.toml` in the project directory,
//! then overridden by environment variables, then by CLI flags.
//!
//! # Configuration File Format
//!
//! ```toml
//! [backend]
//! base_url = "http://127.0.0.1:5300"
//! token = "eyJhbGciOi..."
//! task_status_path = "/api/v1/system/tasks/{id}"
//! timeout_secs = 10
//!
//! [poller]
//! interval_ms = 1000
//!
//! [ui]
//! locale = "en_US"
//!
//! [logging]
//! level = "info"
//! json = false
//! file = false
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::i18n::Locale;

pub const CONFIG_DIR: &str = ".botdeck";
pub const CONFIG_FILE: &str = "botdeck.toml";
pub const PREFS_FILE: &str = "prefs.toml";

/// Backend connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the management backend
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Bearer token sent with every request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Task status endpoint; `{id}` is replaced with the task id
    #[serde(default = "default_task_status_path")]
    pub task_status_path: String,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://127.0.0.1:5300".to_string()
}

fn default_task_status_path() -> String {
    "/api/v1/system/tasks/{id}".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: None,
            task_status_path: default_task_status_path(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Async task polling settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollerConfig {
    /// Delay between status fetches
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
}

fn default_interval_ms() -> u64 {
    1000
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
        }
    }
}

/// Presentation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Default locale when no preference has been persisted
    #[serde(default = "default_locale")]
    pub locale: String,
}

fn default_locale() -> String {
    Locale::EnUs.code().to_string()
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            locale: default_locale(),
        }
    }
}

/// Log output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing` filter directive, e.g. "info" or "botdeck=debug"
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Emit newline-delimited JSON instead of human-readable lines
    #[serde(default)]
    pub json: bool,
    /// Also write a daily-rolling log file under `.botdeck/logs`
    #[serde(default)]
    pub file: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
            file: false,
        }
    }
}

/// Contents of `botdeck.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BotdeckToml {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub poller: PollerConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl BotdeckToml {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse botdeck.toml")
    }

    /// Load from `<config_dir>/botdeck.toml`, or defaults if the file doesn't exist.
    pub fn load_or_default(config_dir: &Path) -> Result<Self> {
        let config_path = config_dir.join(CONFIG_FILE);
        if config_path.exists() {
            Self::load(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize botdeck.toml")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// Validate the configuration and return any warnings.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        let url = self.backend.base_url.as_str();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            warnings.push(format!(
                "Invalid base_url '{}': must start with http:// or https://",
                url
            ));
        }

        if !self.backend.task_status_path.contains("{id}") {
            warnings.push(format!(
                "task_status_path '{}' has no {{id}} placeholder",
                self.backend.task_status_path
            ));
        }

        if self.backend.timeout_secs == 0 {
            warnings.push("timeout_secs must be greater than 0".to_string());
        }

        if self.poller.interval_ms == 0 {
            warnings.push("poller.interval_ms must be greater than 0".to_string());
        }

        if Locale::from_code(&self.ui.locale).is_none() {
            warnings.push(format!(
                "Unknown locale '{}'. Valid values: en_US, zh_Hans, zh_Hant, ja_JP",
                self.ui.locale
            ));
        }

        if self
            .logging
            .level
            .parse::<tracing_subscriber::EnvFilter>()
            .is_err()
        {
            warnings.push(format!(
                "logging.level '{}' is not a valid tracing filter",
                self.logging.level
            ));
        }

        warnings
    }
}

/// Effective configuration: file → environment → CLI.
#[derive(Debug, Clone)]
pub struct BotdeckConfig {
    /// Path to the project directory
    pub project_dir: PathBuf,
    /// Path to the .botdeck directory
    pub config_dir: PathBuf,
    /// Parsed botdeck.toml
    pub toml: BotdeckToml,
    /// CLI override: base URL
    pub cli_base_url: Option<String>,
    /// CLI override: poll interval
    pub cli_interval_ms: Option<u64>,
    /// CLI override: verbose logging
    pub verbose: bool,
}

impl BotdeckConfig {
    /// Create a config from a project directory.
    pub fn new(project_dir: PathBuf) -> Result<Self> {
        let project_dir = project_dir
            .canonicalize()
            .context("Failed to resolve project directory")?;
        let config_dir = project_dir.join(CONFIG_DIR);
        let toml = BotdeckToml::load_or_default(&config_dir)?;

        Ok(Self {
            project_dir,
            config_dir,
            toml,
            cli_base_url: None,
            cli_interval_ms: None,
            verbose: false,
        })
    }

    /// Create a config with CLI overrides applied on top.
    pub fn with_cli_args(
        project_dir: PathBuf,
        verbose: bool,
        base_url: Option<String>,
        interval_ms: Option<u64>,
    ) -> Result<Self> {
        let mut config = Self::new(project_dir)?;
        config.verbose = verbose;
        config.cli_base_url = base_url;
        config.cli_interval_ms = interval_ms;
        Ok(config)
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(CONFIG_FILE)
    }

    pub fn prefs_file(&self) -> PathBuf {
        self.config_dir.join(PREFS_FILE)
    }

    pub fn log_dir(&self) -> PathBuf {
        self.config_dir.join("logs")
    }

    /// Base URL (CLI → env → file), without a trailing slash.
    pub fn base_url(&self) -> String {
        let url = self
            .cli_base_url
            .clone()
            .or_else(|| std::env::var("BOTDECK_BASE_URL").ok())
            .unwrap_or_else(|| self.toml.backend.base_url.clone());
        url.trim_end_matches('/').to_string()
    }

    /// Bearer token (env → file).
    pub fn token(&self) -> Option<String> {
        std::env::var("BOTDECK_TOKEN")
            .ok()
            .filter(|t| !t.is_empty())
            .or_else(|| self.toml.backend.token.clone())
    }

    pub fn task_status_path(&self) -> &str {
        &self.toml.backend.task_status_path
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.toml.backend.timeout_secs.max(1))
    }

    /// Poll interval (CLI → env → file), never zero.
    pub fn poll_interval(&self) -> Duration {
        let ms = self
            .cli_interval_ms
            .or_else(|| {
                std::env::var("BOTDECK_POLL_INTERVAL_MS")
                    .ok()
                    .and_then(|v| v.parse().ok())
            })
            .unwrap_or(self.toml.poller.interval_ms);
        Duration::from_millis(ms.max(1))
    }

    /// Fallback locale (env → file → en_US).
    pub fn default_locale(&self) -> Locale {
        std::env::var("BOTDECK_LOCALE")
            .ok()
            .and_then(|code| Locale::from_code(&code))
            .or_else(|| Locale::from_code(&self.toml.ui.locale))
            .unwrap_or_default()
    }

    /// Validate configuration and return warnings.
    pub fn validate(&self) -> Vec<String> {
        self.toml.validate()
    }
}
