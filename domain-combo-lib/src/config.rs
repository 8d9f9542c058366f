//! Configuration file parsing and management.
//!
//! This module loads TOML configuration files, merges them with proper
//! precedence rules and reads `DCOMBO_*` environment variables. Resolving
//! these layers against CLI flags happens in the CLI crate.

use crate::error::DomainCheckError;
use crate::types::OutputFormat;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Configuration loaded from TOML files.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct FileConfig {
    /// Default values for CLI options
    #[serde(skip_serializing_if = "Option::is_none")]
    pub defaults: Option<DefaultsConfig>,

    /// Output formatting preferences
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<OutputConfig>,
}

/// Default configuration values that map to CLI options.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct DefaultsConfig {
    /// Default worker count
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workers: Option<usize>,

    /// Default combination size
    #[serde(skip_serializing_if = "Option::is_none")]
    pub combinations: Option<usize>,

    /// Default TLD list
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tlds: Option<Vec<String>>,

    /// Join keywords with a dash
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dash: Option<bool>,

    /// Per-lookup timeout (as string, e.g., "5s", "2m")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<String>,
}

/// Output formatting configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct OutputConfig {
    /// Default output format: text, json or csv
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    /// Coloured, grouped text output by default
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pretty: Option<bool>,
}

impl OutputConfig {
    /// The configured output format, if it parses.
    pub fn output_format(&self) -> Option<OutputFormat> {
        self.format.as_deref().and_then(|f| f.parse().ok())
    }
}

/// Configuration discovery and loading functionality.
pub struct ConfigManager {
    /// Whether to log which files were found and used
    pub verbose: bool,
}

impl ConfigManager {
    /// Create a new configuration manager.
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Load configuration from a specific file.
    pub fn load_file<P: AsRef<Path>>(&self, path: P) -> Result<FileConfig, DomainCheckError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(DomainCheckError::file_error(
                path.to_string_lossy(),
                "Configuration file not found",
            ));
        }

        let content = fs::read_to_string(path).map_err(|e| {
            DomainCheckError::file_error(
                path.to_string_lossy(),
                format!("Failed to read configuration file: {}", e),
            )
        })?;

        let config: FileConfig = toml::from_str(&content)?;

        self.validate_config(&config)?;

        Ok(config)
    }

    /// Discover and load configuration files in precedence order.
    ///
    /// XDG config is lowest, then the home directory, then the current
    /// directory. A file that fails to parse is skipped with a warning.
    pub fn discover_and_load(&self) -> Result<FileConfig, DomainCheckError> {
        let mut merged_config = FileConfig::default();
        let mut loaded_files = Vec::new();

        let candidates = [
            self.get_xdg_config_path(),
            self.get_global_config_path(),
            self.get_local_config_path(),
        ];

        for path in candidates.into_iter().flatten() {
            match self.load_file(&path) {
                Ok(config) => {
                    merged_config = self.merge_configs(merged_config, config);
                    loaded_files.push(path);
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "ignoring config file");
                }
            }
        }

        if self.verbose {
            for path in &loaded_files {
                tracing::info!(path = %path.display(), "loaded config file");
            }
        }

        Ok(merged_config)
    }

    /// Get the local configuration file path.
    fn get_local_config_path(&self) -> Option<PathBuf> {
        let candidates = ["./domain-combo.toml", "./.domain-combo.toml"];

        candidates
            .iter()
            .map(Path::new)
            .find(|path| path.exists())
            .map(Path::to_path_buf)
    }

    /// Get the global configuration file path in the user's home directory.
    fn get_global_config_path(&self) -> Option<PathBuf> {
        let home = env::var_os("HOME")?;
        [".domain-combo.toml", "domain-combo.toml"]
            .iter()
            .map(|candidate| Path::new(&home).join(candidate))
            .find(|path| path.exists())
    }

    /// Get the XDG configuration file path.
    fn get_xdg_config_path(&self) -> Option<PathBuf> {
        let config_dir = env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| env::var_os("HOME").map(|home| Path::new(&home).join(".config")))?;

        let path = config_dir.join("domain-combo").join("config.toml");
        path.exists().then_some(path)
    }

    /// Merge two configurations; values from `higher` win.
    fn merge_configs(&self, lower: FileConfig, higher: FileConfig) -> FileConfig {
        FileConfig {
            defaults: match (lower.defaults, higher.defaults) {
                (Some(lower_defaults), Some(higher_defaults)) => Some(DefaultsConfig {
                    workers: higher_defaults.workers.or(lower_defaults.workers),
                    combinations: higher_defaults.combinations.or(lower_defaults.combinations),
                    tlds: higher_defaults.tlds.or(lower_defaults.tlds),
                    dash: higher_defaults.dash.or(lower_defaults.dash),
                    timeout: higher_defaults.timeout.or(lower_defaults.timeout),
                }),
                (lower, higher) => higher.or(lower),
            },
            output: match (lower.output, higher.output) {
                (Some(lower_output), Some(higher_output)) => Some(OutputConfig {
                    format: higher_output.format.or(lower_output.format),
                    pretty: higher_output.pretty.or(lower_output.pretty),
                }),
                (lower, higher) => higher.or(lower),
            },
        }
    }

    /// Validate a configuration for common issues.
    fn validate_config(&self, config: &FileConfig) -> Result<(), DomainCheckError> {
        if let Some(defaults) = &config.defaults {
            if let Some(workers) = defaults.workers {
                if workers == 0 || workers > 100 {
                    return Err(DomainCheckError::config(
                        "Workers must be between 1 and 100",
                    ));
                }
            }

            if let Some(timeout_str) = &defaults.timeout {
                if parse_timeout(timeout_str).is_none() {
                    return Err(DomainCheckError::config(format!(
                        "Invalid timeout format '{}'. Use format like '5s', '30s', '2m'",
                        timeout_str
                    )));
                }
            }

            if let Some(tlds) = &defaults.tlds {
                if let Some(bad) = tlds.iter().find(|t| t.trim().is_empty() || t.contains(' ')) {
                    return Err(DomainCheckError::config(format!("Invalid TLD '{}'", bad)));
                }
            }
        }

        if let Some(output) = &config.output {
            if let Some(format) = &output.format {
                format.parse::<OutputFormat>()?;
            }
        }

        Ok(())
    }
}

/// Environment variable configuration that mirrors CLI options.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnvConfig {
    pub workers: Option<usize>,
    pub combinations: Option<usize>,
    pub tlds: Option<Vec<String>>,
    pub dash: Option<bool>,
    pub timeout: Option<Duration>,
    pub json: Option<bool>,
    pub csv: Option<bool>,
    pub config: Option<String>,
}

impl EnvConfig {
    /// Check if output format conflicts exist (JSON and CSV both set).
    pub fn has_output_format_conflict(&self) -> bool {
        matches!((self.json, self.csv), (Some(true), Some(true)))
    }
}

/// Load configuration from `DCOMBO_*` environment variables.
///
/// Invalid values are logged as warnings and ignored.
pub fn load_env_config() -> EnvConfig {
    env_config_from(|key| env::var(key).ok())
}

/// Build an `EnvConfig` from any variable source.
fn env_config_from<F>(var: F) -> EnvConfig
where
    F: Fn(&str) -> Option<String>,
{
    let mut env_config = EnvConfig::default();

    if let Some(val) = var("DCOMBO_WORKERS") {
        match val.trim().parse::<usize>() {
            Ok(workers) if (1..=100).contains(&workers) => env_config.workers = Some(workers),
            _ => tracing::warn!(value = %val, "invalid DCOMBO_WORKERS, must be 1-100"),
        }
    }

    if let Some(val) = var("DCOMBO_COMBINATIONS") {
        match val.trim().parse::<usize>() {
            Ok(size) => env_config.combinations = Some(size),
            Err(_) => tracing::warn!(value = %val, "invalid DCOMBO_COMBINATIONS"),
        }
    }

    if let Some(val) = var("DCOMBO_TLD") {
        let tlds = crate::utils::parse_list(&val);
        if !tlds.is_empty() {
            env_config.tlds = Some(tlds);
        }
    }

    if let Some(val) = var("DCOMBO_TIMEOUT") {
        match parse_timeout(&val) {
            Some(timeout) => env_config.timeout = Some(timeout),
            None => tracing::warn!(
                value = %val,
                "invalid DCOMBO_TIMEOUT, use format like '5s', '30s', '2m'"
            ),
        }
    }

    env_config.dash = bool_var(&var, "DCOMBO_DASH");
    env_config.json = bool_var(&var, "DCOMBO_JSON");
    env_config.csv = bool_var(&var, "DCOMBO_CSV");

    if let Some(path) = var("DCOMBO_CONFIG") {
        if !path.trim().is_empty() {
            env_config.config = Some(path);
        }
    }

    env_config
}

fn bool_var<F>(var: &F, key: &str) -> Option<bool>
where
    F: Fn(&str) -> Option<String>,
{
    let val = var(key)?;
    match val.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => {
            tracing::warn!(variable = key, value = %val, "invalid boolean, use true/false");
            None
        }
    }
}

/// Parse a timeout string like "5s", "30s", "2m" or "7" (seconds).
///
/// Zero is rejected.
pub fn parse_timeout(timeout_str: &str) -> Option<Duration> {
    let timeout_str = timeout_str.trim().to_lowercase();

    let secs = if let Some(s) = timeout_str.strip_suffix('s') {
        s.parse::<u64>().ok()
    } else if let Some(m) = timeout_str.strip_suffix('m') {
        m.parse::<u64>().ok().and_then(|m| m.checked_mul(60))
    } else {
        timeout_str.parse::<u64>().ok()
    }?;

    (secs > 0).then(|| Duration::from_secs(secs))
}
