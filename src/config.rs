use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::PathBuf;
use anyhow::{Context, Result};
use toml::Value;
use log::{debug, info};
use crate::notifications::ToastConfig;

/// Configuration storage - section_name -> key -> value
pub type Configuration = HashMap<String, HashMap<String, String>>;

/// Section holding the store settings
pub const TOAST_SECTION: &str = "toast";

/// Configuration manager
pub struct ConfigManager {
    config: Configuration,
    config_file_path: Option<PathBuf>,
    selected_section: Option<String>,
}

impl ConfigManager {
    /// Create a ConfigManager from an in-memory configuration
    pub fn from_config(config: Configuration) -> Self {
        Self {
            config,
            config_file_path: None,
            selected_section: None,
        }
    }

    /// Load configuration from the first file found in the discovery hierarchy
    pub fn load() -> Result<Self> {
        for path in discover_config_files() {
            debug!("Looking for config at: {}", path.display());
            if path.is_file() {
                return Self::load_from_file(path);
            }
        }

        info!("No configuration file found, using defaults");
        Ok(Self::from_config(Configuration::new()))
    }

    /// Load configuration from an explicit file path
    pub fn load_from_file(path: PathBuf) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config = parse_toml_config(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        info!("Loaded configuration from: {}", path.display());
        Ok(Self {
            config,
            config_file_path: Some(path),
            selected_section: None,
        })
    }

    pub fn config_file_path(&self) -> Option<&PathBuf> {
        self.config_file_path.as_ref()
    }

    /// Look up a key: selected section first, then `section`, then `base`
    pub fn get_value(&self, section: &str, key: &str) -> Option<&String> {
        let lookup = |name: &str| self.config.get(name).and_then(|s| s.get(key));

        self.selected_section
            .as_deref()
            .and_then(lookup)
            .or_else(|| lookup(section))
            .or_else(|| lookup("base"))
    }

    /// Select a named section overriding every other (`--config-name`)
    pub fn select_section(&mut self, section: String) {
        debug!("Selecting configuration section: {}", section);
        self.selected_section = Some(section);
    }

    pub fn get_bool(&self, section: &str, key: &str) -> Result<Option<bool>> {
        match self.get_value(section, key) {
            Some(value) => match value.to_lowercase().as_str() {
                "true" => Ok(Some(true)),
                "false" => Ok(Some(false)),
                _ => Err(anyhow::anyhow!("Invalid boolean value for {}.{}: {}", section, key, value)),
            },
            None => Ok(None),
        }
    }

    pub fn get_log_level(&self, section: &str, key: &str) -> Result<Option<log::LevelFilter>> {
        match self.get_value(section, key) {
            Some(value) => Ok(Some(crate::logging::parse_log_level(value)?)),
            None => Ok(None),
        }
    }

    pub fn get_path(&self, section: &str, key: &str) -> Option<PathBuf> {
        self.get_value(section, key).map(PathBuf::from)
    }

    /// Build the store configuration from the `[toast]` section
    pub fn get_toast_config(&self) -> Result<ToastConfig> {
        let mut config = ToastConfig::default();

        if let Some(limit_str) = self.get_value(TOAST_SECTION, "limit") {
            config.limit = limit_str.parse::<usize>()
                .with_context(|| format!("Invalid limit value in config: {}", limit_str))?;
        }

        if let Some(delay_str) = self.get_value(TOAST_SECTION, "remove-delay-ms") {
            config.remove_delay_ms = delay_str.parse::<u64>()
                .with_context(|| format!("Invalid remove-delay-ms value in config: {}", delay_str))?;
        }

        config.validate()
            .context("Toast configuration validation failed")?;

        Ok(config)
    }
}

/// Candidate configuration files in order of precedence
fn discover_config_files() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Ok(env_path) = env::var("TOASTD_CONFIG") {
        paths.push(PathBuf::from(env_path));
    }

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("toastd").join("config.toml"));
    }

    if let Some(home_dir) = dirs::home_dir() {
        paths.push(home_dir.join(".toastd.toml"));
    }

    paths.push(PathBuf::from("./.toastd.toml"));

    debug!("Config discovery paths: {:?}", paths);
    paths
}

/// Parse TOML content into string-valued sections
fn parse_toml_config(content: &str) -> Result<Configuration> {
    let table: toml::Table = content.parse()
        .context("Failed to parse TOML content")?;

    let mut config = Configuration::new();
    flatten_toml_table(&table, "", &mut config);
    Ok(config)
}

/// Flatten nested tables into `outer.inner` section names
///
/// Top-level scalars land in the `base` section.
fn flatten_toml_table(table: &toml::Table, prefix: &str, config: &mut Configuration) {
    for (key, value) in table {
        match value {
            Value::Table(subtable) => {
                let section_name = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", prefix, key)
                };
                flatten_toml_table(subtable, &section_name, config);
            }
            scalar => {
                let section_name = if prefix.is_empty() { "base" } else { prefix };
                config
                    .entry(section_name.to_string())
                    .or_default()
                    .insert(key.clone(), toml_value_to_string(scalar));
            }
        }
    }
}

fn toml_value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Integer(i) => i.to_string(),
        Value::Float(f) => f.to_string(),
        Value::Boolean(b) => b.to_string(),
        other => other.to_string(),
    }
}
