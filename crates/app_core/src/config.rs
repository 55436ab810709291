//! Layered application configuration.
//!
//! `config.json` is the base layer; variables prefixed `APP__` override it,
//! with `__` separating nesting levels (`APP__LOGGING__LEVEL`).

use std::{
    collections::HashMap,
    fs, io,
    path::{Path, PathBuf},
};

use config::{Config, Environment, File, FileFormat, Source};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

pub const CONFIG_PATH: &str = "config.json";
pub const ENV_PREFIX: &str = "APP";
pub const ENV_SEPARATOR: &str = "__";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to write default configuration to '{path}': {source}")]
    WriteDefault {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to encode default configuration: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppSection {
    pub name: String,
    pub version: String,
}

impl Default for AppSection {
    fn default() -> Self {
        Self {
            name: "Desktop App".into(),
            version: "1.0.0".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingSection {
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_format() -> String {
    "full".into()
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "INFO".into(),
            format: default_log_format(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default)]
    pub app: AppSection,
    #[serde(default)]
    pub logging: LoggingSection,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
}

impl AppSettings {
    pub fn language(&self) -> &str {
        self.language.as_deref().unwrap_or("en")
    }

    pub fn is_development(&self) -> bool {
        self.env.as_deref() == Some("development")
    }
}

pub struct AppConfig {
    path: PathBuf,
    // `None` reads the process environment.
    env_overrides: Option<HashMap<String, String>>,
    layered: Config,
    settings: AppSettings,
}

impl AppConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::build(path.as_ref().to_path_buf(), None)
    }

    /// Loads with `vars` standing in for the process environment.
    pub fn load_with_env(
        path: impl AsRef<Path>,
        vars: HashMap<String, String>,
    ) -> Result<Self, ConfigError> {
        Self::build(path.as_ref().to_path_buf(), Some(vars))
    }

    fn build(
        path: PathBuf,
        env_overrides: Option<HashMap<String, String>>,
    ) -> Result<Self, ConfigError> {
        if !path.exists() {
            write_default(&path)?;
        }

        let layered = layer(&path, env_overrides.clone())?;
        let settings = layered.clone().try_deserialize::<AppSettings>()?;
        debug!(path = %path.display(), "configuration loaded");

        Ok(Self {
            path,
            env_overrides,
            layered,
            settings,
        })
    }

    /// Re-reads the file and environment. State is untouched on failure.
    pub fn reload(&mut self) -> Result<(), ConfigError> {
        let layered = layer(&self.path, self.env_overrides.clone())?;
        let settings = layered.clone().try_deserialize::<AppSettings>()?;
        self.layered = layered;
        self.settings = settings;
        info!(path = %self.path.display(), "configuration reloaded");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    /// Value at a dotted key such as `"app.name"`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<T, ConfigError> {
        Ok(self.layered.get::<T>(key)?)
    }

    pub fn get_or<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        self.get(key).unwrap_or(default)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.layered.get::<config::Value>(key).is_ok()
    }

    pub fn top_level_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .layered
            .collect()
            .map(|table| table.into_keys().collect())
            .unwrap_or_default();
        keys.sort();
        keys
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("path", &self.path)
            .field("settings", &self.settings)
            .finish()
    }
}

fn layer(
    path: &Path,
    env_overrides: Option<HashMap<String, String>>,
) -> Result<Config, ConfigError> {
    let environment = Environment::with_prefix(ENV_PREFIX)
        .prefix_separator(ENV_SEPARATOR)
        .separator(ENV_SEPARATOR)
        .source(env_overrides);

    Ok(Config::builder()
        .add_source(File::from(path).format(FileFormat::Json).required(true))
        .add_source(environment)
        .build()?)
}

fn write_default(path: &Path) -> Result<(), ConfigError> {
    let encoded = serde_json::to_string_pretty(&AppSettings::default())?;
    fs::write(path, encoded).map_err(|source| ConfigError::WriteDefault {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), "wrote default configuration");
    Ok(())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
