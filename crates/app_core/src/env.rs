//! Startup validation of the process environment.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvError {
    #[error("missing required environment variables: {}", .0.join(", "))]
    Missing(Vec<String>),
}

#[derive(Clone, PartialEq, Eq)]
pub struct EnvironmentConfig {
    pub app_name: String,
    pub app_version: String,
    pub secret_key: String,
    pub debug_mode: bool,
    pub database_url: Option<String>,
}

impl std::fmt::Debug for EnvironmentConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnvironmentConfig")
            .field("app_name", &self.app_name)
            .field("app_version", &self.app_version)
            .field("secret_key", &"<redacted>")
            .field("debug_mode", &self.debug_mode)
            .field("database_url", &self.database_url)
            .finish()
    }
}

pub struct EnvironmentValidator;

impl EnvironmentValidator {
    pub const REQUIRED_VARS: [&'static str; 3] = ["APP_NAME", "APP_VERSION", "SECRET_KEY"];
    pub const OPTIONAL_VARS: [&'static str; 2] = ["DEBUG_MODE", "DATABASE_URL"];

    pub fn validate() -> Result<EnvironmentConfig, EnvError> {
        Self::validate_with(|name| std::env::var(name).ok())
    }

    /// Validates against `lookup` instead of the process environment.
    /// Present-but-empty variables count as set.
    pub fn validate_with(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<EnvironmentConfig, EnvError> {
        let missing: Vec<String> = Self::REQUIRED_VARS
            .into_iter()
            .filter(|name| lookup(*name).is_none())
            .map(|name| name.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(EnvError::Missing(missing));
        }

        let required = |name: &str| lookup(name).unwrap_or_default();
        Ok(EnvironmentConfig {
            app_name: required("APP_NAME"),
            app_version: required("APP_VERSION"),
            secret_key: required("SECRET_KEY"),
            debug_mode: lookup("DEBUG_MODE").is_some_and(|value| parse_bool(&value)),
            database_url: lookup("DATABASE_URL"),
        })
    }
}

pub fn parse_bool(value: &str) -> bool {
    matches!(
        value.to_ascii_lowercase().as_str(),
        "true" | "1" | "t" | "y" | "yes"
    )
}

#[cfg(test)]
#[path = "tests/env_tests.rs"]
mod tests;
