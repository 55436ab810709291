//! Application services shared by the desktop binaries: configuration,
//! environment validation, logging, auth, translations and hot reload.

pub mod auth;
pub mod config;
pub mod env;
pub mod error;
pub mod hot_reload;
pub mod i18n;
pub mod logging;

pub use auth::{AuthError, AuthManager};
pub use config::{AppConfig, AppSettings, ConfigError};
pub use env::{EnvError, EnvironmentConfig, EnvironmentValidator};
pub use error::LogErr;
pub use hot_reload::{ChangeKind, HotReloadOptions, HotReloader, ReloadEvent};
pub use i18n::{I18nError, I18nService};
