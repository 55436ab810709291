//! Global `tracing` subscriber setup.

use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingSection;

/// Toolkit targets that are only interesting when something goes wrong.
const QUIET_TARGETS: [&str; 4] = ["eframe", "egui_glow", "winit", "wgpu"];

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("unknown log level '{0}'")]
    UnknownLevel(String),
    #[error("failed to install log subscriber: {0}")]
    Init(String),
}

/// Maps a configured level name to a `tracing` level directive.
/// Accepts the usual aliases (`WARNING`, `CRITICAL`) in any case.
pub fn level_directive(level: &str) -> Result<&'static str, LoggingError> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" | "notset" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" | "critical" | "fatal" => Ok("error"),
        _ => Err(LoggingError::UnknownLevel(level.to_string())),
    }
}

pub fn filter_directives(level: &str) -> Result<String, LoggingError> {
    let mut directives = vec![level_directive(level)?.to_string()];
    directives.extend(QUIET_TARGETS.iter().map(|target| format!("{target}=warn")));
    Ok(directives.join(","))
}

/// Installs the global subscriber. `RUST_LOG`, when set, wins over the
/// configured level.
pub fn init(settings: &LoggingSection) -> Result<(), LoggingError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::new(filter_directives(&settings.level)?),
    };

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let installed = match settings.format.as_str() {
        "compact" => builder.compact().try_init(),
        "pretty" => builder.pretty().try_init(),
        _ => builder.try_init(),
    };
    installed.map_err(|err| LoggingError::Init(err.to_string()))?;

    info!("application starting up");
    Ok(())
}

/// Installs a plain subscriber at `INFO` unless one is already in place, so
/// failures before [`init`] still reach stderr. Returns whether it installed.
pub fn init_fallback() -> bool {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| filter_directives("info").map(EnvFilter::new))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).try_init().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_python_style_level_names() {
        assert_eq!(level_directive("INFO").expect("info"), "info");
        assert_eq!(level_directive("WARNING").expect("warning"), "warn");
        assert_eq!(level_directive("Critical").expect("critical"), "error");
        assert_eq!(level_directive(" debug ").expect("debug"), "debug");
        assert!(matches!(
            level_directive("verbose"),
            Err(LoggingError::UnknownLevel(name)) if name == "verbose"
        ));
    }

    #[test]
    fn quiets_toolkit_targets() {
        let directives = filter_directives("DEBUG").expect("directives");
        assert!(directives.starts_with("debug,"));
        assert!(directives.contains("winit=warn"));
        assert!(directives.contains("eframe=warn"));
    }

    #[test]
    fn fallback_installs_at_most_once() {
        init_fallback();
        assert!(tracing::dispatcher::has_been_set());
        assert!(!init_fallback());
    }
}
