mod controller;
mod ui;

use std::{path::PathBuf, process::ExitCode, rc::Rc};

use anyhow::Context as _;
use app_core::{
    auth::default_roles,
    config::CONFIG_PATH,
    hot_reload::{self, HotReloadOptions},
    logging, AppConfig, AuthManager, EnvironmentValidator, HotReloader, I18nService, LogErr,
};
use crossbeam_channel::bounded;
use shared::error::{ErrorCode, UserFacingError};
use theme::{ThemeEngine, ThemeName};
use tracing::{error, info, warn};

use crate::ui::{DesktopApp, Services};

const LOCALE_DIR: &str = "locales";
const WINDOW_SIZE: [f32; 2] = [1024.0, 720.0];
const MIN_WINDOW_SIZE: [f32; 2] = [800.0, 600.0];

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            logging::init_fallback();
            error!("application initialization failed: {err:#}");
            eprintln!("Application initialization failed: {err:#}");
            let report = UserFacingError::new(ErrorCode::Configuration, format!("{err:#}"));
            rfd::MessageDialog::new()
                .set_level(rfd::MessageLevel::Error)
                .set_title(format!("{} error", report.title()))
                .set_description(format!(
                    "Application Initialization Failed\n\n{}",
                    report.message
                ))
                .set_buttons(rfd::MessageButtons::Ok)
                .show();
            ExitCode::FAILURE
        }
    }
}

fn run() -> anyhow::Result<()> {
    let env = EnvironmentValidator::validate().context("environment validation failed")?;
    let config = AppConfig::load(CONFIG_PATH).context("failed to load configuration")?;
    let settings = config.settings().clone();
    logging::init(&settings.logging).context("failed to set up logging")?;
    info!(?env, "environment validated");

    let auth = AuthManager::new(default_roles);

    let mut i18n = I18nService::new(LOCALE_DIR);
    if !i18n.set_language(settings.language()) {
        warn!(language = settings.language(), "no translations found; using built-in text");
    }

    let initial_theme = settings
        .theme
        .as_deref()
        .and_then(|name| name.parse::<ThemeName>().log_err("read configured theme").ok())
        .unwrap_or_default();
    let engine = Rc::new(ThemeEngine::with_theme(initial_theme));

    let (reload_rx, reloader) = if hot_reload::enabled(settings.env.as_deref(), env.debug_mode) {
        let (reload_tx, reload_rx) = bounded(64);
        let options = HotReloadOptions::new(
            vec![PathBuf::from(CONFIG_PATH), PathBuf::from(LOCALE_DIR)],
            &["json"],
        );
        let reloader =
            HotReloader::spawn(options, reload_tx).context("failed to start hot reload")?;
        (Some(reload_rx), Some(reloader))
    } else {
        (None, None)
    };

    let title = settings.app.name.clone();
    let services = Services {
        config,
        auth,
        i18n,
        engine,
        reload_rx,
        reloader,
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(&title)
            .with_inner_size(WINDOW_SIZE)
            .with_min_inner_size(MIN_WINDOW_SIZE),
        ..Default::default()
    };
    eframe::run_native(
        &title,
        options,
        Box::new(|cc| Ok(Box::new(DesktopApp::new(cc, services)))),
    )
    .map_err(|err| anyhow::anyhow!("window system error: {err}"))?;

    info!("application shut down");
    Ok(())
}
