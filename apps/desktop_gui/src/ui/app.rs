use std::{ffi::OsStr, path::Path};

use app_core::{
    hot_reload::DEFAULT_POLL_INTERVAL, AppConfig, AuthManager, ChangeKind, HotReloader,
    I18nService, LogErr, ReloadEvent,
};
use crossbeam_channel::Receiver;
use serde_json::{json, Value};
use shared::{
    domain::Permission,
    error::UserFacingError,
    Subscription,
};
use theme::{Restyle, ThemeHandle, ThemeName, Themed};
use tracing::{debug, info, warn};
use widgets::{
    apply_theme, Align, Button, Card, Checkbox, Column, DataGrid, FileBrowserDialog,
    FileDialogOutcome, FormBuilder, FormSchema, GridEvent, Label, LoadingSpinner,
    NotificationCenter, NotificationKind, ProgressBarWithLabel,
};

use crate::{
    controller::events::{AppViewState, UiEvent},
    ui::login::{self, LoginScreen},
};

const DEMO_FORM: &str = include_str!("../../forms/demo_form.json");
const ALLOWED_EXTENSIONS: [&str; 2] = [".txt", ".py"];
const GRID_HEIGHT: f32 = 220.0;
// Seconds the status bar spinner runs after a reload.
const RELOAD_SPIN_SECS: f64 = 1.0;

/// Long-lived services built during startup.
pub struct Services {
    pub config: AppConfig,
    pub auth: AuthManager,
    pub i18n: I18nService,
    pub engine: ThemeHandle,
    pub reload_rx: Option<Receiver<ReloadEvent>>,
    pub reloader: Option<HotReloader>,
}

pub struct DesktopApp {
    services: Services,
    view_state: AppViewState,
    login: LoginScreen,
    card: Themed<Card>,
    heading: Themed<Label>,
    placeholder: Themed<Label>,
    theme_button: Themed<Button>,
    browse_button: Themed<Button>,
    logout_button: Themed<Button>,
    clear_rows_button: Themed<Button>,
    show_progress: Themed<Checkbox>,
    file_browser: Themed<FileBrowserDialog>,
    grid: Themed<DataGrid>,
    form: Themed<FormBuilder>,
    progress: ProgressBarWithLabel,
    spinner: LoadingSpinner,
    spin_until: Option<f64>,
    notifications: NotificationCenter,
    status: String,
    about_open: bool,
    pending: Vec<UiEvent>,
    _visuals: Subscription,
    _auth_log: Subscription,
}

impl DesktopApp {
    pub fn new(cc: &eframe::CreationContext<'_>, services: Services) -> Self {
        let engine = services.engine.clone();
        apply_theme(&cc.egui_ctx, &engine.active_theme_data());
        let visuals = {
            let ctx = cc.egui_ctx.clone();
            engine.subscribe(move |theme| apply_theme(&ctx, theme))
        };
        let auth_log = services.auth.on_authentication_changed(|authenticated| {
            info!(authenticated = *authenticated, "authentication state changed");
        });

        let schema = serde_json::from_str::<FormSchema>(DEMO_FORM)
            .log_err("parse demo form")
            .unwrap_or_default();

        let mut app = Self {
            login: LoginScreen::new(&engine, &services.config.settings().app.name),
            card: Card::new().themed(&engine),
            heading: Label::heading(title_text(&services.config), 1).themed(&engine),
            placeholder: Label::muted("").themed(&engine),
            theme_button: Button::secondary("").themed(&engine),
            browse_button: Button::new("").themed(&engine),
            logout_button: Button::secondary("").themed(&engine),
            clear_rows_button: Button::secondary("").themed(&engine),
            show_progress: Checkbox::new("").themed(&engine),
            file_browser: FileBrowserDialog::bound(&engine, &ALLOWED_EXTENSIONS),
            grid: demo_grid(&engine),
            form: FormBuilder::new(&engine, schema),
            progress: ProgressBarWithLabel::new("", true, false),
            spinner: LoadingSpinner::new(),
            spin_until: None,
            notifications: NotificationCenter::new(),
            status: String::new(),
            about_open: false,
            pending: Vec::new(),
            view_state: AppViewState::Login,
            services,
            _visuals: visuals,
            _auth_log: auth_log,
        };
        app.show_progress.borrow_mut().set_checked(true);
        app.relabel();
        app
    }

    fn tr<'a>(&'a self, key: &'a str) -> &'a str {
        self.services.i18n.tr(key)
    }

    /// Re-applies translated text to widgets that store it.
    fn relabel(&mut self) {
        let i18n = &self.services.i18n;
        self.login
            .relabel(i18n.tr("Username"), i18n.tr("Password"), i18n.tr("Login"));
        self.placeholder
            .borrow_mut()
            .set_text(i18n.tr("Your application content goes here"));
        self.theme_button.borrow_mut().set_text(i18n.tr("Toggle Theme"));
        self.browse_button
            .borrow_mut()
            .set_text(i18n.tr("Open File Browser"));
        self.logout_button.borrow_mut().set_text(i18n.tr("Logout"));
        self.clear_rows_button
            .borrow_mut()
            .set_text(i18n.tr("Clear rows"));
        self.show_progress
            .borrow_mut()
            .set_text(i18n.tr("Show progress"));
        self.progress = ProgressBarWithLabel::new(i18n.tr("Rows shown"), true, false);
        self.status = self.tr("Ready").to_string();
    }

    fn process_reload_events(&mut self, ctx: &egui::Context) {
        let Some(rx) = &self.services.reload_rx else {
            return;
        };
        let events: Vec<ReloadEvent> = rx.try_iter().collect();
        for event in events {
            self.reload_path(ctx, &event.path, event.kind);
        }
    }

    fn reload_path(&mut self, ctx: &egui::Context, path: &Path, kind: ChangeKind) {
        let is_config = path.file_name() == self.services.config.path().file_name();
        if is_config && kind == ChangeKind::Removed {
            warn!(path = %path.display(), "configuration file removed; keeping current settings");
            return;
        }
        if is_config {
            if self
                .services
                .config
                .reload()
                .log_err("reload configuration")
                .is_err()
            {
                self.notifications
                    .notify("Configuration reload failed", NotificationKind::Error);
                return;
            }
            let title = title_text(&self.services.config);
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(title.clone()));
            self.heading.borrow_mut().set_text(title);
            let language = self.services.config.settings().language().to_string();
            self.services.i18n.set_language(&language);
        } else if path.extension() == Some(OsStr::new("json")) {
            self.services.i18n.reload();
        } else {
            debug!(path = %path.display(), "ignoring change");
            return;
        }

        info!(path = %path.display(), "reloaded");
        self.relabel();
        let name = path.file_name().map(|n| n.to_string_lossy().into_owned());
        self.notifications.notify(
            format!("Reloaded {}", name.unwrap_or_default()),
            NotificationKind::Info,
        );
        self.spin_until = Some(ctx.input(|i| i.time) + RELOAD_SPIN_SECS);
        self.spinner.start();
    }

    fn handle(&mut self, ctx: &egui::Context, event: UiEvent) {
        debug!(event = event.name(), "handling ui event");
        match event {
            UiEvent::LoginRequested { username, password } => {
                match login::user_id_for(&username, &password) {
                    Ok(user_id) => {
                        self.services.auth.login(user_id);
                        self.login.reset();
                        self.view_state = AppViewState::Main;
                        self.notifications.notify(
                            format!("{}, {}", self.tr("Welcome"), username.trim()),
                            NotificationKind::Success,
                        );
                    }
                    Err(message) => {
                        warn!("login rejected: empty credentials");
                        self.notifications
                            .notify(self.tr(message).to_string(), NotificationKind::Error);
                    }
                }
            }
            UiEvent::Logout => {
                self.services.auth.logout();
                self.view_state = AppViewState::Login;
                self.status = self.tr("Ready").to_string();
            }
            UiEvent::SwitchTheme(name) => self.services.engine.switch_to(name),
            UiEvent::ToggleTheme => {
                let next = self.services.engine.active_theme_name().toggled();
                self.services.engine.switch_to(next);
            }
            UiEvent::OpenFileBrowser => self.file_browser.borrow_mut().open(),
            UiEvent::FilesSelected(files) => {
                self.status = if files.is_empty() {
                    self.tr("No files selected").to_string()
                } else {
                    let names: Vec<String> =
                        files.iter().map(|f| f.display().to_string()).collect();
                    format!("{}: {}", self.tr("Selected"), names.join(", "))
                };
            }
            UiEvent::FormSubmitted(data) => {
                info!(fields = data.len(), "form submitted");
                self.notifications
                    .notify(self.tr("Form submitted").to_string(), NotificationKind::Success);
            }
            UiEvent::Grid(GridEvent::RowSelected(index, _)) => {
                self.status = format!("{} {}", self.tr("Selected row"), index + 1);
            }
            UiEvent::Grid(GridEvent::RowDoubleClicked(_, row)) => {
                let name = row["name"].as_str().unwrap_or_default().to_string();
                self.notifications.notify(name, NotificationKind::Info);
            }
            UiEvent::Grid(GridEvent::ColumnSorted { key, order }) => {
                self.status = format!("{} {key} ({order:?})", self.tr("Sorted by"));
            }
            UiEvent::ClearGrid => {
                let grid = &self.grid;
                let cleared = self
                    .services
                    .auth
                    .require_permission(Permission::Delete, || grid.borrow_mut().load_data(&[]));
                if let Err(err) = cleared {
                    let report = UserFacingError::from(err);
                    self.notifications.notify(
                        format!("{}: {}", report.title(), report.message),
                        NotificationKind::Warning,
                    );
                }
            }
            UiEvent::ShowAbout => self.about_open = true,
            UiEvent::Exit => ctx.send_viewport_cmd(egui::ViewportCommand::Close),
        }
    }

    fn show_menu_bar(&mut self, ctx: &egui::Context) {
        let i18n = &self.services.i18n;
        let active = self.services.engine.active_theme_name();
        let pending = &mut self.pending;

        egui::TopBottomPanel::top("app_menu_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.menu_button(i18n.tr("File"), |ui| {
                    if ui.button(i18n.tr("Exit")).clicked() {
                        pending.push(UiEvent::Exit);
                        ui.close();
                    }
                });
                ui.menu_button(i18n.tr("View"), |ui| {
                    for name in ThemeName::ALL {
                        let label = match name {
                            ThemeName::Light => i18n.tr("Light"),
                            ThemeName::Dark => i18n.tr("Dark"),
                        };
                        if ui.radio(active == name, label).clicked() {
                            pending.push(UiEvent::SwitchTheme(name));
                            ui.close();
                        }
                    }
                });
                ui.menu_button(i18n.tr("Help"), |ui| {
                    if ui.button(i18n.tr("About")).clicked() {
                        pending.push(UiEvent::ShowAbout);
                        ui.close();
                    }
                });
            });
        });
    }

    fn show_status_bar(&mut self, ctx: &egui::Context) {
        let now = ctx.input(|i| i.time);
        if self.spin_until.is_some_and(|until| now >= until) {
            self.spin_until = None;
            self.spinner.stop();
        }

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(self.status.as_str());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    self.spinner.show(ui);
                });
            });
        });
    }

    fn show_main(&mut self, ctx: &egui::Context) {
        self.show_menu_bar(ctx);
        self.show_status_bar(ctx);

        let pending = &mut self.pending;
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .id_salt("main_content")
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    self.card.borrow().show(ui, |ui| {
                        ui.vertical_centered(|ui| {
                            self.heading.borrow().show(ui);
                            self.placeholder.borrow().show(ui);
                        });
                        ui.horizontal_wrapped(|ui| {
                            if self.theme_button.borrow().show(ui).clicked() {
                                pending.push(UiEvent::ToggleTheme);
                            }
                            if self.browse_button.borrow().show(ui).clicked() {
                                pending.push(UiEvent::OpenFileBrowser);
                            }
                            if self.logout_button.borrow().show(ui).clicked() {
                                pending.push(UiEvent::Logout);
                            }
                        });
                    });
                    ui.add_space(12.0);

                    ui.horizontal(|ui| {
                        if self.clear_rows_button.borrow().show(ui).clicked() {
                            pending.push(UiEvent::ClearGrid);
                        }
                        self.show_progress.borrow_mut().show(ui);
                    });
                    ui.allocate_ui(egui::vec2(ui.available_width(), GRID_HEIGHT), |ui| {
                        pending.extend(self.grid.borrow_mut().show(ui).into_iter().map(UiEvent::Grid));
                    });

                    if self.show_progress.borrow().is_checked() {
                        let grid = self.grid.borrow();
                        let total = grid.rows().len().max(1) as f32;
                        let shown = grid.visible_rows().len() as f32;
                        let value = (shown / total * 100.0).round();
                        if self.progress.bar.set_value(value).log_err("update progress").is_ok() {
                            ui.add_space(8.0);
                            self.progress.show(ui);
                        }
                    }
                    ui.add_space(12.0);

                    if let Some(data) = self.form.borrow_mut().show(ui) {
                        pending.push(UiEvent::FormSubmitted(data));
                    }
                });
        });

        if let Some(outcome) = self.file_browser.borrow_mut().show(ctx) {
            match outcome {
                FileDialogOutcome::Accepted(files) => self.pending.push(UiEvent::FilesSelected(files)),
                FileDialogOutcome::Rejected => {
                    self.status = self.tr("File selection cancelled").to_string();
                }
            }
        }

        let settings = self.services.config.settings();
        let about = format!(
            "{}\n{} {}\n\n{}",
            settings.app.name,
            self.tr("Version"),
            settings.app.version,
            self.tr("A sample desktop application"),
        );
        egui::Window::new(self.tr("About"))
            .open(&mut self.about_open)
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label(about);
            });
    }
}

impl eframe::App for DesktopApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let bounds = ctx.available_rect();
        self.process_reload_events(ctx);

        match self.view_state {
            AppViewState::Login => {
                if let Some(event) = self.login.show(ctx) {
                    self.pending.push(event);
                }
            }
            AppViewState::Main => self.show_main(ctx),
        }

        for event in std::mem::take(&mut self.pending) {
            self.handle(ctx, event);
        }
        self.notifications.show(ctx, bounds);

        if self.services.reloader.is_some() {
            ctx.request_repaint_after(DEFAULT_POLL_INTERVAL);
        }
    }
}

fn title_text(config: &AppConfig) -> String {
    let app = &config.settings().app;
    format!("{} v{}", app.name, app.version)
}

fn demo_rows() -> Vec<Value> {
    vec![
        json!({"name": "Ada Lovelace", "role": "Admin", "age": 36, "active": true}),
        json!({"name": "Alan Turing", "role": "Editor", "age": 41, "active": false}),
        json!({"name": "Grace Hopper", "role": "Viewer", "age": 85, "active": true}),
        json!({"name": "Linus Torvalds", "role": "Editor", "age": 55, "active": true}),
        json!({"name": "Margaret Hamilton", "role": "Admin", "age": 88, "active": null}),
    ]
}

fn demo_grid(engine: &ThemeHandle) -> Themed<DataGrid> {
    let grid = DataGrid::bound(engine);
    {
        let mut grid = grid.borrow_mut();
        grid.set_columns(vec![
            Column::new("name", "Name").auto_size(),
            Column::new("role", "Role").width(110.0),
            Column::new("age", "Age").width(70.0).align(Align::Right),
            Column::new("active", "Active")
                .align(Align::Center)
                .formatter(|value| match value.as_bool() {
                    Some(true) => "yes".into(),
                    Some(false) => "no".into(),
                    None => value.to_string(),
                }),
        ]);
        grid.set_filter_columns(&["name", "role"]);
        grid.load_data(&demo_rows());
    }
    grid
}
