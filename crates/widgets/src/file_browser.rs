//! Modal-style window for collecting a list of files.

use std::path::{Path, PathBuf};

use egui::{Color32, CornerRadius, Frame, Margin, RichText, ScrollArea, Stroke};
use theme::{style, ComponentKind, Restyle, StyleSheet, Theme, ThemeHandle, Themed};
use tracing::{info, warn};

use crate::{button::Button, paint::sheet_color_or};

pub const TITLE: &str = "Select Files";
pub const DEFAULT_SIZE: [f32; 2] = [600.0, 400.0];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileDialogOutcome {
    Accepted(Vec<PathBuf>),
    Rejected,
}

enum Action {
    Add,
    Clear,
    Accept,
    Reject,
}

#[derive(Debug)]
pub struct FileBrowserDialog {
    allowed_extensions: Vec<String>,
    files: Vec<PathBuf>,
    warning: Option<String>,
    open: bool,
    add_button: Themed<Button>,
    clear_button: Themed<Button>,
    ok_button: Themed<Button>,
    cancel_button: Themed<Button>,
    style: StyleSheet,
}

impl FileBrowserDialog {
    /// `allowed_extensions` such as `["txt", ".PY"]`; empty allows everything.
    pub fn new(engine: &ThemeHandle, allowed_extensions: &[&str]) -> Self {
        Self {
            allowed_extensions: allowed_extensions
                .iter()
                .map(|ext| format!(".{}", ext.trim_start_matches('.').to_lowercase()))
                .collect(),
            files: Vec::new(),
            warning: None,
            open: false,
            add_button: Button::new("Add Files").themed(engine),
            clear_button: Button::secondary("Clear Selection").themed(engine),
            ok_button: Button::new("OK").themed(engine),
            cancel_button: Button::secondary("Cancel").themed(engine),
            style: StyleSheet::new(),
        }
    }

    pub fn bound(engine: &ThemeHandle, allowed_extensions: &[&str]) -> Themed<Self> {
        Self::new(engine, allowed_extensions).themed(engine)
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn allowed_extensions(&self) -> &[String] {
        &self.allowed_extensions
    }

    pub fn is_allowed(&self, path: &Path) -> bool {
        if self.allowed_extensions.is_empty() {
            return true;
        }
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| format!(".{}", ext.to_lowercase()))
            .is_some_and(|ext| self.allowed_extensions.contains(&ext))
    }

    /// Adds the allowed paths and returns the rejected ones. A rejection sets
    /// the warning shown in the dialog.
    pub fn add_files(&mut self, paths: impl IntoIterator<Item = PathBuf>) -> Vec<PathBuf> {
        let (accepted, rejected): (Vec<PathBuf>, Vec<PathBuf>) =
            paths.into_iter().partition(|path| self.is_allowed(path));
        self.files.extend(accepted);

        self.warning = (!rejected.is_empty()).then(|| {
            let names: Vec<String> = rejected.iter().map(|p| p.display().to_string()).collect();
            warn!(rejected = rejected.len(), "files with invalid extensions");
            format!(
                "The following files have invalid extensions:\n{}\nAllowed extensions: {}",
                names.join(", "),
                self.allowed_extensions.join(", ")
            )
        });
        rejected
    }

    /// Opens the native picker and adds whatever the user chose.
    pub fn pick_files(&mut self) {
        let mut dialog = rfd::FileDialog::new().set_title(TITLE);
        if !self.allowed_extensions.is_empty() {
            let extensions: Vec<&str> = self
                .allowed_extensions
                .iter()
                .map(|ext| ext.trim_start_matches('.'))
                .collect();
            dialog = dialog
                .add_filter("Allowed Files", extensions.as_slice())
                .add_filter("All Files", &["*"]);
        }
        if let Some(paths) = dialog.pick_files() {
            self.add_files(paths);
        }
    }

    pub fn selected_files(&self) -> &[PathBuf] {
        &self.files
    }

    pub fn warning(&self) -> Option<&str> {
        self.warning.as_deref()
    }

    pub fn clear(&mut self) {
        self.files.clear();
        self.warning = None;
    }

    /// Hands back the selection, then clears it and closes.
    pub fn accept(&mut self) -> Vec<PathBuf> {
        let files = std::mem::take(&mut self.files);
        info!(files = files.len(), "file selection accepted");
        self.warning = None;
        self.open = false;
        files
    }

    pub fn reject(&mut self) {
        self.clear();
        self.open = false;
    }

    pub fn style(&self) -> &StyleSheet {
        &self.style
    }

    pub fn show(&mut self, ctx: &egui::Context) -> Option<FileDialogOutcome> {
        if !self.open {
            return None;
        }

        let background = sheet_color_or(&self.style, "file_list", "background-color", Color32::WHITE);
        let text = sheet_color_or(&self.style, "file_list", "color", Color32::BLACK);
        let border = sheet_color_or(&self.style, "file_list", "border", Color32::GRAY);

        let mut action = None;
        let mut window_open = true;
        egui::Window::new(TITLE)
            .open(&mut window_open)
            .collapsible(false)
            .default_size(DEFAULT_SIZE)
            .show(ctx, |ui| {
                Frame::new()
                    .fill(background)
                    .stroke(Stroke::new(1.0, border))
                    .corner_radius(CornerRadius::same(4))
                    .inner_margin(Margin::same(4))
                    .show(ui, |ui| {
                        ScrollArea::vertical()
                            .id_salt("file_browser_list")
                            .auto_shrink([false, false])
                            .max_height(DEFAULT_SIZE[1] - 140.0)
                            .show(ui, |ui| {
                                for file in &self.files {
                                    ui.label(RichText::new(file.display().to_string()).color(text));
                                }
                            });
                    });

                if let Some(warning) = &self.warning {
                    ui.colored_label(ui.visuals().warn_fg_color, warning);
                }

                ui.horizontal(|ui| {
                    if self.add_button.borrow().show(ui).clicked() {
                        action = Some(Action::Add);
                    }
                    if self.clear_button.borrow().show(ui).clicked() {
                        action = Some(Action::Clear);
                    }
                });
                ui.separator();
                ui.horizontal(|ui| {
                    if self.ok_button.borrow().show(ui).clicked() {
                        action = Some(Action::Accept);
                    }
                    if self.cancel_button.borrow().show(ui).clicked() {
                        action = Some(Action::Reject);
                    }
                });
            });

        if !window_open {
            action = Some(Action::Reject);
        }
        match action? {
            Action::Add => {
                self.pick_files();
                None
            }
            Action::Clear => {
                self.clear();
                None
            }
            Action::Accept => Some(FileDialogOutcome::Accepted(self.accept())),
            Action::Reject => {
                self.reject();
                Some(FileDialogOutcome::Rejected)
            }
        }
    }
}

impl Restyle for FileBrowserDialog {
    fn component_kind(&self) -> ComponentKind {
        ComponentKind::FileBrowser
    }

    fn restyle(&mut self, theme: &Theme) {
        self.style = style::file_browser(theme);
    }
}
