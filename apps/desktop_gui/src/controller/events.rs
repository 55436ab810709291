//! Events raised while drawing a frame and applied after it.

use std::{collections::BTreeMap, path::PathBuf};

use theme::ThemeName;
use widgets::GridEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppViewState {
    #[default]
    Login,
    Main,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    LoginRequested { username: String, password: String },
    Logout,
    SwitchTheme(ThemeName),
    ToggleTheme,
    OpenFileBrowser,
    FilesSelected(Vec<PathBuf>),
    FormSubmitted(BTreeMap<String, String>),
    Grid(GridEvent),
    ClearGrid,
    ShowAbout,
    Exit,
}

impl UiEvent {
    /// Short name for logs; never includes credentials.
    pub fn name(&self) -> &'static str {
        match self {
            UiEvent::LoginRequested { .. } => "login_requested",
            UiEvent::Logout => "logout",
            UiEvent::SwitchTheme(_) => "switch_theme",
            UiEvent::ToggleTheme => "toggle_theme",
            UiEvent::OpenFileBrowser => "open_file_browser",
            UiEvent::FilesSelected(_) => "files_selected",
            UiEvent::FormSubmitted(_) => "form_submitted",
            UiEvent::Grid(_) => "grid",
            UiEvent::ClearGrid => "clear_grid",
            UiEvent::ShowAbout => "show_about",
            UiEvent::Exit => "exit",
        }
    }
}
