//! Built-in theme palettes.
//!
//! The set of themes is closed: [`ThemeName`] enumerates it and
//! [`Theme::builtin`] resolves a name to its palette. Every palette has the
//! same shape, so renderers read fields directly. The only optional part is
//! [`Theme::data_grid`]; renderers supply literals when it is absent.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::ThemeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeName {
    #[default]
    Light,
    Dark,
}

impl ThemeName {
    pub const ALL: [ThemeName; 2] = [ThemeName::Light, ThemeName::Dark];

    pub fn as_str(self) -> &'static str {
        match self {
            ThemeName::Light => "light",
            ThemeName::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ThemeName::Light => ThemeName::Dark,
            ThemeName::Dark => ThemeName::Light,
        }
    }
}

impl fmt::Display for ThemeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeName {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(ThemeName::Light),
            "dark" => Ok(ThemeName::Dark),
            other => Err(ThemeError::InvalidTheme(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextColors {
    pub primary: &'static str,
    pub secondary: &'static str,
    pub disabled: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputColors {
    pub background: &'static str,
    pub border: &'static str,
    pub focus_border: &'static str,
    pub disabled_bg: &'static str,
    pub placeholder: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonColors {
    pub primary_bg: &'static str,
    pub primary_text: &'static str,
    pub secondary_bg: &'static str,
    pub secondary_text: &'static str,
    pub disabled_bg: &'static str,
    pub disabled_text: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckboxColors {
    pub background: &'static str,
    pub border: &'static str,
    pub checked_bg: &'static str,
    pub checked_border: &'static str,
    pub disabled_bg: &'static str,
    pub disabled_border: &'static str,
    pub text: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileBrowserColors {
    pub background: &'static str,
    pub border: &'static str,
    pub item_hover: &'static str,
    pub item_selected: &'static str,
    pub item_selected_text: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataGridColors {
    pub alternate_bg: &'static str,
    pub header_bg: &'static str,
    pub selected_text: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub name: ThemeName,

    pub primary: &'static str,
    pub primary_hover: &'static str,
    pub primary_pressed: &'static str,
    pub secondary: &'static str,
    pub secondary_hover: &'static str,
    pub secondary_pressed: &'static str,
    pub success: &'static str,
    pub danger: &'static str,
    pub warning: &'static str,
    pub info: &'static str,
    pub background: &'static str,
    pub surface: &'static str,
    pub border: &'static str,

    pub text: TextColors,

    pub input: InputColors,
    pub button: ButtonColors,
    pub checkbox: CheckboxColors,
    pub file_browser: FileBrowserColors,
    pub data_grid: Option<DataGridColors>,
}

pub static LIGHT: Theme = Theme {
    name: ThemeName::Light,
    primary: "#007bff",
    primary_hover: "#0069d9",
    primary_pressed: "#0056b3",
    secondary: "#6c757d",
    secondary_hover: "#5a6268",
    secondary_pressed: "#4e555b",
    success: "#28a745",
    danger: "#dc3545",
    warning: "#ffc107",
    info: "#17a2b8",
    background: "#ffffff",
    surface: "#f8f9fa",
    border: "#ced4da",
    text: TextColors {
        primary: "#212529",
        secondary: "#6c757d",
        disabled: "#868e96",
    },
    input: InputColors {
        background: "#ffffff",
        border: "#ced4da",
        focus_border: "#80bdff",
        disabled_bg: "#e9ecef",
        placeholder: "#6c757d",
    },
    button: ButtonColors {
        primary_bg: "#007bff",
        primary_text: "#ffffff",
        secondary_bg: "#6c757d",
        secondary_text: "#ffffff",
        disabled_bg: "#e9ecef",
        disabled_text: "#6c757d",
    },
    checkbox: CheckboxColors {
        background: "#ffffff",
        border: "#ced4da",
        checked_bg: "#007bff",
        checked_border: "#007bff",
        disabled_bg: "#e9ecef",
        disabled_border: "#dee2e6",
        text: "#212529",
    },
    file_browser: FileBrowserColors {
        background: "#ffffff",
        border: "#dee2e6",
        item_hover: "#f8f9fa",
        item_selected: "#007bff",
        item_selected_text: "#ffffff",
    },
    data_grid: Some(DataGridColors {
        alternate_bg: "#f8f9fa",
        header_bg: "#e9ecef",
        selected_text: "#ffffff",
    }),
};

pub static DARK: Theme = Theme {
    name: ThemeName::Dark,
    primary: "#0d6efd",
    primary_hover: "#0b5ed7",
    primary_pressed: "#0a58ca",
    secondary: "#6c757d",
    secondary_hover: "#5c636a",
    secondary_pressed: "#565e64",
    success: "#198754",
    danger: "#dc3545",
    warning: "#ffc107",
    info: "#0dcaf0",
    background: "#212529",
    surface: "#2c3034",
    border: "#495057",
    text: TextColors {
        primary: "#f8f9fa",
        secondary: "#adb5bd",
        disabled: "#6c757d",
    },
    input: InputColors {
        background: "#2c3034",
        border: "#495057",
        focus_border: "#0d6efd",
        disabled_bg: "#343a40",
        placeholder: "#6c757d",
    },
    button: ButtonColors {
        primary_bg: "#0d6efd",
        primary_text: "#ffffff",
        secondary_bg: "#6c757d",
        secondary_text: "#ffffff",
        disabled_bg: "#343a40",
        disabled_text: "#6c757d",
    },
    checkbox: CheckboxColors {
        background: "#2c3034",
        border: "#495057",
        checked_bg: "#0d6efd",
        checked_border: "#0d6efd",
        disabled_bg: "#343a40",
        disabled_border: "#495057",
        text: "#f8f9fa",
    },
    file_browser: FileBrowserColors {
        background: "#2c3034",
        border: "#495057",
        item_hover: "#343a40",
        item_selected: "#0d6efd",
        item_selected_text: "#ffffff",
    },
    data_grid: Some(DataGridColors {
        alternate_bg: "#2c3034",
        header_bg: "#343a40",
        selected_text: "#ffffff",
    }),
};

impl Theme {
    pub fn builtin(name: ThemeName) -> &'static Theme {
        match name {
            ThemeName::Light => &LIGHT,
            ThemeName::Dark => &DARK,
        }
    }

    /// Top-level color by semantic key, e.g. `"primary"` or `"background"`.
    pub fn color(&self, key: &str) -> Option<&'static str> {
        let value = match key {
            "primary" => self.primary,
            "primary_hover" => self.primary_hover,
            "primary_pressed" => self.primary_pressed,
            "secondary" => self.secondary,
            "secondary_hover" => self.secondary_hover,
            "secondary_pressed" => self.secondary_pressed,
            "success" => self.success,
            "danger" => self.danger,
            "warning" => self.warning,
            "info" => self.info,
            "background" => self.background,
            "surface" => self.surface,
            "border" => self.border,
            _ => return None,
        };
        Some(value)
    }

    pub fn text_color(&self, key: &str) -> Option<&'static str> {
        match key {
            "primary" => Some(self.text.primary),
            "secondary" => Some(self.text.secondary),
            "disabled" => Some(self.text.disabled),
            _ => None,
        }
    }

    /// Dotted lookup across the whole palette, e.g. `"button.primary_bg"`.
    pub fn lookup(&self, path: &str) -> Option<&'static str> {
        let Some((group, key)) = path.split_once('.') else {
            return self.color(path);
        };

        match group {
            "text" => self.text_color(key),
            "input" => match key {
                "background" => Some(self.input.background),
                "border" => Some(self.input.border),
                "focus_border" => Some(self.input.focus_border),
                "disabled_bg" => Some(self.input.disabled_bg),
                "placeholder" => Some(self.input.placeholder),
                _ => None,
            },
            "button" => match key {
                "primary_bg" => Some(self.button.primary_bg),
                "primary_text" => Some(self.button.primary_text),
                "secondary_bg" => Some(self.button.secondary_bg),
                "secondary_text" => Some(self.button.secondary_text),
                "disabled_bg" => Some(self.button.disabled_bg),
                "disabled_text" => Some(self.button.disabled_text),
                _ => None,
            },
            "checkbox" => match key {
                "background" => Some(self.checkbox.background),
                "border" => Some(self.checkbox.border),
                "checked_bg" => Some(self.checkbox.checked_bg),
                "checked_border" => Some(self.checkbox.checked_border),
                "disabled_bg" => Some(self.checkbox.disabled_bg),
                "disabled_border" => Some(self.checkbox.disabled_border),
                "text" => Some(self.checkbox.text),
                _ => None,
            },
            "file_browser" => match key {
                "background" => Some(self.file_browser.background),
                "border" => Some(self.file_browser.border),
                "item_hover" => Some(self.file_browser.item_hover),
                "item_selected" => Some(self.file_browser.item_selected),
                "item_selected_text" => Some(self.file_browser.item_selected_text),
                _ => None,
            },
            "data_grid" => {
                let grid = self.data_grid.as_ref()?;
                match key {
                    "alternate_bg" => Some(grid.alternate_bg),
                    "header_bg" => Some(grid.header_bg),
                    "selected_text" => Some(grid.selected_text),
                    _ => None,
                }
            }
            _ => None,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        LIGHT.clone()
    }
}
