//! Stylesheets and the per-component renderers.
//!
//! Every renderer is a pure function of the theme and the widget state it is
//! given. Rendering the same inputs twice yields equal stylesheets.

use std::fmt;

use crate::registry::Theme;

pub const DATA_GRID_ALTERNATE_FALLBACK: &str = "#f8f9fa";
pub const DATA_GRID_HEADER_FALLBACK: &str = "#e9ecef";
pub const DATA_GRID_SELECTED_TEXT_FALLBACK: &str = "#ffffff";

pub const HEADING_SIZES: [u32; 6] = [32, 28, 24, 20, 18, 16];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Button,
    Input,
    Checkbox,
    DataGrid,
    FilterBar,
    FileBrowser,
    Form,
    Card,
    Label,
}

impl ComponentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ComponentKind::Button => "button",
            ComponentKind::Input => "input",
            ComponentKind::Checkbox => "checkbox",
            ComponentKind::DataGrid => "data_grid",
            ComponentKind::FilterBar => "filter_bar",
            ComponentKind::FileBrowser => "file_browser",
            ComponentKind::Form => "form",
            ComponentKind::Card => "card",
            ComponentKind::Label => "label",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonVariant {
    #[default]
    Primary,
    Secondary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelKind {
    #[default]
    Body,
    /// Level 1 through 6.
    Heading(u8),
    Muted,
}

pub fn heading_size(level: u8) -> Option<u32> {
    match level {
        1..=6 => Some(HEADING_SIZES[usize::from(level) - 1]),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub selector: String,
    pub declarations: Vec<(&'static str, String)>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StyleSheet {
    rules: Vec<Rule>,
}

impl StyleSheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rule(mut self, selector: &str, declarations: &[(&'static str, &str)]) -> Self {
        self.rules.push(Rule {
            selector: selector.to_string(),
            declarations: declarations
                .iter()
                .map(|(property, value)| (*property, (*value).to_string()))
                .collect(),
        });
        self
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Last value declared for `property` under exactly `selector`.
    pub fn value(&self, selector: &str, property: &str) -> Option<&str> {
        self.rules
            .iter()
            .filter(|rule| rule.selector == selector)
            .flat_map(|rule| rule.declarations.iter())
            .filter(|(name, _)| *name == property)
            .map(|(_, value)| value.as_str())
            .last()
    }

    pub fn merged(mut self, other: StyleSheet) -> Self {
        self.rules.extend(other.rules);
        self
    }
}

impl fmt::Display for StyleSheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, rule) in self.rules.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            writeln!(f, "{} {{", rule.selector)?;
            for (property, value) in &rule.declarations {
                writeln!(f, "    {property}: {value};")?;
            }
            writeln!(f, "}}")?;
        }
        Ok(())
    }
}

/// Default rendering for a component kind, as used by the engine.
pub fn component(theme: &Theme, kind: ComponentKind) -> StyleSheet {
    match kind {
        ComponentKind::Button => button(theme, ButtonVariant::Primary),
        ComponentKind::Input => input(theme),
        ComponentKind::Checkbox => checkbox(theme),
        ComponentKind::DataGrid => data_grid(theme),
        ComponentKind::FilterBar => filter_bar(theme),
        ComponentKind::FileBrowser => file_browser(theme),
        ComponentKind::Form => form_label(theme).merged(form_error(theme)),
        ComponentKind::Card => card(theme),
        ComponentKind::Label => label(theme, LabelKind::Body),
    }
}

pub fn button(theme: &Theme, variant: ButtonVariant) -> StyleSheet {
    let (bg, text, hover, pressed) = match variant {
        ButtonVariant::Primary => (
            theme.button.primary_bg,
            theme.button.primary_text,
            theme.primary_hover,
            theme.primary_pressed,
        ),
        ButtonVariant::Secondary => (
            theme.button.secondary_bg,
            theme.button.secondary_text,
            theme.secondary_hover,
            theme.secondary_pressed,
        ),
    };

    StyleSheet::new()
        .rule(
            "button",
            &[
                ("background-color", bg),
                ("color", text),
                ("border", "none"),
                ("border-radius", "4px"),
                ("padding", "8px 16px"),
                ("font-size", "14px"),
            ],
        )
        .rule("button:hover", &[("background-color", hover)])
        .rule("button:pressed", &[("background-color", pressed)])
        .rule(
            "button:disabled",
            &[
                ("background-color", theme.button.disabled_bg),
                ("color", theme.button.disabled_text),
            ],
        )
}

pub fn input(theme: &Theme) -> StyleSheet {
    let border = format!("1px solid {}", theme.input.border);
    StyleSheet::new()
        .rule(
            "input",
            &[
                ("background-color", theme.input.background),
                ("border", &border),
                ("border-radius", "4px"),
                ("padding", "8px 12px"),
                ("font-size", "14px"),
                ("color", theme.text.primary),
            ],
        )
        .rule("input:focus", &[("border-color", theme.input.focus_border)])
        .rule(
            "input:disabled",
            &[
                ("background-color", theme.input.disabled_bg),
                ("color", theme.text.disabled),
            ],
        )
        .rule("input::placeholder", &[("color", theme.input.placeholder)])
}

pub fn checkbox(theme: &Theme) -> StyleSheet {
    let colors = &theme.checkbox;
    let border = format!("1px solid {}", colors.border);
    StyleSheet::new()
        .rule("checkbox", &[("color", colors.text), ("spacing", "8px")])
        .rule(
            "checkbox::indicator",
            &[
                ("width", "16px"),
                ("height", "16px"),
                ("border", &border),
                ("border-radius", "3px"),
                ("background-color", colors.background),
            ],
        )
        .rule(
            "checkbox::indicator:checked",
            &[
                ("background-color", colors.checked_bg),
                ("border-color", colors.checked_border),
            ],
        )
        .rule(
            "checkbox::indicator:disabled",
            &[
                ("background-color", colors.disabled_bg),
                ("border-color", colors.disabled_border),
            ],
        )
}

pub fn data_grid(theme: &Theme) -> StyleSheet {
    let (alternate_bg, header_bg, selected_text) = match &theme.data_grid {
        Some(grid) => (grid.alternate_bg, grid.header_bg, grid.selected_text),
        None => (
            DATA_GRID_ALTERNATE_FALLBACK,
            DATA_GRID_HEADER_FALLBACK,
            DATA_GRID_SELECTED_TEXT_FALLBACK,
        ),
    };
    let border = format!("1px solid {}", theme.border);

    StyleSheet::new()
        .rule(
            "table",
            &[
                ("background-color", theme.background),
                ("alternate-background-color", alternate_bg),
                ("gridline-color", theme.border),
                ("color", theme.text.primary),
                ("border", &border),
            ],
        )
        .rule(
            "table::header",
            &[
                ("background-color", header_bg),
                ("color", theme.text.primary),
                ("padding", "8px"),
                ("border", "none"),
                ("border-right", &border),
                ("border-bottom", &border),
            ],
        )
        .rule("table::item", &[("padding", "8px")])
        .rule(
            "table::item:selected",
            &[("background-color", theme.primary), ("color", selected_text)],
        )
}

pub fn filter_bar(theme: &Theme) -> StyleSheet {
    let border = format!("1px solid {}", theme.input.border);
    StyleSheet::new().rule(
        "filter_bar input",
        &[
            ("background-color", theme.input.background),
            ("color", theme.text.primary),
            ("border", &border),
            ("border-radius", "4px"),
            ("padding", "6px 12px"),
        ],
    )
}

pub fn file_browser(theme: &Theme) -> StyleSheet {
    let colors = &theme.file_browser;
    let border = format!("1px solid {}", colors.border);
    StyleSheet::new()
        .rule(
            "file_list",
            &[
                ("background-color", colors.background),
                ("color", theme.text.primary),
                ("border", &border),
                ("border-radius", "4px"),
                ("padding", "4px"),
            ],
        )
        .rule("file_list::item", &[("padding", "4px")])
        .rule(
            "file_list::item:hover",
            &[("background-color", colors.item_hover)],
        )
        .rule(
            "file_list::item:selected",
            &[
                ("background-color", colors.item_selected),
                ("color", colors.item_selected_text),
            ],
        )
}

pub fn form_label(theme: &Theme) -> StyleSheet {
    StyleSheet::new().rule(
        "form label",
        &[
            ("color", theme.text.primary),
            ("font-size", "14px"),
            ("margin-bottom", "4px"),
        ],
    )
}

pub fn form_error(theme: &Theme) -> StyleSheet {
    StyleSheet::new().rule(
        "form label.error",
        &[
            ("color", theme.danger),
            ("font-size", "12px"),
            ("margin-top", "4px"),
            ("padding", "4px 0"),
        ],
    )
}

pub fn card(theme: &Theme) -> StyleSheet {
    let border = format!("1px solid {}", theme.border);
    StyleSheet::new().rule(
        "card",
        &[
            ("background-color", theme.background),
            ("color", theme.text.primary),
            ("border", &border),
            ("border-radius", "6px"),
            ("padding", "16px"),
        ],
    )
}

pub fn label(theme: &Theme, kind: LabelKind) -> StyleSheet {
    match kind {
        LabelKind::Heading(level) => match heading_size(level) {
            Some(size) => {
                let size = format!("{size}px");
                StyleSheet::new().rule(
                    "label",
                    &[
                        ("color", theme.text.primary),
                        ("font-size", &size),
                        ("font-weight", "bold"),
                        ("margin", "8px 0"),
                    ],
                )
            }
            None => label(theme, LabelKind::Body),
        },
        LabelKind::Body | LabelKind::Muted => {
            let color = if kind == LabelKind::Muted {
                theme.text.secondary
            } else {
                theme.text.primary
            };
            StyleSheet::new().rule(
                "label",
                &[("color", color), ("font-size", "14px"), ("margin", "4px 0")],
            )
        }
    }
}

/// Progress bars are not themed; they carry their own accent color.
/// Translucent track behind a bar of `color`: its RGB at alpha `0x20`.
fn track_color(color: &str) -> Option<String> {
    let hex = color.trim().strip_prefix('#')?;
    if !matches!(hex.len(), 6 | 8) || !hex.is_ascii() {
        return None;
    }
    let channel = |at: usize| u8::from_str_radix(&hex[at..at + 2], 16).ok();
    let (r, g, b) = (channel(0)?, channel(2)?, channel(4)?);
    Some(format!("#{r:02x}{g:02x}{b:02x}20"))
}

pub fn progress_bar(color: &str, height: u32) -> StyleSheet {
    let radius = format!("{}px", height / 2);
    let track = track_color(color).unwrap_or_else(|| color.to_string());
    StyleSheet::new()
        .rule(
            "progress",
            &[
                ("border", "none"),
                ("border-radius", &radius),
                ("background-color", &track),
                ("text-align", "center"),
            ],
        )
        .rule(
            "progress::chunk",
            &[("border-radius", &radius), ("background-color", color)],
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{DARK, LIGHT};

    #[test]
    fn button_picks_variant_colors() {
        let primary = button(&LIGHT, ButtonVariant::Primary);
        let secondary = button(&LIGHT, ButtonVariant::Secondary);

        assert_eq!(primary.value("button", "background-color"), Some("#007bff"));
        assert_eq!(primary.value("button:hover", "background-color"), Some("#0069d9"));
        assert_eq!(secondary.value("button", "background-color"), Some("#6c757d"));
        assert_eq!(
            secondary.value("button:pressed", "background-color"),
            Some("#4e555b")
        );
        assert_ne!(primary, secondary);
    }

    #[test]
    fn dark_primary_button_drops_light_primary() {
        let text = button(&DARK, ButtonVariant::Primary).to_string();
        assert!(text.contains("#0d6efd"));
        assert!(!text.contains("#007bff"));
    }

    #[test]
    fn input_uses_component_background() {
        assert!(input(&DARK).to_string().contains("#2c3034"));
        assert_eq!(
            input(&LIGHT).value("input:focus", "border-color"),
            Some("#80bdff")
        );
    }

    #[test]
    fn data_grid_falls_back_when_group_missing() {
        let bare = Theme {
            data_grid: None,
            ..DARK.clone()
        };
        let sheet = data_grid(&bare);
        assert_eq!(
            sheet.value("table", "alternate-background-color"),
            Some(DATA_GRID_ALTERNATE_FALLBACK)
        );
        assert_eq!(
            sheet.value("table::header", "background-color"),
            Some(DATA_GRID_HEADER_FALLBACK)
        );
        assert_eq!(sheet.value("table", "background-color"), Some("#212529"));
    }

    #[test]
    fn card_background_follows_theme() {
        assert_eq!(card(&DARK).value("card", "background-color"), Some("#212529"));
        assert_eq!(card(&LIGHT).value("card", "background-color"), Some("#ffffff"));
    }

    #[test]
    fn headings_use_size_table_and_ignore_bad_levels() {
        let h1 = label(&LIGHT, LabelKind::Heading(1));
        assert_eq!(h1.value("label", "font-size"), Some("32px"));
        let h6 = label(&LIGHT, LabelKind::Heading(6));
        assert_eq!(h6.value("label", "font-size"), Some("16px"));
        assert_eq!(
            label(&LIGHT, LabelKind::Heading(9)),
            label(&LIGHT, LabelKind::Body)
        );
        assert_eq!(
            label(&LIGHT, LabelKind::Muted).value("label", "color"),
            Some("#6c757d")
        );
    }

    #[test]
    fn renders_css_like_text() {
        let text = StyleSheet::new()
            .rule("a", &[("color", "#000000")])
            .rule("b", &[("margin", "0")])
            .to_string();
        assert_eq!(text, "a {\n    color: #000000;\n}\n\nb {\n    margin: 0;\n}\n");
    }

    #[test]
    fn progress_track_is_translucent_accent() {
        let sheet = progress_bar("#007aff", 40);
        assert_eq!(sheet.value("progress", "background-color"), Some("#007aff20"));
        assert_eq!(sheet.value("progress::chunk", "border-radius"), Some("20px"));
    }

    #[test]
    fn progress_track_drops_bar_alpha() {
        let sheet = progress_bar("#28A745cc", 20);
        assert_eq!(sheet.value("progress", "background-color"), Some("#28a74520"));
        assert_eq!(sheet.value("progress::chunk", "background-color"), Some("#28A745cc"));
    }
}
