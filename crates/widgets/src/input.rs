use egui::{vec2, Color32, CornerRadius, Key, Margin, Response, RichText, Stroke, Ui};
use theme::{style, ComponentKind, Restyle, StyleSheet, Theme};

use crate::paint::sheet_color_or;

pub const MIN_HEIGHT: f32 = 40.0;

/// Single-line text field.
#[derive(Debug, Clone)]
pub struct Input {
    text: String,
    placeholder: String,
    password: bool,
    enabled: bool,
    style: StyleSheet,
}

pub struct InputResponse {
    pub response: Response,
    /// Enter was pressed while the field had focus.
    pub submitted: bool,
}

impl Input {
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            text: String::new(),
            placeholder: placeholder.into(),
            password: false,
            enabled: true,
            style: StyleSheet::new(),
        }
    }

    pub fn password(placeholder: impl Into<String>) -> Self {
        Self {
            password: true,
            ..Self::new(placeholder)
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn set_placeholder(&mut self, placeholder: impl Into<String>) {
        self.placeholder = placeholder.into();
    }

    pub fn is_password(&self) -> bool {
        self.password
    }

    pub fn set_password(&mut self, password: bool) {
        self.password = password;
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn style(&self) -> &StyleSheet {
        &self.style
    }

    pub fn show(&mut self, ui: &mut Ui) -> InputResponse {
        let sheet = &self.style;
        let state = if self.enabled { "input" } else { "input:disabled" };
        let background = sheet_color_or(sheet, state, "background-color", Color32::WHITE);
        let text_color = sheet_color_or(sheet, state, "color", Color32::BLACK);
        let border = sheet_color_or(sheet, "input", "border", Color32::GRAY);
        let focus = sheet_color_or(sheet, "input:focus", "border-color", border);
        let placeholder = sheet_color_or(sheet, "input::placeholder", "color", Color32::GRAY);

        let response = ui
            .scope(|ui| {
                let visuals = ui.visuals_mut();
                visuals.widgets.inactive.bg_stroke = Stroke::new(1.0, border);
                visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, focus);
                visuals.selection.stroke = Stroke::new(1.0, focus);
                visuals.widgets.inactive.corner_radius = CornerRadius::same(4);
                visuals.widgets.hovered.corner_radius = CornerRadius::same(4);
                visuals.widgets.active.corner_radius = CornerRadius::same(4);

                let edit = egui::TextEdit::singleline(&mut self.text)
                    .hint_text(RichText::new(&self.placeholder).color(placeholder))
                    .password(self.password)
                    .text_color(text_color)
                    .background_color(background)
                    .margin(Margin::symmetric(12, 8))
                    .min_size(vec2(0.0, MIN_HEIGHT))
                    .desired_width(f32::INFINITY);
                ui.add_enabled(self.enabled, edit)
            })
            .inner;

        let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter));
        InputResponse {
            response,
            submitted,
        }
    }
}

impl Restyle for Input {
    fn component_kind(&self) -> ComponentKind {
        ComponentKind::Input
    }

    fn restyle(&mut self, theme: &Theme) {
        self.style = style::input(theme);
    }
}
