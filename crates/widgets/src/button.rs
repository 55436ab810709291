use egui::{vec2, Align2, Color32, CornerRadius, CursorIcon, FontId, Response, RichText, Stroke, Ui};
use theme::{style, ButtonVariant, ComponentKind, Restyle, StyleSheet, Theme};

use crate::paint::{sheet_color_or, sheet_px};

pub const MIN_SIZE: [f32; 2] = [100.0, 40.0];

#[derive(Debug, Clone)]
pub struct Button {
    text: String,
    variant: ButtonVariant,
    enabled: bool,
    theme: Theme,
    style: StyleSheet,
}

impl Button {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            variant: ButtonVariant::Primary,
            enabled: true,
            theme: Theme::default(),
            style: StyleSheet::new(),
        }
    }

    pub fn secondary(text: impl Into<String>) -> Self {
        Self {
            variant: ButtonVariant::Secondary,
            ..Self::new(text)
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn variant(&self) -> ButtonVariant {
        self.variant
    }

    pub fn set_primary(&mut self) {
        self.variant = ButtonVariant::Primary;
        self.render();
    }

    pub fn set_secondary(&mut self) {
        self.variant = ButtonVariant::Secondary;
        self.render();
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn style(&self) -> &StyleSheet {
        &self.style
    }

    fn render(&mut self) {
        self.style = style::button(&self.theme, self.variant);
    }

    pub fn show(&self, ui: &mut Ui) -> Response {
        let selector = if self.enabled { "button" } else { "button:disabled" };
        let fill = sheet_color_or(&self.style, selector, "background-color", Color32::GRAY);
        let text_color = sheet_color_or(&self.style, selector, "color", Color32::WHITE);
        let font_size = sheet_px(&self.style, "button", "font-size").unwrap_or(14.0);

        let button = egui::Button::new(RichText::new(&self.text).color(text_color).size(font_size))
            .fill(fill)
            .stroke(Stroke::NONE)
            .corner_radius(CornerRadius::same(4))
            .min_size(vec2(MIN_SIZE[0], MIN_SIZE[1]));
        let response = ui.add_enabled(self.enabled, button);

        if self.enabled && (response.hovered() || response.is_pointer_button_down_on()) {
            let state = if response.is_pointer_button_down_on() {
                "button:pressed"
            } else {
                "button:hover"
            };
            let overlay = sheet_color_or(&self.style, state, "background-color", fill);
            ui.painter()
                .rect_filled(response.rect, CornerRadius::same(4), overlay);
            ui.painter().text(
                response.rect.center(),
                Align2::CENTER_CENTER,
                &self.text,
                FontId::proportional(font_size),
                text_color,
            );
        }

        response.on_hover_cursor(CursorIcon::PointingHand)
    }
}

impl Restyle for Button {
    fn component_kind(&self) -> ComponentKind {
        ComponentKind::Button
    }

    fn restyle(&mut self, theme: &Theme) {
        self.theme = theme.clone();
        self.render();
    }
}
