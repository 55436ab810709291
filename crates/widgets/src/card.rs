use egui::{Color32, CornerRadius, Frame, InnerResponse, Margin, Stroke, Ui};
use theme::{style, ComponentKind, Restyle, StyleSheet, Theme};

use crate::paint::sheet_color_or;

/// Bordered container for grouping other widgets.
#[derive(Debug, Clone, Default)]
pub struct Card {
    style: StyleSheet,
}

impl Card {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn style(&self) -> &StyleSheet {
        &self.style
    }

    pub fn show<R>(&self, ui: &mut Ui, add_contents: impl FnOnce(&mut Ui) -> R) -> InnerResponse<R> {
        let fill = sheet_color_or(&self.style, "card", "background-color", Color32::WHITE);
        let border = sheet_color_or(&self.style, "card", "border", Color32::LIGHT_GRAY);
        let text = sheet_color_or(&self.style, "card", "color", Color32::BLACK);

        Frame::new()
            .fill(fill)
            .stroke(Stroke::new(1.0, border))
            .corner_radius(CornerRadius::same(6))
            .inner_margin(Margin::same(16))
            .show(ui, |ui| {
                ui.spacing_mut().item_spacing.y = 12.0;
                ui.visuals_mut().override_text_color = Some(text);
                add_contents(ui)
            })
    }
}

impl Restyle for Card {
    fn component_kind(&self) -> ComponentKind {
        ComponentKind::Card
    }

    fn restyle(&mut self, theme: &Theme) {
        self.style = style::card(theme);
    }
}
