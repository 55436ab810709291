use egui::{
    pos2, vec2, Color32, CornerRadius, Label as EguiLabel, Response, RichText, Sense, Stroke,
    StrokeKind, Ui,
};
use theme::{style, ComponentKind, Restyle, StyleSheet, Theme};

use crate::paint::{sheet_color_or, sheet_px};

#[derive(Debug, Clone)]
pub struct Checkbox {
    text: String,
    checked: bool,
    enabled: bool,
    style: StyleSheet,
}

impl Checkbox {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            checked: false,
            enabled: true,
            style: StyleSheet::new(),
        }
    }

    pub fn is_checked(&self) -> bool {
        self.checked
    }

    pub fn set_checked(&mut self, checked: bool) {
        self.checked = checked;
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn style(&self) -> &StyleSheet {
        &self.style
    }

    /// `changed()` on the response reports a toggle.
    pub fn show(&mut self, ui: &mut Ui) -> Response {
        let sheet = &self.style;
        let indicator_state = match (self.enabled, self.checked) {
            (false, _) => "checkbox::indicator:disabled",
            (true, true) => "checkbox::indicator:checked",
            (true, false) => "checkbox::indicator",
        };
        let fill = sheet_color_or(sheet, indicator_state, "background-color", Color32::WHITE);
        let border = sheet
            .value(indicator_state, "border-color")
            .and_then(crate::paint::hex_color)
            .unwrap_or_else(|| sheet_color_or(sheet, "checkbox::indicator", "border", Color32::GRAY));
        let text_color = sheet_color_or(sheet, "checkbox", "color", Color32::BLACK);
        let side = sheet_px(sheet, "checkbox::indicator", "width").unwrap_or(16.0);
        let spacing = sheet_px(sheet, "checkbox", "spacing").unwrap_or(8.0);

        let sense = if self.enabled { Sense::click() } else { Sense::hover() };
        let mut response = ui
            .horizontal(|ui| {
                ui.spacing_mut().item_spacing.x = spacing;
                let (rect, indicator) = ui.allocate_exact_size(vec2(side, side), sense);
                if ui.is_rect_visible(rect) {
                    let painter = ui.painter();
                    painter.rect_filled(rect, CornerRadius::same(3), fill);
                    painter.rect_stroke(
                        rect,
                        CornerRadius::same(3),
                        Stroke::new(1.0, border),
                        StrokeKind::Inside,
                    );
                    if self.checked {
                        let mark = Stroke::new(2.0, Color32::WHITE);
                        let a = pos2(rect.left() + side * 0.22, rect.center().y);
                        let b = pos2(rect.left() + side * 0.42, rect.bottom() - side * 0.25);
                        let c = pos2(rect.right() - side * 0.2, rect.top() + side * 0.25);
                        painter.line_segment([a, b], mark);
                        painter.line_segment([b, c], mark);
                    }
                }
                let label = ui.add(
                    EguiLabel::new(RichText::new(&self.text).color(text_color)).sense(sense),
                );
                indicator.union(label)
            })
            .inner;

        if self.enabled && response.clicked() {
            self.checked = !self.checked;
            response.mark_changed();
        }
        response
    }
}

impl Restyle for Checkbox {
    fn component_kind(&self) -> ComponentKind {
        ComponentKind::Checkbox
    }

    fn restyle(&mut self, theme: &Theme) {
        self.style = style::checkbox(theme);
    }
}
