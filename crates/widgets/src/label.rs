use egui::{Color32, Response, RichText, Ui};
use theme::{style, ComponentKind, LabelKind, Restyle, StyleSheet, Theme};

use crate::paint::{sheet_color_or, sheet_px};

#[derive(Debug, Clone)]
pub struct Label {
    text: String,
    kind: LabelKind,
    theme: Theme,
    style: StyleSheet,
}

impl Label {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: LabelKind::Body,
            theme: Theme::default(),
            style: StyleSheet::new(),
        }
    }

    pub fn heading(text: impl Into<String>, level: u8) -> Self {
        let mut label = Self::new(text);
        label.set_heading(level);
        label
    }

    pub fn muted(text: impl Into<String>) -> Self {
        Self {
            kind: LabelKind::Muted,
            ..Self::new(text)
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn kind(&self) -> LabelKind {
        self.kind
    }

    /// Levels outside 1..=6 are ignored.
    pub fn set_heading(&mut self, level: u8) {
        if style::heading_size(level).is_some() {
            self.set_kind(LabelKind::Heading(level));
        }
    }

    pub fn set_muted(&mut self) {
        self.set_kind(LabelKind::Muted);
    }

    fn set_kind(&mut self, kind: LabelKind) {
        self.kind = kind;
        self.style = style::label(&self.theme, kind);
    }

    pub fn style(&self) -> &StyleSheet {
        &self.style
    }

    pub fn show(&self, ui: &mut Ui) -> Response {
        let color = sheet_color_or(&self.style, "label", "color", Color32::BLACK);
        let size = sheet_px(&self.style, "label", "font-size").unwrap_or(14.0);
        let mut text = RichText::new(&self.text).color(color).size(size);
        if matches!(self.kind, LabelKind::Heading(_)) {
            text = text.strong();
        }
        ui.label(text)
    }
}

impl Restyle for Label {
    fn component_kind(&self) -> ComponentKind {
        ComponentKind::Label
    }

    fn restyle(&mut self, theme: &Theme) {
        self.theme = theme.clone();
        self.style = style::label(theme, self.kind);
    }
}
