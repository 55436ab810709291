//! Progress bars. These carry their own accent color instead of following
//! the theme.

use egui::{vec2, Align2, Color32, CornerRadius, FontId, Rect, Response, Sense, Ui};
use theme::{style, StyleSheet};
use tracing::{debug, error};

use crate::{
    error::WidgetError,
    paint::{hex_color, sheet_color_or},
};

pub const DEFAULT_COLOR: &str = "#007AFF";
pub const DEFAULT_HEIGHT: u32 = 40;

#[derive(Debug, Clone)]
pub struct ProgressBar {
    value: f32,
    color: String,
    height: u32,
    show_percentage: bool,
    show_text: bool,
    custom_text: String,
    style: StyleSheet,
}

impl Default for ProgressBar {
    fn default() -> Self {
        Self::new(true, false)
    }
}

impl ProgressBar {
    pub fn new(show_percentage: bool, show_text: bool) -> Self {
        Self {
            value: 0.0,
            color: DEFAULT_COLOR.to_string(),
            height: DEFAULT_HEIGHT,
            show_percentage,
            show_text,
            custom_text: String::new(),
            style: style::progress_bar(DEFAULT_COLOR, DEFAULT_HEIGHT),
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    /// Values outside 0..=100 are rejected and leave the bar unchanged.
    /// Returns whether the value changed.
    pub fn set_value(&mut self, value: f32) -> Result<bool, WidgetError> {
        if !(0.0..=100.0).contains(&value) {
            error!(value, "progress value out of range");
            return Err(WidgetError::ProgressOutOfRange(value));
        }
        if value == self.value {
            return Ok(false);
        }
        debug!(value, "setting progress value");
        self.value = value;
        Ok(true)
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.custom_text = text.into();
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn set_color(&mut self, color: &str) -> Result<(), WidgetError> {
        if hex_color(color).is_none() {
            return Err(WidgetError::InvalidColor(color.to_string()));
        }
        self.color = color.to_string();
        self.render();
        Ok(())
    }

    pub fn bar_height(&self) -> u32 {
        self.height
    }

    pub fn set_bar_height(&mut self, height: u32) {
        self.height = height;
        self.render();
    }

    pub fn style(&self) -> &StyleSheet {
        &self.style
    }

    fn render(&mut self) {
        self.style = style::progress_bar(&self.color, self.height);
    }

    /// Text drawn over the bar, if any.
    pub fn format(&self) -> Option<String> {
        if self.show_text && !self.custom_text.is_empty() {
            Some(format!("{} ({}%)", self.custom_text, self.value))
        } else if self.show_percentage {
            Some(format!("{}%", self.value))
        } else {
            None
        }
    }

    pub fn show(&self, ui: &mut Ui) -> Response {
        let height = self.height as f32;
        let (rect, response) =
            ui.allocate_exact_size(vec2(ui.available_width(), height), Sense::hover());
        if !ui.is_rect_visible(rect) {
            return response;
        }

        let radius = CornerRadius::same(u8::try_from(self.height / 2).unwrap_or(u8::MAX));
        let track = sheet_color_or(&self.style, "progress", "background-color", Color32::LIGHT_GRAY);
        let chunk = sheet_color_or(&self.style, "progress::chunk", "background-color", Color32::BLUE);
        let painter = ui.painter();
        painter.rect_filled(rect, radius, track);

        let filled = Rect::from_min_size(rect.min, vec2(rect.width() * self.value / 100.0, height));
        if filled.width() > 0.0 {
            painter.rect_filled(filled, radius, chunk);
        }
        if let Some(text) = self.format() {
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                text,
                FontId::proportional(14.0),
                ui.visuals().strong_text_color(),
            );
        }
        response
    }
}

/// Progress bar with an optional caption above it.
#[derive(Debug, Clone, Default)]
pub struct ProgressBarWithLabel {
    label: Option<String>,
    pub bar: ProgressBar,
}

impl ProgressBarWithLabel {
    pub fn new(label: impl Into<String>, show_percentage: bool, show_text: bool) -> Self {
        let label = label.into();
        Self {
            label: (!label.is_empty()).then_some(label),
            bar: ProgressBar::new(show_percentage, show_text),
        }
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn show(&self, ui: &mut Ui) -> Response {
        ui.vertical(|ui| {
            ui.spacing_mut().item_spacing.y = 4.0;
            if let Some(label) = &self.label {
                ui.label(label);
            }
            self.bar.show(ui)
        })
        .inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_values_outside_percent_range() {
        let mut bar = ProgressBar::default();
        bar.set_value(40.0).expect("in range");

        assert_eq!(
            bar.set_value(100.5),
            Err(WidgetError::ProgressOutOfRange(100.5))
        );
        assert!(bar.set_value(-1.0).is_err());
        assert!(bar.set_value(f32::NAN).is_err());
        assert_eq!(bar.value(), 40.0);
    }

    #[test]
    fn repeated_value_is_reported_unchanged() {
        let mut bar = ProgressBar::default();
        assert_eq!(bar.set_value(60.0), Ok(true));
        assert_eq!(bar.set_value(60.0), Ok(false));
        assert_eq!(bar.set_value(61.0), Ok(true));
    }

    #[test]
    fn formats_percentage_or_custom_text() {
        let mut plain = ProgressBar::default();
        plain.set_value(50.0).expect("value");
        assert_eq!(plain.format().as_deref(), Some("50%"));

        let mut captioned = ProgressBar::new(true, true);
        captioned.set_value(25.0).expect("value");
        assert_eq!(captioned.format().as_deref(), Some("25%"));
        captioned.set_text("Uploading");
        assert_eq!(captioned.format().as_deref(), Some("Uploading (25%)"));

        assert_eq!(ProgressBar::new(false, false).format(), None);
    }

    #[test]
    fn color_and_height_rerender_style() {
        let mut bar = ProgressBar::default();
        assert_eq!(
            bar.style().value("progress::chunk", "background-color"),
            Some(DEFAULT_COLOR)
        );

        bar.set_color("#28a745").expect("valid color");
        bar.set_bar_height(20);
        assert_eq!(bar.style().value("progress", "background-color"), Some("#28a74520"));
        assert_eq!(bar.style().value("progress", "border-radius"), Some("10px"));

        assert_eq!(
            bar.set_color("green"),
            Err(WidgetError::InvalidColor("green".to_string()))
        );
        assert_eq!(bar.color(), "#28a745");
    }

    #[test]
    fn empty_caption_is_omitted() {
        assert_eq!(ProgressBarWithLabel::new("", true, false).label(), None);
        assert_eq!(ProgressBarWithLabel::new("Sync", true, false).label(), Some("Sync"));
    }
}
