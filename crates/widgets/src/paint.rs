//! Conversions from stylesheet values to egui paint primitives.

use egui::{Color32, CornerRadius, Stroke, Visuals};
use theme::{StyleSheet, Theme, ThemeName};

/// Parses `#rrggbb` or `#rrggbbaa`.
pub fn hex_color(value: &str) -> Option<Color32> {
    let hex = value.trim().strip_prefix('#')?;
    if !matches!(hex.len(), 6 | 8) || !hex.is_ascii() {
        return None;
    }
    let channel = |at: usize| u8::from_str_radix(&hex[at..at + 2], 16).ok();
    let (r, g, b) = (channel(0)?, channel(2)?, channel(4)?);
    let a = if hex.len() == 8 { channel(6)? } else { u8::MAX };
    Some(Color32::from_rgba_unmultiplied(r, g, b, a))
}

/// Color declared for `property` under `selector`. Border shorthands such as
/// `1px solid #ced4da` resolve to their color part.
pub fn sheet_color(sheet: &StyleSheet, selector: &str, property: &str) -> Option<Color32> {
    let value = sheet.value(selector, property)?;
    value.split_whitespace().rev().find_map(hex_color)
}

pub fn sheet_color_or(
    sheet: &StyleSheet,
    selector: &str,
    property: &str,
    fallback: Color32,
) -> Color32 {
    sheet_color(sheet, selector, property).unwrap_or(fallback)
}

/// Pixel size such as `14px`.
pub fn sheet_px(sheet: &StyleSheet, selector: &str, property: &str) -> Option<f32> {
    sheet
        .value(selector, property)?
        .split_whitespace()
        .next()?
        .strip_suffix("px")?
        .parse()
        .ok()
}

fn color(value: &str, fallback: Color32) -> Color32 {
    hex_color(value).unwrap_or(fallback)
}

/// Base egui visuals for panels, menus and windows under `theme`.
pub fn visuals_for_theme(theme: &Theme) -> Visuals {
    let mut visuals = match theme.name {
        ThemeName::Light => Visuals::light(),
        ThemeName::Dark => Visuals::dark(),
    };

    let primary = color(theme.primary, visuals.selection.bg_fill);
    let surface = color(theme.surface, visuals.faint_bg_color);
    let border = Stroke::new(1.0, color(theme.border, visuals.window_stroke.color));

    visuals.override_text_color = hex_color(theme.text.primary);
    visuals.panel_fill = color(theme.background, visuals.panel_fill);
    visuals.window_fill = surface;
    visuals.faint_bg_color = surface;
    visuals.extreme_bg_color = color(theme.input.background, visuals.extreme_bg_color);
    visuals.window_stroke = border;
    visuals.hyperlink_color = primary;
    visuals.selection.bg_fill = primary;
    visuals.window_corner_radius = CornerRadius::same(6);
    visuals.menu_corner_radius = CornerRadius::same(4);

    visuals.widgets.noninteractive.bg_fill = surface;
    visuals.widgets.noninteractive.bg_stroke = border;
    visuals.widgets.inactive.weak_bg_fill = surface;
    visuals.widgets.inactive.bg_stroke = border;
    visuals.widgets.hovered.bg_fill = primary.gamma_multiply(0.85);
    visuals.widgets.active.bg_fill = primary;

    visuals
}

pub fn apply_theme(ctx: &egui::Context, theme: &Theme) {
    ctx.set_visuals(visuals_for_theme(theme));
}
