use std::time::Duration;

use egui::{vec2, Color32, Response, Sense, Stroke, Ui};

pub const LINES: usize = 8;
pub const STEP_DEGREES: u16 = 45;
pub const STEP_INTERVAL: Duration = Duration::from_millis(100);
const SIZE: f32 = 40.0;
const INNER_RADIUS: f32 = 10.0;
const LINE_LENGTH: f32 = 10.0;
const LINE_WIDTH: f32 = 3.0;

/// Busy indicator; hidden while stopped.
#[derive(Debug, Clone)]
pub struct LoadingSpinner {
    color: Color32,
    angle: u16,
    running: bool,
    // Time of the last rotation step, in egui input seconds.
    last_step: Option<f64>,
}

impl Default for LoadingSpinner {
    fn default() -> Self {
        Self {
            color: Color32::from_rgb(0x00, 0x7a, 0xff),
            angle: 0,
            running: false,
            last_step: None,
        }
    }
}

impl LoadingSpinner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_color(color: Color32) -> Self {
        Self {
            color,
            ..Self::default()
        }
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
        self.last_step = None;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn angle(&self) -> u16 {
        self.angle
    }

    /// Rotates by one step per elapsed interval since the last step.
    pub fn advance(&mut self, now: f64) {
        if !self.running {
            return;
        }
        let Some(last) = self.last_step else {
            self.last_step = Some(now);
            return;
        };

        // Whole milliseconds, so exact interval boundaries count as a step.
        let elapsed_ms = ((now - last).max(0.0) * 1000.0).round() as u64;
        let interval_ms = STEP_INTERVAL.as_millis() as u64;
        let steps = elapsed_ms / interval_ms;
        if steps == 0 {
            return;
        }
        let turns = (steps % LINES as u64) as u16;
        self.angle = (self.angle + turns * STEP_DEGREES) % 360;
        self.last_step = Some(last + (steps * interval_ms) as f64 / 1000.0);
    }

    /// Alpha of line `index`; later lines are more opaque.
    pub fn line_alpha(index: usize) -> u8 {
        let step = 255 / LINES;
        u8::try_from((index + 1) * step).unwrap_or(u8::MAX)
    }

    pub fn show(&mut self, ui: &mut Ui) -> Response {
        if !self.running {
            return ui.allocate_response(vec2(0.0, 0.0), Sense::hover());
        }

        self.advance(ui.input(|i| i.time));
        let (rect, response) = ui.allocate_exact_size(vec2(SIZE, SIZE), Sense::hover());
        if ui.is_rect_visible(rect) {
            let painter = ui.painter();
            let center = rect.center();
            for index in 0..LINES {
                let degrees = f32::from(self.angle) + (360.0 / LINES as f32) * index as f32;
                let direction = egui::Vec2::angled(degrees.to_radians());
                let color = Color32::from_rgba_unmultiplied(
                    self.color.r(),
                    self.color.g(),
                    self.color.b(),
                    Self::line_alpha(index),
                );
                painter.line_segment(
                    [
                        center + direction * INNER_RADIUS,
                        center + direction * (INNER_RADIUS + LINE_LENGTH),
                    ],
                    Stroke::new(LINE_WIDTH, color),
                );
            }
        }
        ui.ctx().request_repaint_after(STEP_INTERVAL);
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotates_in_steps_only_while_running() {
        let mut spinner = LoadingSpinner::new();
        spinner.advance(0.0);
        spinner.advance(1.0);
        assert_eq!(spinner.angle(), 0);

        spinner.start();
        spinner.advance(10.0);
        spinner.advance(10.05);
        assert_eq!(spinner.angle(), 0);
        spinner.advance(10.1);
        assert_eq!(spinner.angle(), 45);
        spinner.advance(10.35);
        assert_eq!(spinner.angle(), 135);

        spinner.stop();
        spinner.advance(20.0);
        assert_eq!(spinner.angle(), 135);
        assert!(!spinner.is_running());
    }

    #[test]
    fn steps_on_every_interval_boundary() {
        let mut spinner = LoadingSpinner::new();
        spinner.start();
        for tick in 0..=3 {
            spinner.advance(5.0 + f64::from(tick) * 0.1);
        }
        assert_eq!(spinner.angle(), 135);
    }

    #[test]
    fn wraps_after_full_turn() {
        let mut spinner = LoadingSpinner::new();
        spinner.start();
        spinner.advance(0.0);
        spinner.advance(0.85);
        assert_eq!(spinner.angle(), 0);
    }

    #[test]
    fn line_alpha_ramps_up() {
        assert_eq!(LoadingSpinner::line_alpha(0), 31);
        assert_eq!(LoadingSpinner::line_alpha(LINES - 1), 248);
    }
}
