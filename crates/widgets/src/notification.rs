//! Toast notifications stacked in the bottom-right corner.
//!
//! Times are egui input seconds (`ctx.input(|i| i.time)`). A toast's clock
//! starts the first frame it is drawn.

use std::time::Duration;

use egui::{pos2, vec2, Align2, Color32, CornerRadius, FontId, Id, Order, Pos2, Rect, Sense};
use tracing::debug;

pub const DEFAULT_DURATION: Duration = Duration::from_millis(3000);
pub const FADE_IN: Duration = Duration::from_millis(300);
pub const SIZE: [f32; 2] = [300.0, 80.0];
pub const OFFSET: f32 = 20.0;
pub const SPACING: f32 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NotificationKind {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl NotificationKind {
    pub fn color(self) -> Color32 {
        match self {
            NotificationKind::Info => Color32::from_rgb(23, 162, 184),
            NotificationKind::Success => Color32::from_rgb(40, 167, 69),
            NotificationKind::Warning => Color32::from_rgb(255, 193, 7),
            NotificationKind::Error => Color32::from_rgb(220, 53, 69),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub kind: NotificationKind,
    pub duration: Duration,
    created_at: Option<f64>,
}

impl Notification {
    /// 0.0 to 1.0 over the fade-in.
    pub fn opacity(&self, now: f64) -> f32 {
        let Some(created) = self.created_at else {
            return 0.0;
        };
        let elapsed = (now - created).max(0.0);
        (elapsed / FADE_IN.as_secs_f64()).min(1.0) as f32
    }

    pub fn is_expired(&self, now: f64) -> bool {
        self.created_at
            .is_some_and(|created| now - created >= self.duration.as_secs_f64())
    }
}

/// Owns the visible toasts. Create one per window.
#[derive(Debug, Default)]
pub struct NotificationCenter {
    notifications: Vec<Notification>,
    next_id: u64,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notify(&mut self, message: impl Into<String>, kind: NotificationKind) -> u64 {
        self.notify_with_duration(message, kind, DEFAULT_DURATION)
    }

    pub fn notify_with_duration(
        &mut self,
        message: impl Into<String>,
        kind: NotificationKind,
        duration: Duration,
    ) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        let message = message.into();
        debug!(id, ?kind, %message, "showing notification");
        self.notifications.push(Notification {
            id,
            message,
            kind,
            duration,
            created_at: None,
        });
        id
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn len(&self) -> usize {
        self.notifications.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty()
    }

    /// Starts clocks of new toasts and drops expired ones.
    pub fn prune(&mut self, now: f64) {
        for notification in &mut self.notifications {
            notification.created_at.get_or_insert(now);
        }
        self.notifications.retain(|n| !n.is_expired(now));
    }

    /// Top-left corner of toast `index`, stacked upward from the
    /// bottom-right of `bounds`.
    pub fn position(index: usize, bounds: Rect) -> Pos2 {
        let x = bounds.right() - SIZE[0] - OFFSET;
        let y = bounds.bottom() - SIZE[1] - OFFSET - index as f32 * (SIZE[1] + SPACING);
        pos2(x, y)
    }

    /// Draws the toasts over `bounds`, usually the window content rect.
    pub fn show(&mut self, ctx: &egui::Context, bounds: Rect) {
        let now = ctx.input(|i| i.time);
        self.prune(now);
        if self.notifications.is_empty() {
            return;
        }

        let mut dismissed = None;
        for (index, notification) in self.notifications.iter().enumerate() {
            let opacity = notification.opacity(now);
            let fill = notification.kind.color().gamma_multiply(opacity);
            let text = Color32::WHITE.gamma_multiply(opacity);

            egui::Area::new(Id::new(("notification", notification.id)))
                .order(Order::Foreground)
                .fixed_pos(Self::position(index, bounds))
                .interactable(true)
                .show(ctx, |ui| {
                    let (rect, response) = ui.allocate_exact_size(vec2(SIZE[0], SIZE[1]), Sense::click());
                    ui.painter().rect_filled(rect, CornerRadius::same(10), fill);
                    ui.painter().text(
                        rect.center(),
                        Align2::CENTER_CENTER,
                        &notification.message,
                        FontId::proportional(14.0),
                        text,
                    );
                    if response.clicked() {
                        dismissed = Some(notification.id);
                    }
                });
        }

        if let Some(id) = dismissed {
            self.notifications.retain(|n| n.id != id);
        }
        ctx.request_repaint_after(Duration::from_millis(16));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_have_fixed_colors() {
        assert_eq!(NotificationKind::Info.color(), Color32::from_rgb(23, 162, 184));
        assert_eq!(NotificationKind::Error.color(), Color32::from_rgb(220, 53, 69));
        assert_eq!(NotificationKind::default(), NotificationKind::Info);
    }

    #[test]
    fn toasts_fade_in_and_expire() {
        let mut center = NotificationCenter::new();
        center.notify("saved", NotificationKind::Success);
        center.notify_with_duration("quick", NotificationKind::Info, Duration::from_millis(500));
        assert_eq!(center.notifications()[0].opacity(1.0), 0.0);

        center.prune(10.0);
        let first = &center.notifications()[0];
        assert_eq!(first.duration, DEFAULT_DURATION);
        assert_eq!(first.opacity(10.0), 0.0);
        assert!((first.opacity(10.15) - 0.5).abs() < 1e-4);
        assert_eq!(first.opacity(11.0), 1.0);

        center.prune(10.6);
        assert_eq!(center.len(), 1);
        assert_eq!(center.notifications()[0].message, "saved");

        center.prune(13.0);
        assert!(center.is_empty());
    }

    #[test]
    fn stacks_upward_from_bottom_right() {
        let bounds = Rect::from_min_size(Pos2::ZERO, vec2(800.0, 600.0));
        assert_eq!(NotificationCenter::position(0, bounds), pos2(480.0, 500.0));
        assert_eq!(NotificationCenter::position(1, bounds), pos2(480.0, 410.0));
        assert_eq!(NotificationCenter::position(2, bounds), pos2(480.0, 320.0));
    }

    #[test]
    fn ids_are_unique() {
        let mut center = NotificationCenter::new();
        let a = center.notify("a", NotificationKind::Warning);
        let b = center.notify("b", NotificationKind::Warning);
        assert_ne!(a, b);
    }
}
