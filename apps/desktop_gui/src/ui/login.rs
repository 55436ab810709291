use shared::domain::UserId;
use theme::{Restyle, ThemeHandle, Themed};
use widgets::{Button, Card, Input, Label};

use crate::controller::events::UiEvent;

pub const EMPTY_CREDENTIALS: &str = "Please enter both username and password";
const CARD_WIDTH: f32 = 360.0;

/// Maps credentials to the id the auth manager logs in. Both fields are
/// trimmed and must be non-empty.
pub fn user_id_for(username: &str, password: &str) -> Result<UserId, &'static str> {
    let (username, password) = (username.trim(), password.trim());
    if username.is_empty() || password.is_empty() {
        return Err(EMPTY_CREDENTIALS);
    }
    Ok(UserId(format!("user_{username}")))
}

pub struct LoginScreen {
    card: Themed<Card>,
    title: Themed<Label>,
    username: Themed<Input>,
    password: Themed<Input>,
    submit: Themed<Button>,
}

impl LoginScreen {
    pub fn new(engine: &ThemeHandle, title: &str) -> Self {
        Self {
            card: Card::new().themed(engine),
            title: Label::heading(title, 2).themed(engine),
            username: Input::new("Username").themed(engine),
            password: Input::password("Password").themed(engine),
            submit: Button::new("Login").themed(engine),
        }
    }

    pub fn relabel(&self, username: &str, password: &str, submit: &str) {
        self.username.borrow_mut().set_placeholder(username);
        self.password.borrow_mut().set_placeholder(password);
        self.submit.borrow_mut().set_text(submit);
    }

    /// Clears the password after a login attempt.
    pub fn reset(&self) {
        self.password.borrow_mut().clear();
    }

    pub fn show(&self, ctx: &egui::Context) -> Option<UiEvent> {
        let mut event = None;
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space((ui.available_height() * 0.2).clamp(18.0, 120.0));
            ui.vertical_centered(|ui| {
                ui.set_width(CARD_WIDTH);
                self.card.borrow().show(ui, |ui| {
                    self.title.borrow().show(ui);
                    let user = self.username.borrow_mut().show(ui);
                    let pass = self.password.borrow_mut().show(ui);
                    let clicked = self.submit.borrow().show(ui).clicked();
                    if clicked || user.submitted || pass.submitted {
                        event = Some(UiEvent::LoginRequested {
                            username: self.username.borrow().text().to_string(),
                            password: self.password.borrow().text().to_string(),
                        });
                    }
                });
            });
        });
        event
    }
}
