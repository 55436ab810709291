//! UI layer: app shell, login screen and main window.

pub mod app;
pub mod login;

pub use app::{DesktopApp, Services};
