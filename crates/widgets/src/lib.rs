//! egui widgets that follow the active theme.
//!
//! Every widget renders its [`theme::StyleSheet`] from the theme it was last
//! given and paints from that sheet. Bind a widget with
//! [`theme::Restyle::themed`] to keep it current:
//!
//! ```ignore
//! let save = Button::new("Save").themed(&engine);
//! if save.borrow().show(ui).clicked() { /* ... */ }
//! ```

pub mod button;
pub mod card;
pub mod checkbox;
pub mod data_grid;
pub mod error;
pub mod file_browser;
pub mod form_builder;
pub mod input;
pub mod label;
pub mod notification;
pub mod paint;
pub mod progress;
pub mod spinner;

pub use button::Button;
pub use card::Card;
pub use checkbox::Checkbox;
pub use data_grid::{Align, Column, DataGrid, FilterBar, GridEvent, SortOrder};
pub use error::{FormError, WidgetError};
pub use file_browser::{FileBrowserDialog, FileDialogOutcome};
pub use form_builder::{FieldKind, FieldSchema, FormBuilder, FormSchema};
pub use input::{Input, InputResponse};
pub use label::Label;
pub use notification::{Notification, NotificationCenter, NotificationKind};
pub use paint::{apply_theme, visuals_for_theme};
pub use progress::{ProgressBar, ProgressBarWithLabel};
pub use spinner::LoadingSpinner;

#[cfg(test)]
#[path = "tests/widget_tests.rs"]
mod widget_tests;
