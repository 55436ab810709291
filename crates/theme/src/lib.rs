//! Theme registry, engine and themed-widget binding.

pub mod engine;
pub mod error;
pub mod registry;
pub mod style;
pub mod themed;

pub use engine::{ThemeEngine, ThemeHandle};
pub use error::ThemeError;
pub use registry::{Theme, ThemeName, DARK, LIGHT};
pub use style::{ButtonVariant, ComponentKind, LabelKind, StyleSheet};
pub use themed::{Restyle, Themed};
