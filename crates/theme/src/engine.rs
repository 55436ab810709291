//! Active theme state and change fan-out.
//!
//! The application root builds one [`ThemeEngine`] and hands clones of the
//! [`ThemeHandle`] to every widget constructor. All access happens on the UI
//! thread.

use std::{cell::RefCell, rc::Rc};

use shared::{Signal, Subscription};
use tracing::{debug, info, trace};

use crate::{
    error::ThemeError,
    registry::{Theme, ThemeName},
    style::{self, ComponentKind, StyleSheet},
};

pub type ThemeHandle = Rc<ThemeEngine>;

struct ActiveTheme {
    name: ThemeName,
    data: Theme,
}

pub struct ThemeEngine {
    active: Rc<RefCell<ActiveTheme>>,
    changed: Signal<Theme>,
}

impl ThemeEngine {
    pub fn new() -> Self {
        Self::with_theme(ThemeName::default())
    }

    pub fn with_theme(name: ThemeName) -> Self {
        Self {
            active: Rc::new(RefCell::new(ActiveTheme {
                name,
                data: Theme::builtin(name).clone(),
            })),
            changed: Signal::new(),
        }
    }

    pub fn shared() -> ThemeHandle {
        Rc::new(Self::new())
    }

    pub fn active_theme_name(&self) -> ThemeName {
        self.active.borrow().name
    }

    /// Owned copy of the active palette.
    pub fn active_theme_data(&self) -> Theme {
        self.active.borrow().data.clone()
    }

    /// Switches to `name` and notifies subscribers before returning.
    ///
    /// Unknown names fail without touching state. Switching to the active
    /// theme does nothing and notifies nobody.
    pub fn switch_theme(&self, name: &str) -> Result<(), ThemeError> {
        let name = name.parse::<ThemeName>()?;
        self.switch_to(name);
        Ok(())
    }

    pub fn switch_to(&self, name: ThemeName) {
        let snapshot = {
            let mut active = self.active.borrow_mut();
            if active.name == name {
                debug!(theme = %name, "theme already active");
                return;
            }
            active.name = name;
            active.data = Theme::builtin(name).clone();
            active.data.clone()
        };

        info!(
            theme = %name,
            subscribers = self.changed.len(),
            "switching theme"
        );
        self.changed.emit(&snapshot);
    }

    /// Top-level color, or `""` when the key is unknown.
    pub fn color(&self, key: &str) -> &'static str {
        self.active.borrow().data.color(key).unwrap_or_default()
    }

    /// Text color by sub-key, or `""` when the key is unknown.
    pub fn text_color(&self, key: &str) -> &'static str {
        self.active.borrow().data.text_color(key).unwrap_or_default()
    }

    pub fn component_style(&self, kind: ComponentKind) -> StyleSheet {
        style::component(&self.active.borrow().data, kind)
    }

    /// Registers `callback` for every later switch; dropping the returned
    /// subscription unregisters it.
    ///
    /// A subscriber that switches again during fan-out supersedes the running
    /// emission: the remaining callbacks skip the old snapshot, having already
    /// received the new one.
    pub fn subscribe(&self, callback: impl Fn(&Theme) + 'static) -> Subscription {
        let active = Rc::downgrade(&self.active);
        self.changed.connect(move |theme: &Theme| {
            let current = active
                .upgrade()
                .is_some_and(|active| active.borrow().name == theme.name);
            if current {
                callback(theme);
            } else {
                trace!(theme = %theme.name, "skipping superseded theme snapshot");
            }
        })
    }

    pub fn subscriber_count(&self) -> usize {
        self.changed.len()
    }
}

impl Default for ThemeEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ThemeEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeEngine")
            .field("active", &self.active_theme_name())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/engine_tests.rs"]
mod tests;
