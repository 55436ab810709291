//! Binding between widgets and the theme engine.
//!
//! Construction is two-phase: a widget builds all of its parts first, then
//! [`Restyle::themed`] renders it from the active theme and subscribes it to
//! later switches. Composite widgets bind their children before themselves.

use std::{
    cell::{Ref, RefCell, RefMut},
    rc::Rc,
};

use shared::Subscription;
use tracing::trace;

use crate::{engine::ThemeHandle, registry::Theme, style::ComponentKind};

pub trait Restyle {
    fn component_kind(&self) -> ComponentKind;

    /// Re-derives the widget's complete style from `theme`.
    fn restyle(&mut self, theme: &Theme);

    fn themed(self, engine: &ThemeHandle) -> Themed<Self>
    where
        Self: Sized + 'static,
    {
        Themed::bind(engine, self)
    }
}

/// A widget kept in step with the engine for as long as it lives.
pub struct Themed<W> {
    widget: Rc<RefCell<W>>,
    // Snapshot that arrived while the widget was borrowed.
    pending: Rc<RefCell<Option<Theme>>>,
    engine: ThemeHandle,
    _subscription: Subscription,
}

impl<W: Restyle + 'static> Themed<W> {
    pub fn bind(engine: &ThemeHandle, mut widget: W) -> Self {
        let kind = widget.component_kind();
        widget.restyle(&engine.active_theme_data());

        let widget = Rc::new(RefCell::new(widget));
        let pending = Rc::new(RefCell::new(None::<Theme>));

        let subscription = {
            let widget = Rc::downgrade(&widget);
            let pending = Rc::downgrade(&pending);
            engine.subscribe(move |theme| {
                let (Some(widget), Some(pending)) = (widget.upgrade(), pending.upgrade()) else {
                    return;
                };
                match widget.try_borrow_mut() {
                    Ok(mut widget) => {
                        pending.borrow_mut().take();
                        widget.restyle(theme);
                    }
                    Err(_) => {
                        trace!(component = %kind, "widget busy; deferring restyle");
                        *pending.borrow_mut() = Some(theme.clone());
                    }
                };
            })
        };
        trace!(component = %kind, "themed widget bound");

        Self {
            widget,
            pending,
            engine: Rc::clone(engine),
            _subscription: subscription,
        }
    }
}

impl<W: Restyle> Themed<W> {
    pub fn borrow(&self) -> Ref<'_, W> {
        self.apply_pending();
        self.widget.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, W> {
        self.apply_pending();
        self.widget.borrow_mut()
    }

    pub fn engine(&self) -> &ThemeHandle {
        &self.engine
    }

    pub fn component_kind(&self) -> ComponentKind {
        self.borrow().component_kind()
    }

    fn apply_pending(&self) {
        let Some(theme) = self.pending.borrow_mut().take() else {
            return;
        };
        match self.widget.try_borrow_mut() {
            Ok(mut widget) => widget.restyle(&theme),
            Err(_) => *self.pending.borrow_mut() = Some(theme),
        }
    }
}

impl<W: Restyle + std::fmt::Debug> std::fmt::Debug for Themed<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Themed")
            .field("widget", &self.widget)
            .field("pending", &self.pending.borrow().is_some())
            .finish()
    }
}
