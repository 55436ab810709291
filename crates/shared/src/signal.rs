//! Single-threaded publish/subscribe channel.
//!
//! Slots run synchronously inside [`Signal::emit`], in the order they were
//! connected. Every [`Subscription`] disconnects its slot when dropped.

use std::{
    cell::{Cell, RefCell},
    rc::{Rc, Weak},
};

type Slot<T> = Rc<dyn Fn(&T)>;

struct SignalInner<T> {
    next_id: Cell<u64>,
    slots: RefCell<Vec<(u64, Slot<T>)>>,
}

trait Disconnect {
    fn disconnect(&self, id: u64);
}

impl<T> Disconnect for SignalInner<T> {
    fn disconnect(&self, id: u64) {
        self.slots.borrow_mut().retain(|(slot_id, _)| *slot_id != id);
    }
}

pub struct Signal<T> {
    inner: Rc<SignalInner<T>>,
}

impl<T: 'static> Signal<T> {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(SignalInner {
                next_id: Cell::new(0),
                slots: RefCell::new(Vec::new()),
            }),
        }
    }

    pub fn connect(&self, slot: impl Fn(&T) + 'static) -> Subscription {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);
        self.inner.slots.borrow_mut().push((id, Rc::new(slot)));

        let inner: Rc<dyn Disconnect> = self.inner.clone();
        Subscription {
            id,
            signal: Rc::downgrade(&inner),
        }
    }

    /// Delivers `value` to every slot connected when the call starts.
    ///
    /// Slots may connect, disconnect or emit again while running; such
    /// changes apply from the next emission on.
    pub fn emit(&self, value: &T) {
        let slots: Vec<Slot<T>> = self
            .inner
            .slots
            .borrow()
            .iter()
            .map(|(_, slot)| Rc::clone(slot))
            .collect();
        for slot in slots {
            slot(value);
        }
    }

    pub fn len(&self) -> usize {
        self.inner.slots.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: 'static> Default for Signal<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[must_use = "dropping a Subscription disconnects its slot"]
pub struct Subscription {
    id: u64,
    signal: Weak<dyn Disconnect>,
}

impl Subscription {
    /// False once the signal itself is gone.
    pub fn is_connected(&self) -> bool {
        self.signal.strong_count() > 0
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(signal) = self.signal.upgrade() {
            signal.disconnect(self.id);
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("connected", &self.is_connected())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delivers_in_connection_order() {
        let signal = Signal::<u32>::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let first = {
            let seen = Rc::clone(&seen);
            signal.connect(move |v| seen.borrow_mut().push(("first", *v)))
        };
        let second = {
            let seen = Rc::clone(&seen);
            signal.connect(move |v| seen.borrow_mut().push(("second", *v)))
        };

        signal.emit(&7);
        assert_eq!(*seen.borrow(), vec![("first", 7), ("second", 7)]);
        drop((first, second));
    }

    #[test]
    fn dropping_subscription_disconnects() {
        let signal = Signal::<()>::new();
        let hits = Rc::new(Cell::new(0));
        let sub = {
            let hits = Rc::clone(&hits);
            signal.connect(move |_| hits.set(hits.get() + 1))
        };
        assert_eq!(signal.len(), 1);

        signal.emit(&());
        drop(sub);
        signal.emit(&());

        assert_eq!(hits.get(), 1);
        assert!(signal.is_empty());
    }

    #[test]
    fn subscription_outliving_signal_is_harmless() {
        let signal = Signal::<()>::new();
        let sub = signal.connect(|_| {});
        assert!(sub.is_connected());
        drop(signal);
        assert!(!sub.is_connected());
        drop(sub);
    }

    #[test]
    fn slot_connected_during_emit_waits_for_next_emit() {
        let signal = Rc::new(Signal::<()>::new());
        let late_hits = Rc::new(Cell::new(0));
        let held = Rc::new(RefCell::new(Vec::new()));

        let _outer = {
            let signal_ref = Rc::downgrade(&signal);
            let late_hits = Rc::clone(&late_hits);
            let held = Rc::clone(&held);
            signal.connect(move |_| {
                if let Some(signal) = signal_ref.upgrade() {
                    let late_hits = Rc::clone(&late_hits);
                    held.borrow_mut()
                        .push(signal.connect(move |_| late_hits.set(late_hits.get() + 1)));
                }
            })
        };

        signal.emit(&());
        assert_eq!(late_hits.get(), 0);
        signal.emit(&());
        assert_eq!(late_hits.get(), 1);
    }
}
