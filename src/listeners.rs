//! Navigation listener registry.
//!
//! A trigger works on a snapshot of the registry taken when it starts:
//!
//! * every captured listener runs in registration order, synchronously;
//! * the first listener error stops the trigger and is returned;
//! * listeners added while a trigger runs wait for the next trigger;
//! * listeners removed while a trigger runs still run in that trigger if
//!   they were captured, and are gone from later triggers;
//! * `once` listeners that ran are removed when the trigger ends, and never
//!   run twice even when a listener causes a nested trigger.

use core::cell::{Cell, RefCell};

use crate::compat::{Rc, Vec};
use crate::error::Result;

/// A navigation callback. Identity for removal is the `Rc` allocation.
pub type Listener = Rc<dyn Fn() -> Result<()>>;

/// Wrap a closure as a [`Listener`]
pub fn listener<F>(f: F) -> Listener
where
    F: Fn() -> Result<()> + 'static,
{
    Rc::new(f)
}

struct Entry {
    callback: Listener,
    once: bool,
    spent: Cell<bool>,
}

#[derive(Default)]
pub struct ListenerRegistry {
    entries: RefCell<Vec<Rc<Entry>>>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, callback: Listener, once: bool) {
        self.entries.borrow_mut().push(Rc::new(Entry {
            callback,
            once,
            spent: Cell::new(false),
        }));
    }

    /// Remove every entry registered with `callback`; returns how many
    pub fn remove(&self, callback: &Listener) -> usize {
        let mut entries = self.entries.borrow_mut();
        let before = entries.len();
        entries.retain(|entry| !Rc::ptr_eq(&entry.callback, callback));
        before - entries.len()
    }

    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Run every registered listener against a snapshot of the registry
    pub fn trigger(&self) -> Result<()> {
        let snapshot: Vec<Rc<Entry>> = self.entries.borrow().clone();
        tracing::trace!(listeners = snapshot.len(), "triggering navigation listeners");

        let mut outcome = Ok(());
        let mut fired_once = false;
        for entry in &snapshot {
            if entry.once {
                if entry.spent.get() {
                    continue;
                }
                entry.spent.set(true);
                fired_once = true;
            }
            if let Err(err) = (entry.callback)() {
                outcome = Err(err);
                break;
            }
        }

        if fired_once {
            self.entries.borrow_mut().retain(|entry| !entry.spent.get());
        }
        outcome
    }
}

impl core::fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("listeners", &self.len())
            .finish()
    }
}
