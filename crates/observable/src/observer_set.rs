use std::{
    any::Any,
    cell::RefCell,
    fmt,
    panic::{self, AssertUnwindSafe},
    rc::Rc,
};

use log::{debug, error, trace};

use crate::observer::{same_observer, ObserverRef};

/// A registry of observers with set semantics.
///
/// Membership is decided by observer identity (see [`ObserverRef`]), so
/// registering the same observer twice leaves a single entry. Cloning an
/// `ObserverSet` yields another handle onto the same registry.
pub struct ObserverSet<T: ?Sized>(Rc<RefCell<Inner<T>>>);

impl<T: ?Sized> Clone for ObserverSet<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T: ?Sized> Default for ObserverSet<T> {
    fn default() -> Self {
        Self(Rc::new(RefCell::new(Inner { items: Vec::new() })))
    }
}

impl<T: ?Sized> fmt::Debug for ObserverSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObserverSet").field("len", &self.len()).finish()
    }
}

impl<T: ?Sized> ObserverSet<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the observer was not already a member.
    pub fn insert(&self, observer: &ObserverRef<T>) -> bool {
        let inserted = self.0.borrow_mut().insert(observer);
        if inserted {
            debug!("observer registered ({} total)", self.len());
        }
        inserted
    }

    /// Returns `true` if the observer was a member.
    pub fn remove(&self, observer: &ObserverRef<T>) -> bool {
        let removed = self.0.borrow_mut().remove(observer);
        if removed {
            debug!("observer unregistered ({} left)", self.len());
        }
        removed
    }

    pub fn contains(&self, observer: &ObserverRef<T>) -> bool {
        self.0.borrow().position(observer).is_some()
    }

    pub fn len(&self) -> usize {
        self.0.borrow().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().items.is_empty()
    }

    /// Copy of the current members, in registration order.
    pub fn snapshot(&self) -> Vec<ObserverRef<T>> {
        self.0.borrow().items.clone()
    }

    /// Call `update` on every current member.
    ///
    /// The member list is copied before the first call, so observers may
    /// register or unregister (themselves or others) while being notified
    /// without affecting this round. If an observer panics the rest are still
    /// notified, then the first panic is resumed.
    pub fn notify(&self, payload: &T) {
        let working_set = self.working_set();

        // The registry borrow is released here, observers are free to mutate it
        working_set.notify(payload);
    }

    pub(crate) fn working_set(&self) -> WorkingSet<T> {
        WorkingSet(self.snapshot())
    }
}

struct Inner<T: ?Sized> {
    items: Vec<ObserverRef<T>>,
}

impl<T: ?Sized> Inner<T> {
    fn position(&self, observer: &ObserverRef<T>) -> Option<usize> {
        self.items.iter().position(|item| same_observer(item, observer))
    }

    fn insert(&mut self, observer: &ObserverRef<T>) -> bool {
        if self.position(observer).is_some() {
            return false;
        }
        self.items.push(observer.clone());
        true
    }

    fn remove(&mut self, observer: &ObserverRef<T>) -> bool {
        match self.position(observer) {
            Some(offset) => {
                self.items.remove(offset);
                true
            }
            None => false,
        }
    }
}

pub(crate) struct WorkingSet<T: ?Sized>(Vec<ObserverRef<T>>);

impl<T: ?Sized> WorkingSet<T> {
    pub(crate) fn notify(self, payload: &T) {
        trace!("notifying {} observer(s)", self.0.len());

        let mut first_panic: Option<Box<dyn Any + Send>> = None;
        for observer in self.0 {
            let result = panic::catch_unwind(AssertUnwindSafe(|| observer.update(payload)));
            if let Err(cause) = result {
                error!("observer panicked during update: {}", panic_message(&*cause));
                first_panic.get_or_insert(cause);
            }
        }

        if let Some(cause) = first_panic {
            panic::resume_unwind(cause);
        }
    }
}

fn panic_message(cause: &(dyn Any + Send)) -> &str {
    if let Some(s) = cause.downcast_ref::<&'static str>() {
        s
    } else if let Some(s) = cause.downcast_ref::<String>() {
        s.as_str()
    } else {
        "<non-string panic payload>"
    }
}
