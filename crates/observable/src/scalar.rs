use std::{
    cell::{Ref, RefCell},
    fmt,
    rc::Rc,
};

use log::debug;

use crate::{observer, ObserverRef, ObserverSet};

/// A single value that notifies its observers whenever it changes.
///
/// Change detection uses `PartialEq`: setting a value equal to the current
/// one is a no-op, even if it is a distinct allocation. Cloning the
/// observable gives another handle onto the same value and observers.
pub struct ScalarObservable<T> {
    value: Rc<RefCell<T>>,
    observers: ObserverSet<T>,
}

impl<T> Clone for ScalarObservable<T> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            observers: self.observers.clone(),
        }
    }
}

impl<T: Default> Default for ScalarObservable<T> {
    fn default() -> Self {
        ScalarObservable::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for ScalarObservable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScalarObservable")
            .field("value", &*self.value.borrow())
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl<T> ScalarObservable<T> {
    pub fn new(value: T) -> Self {
        Self {
            value: Rc::new(RefCell::new(value)),
            observers: ObserverSet::new(),
        }
    }

    /// Register an observer. Returns `false` if it was already registered.
    pub fn add_observer(&self, observer: &ObserverRef<T>) -> bool {
        self.observers.insert(observer)
    }

    /// Unregister an observer. Returns `false` if it was not registered.
    pub fn remove_observer(&self, observer: &ObserverRef<T>) -> bool {
        self.observers.remove(observer)
    }

    pub fn contains_observer(&self, observer: &ObserverRef<T>) -> bool {
        self.observers.contains(observer)
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Snapshot of the registered observers.
    pub fn observers(&self) -> Vec<ObserverRef<T>> {
        self.observers.snapshot()
    }

    /// Borrow the current value.
    ///
    /// Don't hold the borrow across a call to [`set`](Self::set).
    pub fn get(&self) -> Ref<'_, T> {
        self.value.borrow()
    }
}

impl<T: 'static> ScalarObservable<T> {
    /// Register a closure as an observer, returning the handle needed to
    /// remove it again.
    pub fn subscribe(&self, f: impl Fn(&T) + 'static) -> ObserverRef<T> {
        let handle = observer(f);
        self.observers.insert(&handle);
        handle
    }
}

impl<T: Clone> ScalarObservable<T> {
    pub fn get_cloned(&self) -> T {
        self.value.borrow().clone()
    }
}

impl<T: PartialEq + Clone> ScalarObservable<T> {
    /// Replace the value and notify observers, unless `value` equals the
    /// current one. Returns whether a notification round ran.
    pub fn set(&self, value: T) -> bool {
        {
            let mut current = self.value.borrow_mut();
            if *current == value {
                debug!("set: value unchanged, skipping notification");
                return false;
            }
            *current = value.clone();
        }

        self.observers.notify(&value);
        true
    }

    /// Compute the next value from the current one, then [`set`](Self::set) it.
    pub fn update(&self, f: impl FnOnce(&T) -> T) -> bool {
        let next = f(&*self.value.borrow());
        self.set(next)
    }
}
