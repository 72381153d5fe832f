use std::{
    cell::{Ref, RefCell},
    fmt,
    rc::Rc,
};

use log::{trace, warn};

use crate::{Error, ObserverRef, ObserverSet, Result};

/// An ordered list with separate observer channels for additions and
/// removals.
///
/// Add-observers receive each appended item; remove-observers receive each
/// removed item. Both channels notify from a snapshot of their registry.
/// Cloning the collection gives another handle onto the same list and
/// registries.
pub struct ObservableCollection<T> {
    items: Rc<RefCell<Vec<T>>>,
    add_observers: ObserverSet<T>,
    remove_observers: ObserverSet<T>,
}

impl<T> Clone for ObservableCollection<T> {
    fn clone(&self) -> Self {
        Self {
            items: self.items.clone(),
            add_observers: self.add_observers.clone(),
            remove_observers: self.remove_observers.clone(),
        }
    }
}

impl<T> Default for ObservableCollection<T> {
    fn default() -> Self {
        Self::from(Vec::new())
    }
}

impl<T> From<Vec<T>> for ObservableCollection<T> {
    fn from(items: Vec<T>) -> Self {
        Self {
            items: Rc::new(RefCell::new(items)),
            add_observers: ObserverSet::new(),
            remove_observers: ObserverSet::new(),
        }
    }
}

impl<T> FromIterator<T> for ObservableCollection<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl<T: fmt::Debug> fmt::Debug for ObservableCollection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObservableCollection")
            .field("items", &*self.items.borrow())
            .field("add_observers", &self.add_observers.len())
            .field("remove_observers", &self.remove_observers.len())
            .finish()
    }
}

impl<T> ObservableCollection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_add_observer(&self, observer: &ObserverRef<T>) -> bool {
        self.add_observers.insert(observer)
    }
    pub fn unregister_add_observer(&self, observer: &ObserverRef<T>) -> bool {
        self.add_observers.remove(observer)
    }
    pub fn add_observers(&self) -> Vec<ObserverRef<T>> {
        self.add_observers.snapshot()
    }
    pub fn add_observer_count(&self) -> usize {
        self.add_observers.len()
    }

    pub fn register_remove_observer(&self, observer: &ObserverRef<T>) -> bool {
        self.remove_observers.insert(observer)
    }
    pub fn unregister_remove_observer(&self, observer: &ObserverRef<T>) -> bool {
        self.remove_observers.remove(observer)
    }
    pub fn remove_observers(&self) -> Vec<ObserverRef<T>> {
        self.remove_observers.snapshot()
    }
    pub fn remove_observer_count(&self) -> usize {
        self.remove_observers.len()
    }

    /// Read-only view of the items.
    ///
    /// Don't hold the borrow across a mutating call.
    pub fn items(&self) -> Ref<'_, [T]> {
        Ref::map(self.items.borrow(), |items| items.as_slice())
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }

    /// Remove the first item matching `predicate`, then notify the
    /// remove-observers with it.
    ///
    /// Leaves the list untouched and returns [`Error::ItemNotFound`] if
    /// nothing matches.
    pub fn remove_item_by(&self, predicate: impl FnMut(&T) -> bool) -> Result<T> {
        let removed = {
            let mut items = self.items.borrow_mut();
            let offset = items.iter().position(predicate).ok_or(Error::ItemNotFound)?;
            items.remove(offset)
        };

        trace!("item removed ({} left)", self.len());
        self.remove_observers.notify(&removed);
        Ok(removed)
    }
}

impl<T: Clone> ObservableCollection<T> {
    /// Append `item`, then notify the add-observers with it.
    pub fn add_item(&self, item: T) {
        self.items.borrow_mut().push(item.clone());

        trace!("item added ({} total)", self.len());
        self.add_observers.notify(&item);
    }

    /// Append each item in order. Every item gets its own notification round.
    pub fn add_items(&self, items: impl IntoIterator<Item = T>) {
        for item in items {
            self.add_item(item);
        }
    }

    /// Copy of the items.
    pub fn to_vec(&self) -> Vec<T> {
        self.items.borrow().clone()
    }
}

impl<T: PartialEq> ObservableCollection<T> {
    pub fn contains(&self, item: &T) -> bool {
        self.items.borrow().contains(item)
    }

    /// Remove the first item equal to `item`, then notify the remove-observers
    /// with the removed item.
    ///
    /// Removing an item that isn't present is an error and fires no
    /// notification.
    pub fn remove_item(&self, item: &T) -> Result<T> {
        self.remove_item_by(|candidate| candidate == item).inspect_err(|_| {
            warn!("remove_item: item not present, collection left unchanged");
        })
    }
}

#[cfg(test)]
mod test {
    use std::{cell::RefCell, rc::Rc};

    use crate::{observer, Error, ObservableCollection, ObserverRef};

    fn recorder<T: Clone + 'static>() -> (Rc<RefCell<Vec<T>>>, ObserverRef<T>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let obs = {
            let seen = seen.clone();
            observer(move |item: &T| seen.borrow_mut().push(item.clone()))
        };
        (seen, obs)
    }

    #[test]
    fn starts_empty_or_from_list() {
        let empty = ObservableCollection::<u32>::new();
        assert!(empty.is_empty());

        let list = ObservableCollection::from(vec![1, 2]);
        assert_eq!(list.len(), 2);
        assert_eq!(&*list.items(), &[1, 2]);

        let collected: ObservableCollection<_> = (0..3).collect();
        assert_eq!(collected.to_vec(), vec![0, 1, 2]);
    }

    #[test]
    fn registries_are_independent() {
        let list = ObservableCollection::<u32>::new();
        let (_, obs) = recorder();

        assert!(list.register_add_observer(&obs));
        assert!(!list.register_add_observer(&obs));
        assert_eq!(list.add_observer_count(), 1);
        assert_eq!(list.remove_observer_count(), 0);

        assert!(list.register_remove_observer(&obs));
        assert_eq!(list.remove_observer_count(), 1);

        assert!(list.unregister_add_observer(&obs));
        assert_eq!(list.add_observer_count(), 0);
        assert_eq!(list.remove_observer_count(), 1);
    }

    #[test]
    fn add_items_notifies_once_per_item() {
        let list = ObservableCollection::new();
        let (added, obs) = recorder();
        list.register_add_observer(&obs);

        list.add_item(1);
        list.add_items([2, 3]);

        assert_eq!(*added.borrow(), [1, 2, 3]);
        assert_eq!(list.to_vec(), [1, 2, 3]);
    }

    #[test]
    fn remove_first_occurrence() {
        let list = ObservableCollection::from(vec![4, 5, 6, 5]);
        let (removed, obs) = recorder();
        list.register_remove_observer(&obs);

        assert_eq!(list.remove_item(&5), Ok(5));
        assert_eq!(list.to_vec(), [4, 6, 5]);
        assert_eq!(*removed.borrow(), [5]);
    }

    #[test]
    fn remove_missing_item() {
        let list = ObservableCollection::from(vec![1, 2]);
        let (removed, obs) = recorder();
        list.register_remove_observer(&obs);

        assert_eq!(list.remove_item(&9), Err(Error::ItemNotFound));
        assert_eq!(list.to_vec(), [1, 2]);
        assert!(removed.borrow().is_empty());
    }

    #[test]
    fn remove_by_predicate() {
        let list = ObservableCollection::from(vec!["a", "bb", "cc"]);
        assert_eq!(list.remove_item_by(|s| s.len() == 2), Ok("bb"));
        assert_eq!(list.to_vec(), ["a", "cc"]);
        assert!(list.contains(&"cc"));
        assert!(!list.contains(&"bb"));
    }
}
