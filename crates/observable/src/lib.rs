//! Observable primitives: a single observable value and an observable list.
//!
//! Observers are notified synchronously, on the calling thread, after the
//! change has been applied. Every notification round runs over a snapshot of
//! the registry, so observers may register or unregister while being
//! notified.
//!
//! ## Example
//! ```
//! use std::{cell::Cell, rc::Rc};
//! use observable_primitives::{observer, ObservableCollection, ScalarObservable};
//!
//! let temperature = ScalarObservable::new(20);
//! let last = Rc::new(Cell::new(0));
//! let watcher = {
//!     let last = last.clone();
//!     observer(move |t: &i32| last.set(*t))
//! };
//! temperature.add_observer(&watcher);
//!
//! temperature.set(20); // unchanged, no notification
//! temperature.set(23);
//! assert_eq!(last.get(), 23);
//!
//! let list = ObservableCollection::new();
//! list.add_items([4, 5, 6]);
//! assert_eq!(list.remove_item(&5), Ok(5));
//! assert_eq!(list.to_vec(), [4, 6]);
//! ```

mod collection;
mod error;
mod observer;
mod observer_set;
mod scalar;

// Reexport of the public API.
#[doc(inline)]
pub use crate::collection::*;
#[doc(inline)]
pub use crate::error::*;
#[doc(inline)]
pub use crate::observer::*;
#[doc(inline)]
pub use crate::observer_set::*;
#[doc(inline)]
pub use crate::scalar::*;
