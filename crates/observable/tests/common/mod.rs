use std::{cell::RefCell, rc::Rc};

use observable_primitives::{observer, ObserverRef};

#[allow(unused)]
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// An observer that records every payload it receives, plus a way to drain them.
#[allow(unused)]
pub fn change_watcher<T: Clone + 'static>() -> (ObserverRef<T>, impl Fn() -> Vec<T>) {
    let changes = Rc::new(RefCell::new(Vec::new()));
    let watcher = {
        let changes = changes.clone();
        observer(move |value: &T| changes.borrow_mut().push(value.clone()))
    };

    let check = move || changes.borrow_mut().drain(..).collect::<Vec<T>>();

    (watcher, check)
}
