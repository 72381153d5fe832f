use std::rc::Rc;

/// Anything that wants to hear about changes to an observable.
///
/// `update` is called synchronously, on the thread that mutated the
/// observable, after the mutation has been applied.
pub trait Observer<T: ?Sized> {
    fn update(&self, payload: &T);
}

impl<T: ?Sized, F> Observer<T> for F
where
    F: Fn(&T),
{
    fn update(&self, payload: &T) {
        self(payload)
    }
}

/// A registrable observer.
///
/// Registries key observers by the address of this allocation, so clones of
/// one `ObserverRef` are the same observer and two separately built observers
/// are always distinct.
pub type ObserverRef<T> = Rc<dyn Observer<T>>;

/// Wrap a closure so it can be registered with an observable.
pub fn observer<T, F>(f: F) -> ObserverRef<T>
where
    T: ?Sized + 'static,
    F: Fn(&T) + 'static,
{
    Rc::new(f)
}

pub(crate) fn same_observer<T: ?Sized>(a: &ObserverRef<T>, b: &ObserverRef<T>) -> bool {
    // Only the data address matters; vtable pointers may differ between codegen units
    std::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b))
}
