use std::sync::{Arc, Weak};

/// Address of the allocation behind a shared pointer, without the vtable. Comparing fat pointers
/// to trait objects can give false negatives, so identity checks go through this.
pub trait ThinPtr {
    fn thin_ptr(&self) -> *const ();
}

impl<T: ?Sized> ThinPtr for Arc<T> {
    fn thin_ptr(&self) -> *const () {
        Arc::as_ptr(self) as *const ()
    }
}

/// Stays the same after the target is dropped, so a dead Weak still matches its old owner's
/// address (but can never be upgraded)
impl<T: ?Sized> ThinPtr for Weak<T> {
    fn thin_ptr(&self) -> *const () {
        self.as_ptr() as *const ()
    }
}
