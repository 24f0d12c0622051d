//! Ordered multicast signals with cancelable connections, and named channels built on them

use super::*;

mod connection;
mod event_bus;
mod listener_list;
#[allow(clippy::module_inception)]
mod signal;
mod wait;

pub use connection::Connection;
pub use event_bus::EventBus;
pub use listener_list::ConnectionKey;
pub use signal::Signal;
pub use futures::channel::oneshot::Canceled;
pub use wait::Wait;

use connection::{ConnectionOwner, ConnectionState};
use listener_list::{Callback, Dispatch, Listener, ListenerList};
use std::sync::PoisonError;

/// Default payload of signals and channels that carry dynamic arguments
pub type Args = Vec<Value>;

/// Locks, ignoring poisoning. No lock in this module is held while user code runs, so a poisoned
/// lock still holds consistent data.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
