use super::*;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared between a listener and the Connection handles pointing at it
#[derive(Debug)]
pub struct ConnectionState {
    connected: AtomicBool,
}

impl ConnectionState {
    pub fn new() -> Self {
        Self {
            connected: AtomicBool::new(true),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Acquire)
    }

    pub fn mark_disconnected(&self) {
        self.connected.store(false, Ordering::Release);
    }
}

/// Implemented by whatever owns listeners, so a Connection can remove itself without knowing the
/// signal's payload type
pub trait ConnectionOwner: Send + Sync {
    fn remove_connection(&self, key: ConnectionKey);
}

/// A live subscription. Dropping the handle does not disconnect it.
#[derive(derivative::Derivative, Clone)]
#[derivative(Debug)]
pub struct Connection {
    key: ConnectionKey,
    #[derivative(Debug = "ignore")]
    owner: Weak<dyn ConnectionOwner>,
    state: Arc<ConnectionState>,
}

impl Connection {
    pub(super) fn new(
        key: ConnectionKey,
        owner: Weak<dyn ConnectionOwner>,
        state: Arc<ConnectionState>,
    ) -> Self {
        Self { key, owner, state }
    }

    /// Stops future fires from reaching the listener. A fire already in progress still reaches
    /// it. Disconnecting more than once does nothing.
    pub fn disconnect(&self) {
        if !self.state.is_connected() {
            return;
        }
        match self.owner.upgrade() {
            Some(owner) => owner.remove_connection(self.key),
            // The signal is gone, there is nothing left to remove from
            None => self.state.mark_disconnected(),
        }
    }

    /// False once disconnected, or once a one-shot listener has been dispatched
    pub fn is_connected(&self) -> bool {
        self.state.is_connected()
    }

    pub fn key(&self) -> ConnectionKey {
        self.key
    }

    /// If this connection was made on the signal whose shared state lives at the given address
    pub(super) fn is_owned_by(&self, owner: *const ()) -> bool {
        self.owner.thin_ptr() == owner
    }
}

impl PartialEq for Connection {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.owner.thin_ptr() == other.owner.thin_ptr()
    }
}

impl Eq for Connection {}
