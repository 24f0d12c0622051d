use super::*;

new_key_type! {
    /// Identifies one connection within its signal
    pub struct ConnectionKey;
}

pub type Callback<T> = Arc<dyn Fn(&T) -> Result<(), Box<dyn Error>> + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// Runs on the firing thread, in connection order
    Ordered,
    /// Runs on its own thread, joined before fire() returns
    Parallel,
}

pub struct Listener<T> {
    pub key: ConnectionKey,
    pub callback: Callback<T>,
    pub once: bool,
    pub dispatch: Dispatch,
    pub state: Arc<ConnectionState>,
}

impl<T> Clone for Listener<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key,
            callback: self.callback.clone(),
            once: self.once,
            dispatch: self.dispatch,
            state: self.state.clone(),
        }
    }
}

/// The connected listeners of one signal, in the order they were connected. The slotmap gives
/// each connection a key that stays valid (and is never reused for another connection) while the
/// Vec keeps the order.
pub struct ListenerList<T> {
    listeners: SlotMap<ConnectionKey, Listener<T>>,
    order: Vec<ConnectionKey>,
}

impl<T> ListenerList<T> {
    pub fn new() -> Self {
        Self {
            listeners: SlotMap::with_key(),
            order: Vec::new(),
        }
    }

    pub fn add(
        &mut self,
        callback: Callback<T>,
        once: bool,
        dispatch: Dispatch,
    ) -> (ConnectionKey, Arc<ConnectionState>) {
        let state = Arc::new(ConnectionState::new());
        let key = self.listeners.insert_with_key(|key| Listener {
            key,
            callback,
            once,
            dispatch,
            state: state.clone(),
        });
        self.order.push(key);
        (key, state)
    }

    /// Returns the listener if it was still in the list
    pub fn remove(&mut self, key: ConnectionKey) -> Option<Listener<T>> {
        let listener = self.listeners.remove(key)?;
        // Order matters so no swap_remove. Lists are short, a linear scan is fine.
        if let Some(i) = self.order.iter().position(|k| *k == key) {
            self.order.remove(i);
        }
        listener.state.mark_disconnected();
        Some(listener)
    }

    pub fn clear(&mut self) {
        for (_, listener) in self.listeners.drain() {
            listener.state.mark_disconnected();
        }
        self.order.clear();
    }

    /// Every listener in connection order. Once listeners are removed from the list as part of
    /// taking the snapshot, so no later snapshot can contain them.
    pub fn take_snapshot(&mut self) -> Vec<Listener<T>> {
        let snapshot: Vec<Listener<T>> = self
            .order
            .iter()
            .filter_map(|key| self.listeners.get(*key))
            .cloned()
            .collect();
        for listener in &snapshot {
            if listener.once {
                self.remove(listener.key);
            }
        }
        snapshot
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}
