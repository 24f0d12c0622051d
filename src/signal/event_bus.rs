use super::*;

/// Named channels, each backed by a Signal that is created the first time the channel is
/// subscribed to or emitted on. Channels only go away through clear().
pub struct EventBus<T = Args> {
    channels: Mutex<HashMap<String, Signal<T>>>,
    reporter: Arc<dyn ErrorReporter>,
}

impl<T: Send + Sync + 'static> Default for EventBus<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Send + Sync + 'static> EventBus<T> {
    pub fn new() -> Self {
        Self::with_reporter(default_reporter())
    }

    /// Every channel's signal reports listener failures here
    pub fn with_reporter(reporter: Arc<dyn ErrorReporter>) -> Self {
        Self {
            channels: Mutex::new(HashMap::new()),
            reporter,
        }
    }

    /// The channel's signal, created if needed. The lock is released before the caller does
    /// anything with it, so listeners are free to use the bus.
    fn channel(&self, name: &str) -> Signal<T> {
        let mut channels = lock(&self.channels);
        if let Some(signal) = channels.get(name) {
            return signal.clone();
        }
        trace!("creating channel {:?}", name);
        let signal = Signal::with_reporter(self.reporter.clone());
        channels.insert(name.to_string(), signal.clone());
        signal
    }

    fn existing_channel(&self, name: &str) -> Option<Signal<T>> {
        lock(&self.channels).get(name).cloned()
    }

    pub fn on<F>(&self, channel: &str, f: F) -> Connection
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        self.channel(channel).connect(f)
    }

    pub fn on_fallible<F>(&self, channel: &str, f: F) -> Connection
    where
        F: Fn(&T) -> Result<(), Box<dyn Error>> + Send + Sync + 'static,
    {
        self.channel(channel).connect_fallible(f)
    }

    pub fn once<F>(&self, channel: &str, f: F) -> Connection
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        self.channel(channel).once(f)
    }

    pub fn emit(&self, channel: &str, args: T) {
        self.channel(channel).fire(args)
    }

    /// Disconnects the connection if it was made on this channel. Unknown channels, connections
    /// from other channels and already disconnected connections are ignored.
    pub fn off(&self, channel: &str, connection: &Connection) {
        match self.existing_channel(channel) {
            Some(signal) if signal.owns(connection) => connection.disconnect(),
            Some(_) => debug!("{:?} is not a connection on channel {:?}", connection, channel),
            None => (),
        }
    }

    /// With a channel, disconnects everything on it and forgets it. Without one, does that for
    /// every channel. A later on() starts from an empty signal.
    pub fn clear(&self, channel: Option<&str>) {
        let removed: Vec<Signal<T>> = {
            let mut channels = lock(&self.channels);
            match channel {
                Some(name) => channels.remove(name).into_iter().collect(),
                None => channels.drain().map(|(_, signal)| signal).collect(),
            }
        };
        for signal in removed {
            signal.disconnect_all();
        }
    }

    pub fn has_channel(&self, channel: &str) -> bool {
        lock(&self.channels).contains_key(channel)
    }

    pub fn channel_names(&self) -> Vec<String> {
        let mut names: Vec<String> = lock(&self.channels).keys().cloned().collect();
        names.sort();
        names
    }

    /// Valid connections on the channel, 0 if it does not exist
    pub fn connection_count(&self, channel: &str) -> usize {
        self.existing_channel(channel)
            .map(|signal| signal.connection_count())
            .unwrap_or(0)
    }

    /// Suspends until the next emit on the channel. Resolves to Err(Canceled) if the channel is
    /// cleared first.
    pub fn wait(&self, channel: &str) -> Wait<T>
    where
        T: Clone,
    {
        self.channel(channel).wait()
    }
}
