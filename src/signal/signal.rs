use super::*;
use std::panic::{catch_unwind, AssertUnwindSafe};

struct SignalInner<T> {
    listeners: Mutex<ListenerList<T>>,
    reporter: Arc<dyn ErrorReporter>,
}

impl<T: 'static> ConnectionOwner for SignalInner<T> {
    fn remove_connection(&self, key: ConnectionKey) {
        lock(&self.listeners).remove(key);
    }
}

/// Best effort at getting the message out of a panic payload
fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

/// An ordered multicast event. Every fire() reaches exactly the listeners that were connected
/// when it started, in the order they were connected, no matter what those listeners connect or
/// disconnect while it runs. A listener that fails (returns an error or panics) is reported to
/// the signal's ErrorReporter and the rest still run.
///
/// Cloning gives another handle to the same signal.
pub struct Signal<T> {
    inner: Arc<SignalInner<T>>,
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: Send + Sync + 'static> Default for Signal<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Send + Sync + 'static> Signal<T> {
    /// Listener failures go to the log
    pub fn new() -> Self {
        Self::with_reporter(default_reporter())
    }

    pub fn with_reporter(reporter: Arc<dyn ErrorReporter>) -> Self {
        Self {
            inner: Arc::new(SignalInner {
                listeners: Mutex::new(ListenerList::new()),
                reporter,
            }),
        }
    }

    fn add(&self, callback: Callback<T>, once: bool, dispatch: Dispatch) -> Connection {
        let (key, state) = lock(&self.inner.listeners).add(callback, once, dispatch);
        let owner = Arc::downgrade(&self.inner) as Weak<dyn ConnectionOwner>;
        Connection::new(key, owner, state)
    }

    pub fn connect<F>(&self, f: F) -> Connection
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        self.add(
            Arc::new(move |args: &T| {
                f(args);
                Ok(())
            }),
            false,
            Dispatch::Ordered,
        )
    }

    /// Like connect(), but errors the listener returns are reported instead of ignored
    pub fn connect_fallible<F>(&self, f: F) -> Connection
    where
        F: Fn(&T) -> Result<(), Box<dyn Error>> + Send + Sync + 'static,
    {
        self.add(Arc::new(f), false, Dispatch::Ordered)
    }

    /// The listener is disconnected as soon as a fire reaches it, so it runs at most once
    pub fn once<F>(&self, f: F) -> Connection
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        self.add(
            Arc::new(move |args: &T| {
                f(args);
                Ok(())
            }),
            true,
            Dispatch::Ordered,
        )
    }

    /// The listener runs on its own thread during fire(). There is no ordering between parallel
    /// listeners, or between them and ordered ones, but all of them have finished when fire()
    /// returns. Snapshot rules are the same as connect().
    ///
    /// Every fire spawns one OS thread per parallel listener, so this is a poor fit for signals
    /// fired every tick.
    pub fn connect_parallel<F>(&self, f: F) -> Connection
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        self.add(
            Arc::new(move |args: &T| {
                f(args);
                Ok(())
            }),
            false,
            Dispatch::Parallel,
        )
    }

    /// Run every listener connected at this moment with args. Never fails, see ErrorReporter.
    pub fn fire(&self, args: T) {
        let snapshot = lock(&self.inner.listeners).take_snapshot();
        if snapshot.is_empty() {
            return;
        }
        let (parallel, ordered): (Vec<_>, Vec<_>) = snapshot
            .into_iter()
            .partition(|listener| listener.dispatch == Dispatch::Parallel);
        if parallel.is_empty() {
            for listener in &ordered {
                self.invoke(listener, &args);
            }
        } else {
            let args = &args;
            std::thread::scope(|scope| {
                for listener in &parallel {
                    scope.spawn(move || self.invoke(listener, args));
                }
                for listener in &ordered {
                    self.invoke(listener, args);
                }
            });
        }
    }

    fn invoke(&self, listener: &Listener<T>, args: &T) {
        let callback = &listener.callback;
        let error = match catch_unwind(AssertUnwindSafe(|| callback(args))) {
            Ok(Ok(())) => return,
            Ok(Err(e)) => CoreError::Listener(e.to_string()),
            Err(payload) => {
                CoreError::Listener(format!("panicked: {}", panic_message(&*payload)))
            }
        };
        self.inner.reporter.report(&error);
    }

    /// Resolves with the arguments of the first fire after this call, or Err(Canceled) if the
    /// wait is disconnected before that. Dropping the future before then cancels the wait.
    pub fn wait(&self) -> Wait<T>
    where
        T: Clone,
    {
        Wait::new(self)
    }

    /// Disconnects every current connection
    pub fn disconnect_all(&self) {
        lock(&self.inner.listeners).clear();
    }

    /// How many connections are still valid
    pub fn connection_count(&self) -> usize {
        lock(&self.inner.listeners).len()
    }

    /// If the connection was made on this signal (or a clone of it)
    pub fn owns(&self, connection: &Connection) -> bool {
        connection.is_owned_by(self.inner.thin_ptr())
    }

    pub(super) fn connect_once_raw(&self, callback: Callback<T>) -> Connection {
        self.add(callback, true, Dispatch::Ordered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn setup() -> (Signal<(String, i64)>, CallRecorder<(String, i64)>) {
        (Signal::new(), CallRecorder::new())
    }

    fn hello() -> (String, i64) {
        ("Hello".to_string(), 1)
    }

    #[test]
    fn connected_listener_gets_fire_arguments() {
        let (signal, logger) = setup();
        signal.connect(logger.listener());
        signal.fire(hello());
        assert_eq!(logger.calls(), vec![hello()]);
    }

    #[test]
    fn disconnected_listener_gets_nothing() {
        let (signal, logger) = setup();
        let connection = signal.connect(logger.listener());
        signal.fire(hello());
        connection.disconnect();
        signal.fire(hello());
        assert_eq!(logger.count(), 1);
        assert!(!connection.is_connected());
    }

    #[test]
    fn disconnecting_twice_is_a_noop() {
        let (signal, logger) = setup();
        let a = signal.connect(logger.listener());
        let _b = signal.connect(logger.listener());
        a.disconnect();
        a.disconnect();
        assert_eq!(signal.connection_count(), 1);
    }

    #[test]
    fn listeners_run_in_connection_order() {
        let signal = Signal::new();
        let order = CallRecorder::new();
        for i in 0..5 {
            let order = order.clone();
            signal.connect(move |_: &()| order.record(i));
        }
        signal.fire(());
        assert_eq!(order.calls(), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn connecting_during_fire_does_not_affect_current_fire() {
        let signal: Signal<()> = Signal::new();
        let late = CallRecorder::new();
        let handle = signal.clone();
        let late_clone = late.clone();
        signal.connect(move |_| {
            handle.connect(late_clone.listener());
        });
        signal.fire(());
        assert_eq!(late.count(), 0);
        signal.fire(());
        assert_eq!(late.count(), 1);
    }

    #[test]
    fn disconnecting_during_fire_does_not_affect_current_fire() {
        let signal: Signal<()> = Signal::new();
        let second = CallRecorder::new();
        let victim: Arc<Mutex<Option<Connection>>> = Arc::new(Mutex::new(None));
        let victim_clone = victim.clone();
        signal.connect(move |_| {
            if let Some(connection) = victim_clone.lock().unwrap().as_ref() {
                connection.disconnect();
            }
        });
        *victim.lock().unwrap() = Some(signal.connect(second.listener()));
        signal.fire(());
        assert_eq!(second.count(), 1);
        signal.fire(());
        assert_eq!(second.count(), 1);
    }

    #[test]
    fn once_listener_runs_exactly_once() {
        let (signal, logger) = setup();
        let connection = signal.once(logger.listener());
        signal.fire(hello());
        signal.fire(hello());
        signal.fire(hello());
        assert_eq!(logger.count(), 1);
        assert!(!connection.is_connected());
        assert_eq!(signal.connection_count(), 0);
    }

    #[test]
    fn once_listener_is_not_reentered_by_nested_fire() {
        let signal: Signal<u32> = Signal::new();
        let count = Arc::new(AtomicUsize::new(0));
        let handle = signal.clone();
        let count_clone = count.clone();
        signal.once(move |depth| {
            count_clone.fetch_add(1, Ordering::SeqCst);
            if *depth < 3 {
                handle.fire(depth + 1);
            }
        });
        signal.fire(0);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn failing_listener_does_not_stop_the_rest() {
        let reporter = MockReporter::new();
        let signal: Signal<()> = Signal::with_reporter(reporter.clone());
        let after = CallRecorder::new();
        signal.connect_fallible(|_| Err("out of mana".into()));
        signal.connect(after.listener());
        signal.fire(());
        assert_eq!(after.count(), 1);
        assert_eq!(
            reporter.errors(),
            vec![CoreError::Listener("out of mana".to_string())]
        );
    }

    #[test]
    fn panicking_listener_is_isolated() {
        let reporter = MockReporter::new();
        let signal: Signal<()> = Signal::with_reporter(reporter.clone());
        let after = CallRecorder::new();
        signal.connect(|_| panic!("listener exploded"));
        signal.connect(after.listener());
        signal.fire(());
        signal.fire(());
        assert_eq!(after.count(), 2);
        assert_eq!(reporter.count(), 2);
        assert_eq!(
            reporter.errors()[0],
            CoreError::Listener("panicked: listener exploded".to_string())
        );
    }

    #[test]
    fn disconnect_all_empties_the_signal() {
        let (signal, logger) = setup();
        let a = signal.connect(logger.listener());
        let b = signal.once(logger.listener());
        signal.disconnect_all();
        signal.fire(hello());
        assert_eq!(logger.count(), 0);
        assert!(!a.is_connected());
        assert!(!b.is_connected());
        signal.connect(logger.listener());
        signal.fire(hello());
        assert_eq!(logger.count(), 1);
    }

    #[test]
    fn connection_count_tracks_valid_connections() {
        let (signal, logger) = setup();
        assert_eq!(signal.connection_count(), 0);
        let a = signal.connect(logger.listener());
        signal.once(logger.listener());
        assert_eq!(signal.connection_count(), 2);
        signal.fire(hello());
        assert_eq!(signal.connection_count(), 1);
        a.disconnect();
        assert_eq!(signal.connection_count(), 0);
    }

    #[test]
    fn parallel_listeners_finish_before_fire_returns() {
        let signal: Signal<usize> = Signal::new();
        let total = Arc::new(AtomicUsize::new(0));
        for _ in 0..4 {
            let total = total.clone();
            signal.connect_parallel(move |n| {
                total.fetch_add(*n, Ordering::SeqCst);
            });
        }
        let ordered = CallRecorder::new();
        signal.connect(ordered.listener());
        signal.fire(5);
        assert_eq!(total.load(Ordering::SeqCst), 20);
        assert_eq!(ordered.calls(), vec![5]);
    }

    #[test]
    fn parallel_listener_panic_is_isolated() {
        let reporter = MockReporter::new();
        let signal: Signal<()> = Signal::with_reporter(reporter.clone());
        signal.connect_parallel(|_| panic!("worker died"));
        let after = CallRecorder::new();
        signal.connect(after.listener());
        signal.fire(());
        assert_eq!(after.count(), 1);
        assert_eq!(reporter.count(), 1);
    }

    #[test]
    fn clones_share_listeners() {
        let (signal, logger) = setup();
        let other = signal.clone();
        let connection = other.connect(logger.listener());
        signal.fire(hello());
        assert_eq!(logger.count(), 1);
        assert!(signal.owns(&connection));
        assert!(!Signal::<(String, i64)>::new().owns(&connection));
    }

    #[test]
    fn connection_outliving_signal_can_still_disconnect() {
        let (signal, logger) = setup();
        let connection = signal.connect(logger.listener());
        drop(signal);
        connection.disconnect();
        assert!(!connection.is_connected());
    }
}
