use super::*;

/// Records the arguments of every call made through the closures it hands out. Clones share the
/// same record.
pub struct CallRecorder<T>(Arc<Mutex<Vec<T>>>);

impl<T> Clone for CallRecorder<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T: Clone + Send + 'static> CallRecorder<T> {
    pub fn new() -> Self {
        Self(Arc::new(Mutex::new(Vec::new())))
    }

    /// A listener that records what it is called with
    pub fn listener(&self) -> impl Fn(&T) + Send + Sync + 'static {
        let calls = self.0.clone();
        move |args: &T| calls.lock().unwrap().push(args.clone())
    }

    pub fn record(&self, value: T) {
        self.0.lock().unwrap().push(value);
    }

    pub fn calls(&self) -> Vec<T> {
        self.0.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.0.lock().unwrap().len()
    }
}
