use super::*;

/// Collects reported errors so tests can check listener failures were isolated
#[derive(Default)]
pub struct MockReporter(Mutex<Vec<CoreError>>);

impl MockReporter {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn errors(&self) -> Vec<CoreError> {
        self.0.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.0.lock().unwrap().len()
    }
}

impl ErrorReporter for MockReporter {
    fn report(&self, error: &CoreError) {
        self.0.lock().unwrap().push(error.clone());
    }
}
