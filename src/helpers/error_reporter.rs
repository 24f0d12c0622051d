use super::*;

/// Receives listener failures. Firing a signal never returns an error to the firer, so this is
/// the only place a failing listener becomes visible.
pub trait ErrorReporter: Send + Sync {
    fn report(&self, error: &CoreError);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerErrorLevel {
    Warn,
    Error,
}

impl Default for ListenerErrorLevel {
    fn default() -> Self {
        Self::Error
    }
}

/// Reports through the log crate
#[derive(Debug, Default)]
pub struct LogReporter {
    level: ListenerErrorLevel,
}

impl LogReporter {
    pub fn new(level: ListenerErrorLevel) -> Self {
        Self { level }
    }
}

impl ErrorReporter for LogReporter {
    fn report(&self, error: &CoreError) {
        match self.level {
            ListenerErrorLevel::Warn => warn!("{}", error),
            ListenerErrorLevel::Error => error!("{}", error),
        }
    }
}

pub fn default_reporter() -> Arc<dyn ErrorReporter> {
    Arc::new(LogReporter::default())
}
