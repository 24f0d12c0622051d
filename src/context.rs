use super::*;

/// The explicit context game code is handed instead of global registries. Holds the
/// configuration, where listener failures go, and the class registry, and builds core objects
/// wired to them.
pub struct Context {
    config: CoreConfig,
    reporter: Arc<dyn ErrorReporter>,
    classes: ClassRegistry,
}

impl Default for Context {
    fn default() -> Self {
        Self::new(CoreConfig::default())
    }
}

impl Context {
    /// Listener failures are logged at the configured level
    pub fn new(config: CoreConfig) -> Self {
        let reporter = Arc::new(LogReporter::new(config.listener_error_level));
        Self::with_reporter(config, reporter)
    }

    pub fn with_reporter(config: CoreConfig, reporter: Arc<dyn ErrorReporter>) -> Self {
        let classes = ClassRegistry::with_method_cache(config.method_cache);
        Self {
            config,
            reporter,
            classes,
        }
    }

    pub fn config(&self) -> &CoreConfig {
        &self.config
    }

    pub fn reporter(&self) -> &Arc<dyn ErrorReporter> {
        &self.reporter
    }

    pub fn classes(&self) -> &ClassRegistry {
        &self.classes
    }

    pub fn signal<T: Send + Sync + 'static>(&self) -> Signal<T> {
        Signal::with_reporter(self.reporter.clone())
    }

    pub fn event_bus<T: Send + Sync + 'static>(&self) -> EventBus<T> {
        EventBus::with_reporter(self.reporter.clone())
    }

    /// An empty world using the configured id prefix
    pub fn world(&self) -> World {
        World::with_id_prefix(&self.config.entity_id_prefix)
    }

    pub fn state_machine<C>(&self) -> StateMachine<C> {
        StateMachine::with_reporter(self.reporter.clone())
    }
}
