use super::*;

/// Everything the core and the demo driver can be configured with
#[derive(Debug, Clone, PartialEq)]
pub struct CoreConfig {
    /// env_logger filter string, RUST_LOG takes precedence
    pub log_filter: String,
    /// Level listener failures are logged at by the default reporter
    pub listener_error_level: ListenerErrorLevel,
    /// Prefix of generated entity ids
    pub entity_id_prefix: String,
    /// If method lookups are memoized per class
    pub method_cache: bool,
    /// Target length of a driver tick in seconds
    pub tick_seconds: f64,
    /// How many ticks the driver runs, None to run until interrupted
    pub max_ticks: Option<u64>,
}

impl Default for CoreConfig {
    /// Matches the defaults in config_entries(), so a library user that never loads a file gets
    /// the same behavior as the demo with no gameplay.toml
    fn default() -> Self {
        Self {
            log_filter: "info".to_string(),
            listener_error_level: ListenerErrorLevel::Error,
            entity_id_prefix: "entity".to_string(),
            method_cache: true,
            tick_seconds: 1.0 / 60.0,
            max_ticks: Some(600),
        }
    }
}
