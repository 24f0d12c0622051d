use super::*;

fn source_or_default(source: Option<&str>) -> &str {
    source.unwrap_or("default value")
}

/// These entries will be applied in order of returned vec. All entries will always be applied.
pub fn config_entries() -> Vec<Box<dyn ConfigEntry>> {
    vec![
        entry("log_filter", "info".to_string(), |conf, filter, _| {
            conf.log_filter = filter;
            Ok(())
        }),
        entry(
            "listener_error_level",
            "error".to_string(),
            |conf, level: String, source| {
                conf.listener_error_level = match level.as_str() {
                    "warn" => ListenerErrorLevel::Warn,
                    "error" => ListenerErrorLevel::Error,
                    _ => {
                        return Err(format!(
                            "{} has invalid value {}, valid options are warn, error",
                            source_or_default(source),
                            level
                        )
                        .into())
                    }
                };
                Ok(())
            },
        ),
        entry(
            "entity_id_prefix",
            "entity".to_string(),
            |conf, prefix: String, source| {
                if prefix.is_empty() {
                    return Err(format!("{} should not be empty", source_or_default(source)).into());
                }
                conf.entity_id_prefix = prefix;
                Ok(())
            },
        ),
        entry("method_cache", true, |conf, enabled, _| {
            conf.method_cache = enabled;
            Ok(())
        }),
        entry("tick_seconds", 1.0 / 60.0, |conf, seconds: f64, source| {
            if seconds < 0.0 || !seconds.is_finite() {
                return Err(format!(
                    "{} should be a non-negative number of seconds",
                    source_or_default(source)
                )
                .into());
            }
            conf.tick_seconds = seconds;
            Ok(())
        }),
        entry("max_ticks", 600i64, |conf, ticks: i64, source| {
            if ticks > 0 {
                conf.max_ticks = Some(ticks as u64);
                Ok(())
            } else if ticks == 0 {
                conf.max_ticks = None;
                Ok(())
            } else {
                Err(format!("{} should not be negative", source_or_default(source)).into())
            }
        }),
    ]
}
