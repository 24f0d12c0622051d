use super::*;

fn config_from(toml: &str) -> CoreResult<CoreConfig> {
    let fs = MockFilesystem::new().add_file(DEFAULT_TOML_PATH, toml);
    build_config_with(fs.boxed())
}

#[test]
fn no_file_gives_defaults() {
    let conf = build_config_with(MockFilesystem::new().boxed()).unwrap();
    assert_eq!(conf, CoreConfig::default());
}

#[test]
fn can_set_log_filter() {
    let conf = config_from("log_filter = \"gameplay_core=trace\"").unwrap();
    assert_eq!(conf.log_filter, "gameplay_core=trace");
}

#[test]
fn can_lower_listener_error_level() {
    let conf = config_from("listener_error_level = \"warn\"").unwrap();
    assert_eq!(conf.listener_error_level, ListenerErrorLevel::Warn);
}

#[test]
fn invalid_listener_error_level_is_rejected() {
    let err = config_from("listener_error_level = \"loud\"").unwrap_err();
    assert!(err.to_string().contains("listener_error_level"));
}

#[test]
fn tick_seconds_accepts_int() {
    let conf = config_from("tick_seconds = 1").unwrap();
    assert_eq!(conf.tick_seconds, 1.0);
}

#[test]
fn negative_tick_seconds_is_rejected() {
    assert!(config_from("tick_seconds = -0.5").is_err());
}

#[test]
fn zero_max_ticks_runs_forever() {
    let conf = config_from("max_ticks = 0").unwrap();
    assert_eq!(conf.max_ticks, None);
}

#[test]
fn wrong_type_is_rejected() {
    let err = config_from("method_cache = \"yes\"").unwrap_err();
    assert!(err.to_string().contains("expected: bool"));
}

#[test]
fn unknown_option_is_rejected() {
    let err = config_from("warp_speed = 9").unwrap_err();
    assert!(err.to_string().contains("warp_speed is not a valid option"));
}

#[test]
fn empty_prefix_is_rejected() {
    assert!(config_from("entity_id_prefix = \"\"").is_err());
}

#[test]
fn non_table_file_is_rejected() {
    assert!(config_from("= 3").is_err());
}
