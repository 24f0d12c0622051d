use super::*;

/// Get the configuration from gameplay.toml in the working directory, or the defaults
pub fn build_config() -> CoreResult<CoreConfig> {
    build_config_with(real_filesystem())
}

pub fn build_config_with(fs: Filesystem) -> CoreResult<CoreConfig> {
    let mut builder = ConfigBuilder::new(config_entries());
    load_toml(DEFAULT_TOML_PATH, &mut builder, &*fs)
        .map_err(|e| CoreError::Config(e.to_string()))?;
    let mut conf = CoreConfig::default();
    builder
        .apply_to(&mut conf)
        .map_err(|e| CoreError::Config(e.to_string()))?;
    Ok(conf)
}
