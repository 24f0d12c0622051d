use super::*;

mod build_config;
mod config_builder;
mod config_entries;
mod core_config;
mod load_toml;
#[cfg(test)]
mod tests;

pub use build_config::{build_config, build_config_with};
pub use core_config::CoreConfig;
pub use load_toml::DEFAULT_TOML_PATH;

use config_builder::*;
use config_entries::*;
use load_toml::*;
