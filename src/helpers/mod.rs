//! General useful bits and bobs

use super::*;

mod config;
mod error_reporter;
mod filesystem;
mod format_slotmap_key;
mod metronome;
mod or_log;
mod short_type_name;
#[cfg(test)]
mod test_helpers;
mod thin_ptr;

pub use config::{build_config, build_config_with, CoreConfig, DEFAULT_TOML_PATH};
pub use error_reporter::{default_reporter, ErrorReporter, ListenerErrorLevel, LogReporter};
pub use filesystem::{real_filesystem, Filesystem, FilesystemTrait};
pub use format_slotmap_key::{format_slotmap_key, slotmap_key_token};
pub use metronome::Metronome;
pub use or_log::OrLog;
pub use short_type_name::short_type_name;
#[cfg(test)]
pub use test_helpers::*;
pub use thin_ptr::ThinPtr;
