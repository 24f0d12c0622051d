//! Named class descriptors with single inheritance and dynamic method dispatch

use super::*;

#[allow(clippy::module_inception)]
mod class;
mod class_registry;
mod instance;

pub use class::{Class, Method};
pub use class_registry::ClassRegistry;
pub use instance::Instance;

use std::sync::{
    atomic::{AtomicU64, Ordering},
    PoisonError,
};

/// Name of the constructor method new() looks up
pub const INIT: &str = "Init";
