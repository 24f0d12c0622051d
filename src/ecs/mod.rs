//! Entities owning keyed component payloads, and systems the caller runs over entity sets it
//! picks. Nothing in here decides which entities a system sees or when it runs.

use super::*;

mod entity;
mod system;
mod world;

pub use entity::{Component, Entity};
pub use system::System;
pub use world::World;

new_key_type! {
    /// Stable handle to an entity in a World. Never reused for a different entity.
    pub struct EntityKey;
}
