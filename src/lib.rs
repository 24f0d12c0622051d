//! Runtime behavioral layer for game logic: signals and event channels, a single-inheritance class
//! model, an entity/component store driven by external systems, and decision logic (state
//! machines and behavior trees). Nothing in here schedules itself, the caller decides when to tick.

#[macro_use(new_key_type)]
extern crate slotmap;
#[macro_use]
extern crate log;

pub mod class;
pub mod context;
pub mod core_error;
pub mod ecs;
pub mod helpers;
pub mod logic;
pub mod signal;
pub mod value;

pub use class::{Class, ClassRegistry, Instance, Method, INIT};
pub use context::Context;
pub use core_error::{CoreError, CoreResult};
pub use ecs::{Entity, EntityKey, System, World};
pub use helpers::{CoreConfig, ErrorReporter, ListenerErrorLevel, LogReporter};
pub use logic::{BehaviorTree, Node, StateChange, StateHooks, StateMachine, Status};
pub use signal::{Args, Canceled, Connection, EventBus, Signal, Wait};
pub use value::{FromValue, Value};

use helpers::*;
use slotmap::{HopSlotMap, Key, SlotMap};
use std::{
    any::Any,
    collections::{HashMap, HashSet},
    error::Error,
    fmt::{Debug, Formatter},
    sync::{Arc, Mutex, MutexGuard, RwLock, Weak},
};
