//! Decision logic driven from outside: guarded state machines and single-pass behavior trees

use super::*;

mod behavior_tree;
mod state_machine;

pub use behavior_tree::{BehaviorTree, Node, Status};
pub use state_machine::{StateChange, StateHooks, StateMachine};
