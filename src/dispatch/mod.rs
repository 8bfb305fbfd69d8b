//! Minimal action-dispatch runtime: a single state store fed by one action
//! channel, with keyed async tasks and keyed cancellable timers.
//!
//! All mutable application state lives in the store and is only touched by
//! the reducer. Side effects are declared by the reducer as values and
//! executed outside it; their completions re-enter as actions.

pub mod runtime;
pub mod store;
pub mod tasks;
pub mod timers;

pub use runtime::{spawn_event_poller, EffectContext, Runtime};
pub use store::{DispatchResult, EffectStore};
pub use tasks::{TaskKey, TaskManager};
pub use timers::{TimerKey, Timers};

use std::fmt::Debug;

/// Marker trait for actions dispatched to the store.
///
/// Actions are cloned into logs and sent across task boundaries, hence the
/// bounds.
pub trait Action: Clone + Debug + Send + 'static {
    /// Short name for logging and filtering.
    fn name(&self) -> &'static str;
}
