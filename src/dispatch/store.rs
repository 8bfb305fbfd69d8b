//! State store whose reducer emits declarative side effects.

use std::marker::PhantomData;

use crate::dispatch::Action;

/// Result of dispatching an action: whether state changed plus any effects
/// the reducer wants executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchResult<E> {
    /// Whether the state was modified by this action.
    pub changed: bool,
    /// Effects to be processed after dispatch.
    pub effects: Vec<E>,
}

impl<E> Default for DispatchResult<E> {
    fn default() -> Self {
        Self::unchanged()
    }
}

impl<E> DispatchResult<E> {
    /// No state change, no effects.
    #[inline]
    pub fn unchanged() -> Self {
        Self {
            changed: false,
            effects: vec![],
        }
    }

    /// State changed, no effects.
    #[inline]
    pub fn changed() -> Self {
        Self {
            changed: true,
            effects: vec![],
        }
    }

    /// A single effect without a state change.
    #[inline]
    pub fn effect(effect: E) -> Self {
        Self {
            changed: false,
            effects: vec![effect],
        }
    }

    /// State changed with a single effect.
    #[inline]
    pub fn changed_with(effect: E) -> Self {
        Self {
            changed: true,
            effects: vec![effect],
        }
    }

    /// Append an effect to this result.
    #[inline]
    pub fn with(mut self, effect: E) -> Self {
        self.effects.push(effect);
        self
    }

    /// Returns true if there are effects to process.
    #[inline]
    pub fn has_effects(&self) -> bool {
        !self.effects.is_empty()
    }
}

/// A reducer that mutates state and declares effects.
pub type EffectReducer<S, A, E> = fn(&mut S, A) -> DispatchResult<E>;

/// Single point of state mutation. Every action goes through [`dispatch`],
/// which also logs the action name and outcome at debug level.
///
/// [`dispatch`]: EffectStore::dispatch
pub struct EffectStore<S, A, E> {
    state: S,
    reducer: EffectReducer<S, A, E>,
    _marker: PhantomData<(A, E)>,
}

impl<S, A, E> EffectStore<S, A, E>
where
    A: Action,
{
    /// Create a store with the given initial state and reducer.
    pub fn new(state: S, reducer: EffectReducer<S, A, E>) -> Self {
        Self {
            state,
            reducer,
            _marker: PhantomData,
        }
    }

    /// Current state.
    #[inline]
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Mutable state access, for initialization only. Runtime mutations go
    /// through actions.
    #[inline]
    pub fn state_mut(&mut self) -> &mut S {
        &mut self.state
    }

    /// Run the reducer for one action.
    pub fn dispatch(&mut self, action: A) -> DispatchResult<E> {
        let name = action.name();
        let result = (self.reducer)(&mut self.state, action);
        tracing::debug!(
            action = name,
            changed = result.changed,
            effects = result.effects.len(),
            "dispatched"
        );
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug)]
    enum TestAction {
        Increment,
        Announce,
        NoOp,
    }

    impl Action for TestAction {
        fn name(&self) -> &'static str {
            match self {
                TestAction::Increment => "Increment",
                TestAction::Announce => "Announce",
                TestAction::NoOp => "NoOp",
            }
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    enum TestEffect {
        Log(String),
    }

    #[derive(Default)]
    struct TestState {
        count: i32,
    }

    fn test_reducer(state: &mut TestState, action: TestAction) -> DispatchResult<TestEffect> {
        match action {
            TestAction::Increment => {
                state.count += 1;
                DispatchResult::changed()
            }
            TestAction::Announce => {
                DispatchResult::effect(TestEffect::Log(format!("count: {}", state.count)))
            }
            TestAction::NoOp => DispatchResult::unchanged(),
        }
    }

    #[test]
    fn dispatch_updates_state_and_reports_change() {
        let mut store = EffectStore::new(TestState::default(), test_reducer);

        let result = store.dispatch(TestAction::Increment);
        assert!(result.changed);
        assert!(result.effects.is_empty());
        assert_eq!(store.state().count, 1);

        let result = store.dispatch(TestAction::NoOp);
        assert!(!result.changed);
        assert_eq!(store.state().count, 1);
    }

    #[test]
    fn dispatch_collects_effects() {
        let mut store = EffectStore::new(TestState::default(), test_reducer);
        store.dispatch(TestAction::Increment);

        let result = store.dispatch(TestAction::Announce);
        assert!(!result.changed);
        assert!(result.has_effects());
        assert_eq!(result.effects, vec![TestEffect::Log("count: 1".into())]);
    }

    #[test]
    fn result_builders() {
        let r: DispatchResult<TestEffect> = DispatchResult::unchanged();
        assert!(!r.changed && r.effects.is_empty());

        let r = DispatchResult::changed_with(TestEffect::Log("x".into()))
            .with(TestEffect::Log("y".into()));
        assert!(r.changed);
        assert_eq!(r.effects.len(), 2);
    }
}
