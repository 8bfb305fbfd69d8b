//! Keyed, cancellable timers emitting actions.
//!
//! Every timer belongs to the state that armed it: the loading-message
//! ticker is cancelled when the dashboard leaves the loading state, and the
//! notification dismiss timer is re-armed (replacing the old one) whenever a
//! new notification takes over. All timers are aborted on drop.

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::dispatch::Action;

/// Identifies a timer for cancellation and replacement.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct TimerKey(String);

impl TimerKey {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for TimerKey {
    fn from(s: &'static str) -> Self {
        Self::new(s)
    }
}

/// Registry of live timers by key.
pub struct Timers<A> {
    handles: HashMap<TimerKey, JoinHandle<()>>,
    action_tx: mpsc::UnboundedSender<A>,
}

impl<A> Timers<A>
where
    A: Action,
{
    pub fn new(action_tx: mpsc::UnboundedSender<A>) -> Self {
        Self {
            handles: HashMap::new(),
            action_tx,
        }
    }

    /// Arm a periodic timer. The factory is called on every tick; the first
    /// tick fires one `period` after arming. Re-arming a key cancels the
    /// previous timer.
    pub fn interval<F>(&mut self, key: impl Into<TimerKey>, period: Duration, action_fn: F)
    where
        F: Fn() -> A + Send + 'static,
    {
        let key = key.into();
        self.cancel(&key);

        let tx = self.action_tx.clone();
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            // tokio intervals fire immediately; skip that first tick
            interval.tick().await;
            loop {
                interval.tick().await;
                if tx.send(action_fn()).is_err() {
                    break;
                }
            }
        });

        self.handles.insert(key, handle);
    }

    /// Arm a one-shot timer that emits `action` after `delay`. Re-arming a
    /// key cancels the pending shot and restarts the countdown.
    pub fn once(&mut self, key: impl Into<TimerKey>, delay: Duration, action: A) {
        let key = key.into();
        self.cancel(&key);

        let tx = self.action_tx.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(action);
        });

        self.handles.insert(key, handle);
    }

    /// Cancel a timer by key. No-op when the key is not armed.
    pub fn cancel(&mut self, key: &TimerKey) {
        if let Some(handle) = self.handles.remove(key) {
            handle.abort();
        }
    }

    /// Cancel every live timer.
    pub fn cancel_all(&mut self) {
        for (_, handle) in self.handles.drain() {
            handle.abort();
        }
    }

    pub fn is_armed(&self, key: &TimerKey) -> bool {
        self.handles.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

impl<A> Drop for Timers<A> {
    fn drop(&mut self) {
        for (_, handle) in self.handles.drain() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    enum TestAction {
        Tick,
        Expired(u64),
    }

    impl Action for TestAction {
        fn name(&self) -> &'static str {
            match self {
                TestAction::Tick => "Tick",
                TestAction::Expired(_) => "Expired",
            }
        }
    }

    #[tokio::test]
    async fn interval_emits_repeatedly() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut timers = Timers::new(tx);

        timers.interval("tick", Duration::from_millis(20), || TestAction::Tick);

        for _ in 0..2 {
            let action = tokio::time::timeout(Duration::from_millis(200), rx.recv())
                .await
                .expect("timeout")
                .expect("channel closed");
            assert_eq!(action, TestAction::Tick);
        }
    }

    #[tokio::test]
    async fn cancel_stops_interval() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut timers = Timers::new(tx);

        timers.interval("tick", Duration::from_millis(10), || TestAction::Tick);
        assert!(timers.is_armed(&TimerKey::new("tick")));

        let _ = tokio::time::timeout(Duration::from_millis(50), rx.recv()).await;
        timers.cancel(&TimerKey::new("tick"));
        assert!(!timers.is_armed(&TimerKey::new("tick")));

        while rx.try_recv().is_ok() {}
        let result = tokio::time::timeout(Duration::from_millis(50), rx.recv()).await;
        assert!(result.is_err(), "no ticks after cancel");
    }

    #[tokio::test(start_paused = true)]
    async fn once_fires_after_delay() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut timers = Timers::new(tx);

        timers.once("dismiss", Duration::from_secs(4), TestAction::Expired(1));
        tokio::task::yield_now().await;

        tokio::time::advance(Duration::from_secs(3)).await;
        assert!(rx.try_recv().is_err(), "not yet expired");

        tokio::time::advance(Duration::from_secs(2)).await;
        tokio::task::yield_now().await;
        assert_eq!(rx.try_recv().ok(), Some(TestAction::Expired(1)));
    }

    #[tokio::test(start_paused = true)]
    async fn once_rearm_restarts_countdown() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut timers = Timers::new(tx);

        // First shot at t=0 with a 4 unit timeout, replaced at t=3.
        timers.once("dismiss", Duration::from_secs(4), TestAction::Expired(1));
        tokio::task::yield_now().await;
        tokio::time::advance(Duration::from_secs(3)).await;
        timers.once("dismiss", Duration::from_secs(4), TestAction::Expired(2));
        tokio::task::yield_now().await;

        // t=6: the original would have fired at t=4; nothing must arrive.
        tokio::time::advance(Duration::from_secs(3)).await;
        tokio::task::yield_now().await;
        assert!(rx.try_recv().is_err(), "replaced shot must not fire");

        // t=7: the replacement fires (armed at t=3, 4 units later).
        tokio::time::advance(Duration::from_secs(1)).await;
        tokio::task::yield_now().await;
        assert_eq!(rx.try_recv().ok(), Some(TestAction::Expired(2)));
    }

    #[tokio::test]
    async fn cancel_all_empties_registry() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut timers = Timers::new(tx);

        timers.interval("a", Duration::from_secs(10), || TestAction::Tick);
        timers.once("b", Duration::from_secs(10), TestAction::Expired(1));
        assert_eq!(timers.len(), 2);

        timers.cancel_all();
        assert!(timers.is_empty());
    }
}
