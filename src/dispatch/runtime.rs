//! The event/action loop.
//!
//! One tokio task polls crossterm for terminal events; the loop selects over
//! terminal events and the action channel, runs the reducer for each action,
//! hands declared effects to the caller's handler, and redraws only when the
//! reducer reports a state change.

use std::io;
use std::time::Duration;

use ratatui::backend::Backend;
use ratatui::layout::Rect;
use ratatui::{Frame, Terminal};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::dispatch::store::{EffectReducer, EffectStore};
use crate::dispatch::tasks::TaskManager;
use crate::dispatch::timers::Timers;
use crate::dispatch::Action;

const POLL_TIMEOUT: Duration = Duration::from_millis(10);
const LOOP_SLEEP: Duration = Duration::from_millis(16);

/// Spawn the crossterm polling task. Polling runs off the main loop so the
/// loop can suspend on the action channel; the token stops the poller on
/// shutdown.
pub fn spawn_event_poller(
    tx: mpsc::UnboundedSender<crossterm::event::Event>,
    cancel_token: CancellationToken,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = cancel_token.cancelled() => {
                    // Drain whatever crossterm buffered before exiting.
                    while crossterm::event::poll(Duration::ZERO).unwrap_or(false) {
                        let _ = crossterm::event::read();
                    }
                    break;
                }
                _ = tokio::time::sleep(LOOP_SLEEP) => {
                    while crossterm::event::poll(POLL_TIMEOUT).unwrap_or(false) {
                        if let Ok(event) = crossterm::event::read() {
                            if tx.send(event).is_err() {
                                debug!("event channel closed, stopping poller");
                                return;
                            }
                        }
                    }
                }
            }
        }
    })
}

/// Context handed to the effect handler: spawn keyed tasks and arm keyed
/// timers. Completions re-enter the loop as actions through either one.
pub struct EffectContext<'a, A: Action> {
    tasks: &'a mut TaskManager<A>,
    timers: &'a mut Timers<A>,
}

impl<A: Action> EffectContext<'_, A> {
    pub fn tasks(&mut self) -> &mut TaskManager<A> {
        self.tasks
    }

    pub fn timers(&mut self) -> &mut Timers<A> {
        self.timers
    }
}

/// Owns the store, the action channel, and every task and timer. Dropping
/// the runtime aborts all of them.
pub struct Runtime<S, A: Action, E> {
    store: EffectStore<S, A, E>,
    action_tx: mpsc::UnboundedSender<A>,
    action_rx: mpsc::UnboundedReceiver<A>,
    tasks: TaskManager<A>,
    timers: Timers<A>,
    should_render: bool,
}

impl<S: 'static, A: Action, E> Runtime<S, A, E> {
    pub fn new(state: S, reducer: EffectReducer<S, A, E>) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let tasks = TaskManager::new(action_tx.clone());
        let timers = Timers::new(action_tx.clone());
        Self {
            store: EffectStore::new(state, reducer),
            action_tx,
            action_rx,
            tasks,
            timers,
            should_render: true,
        }
    }

    /// Queue an action for the next loop iteration.
    pub fn enqueue(&self, action: A) {
        let _ = self.action_tx.send(action);
    }

    pub fn action_tx(&self) -> mpsc::UnboundedSender<A> {
        self.action_tx.clone()
    }

    pub fn state(&self) -> &S {
        self.store.state()
    }

    pub fn timers(&mut self) -> &mut Timers<A> {
        &mut self.timers
    }

    pub fn tasks(&mut self) -> &mut TaskManager<A> {
        &mut self.tasks
    }

    /// Run until `should_quit` matches a dispatched action.
    pub async fn run<B, FRender, FEvent, FQuit, FEffect>(
        &mut self,
        terminal: &mut Terminal<B>,
        mut render: FRender,
        mut map_event: FEvent,
        mut should_quit: FQuit,
        mut handle_effect: FEffect,
    ) -> io::Result<()>
    where
        B: Backend,
        FRender: FnMut(&mut Frame, Rect, &S),
        FEvent: FnMut(&crossterm::event::Event, &S) -> Vec<A>,
        FQuit: FnMut(&A) -> bool,
        FEffect: FnMut(E, &mut EffectContext<A>),
    {
        let (event_tx, mut event_rx) = mpsc::unbounded_channel();
        let cancel_token = CancellationToken::new();
        let _poller = spawn_event_poller(event_tx, cancel_token.clone());

        loop {
            if self.should_render {
                let state = self.store.state();
                terminal.draw(|frame| render(frame, frame.area(), state))?;
                self.should_render = false;
            }

            tokio::select! {
                Some(event) = event_rx.recv() => {
                    if matches!(event, crossterm::event::Event::Resize(_, _)) {
                        self.should_render = true;
                    }
                    for action in map_event(&event, self.store.state()) {
                        let _ = self.action_tx.send(action);
                    }
                }

                Some(action) = self.action_rx.recv() => {
                    if should_quit(&action) {
                        break;
                    }

                    let result = self.store.dispatch(action);
                    if result.has_effects() {
                        let mut ctx = EffectContext {
                            tasks: &mut self.tasks,
                            timers: &mut self.timers,
                        };
                        for effect in result.effects {
                            handle_effect(effect, &mut ctx);
                        }
                    }
                    self.should_render |= result.changed;
                }

                else => break,
            }
        }

        cancel_token.cancel();
        self.timers.cancel_all();
        self.tasks.cancel_all();
        Ok(())
    }
}
