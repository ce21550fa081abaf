use crate::actions::Action;
use crate::dispatcher::Dispatcher;
use crate::middleware::Middleware;
use crate::reducers::app_reducer::reduce;
use crate::state::AppState;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

/// Store - holds the list state and runs the Redux loop
///
/// Actions are processed one at a time on the thread owning the store:
/// middleware chain first, then the reducer. Actions dispatched by
/// middleware or by async tasks queue up on the channel and are applied in
/// order by [`Store::drain`] or [`Store::run_until`].
pub struct Store {
    state: AppState,
    middleware: Vec<Box<dyn Middleware>>,
    dispatcher: Dispatcher,
    action_rx: Receiver<Action>,
}

impl Store {
    pub fn new(initial_state: AppState) -> Self {
        let (action_tx, action_rx) = mpsc::channel();
        Self {
            state: initial_state,
            middleware: Vec::new(),
            dispatcher: Dispatcher::new(action_tx),
            action_rx,
        }
    }

    /// Add middleware to the store
    pub fn add_middleware(&mut self, middleware: Box<dyn Middleware>) {
        self.middleware.push(middleware);
    }

    /// Get the current state
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Get the dispatcher
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Process an action and everything it queued
    pub fn dispatch(&mut self, action: Action) {
        self.process(action);
        self.drain();
    }

    /// Apply queued actions without waiting
    pub fn drain(&mut self) {
        while let Ok(action) = self.action_rx.try_recv() {
            self.process(action);
        }
    }

    /// Apply queued actions until `done` holds or `timeout` expires
    ///
    /// Returns whether `done` holds for the final state.
    pub fn run_until(&mut self, timeout: Duration, done: impl Fn(&AppState) -> bool) -> bool {
        let deadline = Instant::now() + timeout;
        loop {
            self.drain();
            if done(&self.state) {
                return true;
            }

            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                log::debug!("Store: gave up waiting after {:?}", timeout);
                return false;
            }

            match self.action_rx.recv_timeout(remaining) {
                Ok(action) => self.process(action),
                Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => {
                    return done(&self.state);
                }
            }
        }
    }

    fn process(&mut self, action: Action) {
        let mut should_reduce = true;

        // Pass through middleware chain
        for middleware in &mut self.middleware {
            if !middleware.handle(&action, &self.state, &self.dispatcher) {
                should_reduce = false;
                break;
            }
        }

        if should_reduce {
            self.state = reduce(self.state.clone(), &action);
        }
    }
}

impl Drop for Store {
    fn drop(&mut self) {
        if !self.state.torn_down {
            self.process(Action::Teardown);
        }
    }
}
