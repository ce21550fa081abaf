//! Dispatcher for middleware action dispatch
//!
//! Actions dispatched here re-enter the middleware chain from the beginning.
//! The dispatcher is the only piece of the store that crosses threads:
//! async tasks hold a clone and report their results through it.

use crate::actions::Action;
use std::sync::mpsc::Sender;

#[derive(Clone)]
pub struct Dispatcher {
    action_tx: Sender<Action>,
}

impl Dispatcher {
    pub fn new(action_tx: Sender<Action>) -> Self {
        Self { action_tx }
    }

    /// Dispatch an action to be processed through the middleware chain
    ///
    /// Dispatching after the store is gone is a no-op.
    pub fn dispatch(&self, action: Action) {
        if let Err(e) = self.action_tx.send(action) {
            log::debug!("Dispatcher: store is gone, dropping {:?}", e.0);
        }
    }
}
