//! Cooperative cancellation for ledger queries.
//!
//! A [`CancelTrigger`] fires once; every [`CancelHandle`] subscribed to it
//! observes the cancellation. Handles are plain `watch` receivers, so a
//! service's existing stop receiver can be passed in directly.

use tokio::sync::watch;

/// Creates a connected trigger/handle pair.
pub fn cancellation() -> (CancelTrigger, CancelHandle) {
    let (sender, receiver) = watch::channel(false);
    (CancelTrigger { sender }, CancelHandle { receiver })
}

#[derive(Debug)]
pub struct CancelTrigger {
    sender: watch::Sender<bool>,
}

impl CancelTrigger {
    /// Signals cancellation to every subscribed handle.
    pub fn cancel(&self) {
        self.sender.send_replace(true);
    }

    /// Subscribes a new handle to this trigger.
    pub fn handle(&self) -> CancelHandle {
        CancelHandle {
            receiver: self.sender.subscribe(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CancelHandle {
    receiver: watch::Receiver<bool>,
}

impl CancelHandle {
    pub fn is_cancelled(&self) -> bool {
        *self.receiver.borrow()
    }

    /// Resolves once cancellation is signalled.
    ///
    /// If the trigger is dropped without firing, this never resolves.
    pub async fn cancelled(&mut self) {
        loop {
            if *self.receiver.borrow_and_update() {
                return;
            }
            if self.receiver.changed().await.is_err() {
                if *self.receiver.borrow() {
                    return;
                }
                std::future::pending::<()>().await;
            }
        }
    }
}

impl From<watch::Receiver<bool>> for CancelHandle {
    fn from(receiver: watch::Receiver<bool>) -> Self {
        Self { receiver }
    }
}
