//! Background feed fetching.
//!
//! Each load request gets its own short-lived thread that performs the fetch
//! and sends the outcome to the UI thread over an [`mpsc`] channel. The UI
//! thread drains the channel every tick and applies results to
//! [`NewsState`](crate::state::NewsState), which discards any that have been
//! superseded.
//!
//! In-flight fetches are never cancelled; a stale one simply finishes and its
//! message is ignored.

use std::sync::mpsc;
use std::sync::Arc;
use std::thread;

use crate::source::{Article, FeedSource, FetchError};
use crate::state::LoadTicket;

/// Messages sent from a fetch thread to the UI thread.
pub struct LoadMsg {
    pub ticket: LoadTicket,
    pub result: Result<Vec<Article>, FetchError>,
}

/// Runs fetches off the UI thread.
pub struct Worker {
    source: Arc<dyn FeedSource>,
    tx: mpsc::Sender<LoadMsg>,
}

impl Worker {
    /// Create a worker and the receiver the main loop should drain.
    pub fn new(source: Arc<dyn FeedSource>) -> (Self, mpsc::Receiver<LoadMsg>) {
        let (tx, rx) = mpsc::channel();
        (Self { source, tx }, rx)
    }

    /// Fetch `ticket.filter` on a new thread.
    pub fn spawn(&self, ticket: LoadTicket) {
        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();

        thread::spawn(move || {
            let result = source.fetch(ticket.filter);
            // If the receiver is gone the main thread has exited.
            let _ = tx.send(LoadMsg { ticket, result });
        });
    }
}
