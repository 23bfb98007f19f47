//! # Store Actor
//!
//! A `StoreActor<S>` owns one piece of application state (theme, auth, drawer)
//! inside its own Tokio task. Every change goes through [`Store::reduce`] on
//! that task, so the state needs no locks. Each new state is published on a
//! `watch` channel, which is how renderers read it reactively.
//!
//! The canonical wiring mirrors the rest of the application:
//!
//! 1. **Create**: `StoreActor::new(initial, buffer)` returns the actor and a
//!    cloneable [`StoreClient`].
//! 2. **Run**: spawn `actor.run()` on the runtime.
//! 3. **Shut down**: call [`StoreClient::shutdown`], or drop every client.
//!
//! ```rust
//! use people_admin::framework::{Store, StoreActor};
//!
//! #[derive(Clone, Debug, Default)]
//! struct Counter(u32);
//!
//! impl Store for Counter {
//!     type Action = u32;
//!     fn reduce(&mut self, action: u32) {
//!         self.0 += action;
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = StoreActor::new(Counter::default(), 8);
//!     let handle = tokio::spawn(actor.run());
//!
//!     let state = client.dispatch(2).await.unwrap();
//!     assert_eq!(state.0, 2);
//!     assert_eq!(client.current().0, 2);
//!
//!     client.shutdown().await.unwrap();
//!     handle.await.unwrap();
//! }
//! ```

use super::error::StoreError;
use std::fmt::Debug;
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, info};

/// State that can be owned by a [`StoreActor`].
pub trait Store: Clone + Debug + Send + Sync + 'static {
    /// The changes this store accepts.
    type Action: Send + Debug + 'static;

    /// Applies one action. Runs on the store's task only.
    fn reduce(&mut self, action: Self::Action);
}

/// Type alias for the one-shot response channel used by stores.
pub type Response<T> = oneshot::Sender<T>;

/// Messages understood by a [`StoreActor`].
#[derive(Debug)]
pub enum StoreRequest<S: Store> {
    Dispatch {
        action: S::Action,
        respond_to: Response<S>,
    },
    Get {
        respond_to: Response<S>,
    },
    Shutdown,
}

/// The server half of a store: owns the state and the receiving end.
pub struct StoreActor<S: Store> {
    receiver: mpsc::Receiver<StoreRequest<S>>,
    state: S,
    publisher: watch::Sender<S>,
}

impl<S: Store> StoreActor<S> {
    /// Creates the actor and its client. `buffer_size` bounds the number of
    /// queued requests; senders wait when it is full.
    pub fn new(initial: S, buffer_size: usize) -> (Self, StoreClient<S>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let (publisher, watcher) = watch::channel(initial.clone());
        let actor = Self {
            receiver,
            state: initial,
            publisher,
        };
        (actor, StoreClient::new(sender, watcher))
    }

    /// Processes requests until a `Shutdown` arrives or every client is gone.
    pub async fn run(mut self) {
        let store_type = std::any::type_name::<S>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(store_type, "Store started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StoreRequest::Dispatch { action, respond_to } => {
                    debug!(store_type, ?action, "Dispatch");
                    self.state.reduce(action);
                    self.publisher.send_replace(self.state.clone());
                    let _ = respond_to.send(self.state.clone());
                }
                StoreRequest::Get { respond_to } => {
                    let _ = respond_to.send(self.state.clone());
                }
                StoreRequest::Shutdown => break,
            }
        }

        info!(store_type, state = ?self.state, "Shutdown");
    }
}

/// Cloneable handle to a running [`StoreActor`].
#[derive(Debug)]
pub struct StoreClient<S: Store> {
    sender: mpsc::Sender<StoreRequest<S>>,
    watcher: watch::Receiver<S>,
}

impl<S: Store> Clone for StoreClient<S> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
            watcher: self.watcher.clone(),
        }
    }
}

impl<S: Store> StoreClient<S> {
    pub fn new(sender: mpsc::Sender<StoreRequest<S>>, watcher: watch::Receiver<S>) -> Self {
        Self { sender, watcher }
    }

    /// Applies `action` and returns the resulting state.
    pub async fn dispatch(&self, action: S::Action) -> Result<S, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Dispatch { action, respond_to })
            .await
            .map_err(|_| StoreError::StoreClosed)?;
        response.await.map_err(|_| StoreError::StoreDropped)
    }

    /// Asks the actor for its state. Use [`current`](Self::current) when a
    /// possibly slightly stale snapshot is fine.
    pub async fn get(&self) -> Result<S, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Get { respond_to })
            .await
            .map_err(|_| StoreError::StoreClosed)?;
        response.await.map_err(|_| StoreError::StoreDropped)
    }

    /// Last published state, without a round trip.
    pub fn current(&self) -> S {
        self.watcher.borrow().clone()
    }

    /// A receiver notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<S> {
        self.watcher.clone()
    }

    /// Stops the actor. Other clones get [`StoreError::StoreClosed`] afterwards.
    pub async fn shutdown(&self) -> Result<(), StoreError> {
        self.sender
            .send(StoreRequest::Shutdown)
            .await
            .map_err(|_| StoreError::StoreClosed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Default)]
    struct Tally {
        total: i64,
        changes: u32,
    }

    #[derive(Debug)]
    enum TallyAction {
        Add(i64),
        Reset,
    }

    impl Store for Tally {
        type Action = TallyAction;

        fn reduce(&mut self, action: TallyAction) {
            match action {
                TallyAction::Add(n) => self.total += n,
                TallyAction::Reset => self.total = 0,
            }
            self.changes += 1;
        }
    }

    #[tokio::test]
    async fn test_dispatch_get_and_subscribe() {
        let (actor, client) = StoreActor::new(Tally::default(), 4);
        let handle = tokio::spawn(actor.run());
        let mut updates = client.subscribe();

        let state = client.dispatch(TallyAction::Add(5)).await.unwrap();
        assert_eq!(state.total, 5);

        updates.changed().await.unwrap();
        assert_eq!(updates.borrow().total, 5);

        client.dispatch(TallyAction::Reset).await.unwrap();
        let fetched = client.get().await.unwrap();
        assert_eq!(fetched, Tally { total: 0, changes: 2 });
        assert_eq!(client.current(), fetched);

        client.shutdown().await.unwrap();
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_closed_store_reports_error() {
        let (actor, client) = StoreActor::new(Tally::default(), 4);
        let handle = tokio::spawn(actor.run());
        let other = client.clone();

        client.shutdown().await.unwrap();
        handle.await.unwrap();

        let result = other.dispatch(TallyAction::Add(1)).await;
        assert!(matches!(result, Err(StoreError::StoreClosed)));
        // The last published state is still readable.
        assert_eq!(other.current().total, 0);
    }

    #[tokio::test]
    async fn test_dropping_all_clients_stops_the_actor() {
        let (actor, client) = StoreActor::new(Tally::default(), 4);
        let handle = tokio::spawn(actor.run());

        drop(client);
        handle.await.unwrap();
    }
}
