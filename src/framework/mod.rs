//! Generic store actor used by every application-wide store.
//!
//! # Main Components
//!
//! - [`Store`] - Trait implemented by state that lives in a store
//! - [`StoreActor`] - Task that owns the state and applies actions
//! - [`StoreClient`] - Cloneable handle for dispatching and reading
//! - [`StoreError`] - Failures of the plumbing (closed or dropped store)

pub mod error;
pub mod store;

pub use error::StoreError;
pub use store::{Store, StoreActor, StoreClient, StoreRequest};
