//! Application-wide stores.
//!
//! Each store is a [`StoreActor`](crate::framework::StoreActor) wrapped in a
//! typed client. They are created by [`AdminApp::start`](crate::lifecycle::AdminApp::start)
//! and passed explicitly to whatever needs them.

pub mod auth;
pub mod drawer;
pub mod theme;

pub use auth::{AuthAction, AuthClient, AuthState};
pub use drawer::{DrawerAction, DrawerClient, DrawerState};
pub use theme::{ThemeAction, ThemeClient, ThemeState};
