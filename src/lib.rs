//! # People Admin
//!
//! > **A headless client for the people administration backend.**
//!
//! The crate holds everything behind the people admin screens except the
//! pixels: the HTTP service for the `/people` collection, the error
//! interceptor, the application stores (theme, auth, drawer), the details/edit
//! screen and the side navigation menu. A renderer, or the bundled
//! `people-admin` CLI, drives them.
//!
//! ## Design
//!
//! ### Stores are actors
//! Application-wide state lives in [`StoreActor`](framework::StoreActor)
//! tasks. Each owns its state, applies actions one at a time, and publishes
//! every new state on a `watch` channel. Nothing is global: stores are created
//! by [`AdminApp::start`](lifecycle::AdminApp::start) and passed to whoever
//! needs them.
//!
//! ### Explicit results
//! Every remote operation returns `Result<_, ApiError>`. Failures have already
//! been through [`api::intercept`], so callers only see `Connection`,
//! `Unauthorized`, `Transport` or `Decode`.
//!
//! ### Screens are state machines
//! The details screen is a pure [`DetailsScreen`](screens::details::DetailsScreen)
//! that returns effects and commands, run by a
//! [`DetailsActor`](screens::details::DetailsActor) that performs them. Every
//! request carries a generation ticket, so late responses from superseded or
//! unmounted requests are dropped.
//!
//! ## Module Tour
//!
//! - [`api`]: transport seam, interceptor, [`PeopleService`](api::PeopleService).
//! - [`framework`]: the generic store actor.
//! - [`stores`]: theme, auth and drawer stores.
//! - [`screens`]: the details screen and dialogs.
//! - [`navigation`]: router and side menu.
//! - [`lifecycle`]: startup, shutdown and logging.
//! - [`mock`]: test doubles for the transport and dialogs.
//!
//! ## Running
//!
//! ```bash
//! # Against a json-server on the default port
//! RUST_LOG=info cargo run -- list
//! RUST_LOG=debug cargo run -- show 3
//! ```

pub mod api;
pub mod config;
pub mod framework;
pub mod lifecycle;
pub mod mock;
pub mod model;
pub mod navigation;
pub mod screens;
pub mod stores;
pub mod validation;
