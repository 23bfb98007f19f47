//! # Logging
//!
//! [`setup_tracing`] installs the global `tracing` subscriber once, at the
//! start of `main`. Levels come from `RUST_LOG`:
//!
//! ```bash
//! # Requests, navigation and store changes
//! RUST_LOG=info people-admin show 3
//!
//! # Payloads and dispatched actions as well
//! RUST_LOG=debug people-admin create --name "Ada Lovelace" --email ada@example.com --city 1
//! ```
//!
//! With `debug`, service calls log their payload once on entry:
//!
//! ```text
//! DEBUG create: create called data=PersonCreate { complete_name: "Ada Lovelace", email: "ada@example.com", city_id: CityId(1) }
//! INFO create: Person created id=12
//! ```
//!
//! Tokens never reach the logs; [`AuthState`](crate::stores::AuthState)
//! only reports whether one is present.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // Span names already say where a line comes from
        .compact()
        .init();
}
