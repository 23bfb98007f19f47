//! HTTP access to the people backend.
//!
//! - [`Transport`] is the seam over the HTTP client ([`ReqwestTransport`] in
//!   production, [`MockTransport`](crate::mock::MockTransport) in tests).
//! - [`intercept`] relabels network and unauthorized failures.
//! - [`PeopleService`] maps the CRUD operations onto requests.

pub mod error;
pub mod interceptor;
pub mod people;
pub mod transport;

pub use error::*;
pub use interceptor::intercept;
pub use people::*;
pub use transport::*;
