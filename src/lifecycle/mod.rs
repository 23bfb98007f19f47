pub mod app;
pub mod tracing;

pub use self::app::{AdminApp, AppError};
pub use self::tracing::setup_tracing;
