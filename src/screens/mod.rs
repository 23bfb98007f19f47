//! Screens and the dialogs they show.

pub mod details;
pub mod dialogs;
pub mod error;

pub use dialogs::{ConsoleDialogs, Dialogs};
pub use error::ScreenError;
