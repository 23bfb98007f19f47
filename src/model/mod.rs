//! Pure data structures shared by the service, the stores and the screens.

pub mod drawer;
pub mod person;
pub mod theme;

pub use drawer::*;
pub use person::*;
pub use theme::*;
