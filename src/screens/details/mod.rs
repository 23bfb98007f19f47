//! The person details/edit screen.

pub mod actor;
pub mod state;

pub use actor::{open, DetailsActor, DetailsHandle, DetailsRequest, Input};
pub use state::{
    Command, DetailsRoute, DetailsScreen, DetailsView, Effect, Mode, Outcome, ScreenState, Ticket,
    ToolbarView, Transition, DELETED_MESSAGE, DELETE_PROMPT, NEW_PERSON_TITLE,
};
