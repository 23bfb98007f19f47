//! Routing and the side navigation menu.

pub mod menu;
pub mod router;

pub use menu::{DrawerVariant, MenuItemView, MenuView, SideMenu, Viewport, SM_BREAKPOINT};
pub use router::{path_matches, Location, Navigator, Router, HISTORY_LIMIT};

use crate::model::PersonId;

/// The people listing.
pub const PEOPLE_LIST_ROUTE: &str = "/pessoas/";

/// Route segment that opens the details screen in create mode.
pub const NEW_PERSON_SEGMENT: &str = "nova";

pub fn person_details_route(id: PersonId) -> String {
    format!("/pessoas/detalhe/{id}")
}

pub fn new_person_route() -> String {
    format!("/pessoas/detalhe/{NEW_PERSON_SEGMENT}")
}
