//! # Details Screen State Machine
//!
//! [`DetailsScreen`] is the synchronous core of the person details/edit
//! screen. It never performs I/O: every operation returns a [`Transition`]
//! holding at most one remote request ([`Effect`]) and the [`Command`]s
//! (navigation, alerts) the owner must carry out. The owner runs the effect
//! and feeds the result back through [`DetailsScreen::apply`].
//!
//! Each request is issued with a [`Ticket`]. Only the most recent ticket is
//! live: outcomes carrying an older one are discarded, as are outcomes that
//! arrive after the screen was closed.

use crate::api::ApiError;
use crate::model::{CityId, Person, PersonCreate, PersonDraft, PersonId};
use crate::navigation::{new_person_route, person_details_route, NEW_PERSON_SEGMENT, PEOPLE_LIST_ROUTE};
use crate::validation::{validate_person, PersonField};
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

pub const NEW_PERSON_TITLE: &str = "New person";
pub const DELETE_PROMPT: &str = "Do you really want to delete?";
pub const DELETED_MESSAGE: &str = "Record deleted successfully!";

/// What the route segment asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailsRoute {
    New,
    Existing(PersonId),
    /// Neither the new-record token nor a number.
    Invalid(String),
}

impl DetailsRoute {
    pub fn parse(segment: &str) -> Self {
        let segment = segment.trim();
        if segment == NEW_PERSON_SEGMENT {
            return DetailsRoute::New;
        }
        match segment.parse::<u64>() {
            Ok(id) => DetailsRoute::Existing(PersonId(id)),
            Err(_) => DetailsRoute::Invalid(segment.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    New,
    Existing(PersonId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenState {
    /// A fetch or save is in flight; inputs are disabled.
    Loading,
    Editing(Mode),
    /// The screen navigated away or was unmounted. Terminal.
    Closed,
}

/// Identifies one issued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket {
    generation: u64,
}

impl Ticket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// A remote call the owner must perform.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Fetch(PersonId),
    Create(PersonCreate),
    Update(PersonId, Person),
    Delete(PersonId),
}

/// The result of an [`Effect`], fed back through [`DetailsScreen::apply`].
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Fetched(Result<Person, ApiError>),
    Created(Result<PersonId, ApiError>),
    Updated(Result<(), ApiError>),
    Deleted(Result<(), ApiError>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Navigate(String),
    Alert(String),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Transition {
    pub request: Option<(Ticket, Effect)>,
    pub commands: Vec<Command>,
}

impl Transition {
    fn none() -> Self {
        Self::default()
    }

    fn request(ticket: Ticket, effect: Effect) -> Self {
        Self {
            request: Some((ticket, effect)),
            commands: Vec::new(),
        }
    }

    fn commands(commands: Vec<Command>) -> Self {
        Self {
            request: None,
            commands,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolbarView {
    pub show_save: bool,
    pub show_save_and_back: bool,
    pub show_new: bool,
    pub show_delete: bool,
}

/// Snapshot of everything a renderer shows.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailsView {
    pub state: ScreenState,
    pub title: String,
    pub draft: PersonDraft,
    pub errors: BTreeMap<PersonField, String>,
    pub toolbar: ToolbarView,
    pub is_loading: bool,
    /// A request is in flight, including deletes, which keep the form enabled.
    pub busy: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PendingKind {
    Fetch,
    Save { close: bool },
    Delete,
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    ticket: Ticket,
    kind: PendingKind,
}

#[derive(Debug, Clone)]
pub struct DetailsScreen {
    route: DetailsRoute,
    state: ScreenState,
    /// Mode to return to once a request settles.
    mode: Mode,
    title: String,
    draft: PersonDraft,
    errors: BTreeMap<PersonField, String>,
    generation: u64,
    pending: Option<Pending>,
}

impl DetailsScreen {
    pub fn new(route: DetailsRoute) -> Self {
        let mode = match &route {
            DetailsRoute::Existing(id) => Mode::Existing(*id),
            DetailsRoute::New | DetailsRoute::Invalid(_) => Mode::New,
        };
        Self {
            route,
            state: ScreenState::Loading,
            mode,
            title: String::new(),
            draft: PersonDraft::default(),
            errors: BTreeMap::new(),
            generation: 0,
            pending: None,
        }
    }

    /// Opens the screen for `segment`, the last path segment of the route.
    pub fn for_segment(segment: &str) -> Self {
        Self::new(DetailsRoute::parse(segment))
    }

    pub fn mount(&mut self) -> Transition {
        match self.route.clone() {
            DetailsRoute::New => {
                self.draft = PersonDraft::default();
                self.title = NEW_PERSON_TITLE.to_string();
                self.state = ScreenState::Editing(Mode::New);
                Transition::none()
            }
            DetailsRoute::Existing(id) => {
                self.state = ScreenState::Loading;
                let ticket = self.issue(PendingKind::Fetch);
                Transition::request(ticket, Effect::Fetch(id))
            }
            DetailsRoute::Invalid(segment) => {
                warn!(%segment, "Invalid person id in route");
                self.close(vec![Command::Alert(format!("Invalid record id: {segment}"))])
            }
        }
    }

    pub fn state(&self) -> ScreenState {
        self.state
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn draft(&self) -> &PersonDraft {
        &self.draft
    }

    pub fn errors(&self) -> &BTreeMap<PersonField, String> {
        &self.errors
    }

    pub fn is_closed(&self) -> bool {
        self.state == ScreenState::Closed
    }

    /// The ticket of the request currently awaited, if any.
    pub fn in_flight(&self) -> Option<Ticket> {
        self.pending.map(|p| p.ticket)
    }

    /// An existing record with no fetch or save in flight.
    pub fn can_delete(&self) -> bool {
        matches!(self.state, ScreenState::Editing(Mode::Existing(_)))
    }

    pub fn toolbar(&self) -> ToolbarView {
        let existing = matches!(self.mode, Mode::Existing(_));
        ToolbarView {
            show_save: true,
            show_save_and_back: true,
            show_new: existing,
            show_delete: existing,
        }
    }

    pub fn view(&self) -> DetailsView {
        DetailsView {
            state: self.state,
            title: self.title.clone(),
            draft: self.draft.clone(),
            errors: self.errors.clone(),
            toolbar: self.toolbar(),
            is_loading: self.state == ScreenState::Loading,
            busy: self.pending.is_some(),
        }
    }

    /// Updates the name. The title follows it live.
    pub fn edit_name(&mut self, value: impl Into<String>) {
        if !self.accepts_edits() {
            return;
        }
        self.draft.complete_name = value.into();
        self.title = self.draft.complete_name.clone();
        self.errors.remove(&PersonField::CompleteName);
    }

    pub fn edit_email(&mut self, value: impl Into<String>) {
        if !self.accepts_edits() {
            return;
        }
        self.draft.email = value.into();
        self.errors.remove(&PersonField::Email);
    }

    pub fn edit_city(&mut self, city_id: Option<CityId>) {
        if !self.accepts_edits() {
            return;
        }
        self.draft.city_id = city_id;
        self.errors.remove(&PersonField::CityId);
    }

    /// Validates the form and, if valid, issues a create or update.
    ///
    /// With `close` set, a successful save navigates back to the list.
    pub fn save(&mut self, close: bool) -> Transition {
        if self.is_closed() || self.is_fetching() {
            return Transition::none();
        }
        let payload = match validate_person(&self.draft) {
            Ok(payload) => payload,
            Err(errors) => {
                debug!(count = errors.len(), "Validation failed");
                self.errors = errors.by_field();
                return Transition::none();
            }
        };
        self.errors.clear();
        self.state = ScreenState::Loading;
        let ticket = self.issue(PendingKind::Save { close });
        let effect = match self.mode {
            Mode::New => Effect::Create(payload),
            Mode::Existing(id) => Effect::Update(id, Person::from_create(id, payload)),
        };
        Transition::request(ticket, effect)
    }

    /// Deletes the current record. `confirmed` is the user's answer to
    /// [`DELETE_PROMPT`]; without it nothing happens. New records cannot be
    /// deleted.
    pub fn delete(&mut self, confirmed: bool) -> Transition {
        let id = match self.mode {
            Mode::Existing(id) if confirmed && self.can_delete() => id,
            _ => return Transition::none(),
        };
        let ticket = self.issue(PendingKind::Delete);
        Transition::request(ticket, Effect::Delete(id))
    }

    pub fn back(&mut self) -> Transition {
        if self.is_closed() {
            return Transition::none();
        }
        self.close(Vec::new())
    }

    pub fn new_record(&mut self) -> Transition {
        if self.is_closed() {
            return Transition::none();
        }
        self.state = ScreenState::Closed;
        self.pending = None;
        Transition::commands(vec![Command::Navigate(new_person_route())])
    }

    /// Closes the screen without navigating. Any outcome still on its way
    /// will be discarded.
    pub fn unmount(&mut self) {
        self.state = ScreenState::Closed;
        self.pending = None;
    }

    /// Applies the outcome of the request identified by `ticket`.
    pub fn apply(&mut self, ticket: Ticket, outcome: Outcome) -> Transition {
        let pending = match self.pending {
            Some(pending) if pending.ticket == ticket && !self.is_closed() => pending,
            _ => {
                debug!(generation = ticket.generation, "Discarding stale outcome");
                return Transition::none();
            }
        };
        self.pending = None;

        match (pending.kind, outcome) {
            (PendingKind::Fetch, Outcome::Fetched(Ok(person))) => {
                info!(id = %person.id, "Person loaded");
                self.title = person.complete_name.clone();
                self.draft = PersonDraft::from(&person);
                self.state = ScreenState::Editing(self.mode);
                Transition::none()
            }
            (PendingKind::Fetch, Outcome::Fetched(Err(error))) => {
                warn!(%error, "Failed to load person");
                self.close(vec![Command::Alert(error.to_string())])
            }
            (PendingKind::Save { close }, Outcome::Created(Ok(id))) => {
                info!(%id, "Person created");
                if close {
                    return self.close(Vec::new());
                }
                self.mode = Mode::Existing(id);
                self.state = ScreenState::Editing(self.mode);
                Transition::commands(vec![Command::Navigate(person_details_route(id))])
            }
            (PendingKind::Save { close }, Outcome::Updated(Ok(()))) => {
                if close {
                    return self.close(Vec::new());
                }
                self.state = ScreenState::Editing(self.mode);
                Transition::none()
            }
            (PendingKind::Save { .. }, Outcome::Created(Err(error)))
            | (PendingKind::Save { .. }, Outcome::Updated(Err(error))) => {
                warn!(%error, "Failed to save person");
                self.state = ScreenState::Editing(self.mode);
                Transition::commands(vec![Command::Alert(error.to_string())])
            }
            (PendingKind::Delete, Outcome::Deleted(Ok(()))) => {
                info!("Person deleted");
                self.close(vec![Command::Alert(DELETED_MESSAGE.to_string())])
            }
            (PendingKind::Delete, Outcome::Deleted(Err(error))) => {
                warn!(%error, "Failed to delete person");
                Transition::commands(vec![Command::Alert(error.to_string())])
            }
            (kind, outcome) => {
                warn!(?kind, ?outcome, "Outcome does not match the pending request");
                self.pending = Some(pending);
                Transition::none()
            }
        }
    }

    fn issue(&mut self, kind: PendingKind) -> Ticket {
        self.generation += 1;
        let ticket = Ticket {
            generation: self.generation,
        };
        self.pending = Some(Pending { ticket, kind });
        ticket
    }

    /// Runs `commands`, then navigates to the list and closes.
    fn close(&mut self, mut commands: Vec<Command>) -> Transition {
        self.state = ScreenState::Closed;
        self.pending = None;
        commands.push(Command::Navigate(PEOPLE_LIST_ROUTE.to_string()));
        Transition::commands(commands)
    }

    fn accepts_edits(&self) -> bool {
        matches!(self.state, ScreenState::Editing(_))
    }

    fn is_fetching(&self) -> bool {
        matches!(
            self.pending,
            Some(Pending {
                kind: PendingKind::Fetch,
                ..
            })
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::TransportError;

    fn person(id: u64) -> Person {
        Person {
            id: PersonId(id),
            complete_name: "Grace Hopper".to_string(),
            email: "grace@navy.mil".to_string(),
            city_id: CityId(2),
        }
    }

    fn loaded(id: u64) -> DetailsScreen {
        let mut screen = DetailsScreen::for_segment(&id.to_string());
        let (ticket, _) = screen.mount().request.unwrap();
        screen.apply(ticket, Outcome::Fetched(Ok(person(id))));
        screen
    }

    fn list() -> Command {
        Command::Navigate(PEOPLE_LIST_ROUTE.to_string())
    }

    #[test]
    fn test_route_parsing() {
        assert_eq!(DetailsRoute::parse("nova"), DetailsRoute::New);
        assert_eq!(DetailsRoute::parse("12"), DetailsRoute::Existing(PersonId(12)));
        assert_eq!(
            DetailsRoute::parse("abc"),
            DetailsRoute::Invalid("abc".to_string())
        );
    }

    #[test]
    fn test_new_record_never_fetches() {
        let mut screen = DetailsScreen::for_segment("nova");
        let transition = screen.mount();

        assert_eq!(transition, Transition::default());
        assert_eq!(screen.state(), ScreenState::Editing(Mode::New));
        assert_eq!(screen.title(), NEW_PERSON_TITLE);
        assert_eq!(screen.draft(), &PersonDraft::default());
        assert!(!screen.toolbar().show_delete);
        assert!(!screen.toolbar().show_new);
    }

    #[test]
    fn test_fetch_success_sets_title_and_form() {
        let screen = loaded(4);
        assert_eq!(screen.state(), ScreenState::Editing(Mode::Existing(PersonId(4))));
        assert_eq!(screen.title(), "Grace Hopper");
        assert_eq!(screen.draft().city_id, Some(CityId(2)));
        assert!(screen.toolbar().show_delete);
    }

    #[test]
    fn test_fetch_failure_alerts_and_navigates_once() {
        let mut screen = DetailsScreen::for_segment("9");
        let (ticket, effect) = screen.mount().request.unwrap();
        assert_eq!(effect, Effect::Fetch(PersonId(9)));
        assert!(screen.view().is_loading);

        let transition = screen.apply(ticket, Outcome::Fetched(Err(ApiError::Connection)));
        assert_eq!(
            transition.commands,
            vec![Command::Alert("connection error".to_string()), list()]
        );
        assert!(screen.is_closed());

        // A duplicate delivery changes nothing.
        let again = screen.apply(ticket, Outcome::Fetched(Err(ApiError::Connection)));
        assert!(again.commands.is_empty());
    }

    #[test]
    fn test_invalid_route_closes_without_fetch() {
        let mut screen = DetailsScreen::for_segment("abc");
        let transition = screen.mount();
        assert!(transition.request.is_none());
        assert_eq!(transition.commands.last(), Some(&list()));
        assert!(screen.is_closed());
    }

    #[test]
    fn test_short_name_blocks_save() {
        let mut screen = DetailsScreen::for_segment("nova");
        screen.mount();
        screen.edit_name("Al");
        screen.edit_email("al@example.com");
        screen.edit_city(Some(CityId(1)));

        let transition = screen.save(false);
        assert!(transition.request.is_none());
        assert_eq!(
            screen.errors().get(&PersonField::CompleteName).map(String::as_str),
            Some("completeName must be at least 3 characters")
        );
        assert_eq!(screen.errors().len(), 1);
        assert_eq!(screen.state(), ScreenState::Editing(Mode::New));
    }

    #[test]
    fn test_bad_email_blocks_save_and_edit_clears_error() {
        let mut screen = loaded(1);
        screen.edit_email("not-an-email");

        assert!(screen.save(false).request.is_none());
        assert!(screen.errors().contains_key(&PersonField::Email));

        screen.edit_email("grace@example.com");
        assert!(screen.errors().is_empty());
    }

    #[test]
    fn test_name_edit_updates_title() {
        let mut screen = loaded(1);
        screen.edit_name("Grace B. Hopper");
        assert_eq!(screen.title(), "Grace B. Hopper");
    }

    #[test]
    fn test_edits_ignored_while_loading() {
        let mut screen = DetailsScreen::for_segment("3");
        screen.mount();
        screen.edit_name("typed too early");
        assert_eq!(screen.draft().complete_name, "");
        assert!(screen.save(false).request.is_none());
    }

    #[test]
    fn test_create_success_navigates_to_new_record() {
        let mut screen = DetailsScreen::for_segment("nova");
        screen.mount();
        screen.edit_name("Ada Lovelace");
        screen.edit_email("ada@example.com");
        screen.edit_city(Some(CityId(5)));

        let (ticket, effect) = screen.save(false).request.unwrap();
        assert!(matches!(effect, Effect::Create(ref p) if p.complete_name == "Ada Lovelace"));
        assert_eq!(screen.state(), ScreenState::Loading);

        let transition = screen.apply(ticket, Outcome::Created(Ok(PersonId(77))));
        assert_eq!(
            transition.commands,
            vec![Command::Navigate("/pessoas/detalhe/77".to_string())]
        );
        assert_eq!(screen.state(), ScreenState::Editing(Mode::Existing(PersonId(77))));
        assert!(screen.toolbar().show_delete);
    }

    #[test]
    fn test_save_and_close_returns_to_list() {
        let mut screen = loaded(2);
        let (ticket, effect) = screen.save(true).request.unwrap();
        assert_eq!(effect, Effect::Update(PersonId(2), person(2)));

        let transition = screen.apply(ticket, Outcome::Updated(Ok(())));
        assert_eq!(transition.commands, vec![list()]);
        assert!(screen.is_closed());
    }

    #[test]
    fn test_update_failure_alerts_and_stays() {
        let mut screen = loaded(2);
        let (ticket, _) = screen.save(false).request.unwrap();

        let error = ApiError::Transport(TransportError::status(500, None));
        let transition = screen.apply(ticket, Outcome::Updated(Err(error)));
        assert_eq!(
            transition.commands,
            vec![Command::Alert("Request failed with status code 500".to_string())]
        );
        assert_eq!(screen.state(), ScreenState::Editing(Mode::Existing(PersonId(2))));
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let mut screen = loaded(6);
        assert!(screen.delete(false).request.is_none());

        let (ticket, effect) = screen.delete(true).request.unwrap();
        assert_eq!(effect, Effect::Delete(PersonId(6)));

        let transition = screen.apply(ticket, Outcome::Deleted(Ok(())));
        assert_eq!(
            transition.commands,
            vec![Command::Alert(DELETED_MESSAGE.to_string()), list()]
        );
    }

    #[test]
    fn test_delete_on_new_record_is_noop() {
        let mut screen = DetailsScreen::for_segment("nova");
        screen.mount();
        assert_eq!(screen.delete(true), Transition::default());
    }

    #[test]
    fn test_superseded_outcome_is_discarded() {
        let mut screen = loaded(8);
        let (first, _) = screen.delete(true).request.unwrap();
        let (second, _) = screen.save(false).request.unwrap();
        assert!(second.generation() > first.generation());

        let stale = screen.apply(first, Outcome::Deleted(Ok(())));
        assert_eq!(stale, Transition::default());
        assert!(!screen.is_closed());

        screen.apply(second, Outcome::Updated(Ok(())));
        assert_eq!(screen.state(), ScreenState::Editing(Mode::Existing(PersonId(8))));
    }

    #[test]
    fn test_unmount_discards_late_outcome() {
        let mut screen = DetailsScreen::for_segment("5");
        let (ticket, _) = screen.mount().request.unwrap();
        screen.unmount();

        let late = screen.apply(ticket, Outcome::Fetched(Err(ApiError::Connection)));
        assert!(late.commands.is_empty());
        assert!(screen.in_flight().is_none());
    }

    #[test]
    fn test_toolbar_navigation() {
        let mut screen = loaded(3);
        assert_eq!(
            screen.new_record().commands,
            vec![Command::Navigate("/pessoas/detalhe/nova".to_string())]
        );
        assert!(screen.is_closed());

        let mut other = loaded(3);
        assert_eq!(other.back().commands, vec![list()]);
    }
}
