//! # Details Screen Actor
//!
//! Runs a [`DetailsScreen`] inside its own task. User input arrives as
//! [`DetailsRequest`]s from a cloneable [`DetailsHandle`]; remote calls run in
//! spawned tasks and report back on a completion channel tagged with their
//! [`Ticket`]. Issuing a new request aborts the previous one, and leaving the
//! screen (navigation away, [`DetailsHandle::unmount`], or dropping every
//! handle) aborts whatever is still in flight and stops the actor.

use super::state::{
    Command, DetailsScreen, DetailsView, Effect, Outcome, Ticket, Transition, DELETE_PROMPT,
};
use crate::api::PeopleApi;
use crate::model::CityId;
use crate::navigation::Navigator;
use crate::screens::dialogs::Dialogs;
use crate::screens::error::ScreenError;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument};

/// One user interaction with the screen.
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    EditName(String),
    EditEmail(String),
    EditCity(Option<CityId>),
    Save { close: bool },
    Delete,
    Back,
    NewRecord,
}

#[derive(Debug)]
pub enum DetailsRequest {
    Input {
        input: Input,
        respond_to: oneshot::Sender<DetailsView>,
    },
    Unmount,
}

pub struct DetailsActor {
    receiver: mpsc::Receiver<DetailsRequest>,
    completions: mpsc::Receiver<(Ticket, Outcome)>,
    completion_tx: mpsc::Sender<(Ticket, Outcome)>,
    screen: DetailsScreen,
    people: Arc<dyn PeopleApi>,
    navigator: Arc<dyn Navigator>,
    dialogs: Arc<dyn Dialogs>,
    publisher: watch::Sender<DetailsView>,
    in_flight: Option<JoinHandle<()>>,
}

/// Creates the actor for the route segment `segment` (`nova` or a numeric id)
/// and its handle. Spawn [`DetailsActor::run`] to mount the screen.
pub fn open(
    segment: &str,
    people: Arc<dyn PeopleApi>,
    navigator: Arc<dyn Navigator>,
    dialogs: Arc<dyn Dialogs>,
) -> (DetailsActor, DetailsHandle) {
    let screen = DetailsScreen::for_segment(segment);
    let (sender, receiver) = mpsc::channel(32);
    let (completion_tx, completions) = mpsc::channel(8);
    let (publisher, view) = watch::channel(screen.view());
    let actor = DetailsActor {
        receiver,
        completions,
        completion_tx,
        screen,
        people,
        navigator,
        dialogs,
        publisher,
        in_flight: None,
    };
    (actor, DetailsHandle { sender, view })
}

impl DetailsActor {
    pub async fn run(mut self) {
        info!("Details screen mounted");
        let transition = self.screen.mount();
        self.execute(transition).await;

        while !self.screen.is_closed() {
            tokio::select! {
                request = self.receiver.recv() => match request {
                    Some(DetailsRequest::Input { input, respond_to }) => {
                        let transition = self.handle(input).await;
                        self.execute(transition).await;
                        let _ = respond_to.send(self.screen.view());
                    }
                    Some(DetailsRequest::Unmount) | None => {
                        debug!("Unmount");
                        self.screen.unmount();
                    }
                },
                Some((ticket, outcome)) = self.completions.recv() => {
                    let transition = self.screen.apply(ticket, outcome);
                    self.execute(transition).await;
                }
            }
        }

        if let Some(task) = self.in_flight.take() {
            task.abort();
        }
        self.publisher.send_replace(self.screen.view());
        info!("Details screen closed");
    }

    async fn handle(&mut self, input: Input) -> Transition {
        match input {
            Input::EditName(value) => {
                self.screen.edit_name(value);
                Transition::default()
            }
            Input::EditEmail(value) => {
                self.screen.edit_email(value);
                Transition::default()
            }
            Input::EditCity(city_id) => {
                self.screen.edit_city(city_id);
                Transition::default()
            }
            Input::Save { close } => self.screen.save(close),
            Input::Delete => {
                if !self.screen.can_delete() {
                    return Transition::default();
                }
                let confirmed = self.dialogs.confirm(DELETE_PROMPT).await;
                self.screen.delete(confirmed)
            }
            Input::Back => self.screen.back(),
            Input::NewRecord => self.screen.new_record(),
        }
    }

    async fn execute(&mut self, transition: Transition) {
        if let Some((ticket, effect)) = transition.request {
            self.spawn(ticket, effect);
        }
        for command in transition.commands {
            match command {
                Command::Alert(message) => self.dialogs.alert(&message).await,
                Command::Navigate(to) => self.navigator.navigate(&to),
            }
        }
        self.publisher.send_replace(self.screen.view());
    }

    #[instrument(skip(self, effect), fields(generation = ticket.generation()))]
    fn spawn(&mut self, ticket: Ticket, effect: Effect) {
        if let Some(previous) = self.in_flight.take() {
            debug!("Aborting superseded request");
            previous.abort();
        }
        let people = self.people.clone();
        let completions = self.completion_tx.clone();
        self.in_flight = Some(tokio::spawn(async move {
            let outcome = perform(people.as_ref(), effect).await;
            let _ = completions.send((ticket, outcome)).await;
        }));
    }
}

async fn perform(people: &dyn PeopleApi, effect: Effect) -> Outcome {
    match effect {
        Effect::Fetch(id) => Outcome::Fetched(people.get_by_id(id).await),
        Effect::Create(payload) => Outcome::Created(people.create(payload).await),
        Effect::Update(id, person) => Outcome::Updated(people.update_by_id(id, person).await),
        Effect::Delete(id) => Outcome::Deleted(people.delete_by_id(id).await),
    }
}

/// Cloneable handle to a running [`DetailsActor`].
#[derive(Clone)]
pub struct DetailsHandle {
    sender: mpsc::Sender<DetailsRequest>,
    view: watch::Receiver<DetailsView>,
}

impl DetailsHandle {
    async fn send(&self, input: Input) -> Result<DetailsView, ScreenError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(DetailsRequest::Input { input, respond_to })
            .await
            .map_err(|_| ScreenError::ScreenClosed)?;
        response.await.map_err(|_| ScreenError::ScreenDropped)
    }

    pub async fn edit_name(&self, value: impl Into<String>) -> Result<DetailsView, ScreenError> {
        self.send(Input::EditName(value.into())).await
    }

    pub async fn edit_email(&self, value: impl Into<String>) -> Result<DetailsView, ScreenError> {
        self.send(Input::EditEmail(value.into())).await
    }

    pub async fn edit_city(&self, city_id: Option<CityId>) -> Result<DetailsView, ScreenError> {
        self.send(Input::EditCity(city_id)).await
    }

    pub async fn save(&self) -> Result<DetailsView, ScreenError> {
        self.send(Input::Save { close: false }).await
    }

    pub async fn save_and_close(&self) -> Result<DetailsView, ScreenError> {
        self.send(Input::Save { close: true }).await
    }

    /// Asks for confirmation, then deletes the record.
    pub async fn delete(&self) -> Result<DetailsView, ScreenError> {
        self.send(Input::Delete).await
    }

    pub async fn back(&self) -> Result<DetailsView, ScreenError> {
        self.send(Input::Back).await
    }

    pub async fn new_record(&self) -> Result<DetailsView, ScreenError> {
        self.send(Input::NewRecord).await
    }

    pub async fn unmount(&self) -> Result<(), ScreenError> {
        self.sender
            .send(DetailsRequest::Unmount)
            .await
            .map_err(|_| ScreenError::ScreenClosed)
    }

    /// Last published view.
    pub fn view(&self) -> DetailsView {
        self.view.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<DetailsView> {
        self.view.clone()
    }

    /// Waits until the published view satisfies `predicate`.
    pub async fn wait_for(
        &self,
        predicate: impl FnMut(&DetailsView) -> bool,
    ) -> Result<DetailsView, ScreenError> {
        let mut view = self.view.clone();
        let result = view
            .wait_for(predicate)
            .await
            .map(|v| v.clone())
            .map_err(|_| ScreenError::ScreenDropped);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Method, PeopleService};
    use crate::mock::{MockTransport, ScriptedDialogs};
    use crate::navigation::Router;
    use crate::screens::details::ScreenState;
    use serde_json::json;

    #[tokio::test]
    async fn test_name_edit_is_published() {
        let mock = MockTransport::new();
        let router = Arc::new(Router::new("/pessoas/detalhe/nova"));
        let (actor, handle) = open(
            "nova",
            Arc::new(PeopleService::new(mock.clone())),
            router,
            Arc::new(ScriptedDialogs::new(true)),
        );
        let task = tokio::spawn(actor.run());

        let view = handle.edit_name("Ada").await.unwrap();
        assert_eq!(view.title, "Ada");
        assert_eq!(handle.view().draft.complete_name, "Ada");

        handle.unmount().await.unwrap();
        task.await.unwrap();
        assert_eq!(handle.view().state, ScreenState::Closed);
        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn test_loaded_record_is_published() {
        let mock = MockTransport::new();
        mock.expect(Method::Get, "/people/3").respond_ok(json!({
            "id": 3, "completeName": "Grace Hopper", "email": "grace@navy.mil", "cityId": 8
        }));
        let (actor, handle) = open(
            "3",
            Arc::new(PeopleService::new(mock.clone())),
            Arc::new(Router::new("/pessoas/detalhe/3")),
            Arc::new(ScriptedDialogs::new(true)),
        );
        let task = tokio::spawn(actor.run());

        let view = handle.wait_for(|v| !v.is_loading).await.unwrap();
        assert_eq!(view.title, "Grace Hopper");

        drop(handle);
        task.await.unwrap();
        mock.verify();
    }
}
