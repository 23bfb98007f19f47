//! # Theme Store
//!
//! Holds the current [`ThemeName`] for the application session. Renderers
//! subscribe to it and derive the [`Theme`] from the name; nothing is persisted.

use crate::framework::{Store, StoreActor, StoreClient, StoreError};
use crate::model::{Theme, ThemeName};
use tokio::sync::watch;
use tracing::{info, instrument};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ThemeState {
    pub name: ThemeName,
}

impl ThemeState {
    pub fn theme(&self) -> Theme {
        self.name.theme()
    }
}

#[derive(Debug, Clone, Copy)]
pub enum ThemeAction {
    Toggle,
    Set(ThemeName),
}

impl Store for ThemeState {
    type Action = ThemeAction;

    fn reduce(&mut self, action: ThemeAction) {
        self.name = match action {
            ThemeAction::Toggle => self.name.toggled(),
            ThemeAction::Set(name) => name,
        };
    }
}

/// Client for the theme store.
#[derive(Clone, Debug)]
pub struct ThemeClient {
    inner: StoreClient<ThemeState>,
}

impl ThemeClient {
    pub fn new(inner: StoreClient<ThemeState>) -> Self {
        Self { inner }
    }

    /// Flips between light and dark and returns the new name.
    #[instrument(skip(self))]
    pub async fn toggle_theme(&self) -> Result<ThemeName, StoreError> {
        let state = self.inner.dispatch(ThemeAction::Toggle).await?;
        info!(theme = %state.name, "Theme switched");
        Ok(state.name)
    }

    #[instrument(skip(self))]
    pub async fn set_theme(&self, name: ThemeName) -> Result<ThemeName, StoreError> {
        Ok(self.inner.dispatch(ThemeAction::Set(name)).await?.name)
    }

    pub fn theme_name(&self) -> ThemeName {
        self.inner.current().name
    }

    pub fn theme(&self) -> Theme {
        self.inner.current().theme()
    }

    pub fn subscribe(&self) -> watch::Receiver<ThemeState> {
        self.inner.subscribe()
    }

    pub async fn shutdown(&self) -> Result<(), StoreError> {
        self.inner.shutdown().await
    }
}

/// Creates the theme store and its client.
pub fn new(initial: ThemeName) -> (StoreActor<ThemeState>, ThemeClient) {
    let (actor, client) = StoreActor::new(ThemeState { name: initial }, 16);
    (actor, ThemeClient::new(client))
}
