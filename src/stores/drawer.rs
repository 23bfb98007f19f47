//! Drawer state: open flag and the registered navigation options.

use crate::framework::{Store, StoreActor, StoreClient, StoreError};
use crate::model::DrawerOption;
use tracing::instrument;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DrawerState {
    pub is_open: bool,
    pub options: Vec<DrawerOption>,
}

#[derive(Debug, Clone)]
pub enum DrawerAction {
    Toggle,
    Close,
    SetOptions(Vec<DrawerOption>),
}

impl Store for DrawerState {
    type Action = DrawerAction;

    fn reduce(&mut self, action: DrawerAction) {
        match action {
            DrawerAction::Toggle => self.is_open = !self.is_open,
            DrawerAction::Close => self.is_open = false,
            DrawerAction::SetOptions(options) => self.options = options,
        }
    }
}

#[derive(Clone, Debug)]
pub struct DrawerClient {
    inner: StoreClient<DrawerState>,
}

impl DrawerClient {
    pub fn new(inner: StoreClient<DrawerState>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn toggle(&self) -> Result<bool, StoreError> {
        Ok(self.inner.dispatch(DrawerAction::Toggle).await?.is_open)
    }

    #[instrument(skip(self))]
    pub async fn close(&self) -> Result<(), StoreError> {
        self.inner.dispatch(DrawerAction::Close).await.map(|_| ())
    }

    #[instrument(skip(self, options))]
    pub async fn set_options(&self, options: Vec<DrawerOption>) -> Result<(), StoreError> {
        self.inner
            .dispatch(DrawerAction::SetOptions(options))
            .await
            .map(|_| ())
    }

    pub fn state(&self) -> DrawerState {
        self.inner.current()
    }

    pub async fn shutdown(&self) -> Result<(), StoreError> {
        self.inner.shutdown().await
    }
}

pub fn new(options: Vec<DrawerOption>) -> (StoreActor<DrawerState>, DrawerClient) {
    let (actor, client) = StoreActor::new(
        DrawerState {
            is_open: false,
            options,
        },
        16,
    );
    (actor, DrawerClient::new(client))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::default_drawer_options;

    #[tokio::test]
    async fn test_toggle_close_and_options() {
        let (actor, client) = new(Vec::new());
        let handle = tokio::spawn(actor.run());

        assert!(client.toggle().await.unwrap());
        client.close().await.unwrap();
        assert!(!client.state().is_open);
        // Closing twice keeps it closed.
        client.close().await.unwrap();
        assert!(!client.state().is_open);

        client.set_options(default_drawer_options()).await.unwrap();
        let paths: Vec<_> = client.state().options.into_iter().map(|o| o.path).collect();
        assert_eq!(paths, vec!["/pagina-inicial", "/cidades", "/pessoas"]);

        client.shutdown().await.unwrap();
        handle.await.unwrap();
    }
}
