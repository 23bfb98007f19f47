//! Authentication state: whether a user is signed in, and with which token.

use crate::framework::{Store, StoreActor, StoreClient, StoreError};
use tracing::{info, instrument};

#[derive(Clone, PartialEq, Eq, Default)]
pub struct AuthState {
    access_token: Option<String>,
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }
}

// Keeps tokens out of the logs.
impl std::fmt::Debug for AuthState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthState")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

pub enum AuthAction {
    SignIn(String),
    SignOut,
}

impl std::fmt::Debug for AuthAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthAction::SignIn(_) => f.write_str("SignIn(..)"),
            AuthAction::SignOut => f.write_str("SignOut"),
        }
    }
}

impl Store for AuthState {
    type Action = AuthAction;

    fn reduce(&mut self, action: AuthAction) {
        match action {
            AuthAction::SignIn(token) => self.access_token = Some(token),
            AuthAction::SignOut => self.access_token = None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct AuthClient {
    inner: StoreClient<AuthState>,
}

impl AuthClient {
    pub fn new(inner: StoreClient<AuthState>) -> Self {
        Self { inner }
    }

    #[instrument(skip_all)]
    pub async fn sign_in(&self, access_token: impl Into<String>) -> Result<(), StoreError> {
        self.inner
            .dispatch(AuthAction::SignIn(access_token.into()))
            .await?;
        info!("Signed in");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<(), StoreError> {
        self.inner.dispatch(AuthAction::SignOut).await?;
        info!("Signed out");
        Ok(())
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.current().is_authenticated()
    }

    pub async fn shutdown(&self) -> Result<(), StoreError> {
        self.inner.shutdown().await
    }
}

pub fn new(access_token: Option<String>) -> (StoreActor<AuthState>, AuthClient) {
    let (actor, client) = StoreActor::new(AuthState { access_token }, 16);
    (actor, AuthClient::new(client))
}
