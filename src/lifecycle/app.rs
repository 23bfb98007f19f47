use crate::api::{PeopleApi, PeopleService, ReqwestTransport, TransportError};
use crate::config::{AppConfig, ConfigError};
use crate::model::default_drawer_options;
use crate::navigation::{Router, SideMenu, Viewport, PEOPLE_LIST_ROUTE};
use crate::screens::details::{self, DetailsHandle};
use crate::screens::Dialogs;
use crate::stores::{auth, drawer, theme, AuthClient, DrawerClient, ThemeClient};
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("cannot build HTTP client: {0}")]
    Transport(#[from] TransportError),
}

/// The running application: every store, the router, and the people service.
///
/// `AdminApp` creates the stores and spawns their actors, hands out the
/// collaborators screens and the menu need, and tears everything down in
/// [`shutdown`](Self::shutdown).
///
/// ```ignore
/// let mut app = AdminApp::start(&config, Arc::new(ConsoleDialogs::default()))?;
///
/// let screen = app.open_details("3");
/// let view = screen.wait_for(|v| !v.is_loading).await?;
///
/// app.shutdown().await?;
/// ```
pub struct AdminApp {
    pub theme: ThemeClient,
    pub auth: AuthClient,
    pub drawer: DrawerClient,
    pub router: Arc<Router>,
    people: Arc<dyn PeopleApi>,
    dialogs: Arc<dyn Dialogs>,
    viewport: Viewport,
    /// Store actor tasks.
    handles: Vec<JoinHandle<()>>,
    screens: Vec<(DetailsHandle, JoinHandle<()>)>,
}

impl AdminApp {
    /// Validates `config` and starts the application against the real API.
    pub fn start(config: &AppConfig, dialogs: Arc<dyn Dialogs>) -> Result<Self, AppError> {
        config.validate()?;
        let transport = ReqwestTransport::new(config)?;
        let people = PeopleService::new(transport).with_page_size(config.page_size);
        Ok(Self::with_people(config, Arc::new(people), dialogs))
    }

    /// Starts the application with the given people backend. Must run inside
    /// a Tokio runtime.
    pub fn with_people(
        config: &AppConfig,
        people: Arc<dyn PeopleApi>,
        dialogs: Arc<dyn Dialogs>,
    ) -> Self {
        let (theme_actor, theme) = theme::new(config.theme);
        let (auth_actor, auth) = auth::new(config.access_token.clone());
        let (drawer_actor, drawer) = drawer::new(default_drawer_options());

        let handles = vec![
            tokio::spawn(theme_actor.run()),
            tokio::spawn(auth_actor.run()),
            tokio::spawn(drawer_actor.run()),
        ];
        info!(theme = %config.theme, "Application started");

        Self {
            theme,
            auth,
            drawer,
            router: Arc::new(Router::new(PEOPLE_LIST_ROUTE)),
            people,
            dialogs,
            viewport: Viewport::new(config.viewport_width),
            handles,
            screens: Vec::new(),
        }
    }

    pub fn people(&self) -> Arc<dyn PeopleApi> {
        self.people.clone()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn menu(&self) -> SideMenu {
        SideMenu::new(
            self.drawer.clone(),
            self.auth.clone(),
            self.theme.clone(),
            self.router.clone(),
        )
    }

    /// Mounts a details screen for `segment` (`nova` or a numeric id).
    /// Screens that already closed themselves are released first.
    pub fn open_details(&mut self, segment: &str) -> DetailsHandle {
        self.release_closed_screens();
        let (actor, handle) = details::open(
            segment,
            self.people.clone(),
            self.router.clone(),
            self.dialogs.clone(),
        );
        let task = tokio::spawn(actor.run());
        self.screens.push((handle.clone(), task));
        handle
    }

    /// Number of screens whose task is still running.
    pub fn open_screens(&mut self) -> usize {
        self.release_closed_screens();
        self.screens.len()
    }

    fn release_closed_screens(&mut self) {
        self.screens.retain(|(_, task)| !task.is_finished());
    }

    /// Unmounts every screen, stops the stores and waits for all tasks.
    ///
    /// A failed task does not stop the teardown; the first failure is
    /// returned once everything else has been stopped.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down application...");
        let mut first_error = None;

        for (screen, task) in self.screens {
            // Screens that already closed themselves report ScreenClosed.
            let _ = screen.unmount().await;
            if let Err(e) = task.await {
                error!("Screen task failed: {:?}", e);
                first_error.get_or_insert(format!("Screen task failed: {:?}", e));
            }
        }

        let stops = [
            self.theme.shutdown().await,
            self.auth.shutdown().await,
            self.drawer.shutdown().await,
        ];
        for result in stops {
            if let Err(e) = result {
                warn!(error = %e, "Store already stopped");
            }
        }

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Store task failed: {:?}", e);
                first_error.get_or_insert(format!("Store task failed: {:?}", e));
            }
        }

        if let Some(e) = first_error {
            return Err(e);
        }
        info!("Shutdown complete.");
        Ok(())
    }
}
