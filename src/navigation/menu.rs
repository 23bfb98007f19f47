//! # Side Navigation Menu
//!
//! Builds the drawer view from the drawer, auth and theme stores, and handles
//! its three interactions: choosing a destination, logging out and switching
//! the theme.

use super::router::{path_matches, Navigator};
use crate::framework::StoreError;
use crate::model::{DrawerOption, ThemeName};
use crate::stores::{AuthClient, DrawerClient, ThemeClient};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Widths below this are "narrow": the drawer floats over the content and
/// closes after each navigation.
pub const SM_BREAKPOINT: u32 = 600;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
}

impl Viewport {
    pub fn new(width: u32) -> Self {
        Self { width }
    }

    pub fn is_narrow(&self) -> bool {
        self.width < SM_BREAKPOINT
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawerVariant {
    /// Overlays the content; opened and closed explicitly.
    Temporary,
    /// Always visible next to the content.
    Permanent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItemView {
    pub option: DrawerOption,
    pub active: bool,
}

/// Everything a renderer needs to draw the drawer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuView {
    pub variant: DrawerVariant,
    pub is_open: bool,
    /// Empty while signed out.
    pub items: Vec<MenuItemView>,
    pub logout_label: &'static str,
    pub theme_toggle_label: &'static str,
    /// Text color for the logout and theme buttons.
    pub foreground: &'static str,
}

#[derive(Clone)]
pub struct SideMenu {
    drawer: DrawerClient,
    auth: AuthClient,
    theme: ThemeClient,
    navigator: Arc<dyn Navigator>,
}

impl SideMenu {
    pub fn new(
        drawer: DrawerClient,
        auth: AuthClient,
        theme: ThemeClient,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            drawer,
            auth,
            theme,
            navigator,
        }
    }

    pub fn view(&self, viewport: Viewport) -> MenuView {
        let drawer = self.drawer.state();
        let location = self.navigator.location();
        let theme = self.theme.theme();

        let items = if self.auth.is_authenticated() {
            drawer
                .options
                .into_iter()
                .map(|option| MenuItemView {
                    active: path_matches(&option.path, &location),
                    option,
                })
                .collect()
        } else {
            Vec::new()
        };

        MenuView {
            variant: if viewport.is_narrow() {
                DrawerVariant::Temporary
            } else {
                DrawerVariant::Permanent
            },
            is_open: drawer.is_open,
            items,
            logout_label: "Log out",
            theme_toggle_label: match theme.name {
                ThemeName::Light => "Switch to dark theme",
                ThemeName::Dark => "Switch to light theme",
            },
            foreground: theme.drawer_foreground(),
        }
    }

    /// Navigates to `option` and, on narrow viewports only, closes the drawer.
    #[instrument(skip(self, option), fields(path = %option.path))]
    pub async fn select(&self, option: &DrawerOption, viewport: Viewport) -> Result<(), StoreError> {
        self.navigator.navigate(&option.path);
        if viewport.is_narrow() {
            debug!("Closing drawer after navigation");
            self.drawer.close().await?;
        }
        Ok(())
    }

    /// The drawer's own open/close control.
    pub async fn toggle_drawer(&self) -> Result<bool, StoreError> {
        self.drawer.toggle().await
    }

    pub async fn logout(&self) -> Result<(), StoreError> {
        self.auth.logout().await
    }

    pub async fn toggle_theme(&self) -> Result<ThemeName, StoreError> {
        self.theme.toggle_theme().await
    }
}
