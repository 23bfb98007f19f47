/// A static entry in the side navigation menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawerOption {
    pub path: String,
    pub label: String,
    /// Icon name understood by the renderer.
    pub icon: String,
}

impl DrawerOption {
    pub fn new(path: impl Into<String>, label: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            label: label.into(),
            icon: icon.into(),
        }
    }
}

/// The destinations registered at startup.
pub fn default_drawer_options() -> Vec<DrawerOption> {
    vec![
        DrawerOption::new("/pagina-inicial", "Home", "home"),
        DrawerOption::new("/cidades", "Cities", "location_city"),
        DrawerOption::new("/pessoas", "People", "people"),
    ]
}
