use tokio::sync::watch;
use tracing::info;

/// Navigation targets kept in [`Location::visited`].
pub const HISTORY_LIMIT: usize = 50;

/// Moves the application to another location.
///
/// Screens and the menu only need this; the [`Router`] is the production
/// implementation.
pub trait Navigator: Send + Sync {
    fn navigate(&self, to: &str);

    /// The current location path.
    fn location(&self) -> String;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    pub path: String,
    /// The last [`HISTORY_LIMIT`] navigation targets, oldest first.
    pub visited: Vec<String>,
}

/// Holds the current location and publishes changes.
#[derive(Debug)]
pub struct Router {
    location: watch::Sender<Location>,
}

impl Router {
    pub fn new(initial: impl Into<String>) -> Self {
        let (location, _) = watch::channel(Location {
            path: initial.into(),
            visited: Vec::new(),
        });
        Self { location }
    }

    pub fn subscribe(&self) -> watch::Receiver<Location> {
        self.location.subscribe()
    }

    /// Recent navigation targets in the order they were requested.
    pub fn history(&self) -> Vec<String> {
        self.location.borrow().visited.clone()
    }
}

impl Navigator for Router {
    fn navigate(&self, to: &str) {
        info!(to, "Navigate");
        self.location.send_modify(|location| {
            location.path = to.to_string();
            if location.visited.len() == HISTORY_LIMIT {
                location.visited.remove(0);
            }
            location.visited.push(to.to_string());
        });
    }

    fn location(&self) -> String {
        self.location.borrow().path.clone()
    }
}

/// Whether `pattern` matches `location` as a prefix, segment by segment.
///
/// `/pessoas` matches `/pessoas` and `/pessoas/detalhe/3` but not
/// `/pessoasx`. Trailing slashes are ignored on both sides.
pub fn path_matches(pattern: &str, location: &str) -> bool {
    let mut location_segments = location.split('/').filter(|s| !s.is_empty());
    pattern
        .split('/')
        .filter(|s| !s.is_empty())
        .all(|segment| location_segments.next() == Some(segment))
}
