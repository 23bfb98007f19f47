use thiserror::Error;

/// Errors from talking to a screen actor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScreenError {
    #[error("Screen closed")]
    ScreenClosed,
    #[error("Screen dropped response channel")]
    ScreenDropped,
}
