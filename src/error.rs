//! Errors raised by the streaming engine and media element collaborators.

use thiserror::Error;

/// Result type for collaborator calls
pub type Result<T> = std::result::Result<T, PlayerError>;

/// Failure of a single call into the engine or the media element.
///
/// None of these ever escape the controller: they are either fed back as an
/// engine error input or collected as a teardown warning.
#[derive(Error, Debug)]
pub enum PlayerError {
    /// A JavaScript call threw or rejected
    #[error("{op} failed: {message}")]
    Js { op: &'static str, message: String },

    /// Engine configuration could not be encoded
    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),

    /// The `<video>` element the player attaches to is not in the document
    #[error("Media element #{0} not found")]
    ElementMissing(&'static str),
}

impl PlayerError {
    pub fn js(op: &'static str, message: impl Into<String>) -> Self {
        Self::Js {
            op,
            message: message.into(),
        }
    }
}
