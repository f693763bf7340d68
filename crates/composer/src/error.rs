use shared::domain::{UnknownDevice, WordId};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComposerError {
    #[error("invalid device '{0}'")]
    InvalidDevice(String),
    #[error("word {0} is no longer on the canvas")]
    StaleWordReference(WordId),
}

impl ComposerError {
    /// Stale references are dropped without notifying the user.
    pub fn is_silent(&self) -> bool {
        matches!(self, ComposerError::StaleWordReference(_))
    }
}

impl From<UnknownDevice> for ComposerError {
    fn from(value: UnknownDevice) -> Self {
        ComposerError::InvalidDevice(value.0)
    }
}
