use std::fmt;

/// Failures of the player domain. None of them is fatal: callers log the
/// error and keep the previous state.
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerError {
    /// No bundled asset with this id and extension.
    AssetNotFound(String),
    /// The asset exists but could not be probed or decoded.
    DecodeFailure(String),
    /// The audio output device could not be opened.
    SessionConfigurationFailure(String),
    /// A playlist was empty or contained a duplicate source id.
    InvalidPlaylist(String),
}

impl fmt::Display for PlayerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerError::AssetNotFound(name) => write!(f, "Asset not found: {}", name),
            PlayerError::DecodeFailure(reason) => write!(f, "Failed to decode audio: {}", reason),
            PlayerError::SessionConfigurationFailure(reason) => {
                write!(f, "Failed to activate audio output: {}", reason)
            }
            PlayerError::InvalidPlaylist(reason) => write!(f, "Invalid playlist: {}", reason),
        }
    }
}

impl std::error::Error for PlayerError {}

impl From<symphonia::core::errors::Error> for PlayerError {
    fn from(err: symphonia::core::errors::Error) -> Self {
        PlayerError::DecodeFailure(err.to_string())
    }
}

impl From<std::io::Error> for PlayerError {
    fn from(err: std::io::Error) -> Self {
        PlayerError::DecodeFailure(err.to_string())
    }
}
