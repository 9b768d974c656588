//! Error taxonomy for startup and effect construction
//!
//! Nothing here is fatal to the host: asset/config failures abort startup,
//! bad effect parameters reject the single effect being built.

use std::fmt;

/// Errors surfaced by the game core
#[derive(Debug)]
pub enum GameError {
    /// A named asset could not be resolved
    AssetLoad { name: String, reason: String },
    /// Asset manifest JSON was malformed
    Manifest(serde_json::Error),
    /// Game configuration JSON was malformed
    Config(serde_json::Error),
    /// An effect parameter was missing, inverted or non-finite
    InvalidParam { field: &'static str, reason: String },
    /// A color string was not `#rgb` / `#rrggbb`
    InvalidColor(String),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::AssetLoad { name, reason } => {
                write!(f, "failed to load asset '{}': {}", name, reason)
            }
            GameError::Manifest(e) => write!(f, "invalid asset manifest: {}", e),
            GameError::Config(e) => write!(f, "invalid game config: {}", e),
            GameError::InvalidParam { field, reason } => {
                write!(f, "invalid effect parameter '{}': {}", field, reason)
            }
            GameError::InvalidColor(s) => write!(f, "invalid color '{}'", s),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::Manifest(e) | GameError::Config(e) => Some(e),
            _ => None,
        }
    }
}
