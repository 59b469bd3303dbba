//! Error taxonomy for the guessing engine.
//!
//! Only `RosterUnavailable` and `EmptyRoster` stop a game from starting.
//! Everything else is either recoverable (shown to the player as a message)
//! or swallowed and logged (storage).

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// Every catalog source failed or produced nothing usable.
    #[error("hero list could not be loaded from any source")]
    RosterUnavailable,

    /// Secret selection was attempted on an empty roster.
    #[error("cannot pick a secret hero from an empty roster")]
    EmptyRoster,

    /// The player's input did not resolve to a roster entry.
    #[error("no hero matches \"{query}\"")]
    GuessNotFound { query: String },

    /// The player submitted blank input.
    #[error("guess is empty")]
    EmptyGuess,

    /// An override record had no usable name and was skipped.
    #[error("override #{index} has no name")]
    MalformedOverride { index: usize },

    /// Local key-value storage rejected a read or write.
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),

    /// A catalog source was reachable but its body was not a JSON array.
    #[error("invalid hero catalog: {0}")]
    InvalidCatalog(String),

    /// A game action arrived before the roster finished loading.
    #[error("hero list is still loading")]
    NotReady,
}

impl From<serde_json::Error> for GameError {
    fn from(e: serde_json::Error) -> Self {
        GameError::InvalidCatalog(e.to_string())
    }
}
