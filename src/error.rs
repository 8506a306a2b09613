//! Error types for the tap game.

use thiserror::Error;

/// Result type alias for game operations
pub type Result<T> = std::result::Result<T, GameError>;

/// Errors that can occur while transitioning, storing or syncing player state.
///
/// None of these are fatal: the reducer keeps the previous state, persistence
/// treats the snapshot as absent and sync falls back to local simulation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    // === Reducer ===
    /// A counter would leave its integer range
    #[error("arithmetic overflow while updating {field}")]
    Overflow { field: &'static str },

    /// Minigame settlement would drive the balance negative
    #[error("insufficient coins: need {needed}, have {available}")]
    InsufficientCoins { needed: u64, available: u64 },

    // === Snapshots ===
    /// LoadGame payload was not a JSON object
    #[error("snapshot is not a JSON object")]
    SnapshotNotObject,

    /// Snapshot could not be encoded or decoded
    #[error("snapshot codec error: {0}")]
    Snapshot(String),

    /// Unknown boost name supplied at the boundary
    #[error("unknown boost kind: {0}")]
    UnknownBoost(String),

    // === Storage ===
    /// `window.localStorage` is missing or blocked
    #[error("local storage unavailable")]
    StorageUnavailable,

    /// Storage call was rejected by the browser
    #[error("storage error: {0}")]
    Storage(String),

    // === Remote sync ===
    /// Remote sync is disabled or no identity is known
    #[error("remote sync unavailable")]
    Offline,

    /// Transport-level failure
    #[error("remote request failed: {0}")]
    Transport(String),

    /// Backend answered with a non-success status
    #[error("remote responded with status {status}")]
    Status { status: u16 },
}

impl From<serde_json::Error> for GameError {
    fn from(err: serde_json::Error) -> Self {
        GameError::Snapshot(err.to_string())
    }
}

impl From<reqwest::Error> for GameError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => GameError::Status { status: status.as_u16() },
            None => GameError::Transport(err.to_string()),
        }
    }
}
