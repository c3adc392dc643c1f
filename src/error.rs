// File: src/error.rs
use thiserror::Error;

/// Errors raised while building the keypad, key map or dictionary.
///
/// Everything here is a startup failure. Key handling during a session
/// never produces an error.
#[derive(Debug, Error)]
pub enum ImeError {
    #[error("no digit mapping for {ch:?} in word {word:?}")]
    UnmappedCharacter { word: String, ch: char },

    #[error("invalid keypad layout: {0}")]
    InvalidLayout(String),

    #[error("invalid key map: {0}")]
    InvalidKeyMap(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("config serialize error: {0}")]
    ConfigWrite(#[from] toml::ser::Error),

    #[error("snapshot error: {0}")]
    Snapshot(#[from] bincode::Error),

    #[error("snapshot does not match the active keypad: {0}")]
    SnapshotMismatch(String),
}

pub type Result<T> = std::result::Result<T, ImeError>;
