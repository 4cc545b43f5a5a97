//! Error types shared across the host.
//!
//! Every variant is recoverable: the console reports it and aborts only the
//! action in progress.

use thiserror::Error;

/// Failures while transmitting a command to the display device.
#[derive(Debug, Error)]
pub enum SendError {
    /// No device host has been configured yet.
    #[error("no device address configured (use `connect <host> [port]`)")]
    MissingAddress,

    #[error("failed to connect to {addr}: {source}")]
    Connect {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("connection to {addr} timed out after {secs}s")]
    Timeout { addr: String, secs: u64 },

    #[error("failed to write to {addr}: {source}")]
    Write {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode command: {0}")]
    Encode(#[from] serde_json::Error),
}

impl SendError {
    /// True for every variant that means the network side failed.
    pub fn is_connection_failure(&self) -> bool {
        matches!(
            self,
            SendError::Connect { .. } | SendError::Timeout { .. } | SendError::Write { .. }
        )
    }
}

/// User supplied values that cannot be accepted.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} must be an integer (got '{value}')")]
    NotAnInteger { field: &'static str, value: String },

    #[error("initiative must be between {min} and {max} (got {value})")]
    InitiativeOutOfRange { value: i64, min: i32, max: i32 },

    #[error("initiative {0} is already taken by another player")]
    DuplicateInitiative(i32),

    #[error("name cannot be empty")]
    EmptyName,

    #[error("missing argument: {0}")]
    MissingArgument(&'static str),

    #[error("unexpected argument '{0}'")]
    UnexpectedArgument(String),
}

/// Battle engine state transition failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BattleError {
    #[error("add players before starting a battle")]
    NoPlayers,

    #[error("index {index} is out of range for {len} combat units")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("battle setup still waiting for input")]
    SetupIncomplete,

    #[error("battle setup is not waiting for {0}")]
    UnexpectedInput(&'static str),

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// Roster file and roster editing failures.
#[derive(Debug, Error)]
pub enum RosterError {
    #[error("roster io error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse roster {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("no player at position {} (roster has {})", .index + 1, .len)]
    NoSuchPlayer { index: usize, len: usize },
}

/// Anything a host action can fail with.
#[derive(Debug, Error)]
pub enum HostError {
    #[error(transparent)]
    Send(#[from] SendError),

    #[error(transparent)]
    Battle(#[from] BattleError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Roster(#[from] RosterError),
}

pub type HostResult<T> = std::result::Result<T, HostError>;
