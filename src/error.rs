//! Error types for the social graph.
//!
//! `GraphError` covers the domain outcomes that a command can report back to
//! the caller; its `Display` text is the exact result line. `StoreError` covers
//! failures of the flat files and the command stream, which stop the run.

use thiserror::Error;

/// Outcome of a graph operation whose precondition did not hold.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("User already exists.")]
    UserAlreadyExists,

    /// Reported by `add_friendship` when either endpoint is missing.
    #[error("One or both users do not exist.")]
    UsersNotFound,

    #[error("Friendship already exists.")]
    FriendshipAlreadyExists,

    /// Reported by `suggest` for an unknown user.
    #[error("User does not exist.")]
    UserNotFound,

    #[error("No suggestions.")]
    NoSuggestions,

    #[error("Unknown command.")]
    UnknownCommand,

    #[error("User name must not be empty.")]
    EmptyName,

    #[error("Users cannot befriend themselves.")]
    SelfFriendship,
}

/// Result type alias for persistence and stream operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Failures reading or appending the persisted records, or moving lines
/// through the command stream.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Record error: {0}")]
    Csv(#[from] csv::Error),
}
