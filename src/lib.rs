//! Social graph of users and symmetric friendships, with friend suggestions
//! ranked by mutual-friend count, driven by a line-oriented command stream
//! and persisted in two append-only text files.

pub mod commands;
pub mod config;
pub mod error;
pub mod graph;
pub mod storage;

pub use commands::{Command, CommandProcessor, RunSummary};
pub use config::DataPaths;
pub use error::{GraphError, StoreError};
pub use graph::{SocialGraph, Suggestion};
pub use storage::{FileStore, Store};
