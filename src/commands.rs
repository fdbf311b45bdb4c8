//! Line-oriented command processing.

use std::io::{BufRead, Write};

use tracing::{debug, info, warn};

use crate::error::{GraphError, Result};
use crate::graph::SocialGraph;
use crate::storage::Store;

/// One parsed input line. Missing arguments come through as empty names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    AddUser(String),
    AddFriendship(String, String),
    Suggest(String),
    ListUsers,
    Unknown(String),
}

impl Command {
    /// Parses whitespace-separated tokens. Returns `None` for a blank line.
    pub fn parse(line: &str) -> Option<Self> {
        let mut tokens = line.split_whitespace();
        let name = tokens.next()?;
        let mut arg = || tokens.next().unwrap_or_default().to_string();

        let command = match name {
            "add_user" => Command::AddUser(arg()),
            "add_friendship" => {
                let u = arg();
                let v = arg();
                Command::AddFriendship(u, v)
            }
            "suggest" => Command::Suggest(arg()),
            "list_users" => Command::ListUsers,
            other => Command::Unknown(other.to_string()),
        };
        Some(command)
    }
}

/// Totals for one processed command stream.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub processed: usize,
}

/// Owns the graph for the duration of a run and records every successful
/// mutation in the store before reporting it.
pub struct CommandProcessor<S: Store> {
    graph: SocialGraph,
    store: S,
}

impl<S: Store> CommandProcessor<S> {
    pub fn new(graph: SocialGraph, store: S) -> Self {
        Self { graph, store }
    }

    pub fn graph(&self) -> &SocialGraph {
        &self.graph
    }

    /// Applies one command and returns its result line.
    pub fn execute(&mut self, command: &Command) -> Result<String> {
        let line = match command {
            Command::AddUser(name) => match self.graph.add_user(name) {
                Ok(()) => {
                    self.store.record_user(name)?;
                    format!("User added: {}", name)
                }
                Err(e) => e.to_string(),
            },
            Command::AddFriendship(u, v) => match self.graph.add_friendship(u, v) {
                Ok(()) => {
                    self.store.record_friendship(u, v)?;
                    format!("Friendship added: {} <-> {}", u, v)
                }
                Err(e) => e.to_string(),
            },
            Command::Suggest(user) => match self.graph.suggest(user) {
                Ok(suggestions) => {
                    let listed: Vec<String> = suggestions.iter().map(ToString::to_string).collect();
                    format!("Friend suggestions for {}: {}", user, listed.join(" "))
                }
                Err(e) => e.to_string(),
            },
            Command::ListUsers => {
                let users = self.graph.users();
                if users.is_empty() {
                    "No users.".to_string()
                } else {
                    format!("Users: {}", users.join(" "))
                }
            }
            Command::Unknown(name) => {
                debug!(command = %name, "unknown command");
                GraphError::UnknownCommand.to_string()
            }
        };
        Ok(line)
    }

    /// Processes `input` line by line, writing one result line per command to
    /// `output` in input order. A line that is not valid UTF-8 is reported as
    /// an unknown command.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> Result<RunSummary> {
        let mut summary = RunSummary::default();
        for (number, bytes) in input.split(b'\n').enumerate() {
            let mut bytes = bytes?;
            if bytes.last() == Some(&b'\r') {
                bytes.pop();
            }
            let command = match String::from_utf8(bytes) {
                Ok(line) => match Command::parse(&line) {
                    Some(command) => command,
                    None => continue, // blank
                },
                Err(_) => {
                    warn!(line = number + 1, "command line is not valid UTF-8");
                    Command::Unknown(String::new())
                }
            };
            let result = self.execute(&command)?;
            debug!(?command, %result, "processed command");
            writeln!(output, "{}", result)?;
            summary.processed += 1;
        }
        output.flush()?;
        info!(processed = summary.processed, "command stream exhausted");
        Ok(summary)
    }
}
