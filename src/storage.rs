//! Append-only flat-file persistence.
//!
//! The users file holds one name per line. The friendships file holds one
//! undirected edge per line as `u v`; the reverse direction is rebuilt in
//! memory on load and never written.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::DataPaths;
use crate::error::Result;
use crate::graph::SocialGraph;

/// Durable record of successful mutations.
pub trait Store {
    fn record_user(&mut self, name: &str) -> Result<()>;
    fn record_friendship(&mut self, u: &str, v: &str) -> Result<()>;
}

#[derive(Serialize)]
struct UserRecord<'a> {
    name: &'a str,
}

#[derive(Serialize)]
struct FriendshipRecord<'a> {
    u: &'a str,
    v: &'a str,
}

/// The users and friendships files on disk.
#[derive(Debug, Clone)]
pub struct FileStore {
    users: PathBuf,
    friendships: PathBuf,
}

impl FileStore {
    pub fn new(users: impl Into<PathBuf>, friendships: impl Into<PathBuf>) -> Self {
        Self {
            users: users.into(),
            friendships: friendships.into(),
        }
    }

    pub fn from_paths(paths: &DataPaths) -> Self {
        Self::new(&paths.users, &paths.friendships)
    }

    /// Rebuilds the graph from both files, users first. A missing file counts
    /// as having no records.
    pub fn load(&self) -> Result<SocialGraph> {
        let mut graph = SocialGraph::new();

        for row in read_records(&self.users)? {
            graph.insert_loaded_user(&row[0]); // rows are never empty
        }

        for (line, row) in read_records(&self.friendships)?.iter().enumerate() {
            if row.len() < 2 {
                warn!(path = %self.friendships.display(), record = line + 1, "skipping friendship with a single name");
                continue;
            }
            if !graph.insert_loaded_edge(&row[0], &row[1]) {
                warn!(user = %row[0], "skipping persisted self-friendship");
            }
        }

        info!(
            users = graph.user_count(),
            friendships = graph.friendship_count(),
            "loaded social graph"
        );
        Ok(graph)
    }
}

impl Store for FileStore {
    fn record_user(&mut self, name: &str) -> Result<()> {
        append_record(&self.users, &UserRecord { name })?;
        debug!(user = name, "recorded user");
        Ok(())
    }

    fn record_friendship(&mut self, u: &str, v: &str) -> Result<()> {
        append_record(&self.friendships, &FriendshipRecord { u, v })?;
        debug!(u, v, "recorded friendship");
        Ok(())
    }
}

/// Reads whitespace-separated records, dropping blank lines. A record that is
/// not valid UTF-8 is skipped with a warning.
fn read_records(path: &Path) -> Result<Vec<Vec<String>>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no persisted records");
            return Ok(Vec::new());
        }
        Err(e) => return Err(e.into()),
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .delimiter(b' ')
        .flexible(true)
        .quoting(false)
        .trim(csv::Trim::All)
        .from_reader(file);

    let mut rows = Vec::new();
    for record in reader.byte_records() {
        let record = record?;
        let decoded: std::result::Result<Vec<&str>, _> =
            record.iter().map(std::str::from_utf8).collect();
        let Ok(decoded) = decoded else {
            warn!(
                path = %path.display(),
                line = record.position().map(|pos| pos.line()),
                "skipping record that is not valid UTF-8"
            );
            continue;
        };
        let fields: Vec<String> = decoded
            .into_iter()
            .flat_map(str::split_ascii_whitespace) // tabs inside a field
            .map(str::to_string)
            .collect();
        if !fields.is_empty() {
            rows.push(fields);
        }
    }
    Ok(rows)
}

fn append_record<T: Serialize>(path: &Path, record: &T) -> Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .delimiter(b' ')
        .quote_style(csv::QuoteStyle::Never)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(file);
    writer.serialize(record)?;
    writer.flush()?;
    Ok(())
}
