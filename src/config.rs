//! File locations used by a run.

use std::path::{Path, PathBuf};

pub const USERS_FILE: &str = "users.txt";
pub const FRIENDSHIPS_FILE: &str = "friendships.txt";
pub const INPUT_FILE: &str = "input.txt";
pub const OUTPUT_FILE: &str = "output.txt";

/// Marks stdin for the command input or stdout for the results.
pub const STDIO: &str = "-";

/// Where the persisted records live and where commands are read from and
/// results written to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    pub users: PathBuf,
    pub friendships: PathBuf,
    pub input: PathBuf,
    pub output: PathBuf,
}

impl DataPaths {
    /// All four files under `dir`, with their usual names.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            users: dir.join(USERS_FILE),
            friendships: dir.join(FRIENDSHIPS_FILE),
            input: dir.join(INPUT_FILE),
            output: dir.join(OUTPUT_FILE),
        }
    }

    pub fn reads_stdin(&self) -> bool {
        self.input.as_os_str() == STDIO
    }

    pub fn writes_stdout(&self) -> bool {
        self.output.as_os_str() == STDIO
    }
}

impl Default for DataPaths {
    fn default() -> Self {
        Self::in_dir(Path::new("."))
    }
}
