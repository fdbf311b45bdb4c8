use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use social_graph::config::{FRIENDSHIPS_FILE, INPUT_FILE, OUTPUT_FILE, USERS_FILE};
use social_graph::{CommandProcessor, DataPaths, FileStore};

/// Process social graph commands against the persisted users and friendships.
#[derive(Parser)]
#[command(name = "social_graph", version)]
struct Cli {
    /// Directory holding the users and friendships files
    #[arg(long, default_value = ".")]
    data_dir: PathBuf,

    /// Users file name, relative to the data directory
    #[arg(long, default_value = USERS_FILE)]
    users_file: PathBuf,

    /// Friendships file name, relative to the data directory
    #[arg(long, default_value = FRIENDSHIPS_FILE)]
    friendships_file: PathBuf,

    /// Command input (`-` for stdin) [default: input.txt in the data directory]
    #[arg(long)]
    input: Option<PathBuf>,

    /// Result output, truncated at start (`-` for stdout) [default: output.txt in the data directory]
    #[arg(long)]
    output: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Cli {
    fn paths(&self) -> DataPaths {
        DataPaths {
            users: self.data_dir.join(&self.users_file),
            friendships: self.data_dir.join(&self.friendships_file),
            input: self
                .input
                .clone()
                .unwrap_or_else(|| self.data_dir.join(INPUT_FILE)),
            output: self
                .output
                .clone()
                .unwrap_or_else(|| self.data_dir.join(OUTPUT_FILE)),
        }
    }
}

fn setup_logging(verbose: bool, quiet: bool) {
    let filter = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose, cli.quiet);

    let paths = cli.paths();
    let store = FileStore::from_paths(&paths);
    let graph = store.load().context("Failed to load persisted social graph")?;
    let mut processor = CommandProcessor::new(graph, store);

    let input: Box<dyn io::BufRead> = if paths.reads_stdin() {
        Box::new(io::stdin().lock())
    } else {
        let file = File::open(&paths.input)
            .with_context(|| format!("Failed to open input {}", paths.input.display()))?;
        Box::new(BufReader::new(file))
    };

    let output: Box<dyn io::Write> = if paths.writes_stdout() {
        Box::new(io::stdout().lock())
    } else {
        let file = File::create(&paths.output)
            .with_context(|| format!("Failed to create output {}", paths.output.display()))?;
        Box::new(BufWriter::new(file))
    };

    processor
        .run(input, output)
        .context("Failed to process commands")?;
    Ok(())
}
