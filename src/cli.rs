use std::path::{Path, PathBuf};

mod cases;
mod diff;
mod document;
mod summary;
mod terminal;
mod trace;

use cases::Cases;
use clap::ArgAction;
use diff::Diff;
use document::Document;
use reqcat::{Config, Corpus};
use summary::Summary;
use trace::Trace;
use tracing::instrument;

/// Name of the configuration file looked up in the corpus root.
const CONFIG_FILE: &str = "reqcat.toml";

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// The directory holding the test-case corpus
    #[arg(short, long, default_value = ".", global = true)]
    root: PathBuf,

    /// Path to the classification config (defaults to `reqcat.toml` in the
    /// corpus root)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Also read test cases from sub-directories of the corpus
    #[arg(long, global = true)]
    recursive: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        let config_path = self
            .config
            .unwrap_or_else(|| self.root.join(CONFIG_FILE));

        let command = self
            .command
            .unwrap_or_else(|| Command::Summary(Summary::default()));

        let config = Config::load_or_default(&config_path).map_err(|e| {
            anyhow::anyhow!("cannot use config {}: {e}", config_path.display())
        })?;

        let workspace = Workspace {
            root: self.root,
            recursive: self.recursive,
            config_path,
            config,
        };

        command.run(&workspace)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

/// Settings shared by every command.
#[derive(Debug)]
pub struct Workspace {
    root: PathBuf,
    recursive: bool,
    config_path: PathBuf,
    config: Config,
}

impl Workspace {
    /// The corpus rooted at `--root`. Skipped files are reported through the
    /// log when it is loaded.
    fn corpus(&self) -> Corpus {
        Corpus::new(self.root.clone()).recursive(self.recursive)
    }
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Print a per-category summary of the atomic requirements (default)
    Summary(Summary),

    /// Write the full requirements document
    Document(Document),

    /// Write a comparison report of rewritten files against their backups
    Diff(Diff),

    /// List requirement IDs referenced by interface artifacts
    Trace(Trace),

    /// List the test cases of each module directory
    Cases(Cases),

    /// Write a default configuration file
    Init,
}

impl Command {
    fn run(self, workspace: &Workspace) -> anyhow::Result<()> {
        match self {
            Self::Summary(command) => command.run(workspace)?,
            Self::Document(command) => command.run(workspace)?,
            Self::Diff(command) => command.run(workspace)?,
            Self::Trace(command) => command.run(workspace),
            Self::Cases(command) => command.run(workspace),
            Self::Init => Init::run(&workspace.config_path)?,
        }
        Ok(())
    }
}

struct Init;

impl Init {
    #[instrument]
    fn run(path: &Path) -> anyhow::Result<()> {
        if path.exists() {
            anyhow::bail!("Configuration already exists at {}", path.display());
        }

        Config::default()
            .save(path)
            .map_err(|e| anyhow::anyhow!("Failed to create {}: {e}", path.display()))?;

        println!("Created {}", path.display());
        println!("Edit the [[categories]] table to change how test cases are classified.");
        Ok(())
    }
}
