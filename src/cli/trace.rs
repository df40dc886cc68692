use std::path::PathBuf;

use clap::Parser;
use reqcat::storage::artifacts;
use tracing::instrument;

use super::{Workspace, terminal::Paint};

#[derive(Debug, Parser)]
#[command(about = "List requirement IDs referenced by interface artifacts")]
pub struct Trace {
    /// Directory of YAML interface artifacts, relative to the corpus root
    #[arg(long, default_value = "artifacts")]
    artifacts: PathBuf,
}

impl Trace {
    #[instrument(level = "debug", skip(self, workspace))]
    pub fn run(self, workspace: &Workspace) {
        let dir = workspace.root.join(&self.artifacts);
        let ids = artifacts::requirement_ids(&dir);

        println!(
            "{}",
            format!("--- Requirement IDs referenced in {} ---", dir.display()).heading()
        );
        for id in &ids {
            println!("- {id}");
        }
        println!("Total unique requirement IDs: {}", ids.len());
    }
}
