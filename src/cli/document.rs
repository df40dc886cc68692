use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Parser;
use reqcat::report::{self, document};
use tracing::instrument;

use super::{Workspace, terminal::Paint};

#[derive(Debug, Parser)]
#[command(about = "Write the full requirements document")]
pub struct Document {
    /// Where to write the document (replaced on every run)
    #[arg(long, short, default_value = "Detailed_Requirements_List.md")]
    output: PathBuf,

    /// Generation date recorded in the document (defaults to today)
    #[arg(long, value_name = "YYYY-MM-DD")]
    date: Option<NaiveDate>,
}

impl Document {
    #[instrument(level = "debug", skip(self, workspace))]
    pub fn run(self, workspace: &Workspace) -> anyhow::Result<()> {
        let aggregation = document::aggregate(&workspace.corpus(), &workspace.config.classifier());

        let date = self
            .date
            .unwrap_or_else(|| chrono::Local::now().date_naive());
        let content = document::render(&aggregation, &date.format("%Y-%m-%d").to_string());

        report::write(&self.output, &content)?;

        println!(
            "{} {} atomic requirements from {} features to {}",
            "Wrote".heading(),
            aggregation.total_requirements(),
            aggregation.total_features(),
            self.output.display()
        );
        Ok(())
    }
}
