use clap::Parser;
use reqcat::{
    Aggregation,
    report::summary::{self, Summary as ConsoleSummary},
};
use serde_json::json;
use tracing::instrument;

use super::{Workspace, terminal::Paint};

#[derive(Debug, Parser, Default)]
#[command(about = "Print a per-category summary of the atomic requirements")]
pub struct Summary {
    /// Output format (table, json)
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    output: OutputFormat,

    /// Maximum example requirements per category (defaults to the configured
    /// value)
    #[arg(long, value_name = "N")]
    examples: Option<usize>,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl Summary {
    #[instrument(level = "debug", skip(self, workspace))]
    pub fn run(self, workspace: &Workspace) -> anyhow::Result<()> {
        let aggregation = summary::aggregate(&workspace.corpus(), &workspace.config.classifier());

        match self.output {
            OutputFormat::Json => Self::output_json(&aggregation)?,
            OutputFormat::Table => {
                let examples = self
                    .examples
                    .unwrap_or_else(|| workspace.config.summary_examples());
                Self::output_table(&ConsoleSummary::new(&aggregation, examples));
            }
        }

        Ok(())
    }

    fn output_json(aggregation: &Aggregation) -> anyhow::Result<()> {
        let categories: Vec<_> = aggregation
            .categories()
            .iter()
            .map(|group| {
                json!({
                    "category": group.category().label(),
                    "count": group.requirement_count(),
                    "features": group.features(),
                })
            })
            .collect();

        let output = json!({
            "total": {
                "categories": aggregation.total_categories(),
                "features": aggregation.total_features(),
                "requirements": aggregation.total_requirements(),
            },
            "categories": categories,
        });

        println!("{}", serde_json::to_string_pretty(&output)?);
        Ok(())
    }

    fn output_table(summary: &ConsoleSummary<'_>) {
        println!("{}", summary::heading(summary.total()).heading());

        if summary.categories().is_empty() {
            println!("{}", "No atomic requirements found.".muted());
            return;
        }

        for category in summary.categories() {
            println!();
            println!("{}", summary::category_heading(category).label());
            for requirement in category.examples() {
                println!("{}", summary::example_line(requirement));
            }
            if category.remaining() > 0 {
                println!("{}", summary::elision_line(category.remaining()).muted());
            }
        }
    }
}
