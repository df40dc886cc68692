use clap::Parser;
use reqcat::{TestRecord, storage::artifacts};
use tracing::instrument;

use super::{
    Workspace,
    terminal::{Paint, is_narrow},
};

#[derive(Debug, Parser)]
#[command(about = "List the test cases of each module directory")]
pub struct Cases {}

impl Cases {
    #[instrument(level = "debug", skip(self, workspace))]
    pub fn run(self, workspace: &Workspace) {
        let modules = artifacts::modules(&workspace.root);
        if modules.is_empty() {
            println!("{}", "No module directories found.".muted());
            return;
        }

        let narrow = is_narrow();
        println!("{}", "--- Test cases by module ---".heading());
        for module in &modules {
            println!();
            println!(
                "{}",
                format!("[{}] ({} cases)", module.name.to_uppercase(), module.cases.len()).label()
            );

            let width = module
                .cases
                .iter()
                .map(|case| case.name().chars().count())
                .max()
                .unwrap_or(0);
            for case in &module.cases {
                Self::print_case(case, narrow, width);
            }
        }
    }

    fn print_case(case: &TestRecord, narrow: bool, width: usize) {
        if narrow {
            // Stacked output for narrow terminals
            println!("  - {}", case.name());
            println!("    {}", case.source().muted());
        } else {
            println!("  - {:<width$}  {}", case.name(), case.source().muted());
        }
    }
}
