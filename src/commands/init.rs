//! `concord init` command - create a new store

use concord_core::config::{RubricConfig, RUBRIC_FILE};
use concord_core::db::Database;
use concord_core::error::Result;
use concord_core::format::OutputFormat;

use crate::cli::Cli;

/// Execute the init command
pub fn execute(cli: &Cli) -> Result<()> {
    Database::create(&cli.store)?;

    let rubric_path = cli.store.join(RUBRIC_FILE);
    let rubric = RubricConfig::default();
    rubric.save(&rubric_path)?;

    match cli.format {
        OutputFormat::Json => {
            let payload = serde_json::json!({
                "status": "initialized",
                "store": cli.store.display().to_string(),
                "rubric": {
                    "domains": rubric.domains.len(),
                    "max_possible_variance": rubric.max_possible_variance(),
                },
            });
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
        OutputFormat::Human => {
            if !cli.quiet {
                println!("Initialized concord store at {}", cli.store.display());
                println!(
                    "Default rubric: {} domains, max score {}",
                    rubric.domains.len(),
                    rubric.max_total_score()
                );
            }
        }
    }

    Ok(())
}
