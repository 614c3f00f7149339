//! `concord reviewer` commands - register and list reviewers

use chrono::Utc;

use concord_core::error::Result;
use concord_core::format::OutputFormat;
use concord_core::records::{ExperienceTier, Reviewer};

use crate::cli::Cli;
use crate::commands::helpers::open_store;

/// Register a reviewer
pub fn add(cli: &Cli, id: &str, email: &str, tier: ExperienceTier) -> Result<()> {
    let (db, _) = open_store(cli)?;

    let reviewer = Reviewer {
        id: id.to_string(),
        email: email.to_string(),
        tier,
        created: Utc::now(),
    };
    db.insert_reviewer(&reviewer)?;

    match cli.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&reviewer)?);
        }
        OutputFormat::Human => {
            if !cli.quiet {
                println!("Added reviewer {} ({})", reviewer.id, reviewer.tier);
            }
        }
    }
    Ok(())
}

/// List reviewers
pub fn list(cli: &Cli) -> Result<()> {
    let (db, _) = open_store(cli)?;
    let reviewers = db.list_reviewers()?;

    match cli.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&reviewers)?);
        }
        OutputFormat::Human => {
            for reviewer in &reviewers {
                println!("{}  {}  {}", reviewer.id, reviewer.email, reviewer.tier);
            }
            if !cli.quiet {
                eprintln!("{} reviewer(s)", reviewers.len());
            }
        }
    }
    Ok(())
}
