//! `concord grade` command - record a reviewer's rubric scores
//!
//! Scores are validated against the store's rubric before the grade row is
//! written. Resubmitting replaces the previous grade for the same
//! (note, reviewer) pair and completes any pending assignment.

use concord_core::error::{ConcordError, Result};
use concord_core::format::OutputFormat;
use concord_core::records::DomainScores;

use crate::cli::Cli;
use crate::commands::helpers::open_store;

/// Execute the grade command
pub fn execute(cli: &Cli, note: &str, reviewer: &str, scores: &[(String, f64)]) -> Result<()> {
    let (db, rubric) = open_store(cli)?;

    let mut domain_scores = DomainScores::default();
    for (domain, points) in scores {
        if domain_scores.0.insert(domain.clone(), *points).is_some() {
            return Err(ConcordError::UsageError(format!(
                "domain given twice: {}",
                domain
            )));
        }
    }

    db.upsert_grade(note, reviewer, &domain_scores, &rubric)?;

    match cli.format {
        OutputFormat::Json => {
            let payload = serde_json::json!({
                "note_id": note,
                "reviewer_id": reviewer,
                "domain_scores": domain_scores,
                "total_score": domain_scores.total(),
            });
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
        OutputFormat::Human => {
            if !cli.quiet {
                println!(
                    "Recorded grade for {} by {} (total {})",
                    note,
                    reviewer,
                    domain_scores.total()
                );
            }
        }
    }
    Ok(())
}
