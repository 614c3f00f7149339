//! `concord assign` command - run a balancing batch
//!
//! Takes fresh workload snapshots and the existing-assignment set from the
//! store, runs the balancer, and persists the successful outcomes unless
//! --dry-run is given. Per-item failures are reported, not fatal.

use rand::rngs::StdRng;
use rand::SeedableRng;

use concord_core::balance::{self, Strategy};
use concord_core::error::{ConcordError, Result};
use concord_core::format::OutputFormat;

use crate::cli::Cli;
use crate::commands::helpers::open_store;

/// Execute the assign command
pub fn execute(
    cli: &Cli,
    strategy: Strategy,
    notes: &[String],
    exclude: &[String],
    seed: Option<u64>,
    dry_run: bool,
) -> Result<()> {
    let (db, _) = open_store(cli)?;

    let items: Vec<String> = if notes.is_empty() {
        db.unassigned_notes()?.into_iter().map(|n| n.id).collect()
    } else {
        for id in notes {
            if !db.note_exists(id)? {
                return Err(ConcordError::NoteNotFound { id: id.clone() });
            }
        }
        notes.to_vec()
    };

    let mut reviewers = db.workload_snapshots()?;
    reviewers.retain(|r| !exclude.contains(&r.reviewer_id));

    let existing = db.existing_assignment_pairs()?;

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let outcomes = balance::balance(&items, &reviewers, strategy, &existing, &mut rng);

    let created = if dry_run {
        0
    } else {
        db.record_outcomes(&outcomes)?
    };

    let assigned = outcomes.iter().filter(|o| o.is_success()).count();
    let failed = outcomes.len() - assigned;

    match cli.format {
        OutputFormat::Json => {
            let payload = serde_json::json!({
                "strategy": strategy,
                "dry_run": dry_run,
                "outcomes": outcomes,
                "summary": {
                    "total_items": outcomes.len(),
                    "assigned": assigned,
                    "failed": failed,
                    "assignments_created": created,
                    "reviewers_in_pool": reviewers.len(),
                },
            });
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
        OutputFormat::Human => {
            for outcome in &outcomes {
                match &outcome.failure {
                    None => println!(
                        "{} -> {}",
                        outcome.item_id,
                        outcome.reviewer_ids.join(", ")
                    ),
                    Some(reason) => println!("{}: failed ({})", outcome.item_id, reason),
                }
            }
            if !cli.quiet {
                eprintln!(
                    "{} item(s): {} assigned, {} failed; {} assignment row(s) created",
                    outcomes.len(),
                    assigned,
                    failed,
                    created
                );
            }
        }
    }
    Ok(())
}
