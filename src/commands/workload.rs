//! `concord workload` command - per-reviewer workload snapshots

use concord_core::error::Result;
use concord_core::format::OutputFormat;

use crate::cli::Cli;
use crate::commands::helpers::open_store;

/// Execute the workload command
pub fn execute(cli: &Cli) -> Result<()> {
    let (db, _) = open_store(cli)?;
    let snapshots = db.workload_snapshots()?;

    match cli.format {
        OutputFormat::Json => {
            let payload: Vec<serde_json::Value> = snapshots
                .iter()
                .map(|w| {
                    serde_json::json!({
                        "reviewer_id": w.reviewer_id,
                        "tier": w.tier,
                        "active_assignments": w.active_assignments,
                        "completed_assignments": w.completed_assignments,
                        "completion_rate": w.completion_rate(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
        OutputFormat::Human => {
            for w in &snapshots {
                println!(
                    "{}  {}  active={} completed={} completion={:.1}%",
                    w.reviewer_id,
                    w.tier,
                    w.active_assignments,
                    w.completed_assignments,
                    w.completion_rate()
                );
            }
            if !cli.quiet {
                eprintln!("{} reviewer(s)", snapshots.len());
            }
        }
    }
    Ok(())
}
