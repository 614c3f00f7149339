//! `concord reliability` command - inter-rater agreement report
//!
//! Fetches every multiply-graded note from the store, runs the analyzer,
//! and prints the sorted report with summary counts. Notes graded by a
//! single reviewer carry no agreement signal and never appear.

use concord_core::error::Result;
use concord_core::format::OutputFormat;
use concord_core::reliability;

use crate::cli::Cli;
use crate::commands::helpers::open_store;

/// Execute the reliability command
pub fn execute(cli: &Cli) -> Result<()> {
    let (db, rubric) = open_store(cli)?;

    let notes = db.notes_with_grades()?;
    let report = reliability::analyze(&notes, &rubric);

    match cli.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Human => {
            for r in &report.reports {
                println!(
                    "{:<8} {:>5.1}%  {}  graders={} mean={:.2} sd={:.2}",
                    r.reliability_level,
                    r.agreement_percentage,
                    r.note_id,
                    r.grader_count,
                    r.mean_score,
                    r.std_deviation
                );
            }
            if !cli.quiet {
                let s = &report.summary;
                eprintln!(
                    "{} note(s): {} high, {} medium, {} low; avg graders/note {:.1}",
                    s.total_notes,
                    s.high_reliability,
                    s.medium_reliability,
                    s.low_reliability,
                    s.average_graders_per_note
                );
            }
        }
    }
    Ok(())
}
