//! CLI argument parsing for concord
//!
//! Global flags: --store, --format, --quiet, --verbose, plus logging
//! controls. Subcommands cover store setup, registration of notes and
//! reviewers, grade recording, and the two analysis workflows.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use concord_core::balance::Strategy;
use concord_core::format::OutputFormat;
use concord_core::records::ExperienceTier;

/// Concord - inter-rater reliability and assignment balancing for graded review
#[derive(Parser, Debug)]
#[command(name = "concord")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Store directory holding concord.db and rubric.toml
    #[arg(long, global = true, default_value = ".", env = "CONCORD_STORE")]
    pub store: PathBuf,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_parser = parse_format)]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Explicit log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new concord store with a default rubric
    Init,

    /// Manage notes under review
    Note {
        #[command(subcommand)]
        command: NoteCommands,
    },

    /// Manage reviewers
    Reviewer {
        #[command(subcommand)]
        command: ReviewerCommands,
    },

    /// Record a reviewer's rubric scores for a note
    Grade {
        /// Note being graded
        #[arg(long)]
        note: String,

        /// Reviewer submitting the evaluation
        #[arg(long)]
        reviewer: String,

        /// Per-domain score as domain=points (repeatable)
        #[arg(long = "score", value_parser = parse_score, required = true)]
        scores: Vec<(String, f64)>,
    },

    /// Compute the inter-rater reliability report
    Reliability,

    /// Distribute notes across reviewers under a pairing strategy
    Assign {
        /// Pairing strategy
        #[arg(long, value_parser = parse_strategy)]
        strategy: Strategy,

        /// Note to assign (repeatable); defaults to every unassigned note
        #[arg(long = "note")]
        notes: Vec<String>,

        /// Reviewer to leave out of the pool (repeatable)
        #[arg(long = "exclude")]
        exclude: Vec<String>,

        /// Seed for the strategy's random choices; entropy when omitted
        #[arg(long)]
        seed: Option<u64>,

        /// Compute outcomes without writing assignment rows
        #[arg(long)]
        dry_run: bool,
    },

    /// Show per-reviewer workload snapshots
    Workload,
}

#[derive(Subcommand, Debug)]
pub enum NoteCommands {
    /// Register a note
    Add {
        /// Note identifier
        id: String,

        /// Display title
        #[arg(long)]
        title: String,

        /// Attributed author
        #[arg(long)]
        author: Option<String>,
    },

    /// List notes
    List {
        /// Only notes with no assignment yet
        #[arg(long)]
        unassigned: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum ReviewerCommands {
    /// Register a reviewer
    Add {
        /// Reviewer identifier
        id: String,

        /// Contact email
        #[arg(long)]
        email: String,

        /// Experience tier (experienced, developing)
        #[arg(long, default_value = "developing", value_parser = parse_tier)]
        tier: ExperienceTier,
    },

    /// List reviewers
    List,
}

fn parse_format(s: &str) -> Result<OutputFormat, String> {
    s.parse().map_err(|e: concord_core::error::ConcordError| e.to_string())
}

fn parse_strategy(s: &str) -> Result<Strategy, String> {
    s.parse().map_err(|e: concord_core::error::ConcordError| e.to_string())
}

fn parse_tier(s: &str) -> Result<ExperienceTier, String> {
    s.parse().map_err(|e: concord_core::error::ConcordError| e.to_string())
}

/// Parse a `domain=points` score argument
fn parse_score(s: &str) -> Result<(String, f64), String> {
    let (domain, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected domain=points, got: {}", s))?;
    let points: f64 = value
        .parse()
        .map_err(|_| format!("invalid points for domain {}: {}", domain, value))?;
    Ok((domain.to_string(), points))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_score() {
        assert_eq!(
            parse_score("technique=4.5").unwrap(),
            ("technique".to_string(), 4.5)
        );
        assert!(parse_score("technique").is_err());
        assert!(parse_score("technique=lots").is_err());
    }

    #[test]
    fn test_cli_parses_assign() {
        let cli = Cli::try_parse_from([
            "concord",
            "assign",
            "--strategy",
            "random-pairs",
            "--note",
            "n1",
            "--note",
            "n2",
            "--seed",
            "7",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Assign {
                strategy,
                notes,
                seed,
                dry_run,
                ..
            }) => {
                assert_eq!(strategy, Strategy::RandomPairs);
                assert_eq!(notes, vec!["n1", "n2"]);
                assert_eq!(seed, Some(7));
                assert!(!dry_run);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_strategy() {
        assert!(Cli::try_parse_from(["concord", "assign", "--strategy", "round-robin"]).is_err());
    }
}
