//! Command dispatch logic for concord

use crate::cli::{Cli, Commands, NoteCommands, ReviewerCommands};
use crate::commands;
use concord_core::error::{ConcordError, Result};

pub fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        None => Err(ConcordError::UsageError(
            "no command given (see --help)".to_string(),
        )),

        Some(Commands::Init) => commands::init::execute(cli),

        Some(Commands::Note { command }) => match command {
            NoteCommands::Add { id, title, author } => {
                commands::note::add(cli, id, title, author.as_deref())
            }
            NoteCommands::List { unassigned } => commands::note::list(cli, *unassigned),
        },

        Some(Commands::Reviewer { command }) => match command {
            ReviewerCommands::Add { id, email, tier } => {
                commands::reviewer::add(cli, id, email, *tier)
            }
            ReviewerCommands::List => commands::reviewer::list(cli),
        },

        Some(Commands::Grade {
            note,
            reviewer,
            scores,
        }) => commands::grade::execute(cli, note, reviewer, scores),

        Some(Commands::Reliability) => commands::reliability::execute(cli),

        Some(Commands::Assign {
            strategy,
            notes,
            exclude,
            seed,
            dry_run,
        }) => commands::assign::execute(cli, *strategy, notes, exclude, *seed, *dry_run),

        Some(Commands::Workload) => commands::workload::execute(cli),
    }
}
