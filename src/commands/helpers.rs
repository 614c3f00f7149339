//! Shared helpers for command implementations

use concord_core::config::{RubricConfig, RUBRIC_FILE};
use concord_core::db::Database;
use concord_core::error::Result;

use crate::cli::Cli;

/// Open the store and its rubric configuration.
///
/// A missing rubric file falls back to the default rubric, so stores
/// created before rubric customization keep working.
pub fn open_store(cli: &Cli) -> Result<(Database, RubricConfig)> {
    let db = Database::open(&cli.store)?;

    let rubric_path = cli.store.join(RUBRIC_FILE);
    let rubric = if rubric_path.exists() {
        RubricConfig::load(&rubric_path)?
    } else {
        tracing::debug!(path = %rubric_path.display(), "rubric_missing_using_default");
        RubricConfig::default()
    };

    Ok((db, rubric))
}
