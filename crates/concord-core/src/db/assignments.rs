//! Assignment rows: existing-pair snapshots, workload aggregation, and
//! persistence of balancing outcomes

use std::collections::HashSet;

use chrono::Utc;
use rusqlite::params;

use crate::balance::AssignmentOutcome;
use crate::error::{ConcordError, Result};
use crate::records::ReviewerWorkload;

use super::Database;

impl Database {
    /// Snapshot of every (note, reviewer) pair that already holds an
    /// assignment, completed or not. Best-effort: the table's primary key
    /// remains the authoritative guard under concurrent writers.
    pub fn existing_assignment_pairs(&self) -> Result<HashSet<(String, String)>> {
        let mut stmt = self
            .conn()
            .prepare("SELECT note_id, reviewer_id FROM assignments")?;
        let pairs = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<rusqlite::Result<HashSet<_>>>()
            .map_err(|e| ConcordError::db_operation("fetch assignment pairs", e))?;
        Ok(pairs)
    }

    /// Fresh per-reviewer workload snapshot, recomputed on every call
    pub fn workload_snapshots(&self) -> Result<Vec<ReviewerWorkload>> {
        let mut stmt = self.conn().prepare(
            "SELECT r.id, r.tier, \
                    COALESCE(SUM(CASE WHEN a.status = 'pending' THEN 1 ELSE 0 END), 0), \
                    COALESCE(SUM(CASE WHEN a.status = 'completed' THEN 1 ELSE 0 END), 0) \
             FROM reviewers r \
             LEFT JOIN assignments a ON a.reviewer_id = r.id \
             GROUP BY r.id \
             ORDER BY r.id",
        )?;

        let snapshots = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, u32>(2)?,
                    row.get::<_, u32>(3)?,
                ))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| ConcordError::db_operation("fetch workload snapshots", e))?
            .into_iter()
            .map(|(reviewer_id, tier, active, completed)| {
                Ok(ReviewerWorkload {
                    reviewer_id,
                    tier: tier.parse()?,
                    active_assignments: active,
                    completed_assignments: completed,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(snapshots)
    }

    /// Persist the successful outcomes of a balancing run as pending
    /// assignment rows. Pairs that raced in since the snapshot are skipped
    /// by the uniqueness constraint. Returns the number of rows created.
    pub fn record_outcomes(&self, outcomes: &[AssignmentOutcome]) -> Result<usize> {
        let now = Utc::now().to_rfc3339();
        let mut created = 0;

        for outcome in outcomes.iter().filter(|o| o.is_success()) {
            for reviewer_id in &outcome.reviewer_ids {
                created += self
                    .conn()
                    .execute(
                        "INSERT OR IGNORE INTO assignments (note_id, reviewer_id, assigned_at) \
                         VALUES (?1, ?2, ?3)",
                        params![outcome.item_id, reviewer_id, now],
                    )
                    .map_err(|e| ConcordError::db_operation("insert assignment", e))?;
            }
        }

        tracing::debug!(created, "assignments_recorded");
        Ok(created)
    }
}
