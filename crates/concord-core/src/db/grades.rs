//! Grade rows and the notes-with-grades join feeding the analyzer

use chrono::Utc;
use rusqlite::params;

use crate::config::RubricConfig;
use crate::error::{ConcordError, Result};
use crate::records::{DomainScores, GradeRecord, NoteRecord, NoteWithGrades};

use super::notes::parse_timestamp;
use super::Database;

impl Database {
    /// Record a reviewer's completed evaluation of a note.
    ///
    /// Scores are validated against the rubric before anything is written.
    /// Resubmission updates the existing row in place, so at most one
    /// current grade exists per (note, reviewer) pair. A matching pending
    /// assignment is marked completed as a side effect.
    pub fn upsert_grade(
        &self,
        note_id: &str,
        reviewer_id: &str,
        scores: &DomainScores,
        rubric: &RubricConfig,
    ) -> Result<()> {
        scores.validate(rubric)?;

        if !self.note_exists(note_id)? {
            return Err(ConcordError::NoteNotFound {
                id: note_id.to_string(),
            });
        }
        if !self.reviewer_exists(reviewer_id)? {
            return Err(ConcordError::ReviewerNotFound {
                id: reviewer_id.to_string(),
            });
        }

        let now = Utc::now().to_rfc3339();
        let scores_json = serde_json::to_string(scores)?;

        self.conn()
            .execute(
                "INSERT INTO grades (note_id, reviewer_id, domain_scores, total_score, created, updated) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?5) \
                 ON CONFLICT (note_id, reviewer_id) DO UPDATE SET \
                     domain_scores = excluded.domain_scores, \
                     total_score = excluded.total_score, \
                     updated = excluded.updated",
                params![note_id, reviewer_id, scores_json, scores.total(), now],
            )
            .map_err(|e| ConcordError::db_operation("upsert grade", e))?;

        // Submitting a grade completes the reviewer's assignment for the note
        self.conn()
            .execute(
                "UPDATE assignments SET status = 'completed', completed_at = ?3 \
                 WHERE note_id = ?1 AND reviewer_id = ?2 AND status = 'pending'",
                params![note_id, reviewer_id, now],
            )
            .map_err(|e| ConcordError::db_operation("complete assignment", e))?;

        tracing::debug!(note_id, reviewer_id, total = scores.total(), "grade_recorded");
        Ok(())
    }

    /// Every note that has at least one grade, bundled with its grades.
    /// The analyzer applies its own two-grader precondition on top.
    pub fn notes_with_grades(&self) -> Result<Vec<NoteWithGrades>> {
        let mut stmt = self.conn().prepare(
            "SELECT n.id, n.title, n.author, n.created, \
                    g.reviewer_id, g.total_score, g.updated \
             FROM notes n JOIN grades g ON g.note_id = n.id \
             ORDER BY n.created, n.id, g.updated",
        )?;

        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, Option<String>>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, String>(4)?,
                    row.get::<_, f64>(5)?,
                    row.get::<_, String>(6)?,
                ))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| ConcordError::db_operation("fetch notes with grades", e))?;

        let mut bundles: Vec<NoteWithGrades> = Vec::new();
        for (note_id, title, author, created, reviewer_id, total_score, updated) in rows {
            if bundles.last().map(|b| b.note.id.as_str()) != Some(note_id.as_str()) {
                bundles.push(NoteWithGrades {
                    note: NoteRecord {
                        id: note_id.clone(),
                        title,
                        author,
                        created: parse_timestamp(&created),
                    },
                    grades: Vec::new(),
                });
            }
            if let Some(bundle) = bundles.last_mut() {
                bundle.grades.push(GradeRecord {
                    note_id,
                    reviewer_id,
                    total_score,
                    created_at: parse_timestamp(&updated),
                });
            }
        }
        Ok(bundles)
    }
}
