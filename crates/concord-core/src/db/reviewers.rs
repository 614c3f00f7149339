//! Reviewer rows

use rusqlite::params;

use crate::error::{ConcordError, Result};
use crate::records::Reviewer;

use super::notes::parse_timestamp;
use super::Database;

impl Database {
    /// Register a new reviewer; id and email must both be unused
    pub fn insert_reviewer(&self, reviewer: &Reviewer) -> Result<()> {
        let result = self.conn().execute(
            "INSERT INTO reviewers (id, email, tier, created) VALUES (?1, ?2, ?3, ?4)",
            params![
                reviewer.id,
                reviewer.email,
                reviewer.tier.to_string(),
                reviewer.created.to_rfc3339()
            ],
        );

        match result {
            Ok(_) => Ok(()),
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Err(ConcordError::already_exists("reviewer", &reviewer.id))
            }
            Err(e) => Err(ConcordError::db_operation("insert reviewer", e)),
        }
    }

    /// Whether a reviewer row exists
    pub fn reviewer_exists(&self, id: &str) -> Result<bool> {
        let count: i64 = self
            .conn()
            .query_row(
                "SELECT COUNT(*) FROM reviewers WHERE id = ?1",
                [id],
                |row| row.get(0),
            )
            .map_err(|e| ConcordError::db_operation("check reviewer", e))?;
        Ok(count > 0)
    }

    /// All reviewers, ordered by id
    pub fn list_reviewers(&self) -> Result<Vec<Reviewer>> {
        let mut stmt = self
            .conn()
            .prepare("SELECT id, email, tier, created FROM reviewers ORDER BY id")?;
        let reviewers = stmt
            .query_map([], |row| {
                let tier: String = row.get(2)?;
                let created: String = row.get(3)?;
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?, tier, created))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| ConcordError::db_operation("list reviewers", e))?
            .into_iter()
            .map(|(id, email, tier, created)| {
                Ok(Reviewer {
                    id,
                    email,
                    tier: tier.parse()?,
                    created: parse_timestamp(&created),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(reviewers)
    }
}
