//! Note rows

use chrono::{DateTime, Utc};
use rusqlite::{params, Row};

use crate::error::{ConcordError, Result};
use crate::records::NoteRecord;

use super::Database;

fn note_from_row(row: &Row<'_>) -> rusqlite::Result<NoteRecord> {
    let created: String = row.get(3)?;
    Ok(NoteRecord {
        id: row.get(0)?,
        title: row.get(1)?,
        author: row.get(2)?,
        created: parse_timestamp(&created),
    })
}

pub(super) fn parse_timestamp(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_default()
}

impl Database {
    /// Insert a new note; the id must be unused
    pub fn insert_note(&self, note: &NoteRecord) -> Result<()> {
        let inserted = self
            .conn()
            .execute(
                "INSERT OR IGNORE INTO notes (id, title, author, created) VALUES (?1, ?2, ?3, ?4)",
                params![
                    note.id,
                    note.title,
                    note.author,
                    note.created.to_rfc3339()
                ],
            )
            .map_err(|e| ConcordError::db_operation("insert note", e))?;

        if inserted == 0 {
            return Err(ConcordError::already_exists("note", &note.id));
        }
        Ok(())
    }

    /// Whether a note row exists
    pub fn note_exists(&self, id: &str) -> Result<bool> {
        let count: i64 = self
            .conn()
            .query_row("SELECT COUNT(*) FROM notes WHERE id = ?1", [id], |row| {
                row.get(0)
            })
            .map_err(|e| ConcordError::db_operation("check note", e))?;
        Ok(count > 0)
    }

    /// All notes, ordered by creation time then id for deterministic output
    pub fn list_notes(&self) -> Result<Vec<NoteRecord>> {
        let mut stmt = self
            .conn()
            .prepare("SELECT id, title, author, created FROM notes ORDER BY created, id")?;
        let notes = stmt
            .query_map([], note_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| ConcordError::db_operation("list notes", e))?;
        Ok(notes)
    }

    /// Notes with no assignment row at all, the balancing input set
    pub fn unassigned_notes(&self) -> Result<Vec<NoteRecord>> {
        let mut stmt = self.conn().prepare(
            "SELECT n.id, n.title, n.author, n.created FROM notes n \
             WHERE NOT EXISTS (SELECT 1 FROM assignments a WHERE a.note_id = n.id) \
             ORDER BY n.created, n.id",
        )?;
        let notes = stmt
            .query_map([], note_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| ConcordError::db_operation("list unassigned notes", e))?;
        Ok(notes)
    }
}

#[cfg(test)]
mod tests {
    use super::super::Database;
    use crate::error::ConcordError;
    use crate::records::NoteRecord;
    use chrono::{TimeZone, Utc};

    fn note(id: &str) -> NoteRecord {
        NoteRecord {
            id: id.to_string(),
            title: format!("Note {}", id),
            author: Some("author".to_string()),
            created: Utc.with_ymd_and_hms(2025, 2, 1, 8, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_insert_and_list() {
        let db = Database::open_in_memory().unwrap();
        db.insert_note(&note("n1")).unwrap();
        db.insert_note(&note("n2")).unwrap();

        let notes = db.list_notes().unwrap();
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0], note("n1"));
        assert!(db.note_exists("n1").unwrap());
        assert!(!db.note_exists("n9").unwrap());
    }

    #[test]
    fn test_duplicate_insert_fails() {
        let db = Database::open_in_memory().unwrap();
        db.insert_note(&note("n1")).unwrap();
        let err = db.insert_note(&note("n1")).unwrap_err();
        assert!(matches!(err, ConcordError::AlreadyExists { .. }));
    }
}
