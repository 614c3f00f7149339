//! SQLite database schema for concord

use rusqlite::{Connection, Result};

pub const CURRENT_SCHEMA_VERSION: i32 = 1;

const SCHEMA_SQL: &str = r#"
-- Notes under review
CREATE TABLE IF NOT EXISTS notes (
    id TEXT PRIMARY KEY,
    title TEXT NOT NULL,
    author TEXT,
    created TEXT NOT NULL
);

-- Reviewers who hold assignments and submit grades
CREATE TABLE IF NOT EXISTS reviewers (
    id TEXT PRIMARY KEY,
    email TEXT NOT NULL UNIQUE,
    tier TEXT NOT NULL DEFAULT 'developing',
    created TEXT NOT NULL
);

-- One current grade per (note, reviewer); resubmission upserts
CREATE TABLE IF NOT EXISTS grades (
    note_id TEXT NOT NULL REFERENCES notes(id) ON DELETE CASCADE,
    reviewer_id TEXT NOT NULL REFERENCES reviewers(id) ON DELETE CASCADE,
    domain_scores TEXT NOT NULL DEFAULT '{}',
    total_score REAL NOT NULL,
    created TEXT NOT NULL,
    updated TEXT NOT NULL,
    PRIMARY KEY (note_id, reviewer_id)
);
CREATE INDEX IF NOT EXISTS idx_grades_note ON grades(note_id);

-- Assignment rows; the primary key is the authoritative duplicate guard
CREATE TABLE IF NOT EXISTS assignments (
    note_id TEXT NOT NULL REFERENCES notes(id) ON DELETE CASCADE,
    reviewer_id TEXT NOT NULL REFERENCES reviewers(id) ON DELETE CASCADE,
    status TEXT NOT NULL DEFAULT 'pending',
    assigned_at TEXT NOT NULL,
    completed_at TEXT,
    PRIMARY KEY (note_id, reviewer_id)
);
CREATE INDEX IF NOT EXISTS idx_assignments_reviewer ON assignments(reviewer_id, status);

-- Store metadata
CREATE TABLE IF NOT EXISTS meta (
    key TEXT PRIMARY KEY,
    value TEXT
);
"#;

pub fn create_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA_SQL)?;
    conn.execute(
        "INSERT OR REPLACE INTO meta (key, value) VALUES ('schema_version', ?1)",
        [CURRENT_SCHEMA_VERSION.to_string()],
    )?;
    Ok(())
}

pub fn schema_version(conn: &Connection) -> Result<i32> {
    conn.query_row(
        "SELECT value FROM meta WHERE key = 'schema_version'",
        [],
        |row| {
            let value: String = row.get(0)?;
            Ok(value.parse().unwrap_or(0))
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        create_schema(&conn).unwrap();
        create_schema(&conn).unwrap();
        assert_eq!(schema_version(&conn).unwrap(), CURRENT_SCHEMA_VERSION);
    }

    #[test]
    fn test_assignment_pair_is_unique() {
        let conn = Connection::open_in_memory().unwrap();
        create_schema(&conn).unwrap();

        conn.execute(
            "INSERT INTO notes (id, title, created) VALUES ('n1', 'Note', '2025-01-01T00:00:00Z')",
            [],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO reviewers (id, email, created) VALUES ('r1', 'r1@example.org', '2025-01-01T00:00:00Z')",
            [],
        )
        .unwrap();

        let insert = "INSERT INTO assignments (note_id, reviewer_id, assigned_at) \
                      VALUES ('n1', 'r1', '2025-01-02T00:00:00Z')";
        conn.execute(insert, []).unwrap();
        assert!(conn.execute(insert, []).is_err());
    }
}
