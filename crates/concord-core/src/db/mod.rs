//! SQLite database module for concord
//!
//! The store is the system of record for notes, reviewers, grades, and
//! assignment rows. The analyzer and balancer never touch it directly;
//! they consume materialized snapshots fetched here.

mod assignments;
mod grades;
mod notes;
mod reviewers;
mod schema;

use std::path::Path;

use rusqlite::Connection;

use crate::error::{ConcordError, Result};

pub use schema::{create_schema, CURRENT_SCHEMA_VERSION};

/// Database file name inside a store root
pub const DB_FILE: &str = "concord.db";

/// SQLite database for concord
#[derive(Debug)]
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database under an existing store root
    pub fn open(store_root: &Path) -> Result<Self> {
        let db_path = store_root.join(DB_FILE);
        if !db_path.exists() {
            return Err(ConcordError::StoreNotFound {
                search_root: store_root.to_path_buf(),
            });
        }

        let conn = Connection::open(&db_path).map_err(|e| {
            ConcordError::Other(format!(
                "failed to open database at {}: {}",
                db_path.display(),
                e
            ))
        })?;

        Self::configure(&conn)?;
        // Idempotent; brings older stores up to the current schema
        schema::create_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Create a fresh store at the given root
    pub fn create(store_root: &Path) -> Result<Self> {
        std::fs::create_dir_all(store_root)?;

        let db_path = store_root.join(DB_FILE);
        if db_path.exists() {
            return Err(ConcordError::already_exists("store", db_path.display()));
        }

        let conn = Connection::open(&db_path).map_err(|e| {
            ConcordError::Other(format!(
                "failed to create database at {}: {}",
                db_path.display(),
                e
            ))
        })?;

        Self::configure(&conn)?;
        schema::create_schema(&conn)?;

        tracing::info!(path = %db_path.display(), "store_created");
        Ok(Self { conn })
    }

    /// Open an in-memory database, used by tests and ad-hoc tooling
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| ConcordError::Other(format!("failed to open in-memory database: {}", e)))?;
        Self::configure(&conn)?;
        schema::create_schema(&conn)?;
        Ok(Self { conn })
    }

    fn configure(conn: &Connection) -> Result<()> {
        conn.pragma_update(None, "foreign_keys", "ON")
            .map_err(|e| ConcordError::db_operation("enable foreign keys", e))?;
        Ok(())
    }

    /// Borrow the underlying connection
    pub(crate) fn conn(&self) -> &Connection {
        &self.conn
    }
}
