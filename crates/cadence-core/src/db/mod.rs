//! Database operations and SQLite management for the board engine.
//!
//! This module provides low-level database operations for the Cadence
//! sprint/task tracker. It handles the SQLite connection, schema management,
//! and specialized query interfaces for projects, tasks, sprints, and the
//! assembled board/backlog views.

use std::path::Path;

use jiff::{civil::Date, Timestamp};
use rusqlite::{types::Type, Connection};

use crate::error::{DatabaseResultExt, Result};

pub mod board_queries;
pub mod migrations;
pub mod project_queries;
pub mod sprint_queries;
pub mod task_queries;

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Creates a new database connection and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}

/// Parses an RFC 3339 timestamp column, mapping failures to a rusqlite
/// conversion error for the given column index.
pub(crate) fn parse_timestamp(idx: usize, value: String) -> rusqlite::Result<Timestamp> {
    value
        .parse::<Timestamp>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Parses an optional timestamp column.
pub(crate) fn parse_opt_timestamp(
    idx: usize,
    value: Option<String>,
) -> rusqlite::Result<Option<Timestamp>> {
    value.map(|s| parse_timestamp(idx, s)).transpose()
}

/// Parses an optional ISO 8601 date column.
pub(crate) fn parse_opt_date(idx: usize, value: Option<String>) -> rusqlite::Result<Option<Date>> {
    value
        .map(|s| {
            s.parse::<Date>().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e))
            })
        })
        .transpose()
}

/// Whether a rusqlite error is a uniqueness/constraint violation, used to
/// translate races against partial unique indexes into domain conflicts.
pub(crate) fn is_constraint_violation(error: &rusqlite::Error) -> bool {
    matches!(
        error,
        rusqlite::Error::SqliteFailure(e, _)
            if e.code == rusqlite::ErrorCode::ConstraintViolation
    )
}
