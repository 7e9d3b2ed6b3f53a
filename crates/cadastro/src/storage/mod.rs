//! Storage layer for cadastro.
//!
//! This module provides `SQLite`-based persistent storage for client
//! records, including insertion, free-text search, and deletion.

pub mod migrations;
pub mod schema;

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use serde::Serialize;
use tracing::{debug, info};

use crate::client::{digits_only, Client, NewClient};
use crate::error::{Error, Result};

/// Columns selected for every client query, in `row_to_client` order.
const CLIENT_COLUMNS: &str = "id, name, cpf, phone, notes, date_of_birth, created_at";

/// Storage engine for client records.
///
/// Provides persistent storage using `SQLite` with support for:
/// - Record insertion with server-assigned id and creation time
/// - Mixed name/CPF/phone substring search
/// - Permanent deletion by id
#[derive(Debug)]
pub struct Storage {
    /// Path to the database file.
    path: PathBuf,
    /// Database connection.
    conn: Connection,
}

impl Storage {
    /// Open or create a storage database at the given path.
    ///
    /// Creates the parent directories and database file if they don't exist.
    /// Initializes the schema if this is a new database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or schema
    /// initialization fails.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        debug!("Opening database at {}", path.display());
        let conn = Connection::open(&path).map_err(|source| Error::DatabaseOpen {
            path: path.clone(),
            source,
        })?;

        // WAL keeps readers unblocked while a write is in flight
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;

        migrations::initialize_schema(&conn)?;

        info!("Database opened successfully at {}", path.display());
        Ok(Self { path, conn })
    }

    /// Create an in-memory storage instance for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| Error::DatabaseOpen {
            path: PathBuf::from(":memory:"),
            source,
        })?;

        migrations::initialize_schema(&conn)?;

        Ok(Self {
            path: PathBuf::from(":memory:"),
            conn,
        })
    }

    /// Get the path to the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Insert a validated client and return the persisted record.
    ///
    /// The id and creation time are assigned here; the returned record is
    /// read back from the database rather than echoed from the input, so
    /// callers always see the server-assigned fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn insert(&self, client: &NewClient) -> Result<Client> {
        let created_at = Utc::now().to_rfc3339();

        self.conn.execute(
            r"
            INSERT INTO clients (name, cpf, phone, notes, date_of_birth, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ",
            params![
                client.name,
                client.cpf,
                client.phone,
                client.notes,
                client.date_of_birth,
                created_at,
            ],
        )?;

        let id = self.conn.last_insert_rowid();
        debug!("Inserted client with id {}", id);

        self.get(id)?
            .ok_or_else(|| Error::internal(format!("client {id} missing after insert")))
    }

    /// Get a client by its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn get(&self, id: i64) -> Result<Option<Client>> {
        let result = self
            .conn
            .query_row(
                &format!("SELECT {CLIENT_COLUMNS} FROM clients WHERE id = ?1"),
                [id],
                Self::row_to_client,
            )
            .optional()?;
        Ok(result)
    }

    /// Search clients by free-text term.
    ///
    /// A record matches when the term is a case-insensitive substring of
    /// the name, when the digit projection of the term appears in the
    /// stored CPF digits, or when the term appears in the phone. A blank
    /// term returns no results: listing the whole registry unprompted is
    /// deliberately unsupported.
    ///
    /// Results are ordered most recently created first and capped at
    /// `limit`; older matches beyond the cap are omitted.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn search(&self, term: &str, limit: usize) -> Result<Vec<Client>> {
        let term = term.trim();
        if term.is_empty() {
            return Ok(Vec::new());
        }

        let pattern = format!("%{term}%");
        let digits = digits_only(term);
        let digits_pattern = format!("%{digits}%");

        let mut stmt = self.conn.prepare(&format!(
            r"
            SELECT {CLIENT_COLUMNS} FROM clients
            WHERE name LIKE ?1
               OR phone LIKE ?1
               OR (?2 = 1 AND cpf LIKE ?3)
            ORDER BY created_at DESC, id DESC
            LIMIT ?4
            "
        ))?;

        let limit_i64 = i64::try_from(limit).unwrap_or(i64::MAX);
        let has_digits = i32::from(!digits.is_empty());
        let clients = stmt
            .query_map(
                params![pattern, has_digits, digits_pattern, limit_i64],
                Self::row_to_client,
            )?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(clients)
    }

    /// Count total clients in storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn count(&self) -> Result<i64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM clients", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Delete a client by id.
    ///
    /// Returns `true` if a record was deleted, `false` if not found. The
    /// removal is permanent; ids are never reused.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn delete(&self, id: i64) -> Result<bool> {
        let affected = self.conn.execute("DELETE FROM clients WHERE id = ?1", [id])?;
        if affected > 0 {
            info!("Deleted client {}", id);
        }
        Ok(affected > 0)
    }

    /// Get database statistics.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn stats(&self) -> Result<StoreStats> {
        let total_clients = self.count()?;

        let oldest: Option<String> = self
            .conn
            .query_row(
                "SELECT created_at FROM clients ORDER BY created_at ASC LIMIT 1",
                [],
                |row| row.get(0),
            )
            .optional()?;

        let newest: Option<String> = self
            .conn
            .query_row(
                "SELECT created_at FROM clients ORDER BY created_at DESC LIMIT 1",
                [],
                |row| row.get(0),
            )
            .optional()?;

        let oldest_created = oldest.as_deref().map(parse_timestamp);
        let newest_created = newest.as_deref().map(parse_timestamp);

        let db_size_bytes = if self.path.to_string_lossy() == ":memory:" {
            0
        } else {
            std::fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0)
        };

        Ok(StoreStats {
            total_clients,
            oldest_created,
            newest_created,
            db_size_bytes,
        })
    }

    /// Convert a database row to a Client struct.
    fn row_to_client(row: &rusqlite::Row) -> rusqlite::Result<Client> {
        let created_at_str: String = row.get(6)?;

        Ok(Client {
            id: Some(row.get(0)?),
            name: row.get(1)?,
            cpf: row.get(2)?,
            phone: row.get(3)?,
            notes: row.get(4)?,
            date_of_birth: row.get(5)?,
            created_at: parse_timestamp(&created_at_str),
        })
    }
}

/// Parse a stored RFC 3339 timestamp, falling back to now on corruption.
fn parse_timestamp(value: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(value).map_or_else(|_| Utc::now(), |dt| dt.with_timezone(&Utc))
}

/// Statistics about the storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    /// Total number of clients stored.
    pub total_clients: i64,
    /// Creation time of the oldest record.
    pub oldest_created: Option<DateTime<Utc>>,
    /// Creation time of the newest record.
    pub newest_created: Option<DateTime<Utc>>,
    /// Size of the database file in bytes.
    pub db_size_bytes: u64,
}
