//! `SQLite` schema definitions for cadastro.
//!
//! This module contains the SQL statements for creating and managing
//! the database schema.

/// SQL statement to create the clients table.
///
/// `AUTOINCREMENT` guarantees ids are never reused after deletion.
pub const CREATE_CLIENTS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS clients (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    cpf TEXT,
    phone TEXT,
    notes TEXT,
    date_of_birth TEXT,
    created_at TEXT NOT NULL
)
";

/// SQL statement to create an index on `created_at` for recency ordering.
pub const CREATE_CREATED_AT_INDEX: &str = r"
CREATE INDEX IF NOT EXISTS idx_clients_created_at ON clients(created_at DESC)
";

/// SQL statement to create an index on `name` for search.
pub const CREATE_NAME_INDEX: &str = r"
CREATE INDEX IF NOT EXISTS idx_clients_name ON clients(name)
";

/// SQL statement to create an index on `cpf` for search.
pub const CREATE_CPF_INDEX: &str = r"
CREATE INDEX IF NOT EXISTS idx_clients_cpf ON clients(cpf)
";

/// SQL statement to create the metadata table for storing key-value pairs.
pub const CREATE_METADATA_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS metadata (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
)
";

/// All schema creation statements in order.
pub const SCHEMA_STATEMENTS: &[&str] = &[
    CREATE_CLIENTS_TABLE,
    CREATE_CREATED_AT_INDEX,
    CREATE_NAME_INDEX,
    CREATE_CPF_INDEX,
    CREATE_METADATA_TABLE,
];
