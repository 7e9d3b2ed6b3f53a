//! Core client record types for cadastro.
//!
//! This module defines the persisted client record and the validated,
//! normalized input that becomes one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A client record as persisted in the registry.
///
/// Records are created once, read back, and eventually deleted; there is
/// no update operation. Field names serialize in camelCase to match the
/// HTTP API (`dateOfBirth`, `createdAt`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    /// Unique identifier (assigned by the storage layer, never reused).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    /// Full name. Never empty for a persisted record.
    pub name: String,

    /// CPF (Brazilian tax id) as a raw digit string, if provided.
    ///
    /// Normalization strips non-digits before insertion; the checksum is
    /// deliberately not validated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpf: Option<String>,

    /// Contact phone number, free-form.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Free-form notes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Date of birth as an ISO `YYYY-MM-DD` string, if provided.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,

    /// When this record was inserted (assigned by the storage layer).
    pub created_at: DateTime<Utc>,
}

/// Raw client fields as received from the HTTP API or CLI, before
/// validation and normalization.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientInput {
    /// Full name (required, the only mandatory field).
    pub name: Option<String>,
    /// CPF in any formatting; non-digits are stripped.
    pub cpf: Option<String>,
    /// Contact phone number.
    pub phone: Option<String>,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Date of birth, ISO `YYYY-MM-DD`.
    pub date_of_birth: Option<String>,
}

/// A validated, normalized client ready for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewClient {
    /// Trimmed, non-empty name.
    pub name: String,
    /// Digit-only CPF, or `None` when absent or empty after stripping.
    pub cpf: Option<String>,
    /// Trimmed phone, or `None` when empty.
    pub phone: Option<String>,
    /// Trimmed notes, or `None` when empty.
    pub notes: Option<String>,
    /// Trimmed date of birth, or `None` when empty.
    pub date_of_birth: Option<String>,
}

impl NewClient {
    /// Validate and normalize raw input into an insertable client.
    ///
    /// The name must be non-empty after trimming. All optional fields are
    /// trimmed; empty-after-trim values become `None` so they are stored
    /// as SQL NULL rather than empty strings. The CPF is reduced to its
    /// digits.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] when the name is missing or blank.
    pub fn from_input(input: ClientInput) -> Result<Self> {
        let name = input.name.as_deref().map(str::trim).unwrap_or_default();
        if name.is_empty() {
            return Err(Error::validation("Nome é obrigatório."));
        }

        let cpf = trim_to_option(input.cpf)
            .map(|raw| digits_only(&raw))
            .filter(|digits| !digits.is_empty());

        Ok(Self {
            name: name.to_string(),
            cpf,
            phone: trim_to_option(input.phone),
            notes: trim_to_option(input.notes),
            date_of_birth: trim_to_option(input.date_of_birth),
        })
    }
}

/// Keep only the ASCII digit characters of a string.
#[must_use]
pub fn digits_only(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

/// Trim a field, mapping empty-after-trim values to `None`.
fn trim_to_option(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
