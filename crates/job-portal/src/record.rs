use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Loosely-typed document fields carried alongside the validated ones.
pub type Document = Map<String, Value>;

/// Store-assigned identifier shared by postings and applications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Parse an identifier received on the wire, normalizing it to the stored form.
    pub fn parse(raw: &str) -> Result<Self, InvalidRecordId> {
        Uuid::parse_str(raw.trim())
            .map(|id| Self(id.simple().to_string()))
            .map_err(|_| InvalidRecordId(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{0}' is not a valid record identifier")]
pub struct InvalidRecordId(pub String);

/// Result of a successful insert, shaped like a document store's acknowledgement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertAcknowledgement {
    pub acknowledged: bool,
    pub inserted_id: RecordId,
}

impl InsertAcknowledgement {
    pub fn new(inserted_id: RecordId) -> Self {
        Self {
            acknowledged: true,
            inserted_id,
        }
    }
}

/// Result of an update-by-id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAcknowledgement {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
}

impl UpdateAcknowledgement {
    pub fn matched(modified: bool) -> Self {
        Self {
            acknowledged: true,
            matched_count: 1,
            modified_count: u64::from(modified),
        }
    }

    pub fn unmatched() -> Self {
        Self {
            acknowledged: true,
            matched_count: 0,
            modified_count: 0,
        }
    }
}

/// Boundary validation failures for incoming records.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Missing(&'static str),
    #[error("{field} must be a {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },
    #[error("{field} must be an email address, got '{value}'")]
    InvalidEmail { field: &'static str, value: String },
    #[error(transparent)]
    InvalidId(#[from] InvalidRecordId),
}

/// Remove `field` from `document` and require it to be a non-empty string.
pub(crate) fn take_string(
    document: &mut Document,
    field: &'static str,
) -> Result<String, ValidationError> {
    match document.remove(field) {
        None | Some(Value::Null) => Err(ValidationError::Missing(field)),
        Some(Value::String(value)) => {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                Err(ValidationError::Missing(field))
            } else {
                Ok(trimmed.to_string())
            }
        }
        Some(_) => Err(ValidationError::WrongType {
            field,
            expected: "string",
        }),
    }
}

/// Like [`take_string`], but additionally requires an `@`-separated address.
pub(crate) fn take_email(
    document: &mut Document,
    field: &'static str,
) -> Result<String, ValidationError> {
    let value = take_string(document, field)?;
    match value.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(value),
        _ => Err(ValidationError::InvalidEmail { field, value }),
    }
}
