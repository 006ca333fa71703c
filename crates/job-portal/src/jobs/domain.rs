use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::record::{take_email, Document, RecordId, ValidationError};

/// Stored job posting. Fields beyond the employer address are kept as submitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPosting {
    #[serde(rename = "_id")]
    pub id: RecordId,
    pub hr_email: String,
    /// Absent until the first application arrives.
    #[serde(
        rename = "applicationCount",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub application_count: Option<u64>,
    #[serde(flatten)]
    pub fields: Document,
}

impl JobPosting {
    pub fn from_new(id: RecordId, posting: NewJobPosting) -> Self {
        Self {
            id,
            hr_email: posting.hr_email,
            application_count: None,
            fields: posting.fields,
        }
    }

    pub fn title(&self) -> Option<&str> {
        self.fields.get("title").and_then(Value::as_str)
    }

    pub fn application_count(&self) -> u64 {
        self.application_count.unwrap_or(0)
    }
}

/// Validated body of a job-creation request.
#[derive(Debug, Clone, PartialEq)]
pub struct NewJobPosting {
    pub hr_email: String,
    pub fields: Document,
}

impl NewJobPosting {
    /// Store-owned keys (`_id`, `applicationCount`) are dropped rather than trusted.
    pub fn from_document(mut document: Document) -> Result<Self, ValidationError> {
        document.remove("_id");
        document.remove("applicationCount");
        let hr_email = take_email(&mut document, "hr_email")?;

        Ok(Self {
            hr_email,
            fields: document,
        })
    }
}
