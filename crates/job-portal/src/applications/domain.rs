use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::record::{take_email, take_string, Document, RecordId, ValidationError};

/// Stored job application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobApplication {
    #[serde(rename = "_id")]
    pub id: RecordId,
    /// Identifier of the posting, kept as a plain string like the document store does.
    pub job_id: String,
    pub applicant_email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(flatten)]
    pub fields: Document,
}

impl JobApplication {
    pub fn from_new(id: RecordId, application: NewJobApplication) -> Self {
        Self {
            id,
            job_id: application.job_id.to_string(),
            applicant_email: application.applicant_email,
            status: application.status,
            fields: application.fields,
        }
    }
}

/// Validated body of an application submission.
#[derive(Debug, Clone, PartialEq)]
pub struct NewJobApplication {
    pub job_id: RecordId,
    pub applicant_email: String,
    pub status: Option<String>,
    pub fields: Document,
}

impl NewJobApplication {
    pub fn from_document(mut document: Document) -> Result<Self, ValidationError> {
        document.remove("_id");
        let job_id = RecordId::parse(&take_string(&mut document, "job_id")?)?;
        let applicant_email = take_email(&mut document, "applicant_email")?;
        let status = match document.remove("status") {
            None | Some(Value::Null) => None,
            Some(Value::String(status)) => Some(status),
            Some(_) => {
                return Err(ValidationError::WrongType {
                    field: "status",
                    expected: "string",
                })
            }
        };

        Ok(Self {
            job_id,
            applicant_email,
            status,
            fields: document,
        })
    }
}

/// Body of a status change. Any non-empty value is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusUpdate {
    #[serde(default)]
    pub status: Option<String>,
}

impl StatusUpdate {
    pub fn new(status: impl Into<String>) -> Self {
        Self {
            status: Some(status.into()),
        }
    }

    pub fn into_status(self) -> Result<String, ValidationError> {
        match self.status {
            Some(status) if !status.trim().is_empty() => Ok(status.trim().to_string()),
            _ => Err(ValidationError::Missing("status")),
        }
    }
}
