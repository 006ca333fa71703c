//! Data access seam over the `jobs` and `job_applications` collections.

mod memory;

use async_trait::async_trait;

use crate::applications::{JobApplication, NewJobApplication};
use crate::jobs::{JobPosting, NewJobPosting};
use crate::record::{InsertAcknowledgement, RecordId, UpdateAcknowledgement};

pub use memory::InMemoryStore;

/// Filter accepted by [`JobRepository::list_jobs`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobFilter {
    pub hr_email: Option<String>,
}

impl JobFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn by_employer(email: impl Into<String>) -> Self {
        Self {
            hr_email: Some(email.into()),
        }
    }

    pub fn matches(&self, posting: &JobPosting) -> bool {
        match &self.hr_email {
            Some(email) => posting.hr_email == *email,
            None => true,
        }
    }
}

/// Filter accepted by [`ApplicationRepository::list_applications`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplicationFilter {
    All,
    Applicant(String),
    Job(RecordId),
}

impl ApplicationFilter {
    pub fn matches(&self, application: &JobApplication) -> bool {
        match self {
            ApplicationFilter::All => true,
            ApplicationFilter::Applicant(email) => application.applicant_email == *email,
            ApplicationFilter::Job(job_id) => application.job_id == job_id.as_str(),
        }
    }
}

#[async_trait]
pub trait JobRepository: Send + Sync {
    async fn list_jobs(&self, filter: &JobFilter) -> Result<Vec<JobPosting>, RepositoryError>;
    async fn fetch_job(&self, id: &RecordId) -> Result<Option<JobPosting>, RepositoryError>;
    async fn insert_job(
        &self,
        posting: NewJobPosting,
    ) -> Result<InsertAcknowledgement, RepositoryError>;
    /// Increment `applicationCount` by one in a single store-side operation, treating an
    /// absent counter as zero. Returns the new count.
    async fn increment_application_count(&self, id: &RecordId) -> Result<u64, RepositoryError>;
}

#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    async fn list_applications(
        &self,
        filter: &ApplicationFilter,
    ) -> Result<Vec<JobApplication>, RepositoryError>;
    async fn fetch_application(
        &self,
        id: &RecordId,
    ) -> Result<Option<JobApplication>, RepositoryError>;
    async fn insert_application(
        &self,
        application: NewJobApplication,
    ) -> Result<InsertAcknowledgement, RepositoryError>;
    /// Overwrite `status`. An unknown id yields an unmatched acknowledgement, not an error.
    async fn update_status(
        &self,
        id: &RecordId,
        status: &str,
    ) -> Result<UpdateAcknowledgement, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    #[error("store unavailable: {0}")]
    Unavailable(String),
}
