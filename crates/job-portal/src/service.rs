use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::applications::{JobApplication, NewJobApplication, StatusUpdate};
use crate::jobs::{JobPosting, NewJobPosting};
use crate::record::{
    Document, InsertAcknowledgement, RecordId, UpdateAcknowledgement, ValidationError,
};
use crate::store::{
    ApplicationFilter, ApplicationRepository, JobFilter, JobRepository, RepositoryError,
};

/// Service composing the posting and application repositories behind the HTTP routes.
pub struct JobPortalService<J, A> {
    jobs: Arc<J>,
    applications: Arc<A>,
}

impl<J, A> JobPortalService<J, A>
where
    J: JobRepository + 'static,
    A: ApplicationRepository + 'static,
{
    pub fn new(jobs: Arc<J>, applications: Arc<A>) -> Self {
        Self { jobs, applications }
    }

    /// All postings, or only those owned by `employer_email` when given.
    pub async fn list_jobs(
        &self,
        employer_email: Option<&str>,
    ) -> Result<Vec<JobPosting>, PortalError> {
        let filter = match employer_email.map(str::trim) {
            Some(email) if !email.is_empty() => JobFilter::by_employer(email),
            _ => JobFilter::all(),
        };
        Ok(self.jobs.list_jobs(&filter).await?)
    }

    pub async fn get_job(&self, id: &str) -> Result<JobPosting, PortalError> {
        let id = RecordId::parse(id).map_err(ValidationError::from)?;
        self.jobs
            .fetch_job(&id)
            .await?
            .ok_or_else(|| PortalError::not_found("job", &id))
    }

    pub async fn create_job(&self, body: Document) -> Result<InsertAcknowledgement, PortalError> {
        let posting = NewJobPosting::from_document(body)?;
        let employer = posting.hr_email.clone();
        let ack = self.jobs.insert_job(posting).await?;
        info!(job_id = %ack.inserted_id, %employer, "job posting created");
        Ok(ack)
    }

    /// Persist an application and bump the referenced posting's counter.
    ///
    /// The posting is checked first so a dangling `job_id` stores nothing. The counter is
    /// incremented store-side; if the posting disappears between the two writes the
    /// application is kept and the miss is logged.
    pub async fn submit_application(
        &self,
        body: Document,
    ) -> Result<InsertAcknowledgement, PortalError> {
        let application = NewJobApplication::from_document(body)?;
        let job_id = application.job_id.clone();

        if self.jobs.fetch_job(&job_id).await?.is_none() {
            return Err(PortalError::not_found("job", &job_id));
        }

        let ack = self.applications.insert_application(application).await?;
        match self.jobs.increment_application_count(&job_id).await {
            Ok(count) => {
                debug!(%job_id, application_count = count, "application counter incremented");
            }
            Err(RepositoryError::NotFound) => {
                warn!(
                    %job_id,
                    application_id = %ack.inserted_id,
                    "posting vanished before its application counter could be incremented"
                );
            }
            Err(err) => return Err(err.into()),
        }

        info!(%job_id, application_id = %ack.inserted_id, "application submitted");
        Ok(ack)
    }

    pub async fn get_application(&self, id: &str) -> Result<JobApplication, PortalError> {
        let id = RecordId::parse(id).map_err(ValidationError::from)?;
        self.applications
            .fetch_application(&id)
            .await?
            .ok_or_else(|| PortalError::not_found("application", &id))
    }

    pub async fn applications_for_applicant(
        &self,
        applicant_email: &str,
    ) -> Result<Vec<JobApplication>, PortalError> {
        let filter = ApplicationFilter::Applicant(applicant_email.to_string());
        Ok(self.applications.list_applications(&filter).await?)
    }

    pub async fn applications_for_job(
        &self,
        job_id: &str,
    ) -> Result<Vec<JobApplication>, PortalError> {
        let job_id = RecordId::parse(job_id).map_err(ValidationError::from)?;
        let filter = ApplicationFilter::Job(job_id);
        Ok(self.applications.list_applications(&filter).await?)
    }

    pub async fn update_application_status(
        &self,
        id: &str,
        update: StatusUpdate,
    ) -> Result<UpdateAcknowledgement, PortalError> {
        let id = RecordId::parse(id).map_err(ValidationError::from)?;
        let status = update.into_status()?;

        let ack = self.applications.update_status(&id, &status).await?;
        if ack.matched_count == 0 {
            return Err(PortalError::not_found("application", &id));
        }

        info!(application_id = %id, %status, modified = ack.modified_count, "application status updated");
        Ok(ack)
    }
}

/// Error raised by the portal service.
#[derive(Debug, thiserror::Error)]
pub enum PortalError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{resource} {id} not found")]
    NotFound { resource: &'static str, id: String },
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl PortalError {
    fn not_found(resource: &'static str, id: &RecordId) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }
}
