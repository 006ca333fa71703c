use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use super::{ApplicationFilter, ApplicationRepository, JobFilter, JobRepository, RepositoryError};
use crate::applications::{JobApplication, NewJobApplication};
use crate::jobs::{JobPosting, NewJobPosting};
use crate::record::{InsertAcknowledgement, RecordId, UpdateAcknowledgement};

/// Process-local document store holding both collections in insertion order.
#[derive(Debug, Default, Clone)]
pub struct InMemoryStore {
    jobs: Arc<Mutex<Vec<JobPosting>>>,
    applications: Arc<Mutex<Vec<JobApplication>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock<'a, T>(
    collection: &'a Mutex<Vec<T>>,
    name: &str,
) -> Result<MutexGuard<'a, Vec<T>>, RepositoryError> {
    collection
        .lock()
        .map_err(|_| RepositoryError::Unavailable(format!("{name} collection lock poisoned")))
}

#[async_trait]
impl JobRepository for InMemoryStore {
    async fn list_jobs(&self, filter: &JobFilter) -> Result<Vec<JobPosting>, RepositoryError> {
        let jobs = lock(&self.jobs, "jobs")?;
        Ok(jobs
            .iter()
            .filter(|posting| filter.matches(posting))
            .cloned()
            .collect())
    }

    async fn fetch_job(&self, id: &RecordId) -> Result<Option<JobPosting>, RepositoryError> {
        let jobs = lock(&self.jobs, "jobs")?;
        Ok(jobs.iter().find(|posting| posting.id == *id).cloned())
    }

    async fn insert_job(
        &self,
        posting: NewJobPosting,
    ) -> Result<InsertAcknowledgement, RepositoryError> {
        let id = RecordId::generate();
        let mut jobs = lock(&self.jobs, "jobs")?;
        jobs.push(JobPosting::from_new(id.clone(), posting));
        Ok(InsertAcknowledgement::new(id))
    }

    async fn increment_application_count(&self, id: &RecordId) -> Result<u64, RepositoryError> {
        let mut jobs = lock(&self.jobs, "jobs")?;
        let posting = jobs
            .iter_mut()
            .find(|posting| posting.id == *id)
            .ok_or(RepositoryError::NotFound)?;
        let next = posting.application_count() + 1;
        posting.application_count = Some(next);
        Ok(next)
    }
}

#[async_trait]
impl ApplicationRepository for InMemoryStore {
    async fn list_applications(
        &self,
        filter: &ApplicationFilter,
    ) -> Result<Vec<JobApplication>, RepositoryError> {
        let applications = lock(&self.applications, "job_applications")?;
        Ok(applications
            .iter()
            .filter(|application| filter.matches(application))
            .cloned()
            .collect())
    }

    async fn fetch_application(
        &self,
        id: &RecordId,
    ) -> Result<Option<JobApplication>, RepositoryError> {
        let applications = lock(&self.applications, "job_applications")?;
        Ok(applications
            .iter()
            .find(|application| application.id == *id)
            .cloned())
    }

    async fn insert_application(
        &self,
        application: NewJobApplication,
    ) -> Result<InsertAcknowledgement, RepositoryError> {
        let id = RecordId::generate();
        let mut applications = lock(&self.applications, "job_applications")?;
        applications.push(JobApplication::from_new(id.clone(), application));
        Ok(InsertAcknowledgement::new(id))
    }

    async fn update_status(
        &self,
        id: &RecordId,
        status: &str,
    ) -> Result<UpdateAcknowledgement, RepositoryError> {
        let mut applications = lock(&self.applications, "job_applications")?;
        let Some(application) = applications
            .iter_mut()
            .find(|application| application.id == *id)
        else {
            return Ok(UpdateAcknowledgement::unmatched());
        };

        let modified = application.status.as_deref() != Some(status);
        if modified {
            application.status = Some(status.to_string());
        }
        Ok(UpdateAcknowledgement::matched(modified))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Document;
    use serde_json::{json, Value};

    fn body(value: Value) -> Document {
        serde_json::from_value(value).expect("object body")
    }

    fn posting(email: &str, title: &str) -> NewJobPosting {
        NewJobPosting::from_document(body(json!({ "hr_email": email, "title": title })))
            .expect("valid posting")
    }

    fn application(job_id: &RecordId, email: &str) -> NewJobApplication {
        NewJobApplication::from_document(body(json!({
            "job_id": job_id.as_str(),
            "applicant_email": email
        })))
        .expect("valid application")
    }

    #[tokio::test]
    async fn list_jobs_filters_by_employer() {
        let store = InMemoryStore::new();
        store.insert_job(posting("a@x.com", "Engineer")).await.unwrap();
        store.insert_job(posting("b@x.com", "Designer")).await.unwrap();
        store.insert_job(posting("a@x.com", "Manager")).await.unwrap();

        let all = store.list_jobs(&JobFilter::all()).await.unwrap();
        assert_eq!(all.len(), 3);

        let mine = store
            .list_jobs(&JobFilter::by_employer("a@x.com"))
            .await
            .unwrap();
        let titles: Vec<_> = mine.iter().filter_map(JobPosting::title).collect();
        assert_eq!(titles, vec!["Engineer", "Manager"]);
    }

    #[tokio::test]
    async fn increment_starts_from_absent_counter() {
        let store = InMemoryStore::new();
        let ack = store.insert_job(posting("a@x.com", "Engineer")).await.unwrap();

        assert_eq!(
            store
                .increment_application_count(&ack.inserted_id)
                .await
                .unwrap(),
            1
        );
        assert_eq!(
            store
                .increment_application_count(&ack.inserted_id)
                .await
                .unwrap(),
            2
        );

        let stored = store.fetch_job(&ack.inserted_id).await.unwrap().unwrap();
        assert_eq!(stored.application_count, Some(2));
    }

    #[tokio::test]
    async fn increment_reports_missing_posting() {
        let store = InMemoryStore::new();
        let result = store
            .increment_application_count(&RecordId::generate())
            .await;
        assert!(matches!(result, Err(RepositoryError::NotFound)));
    }

    #[tokio::test]
    async fn concurrent_increments_are_not_lost() {
        let store = InMemoryStore::new();
        let ack = store.insert_job(posting("a@x.com", "Engineer")).await.unwrap();

        let handles: Vec<_> = (0..64)
            .map(|_| {
                let store = store.clone();
                let id = ack.inserted_id.clone();
                tokio::spawn(async move { store.increment_application_count(&id).await })
            })
            .collect();
        for handle in handles {
            handle.await.expect("task joins").expect("increment succeeds");
        }

        let stored = store.fetch_job(&ack.inserted_id).await.unwrap().unwrap();
        assert_eq!(stored.application_count(), 64);
    }

    #[tokio::test]
    async fn update_status_reports_matched_and_modified_counts() {
        let store = InMemoryStore::new();
        let job = store.insert_job(posting("a@x.com", "Engineer")).await.unwrap();
        let ack = store
            .insert_application(application(&job.inserted_id, "b@x.com"))
            .await
            .unwrap();

        let first = store
            .update_status(&ack.inserted_id, "accepted")
            .await
            .unwrap();
        assert_eq!(first, UpdateAcknowledgement::matched(true));

        let repeat = store
            .update_status(&ack.inserted_id, "accepted")
            .await
            .unwrap();
        assert_eq!(repeat, UpdateAcknowledgement::matched(false));

        let missing = store
            .update_status(&RecordId::generate(), "accepted")
            .await
            .unwrap();
        assert_eq!(missing, UpdateAcknowledgement::unmatched());

        let stored = store
            .fetch_application(&ack.inserted_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.status.as_deref(), Some("accepted"));
    }

    #[tokio::test]
    async fn list_applications_filters_by_applicant_and_job() {
        let store = InMemoryStore::new();
        let first = store.insert_job(posting("a@x.com", "Engineer")).await.unwrap();
        let second = store.insert_job(posting("a@x.com", "Designer")).await.unwrap();
        store
            .insert_application(application(&first.inserted_id, "b@x.com"))
            .await
            .unwrap();
        store
            .insert_application(application(&second.inserted_id, "b@x.com"))
            .await
            .unwrap();
        store
            .insert_application(application(&first.inserted_id, "c@x.com"))
            .await
            .unwrap();

        let by_applicant = store
            .list_applications(&ApplicationFilter::Applicant("b@x.com".to_string()))
            .await
            .unwrap();
        assert_eq!(by_applicant.len(), 2);

        let by_job = store
            .list_applications(&ApplicationFilter::Job(first.inserted_id.clone()))
            .await
            .unwrap();
        assert_eq!(by_job.len(), 2);
        assert!(by_job
            .iter()
            .all(|application| application.job_id == first.inserted_id.as_str()));

        let everything = store
            .list_applications(&ApplicationFilter::All)
            .await
            .unwrap();
        assert_eq!(everything.len(), 3);
    }
}
