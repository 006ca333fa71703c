//! Service facade behavior that does not need the HTTP layer: counter bookkeeping under
//! sequential and concurrent submissions, and status lifecycle.

use std::sync::Arc;

use job_portal::record::{Document, ValidationError};
use job_portal::store::InMemoryStore;
use job_portal::{applications::StatusUpdate, JobPortalService, PortalError};
use serde_json::{json, Value};

type Service = JobPortalService<InMemoryStore, InMemoryStore>;

fn service() -> Arc<Service> {
    let store = Arc::new(InMemoryStore::new());
    Arc::new(JobPortalService::new(store.clone(), store))
}

fn body(value: Value) -> Document {
    serde_json::from_value(value).expect("object body")
}

async fn posting(service: &Service) -> String {
    service
        .create_job(body(json!({ "hr_email": "a@x.com", "title": "Engineer" })))
        .await
        .expect("job created")
        .inserted_id
        .to_string()
}

#[tokio::test]
async fn sequential_applications_count_exactly() {
    let service = service();
    let job_id = posting(&service).await;

    for n in 1..=5u64 {
        service
            .submit_application(body(json!({
                "job_id": job_id,
                "applicant_email": format!("applicant{n}@x.com")
            })))
            .await
            .expect("application accepted");

        let job = service.get_job(&job_id).await.expect("job present");
        assert_eq!(job.application_count, Some(n));
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_applications_do_not_lose_updates() {
    let service = service();
    let job_id = posting(&service).await;

    let handles: Vec<_> = (0..32)
        .map(|n| {
            let service = service.clone();
            let job_id = job_id.clone();
            tokio::spawn(async move {
                service
                    .submit_application(body(json!({
                        "job_id": job_id,
                        "applicant_email": format!("applicant{n}@x.com")
                    })))
                    .await
            })
        })
        .collect();
    for handle in handles {
        handle
            .await
            .expect("task joins")
            .expect("application accepted");
    }

    let job = service.get_job(&job_id).await.expect("job present");
    assert_eq!(job.application_count(), 32);
    assert_eq!(
        service
            .applications_for_job(&job_id)
            .await
            .expect("listing succeeds")
            .len(),
        32
    );
}

#[tokio::test]
async fn status_changes_are_visible_on_fetch() {
    let service = service();
    let job_id = posting(&service).await;
    let ack = service
        .submit_application(body(json!({
            "job_id": job_id,
            "applicant_email": "b@x.com"
        })))
        .await
        .expect("application accepted");
    let id = ack.inserted_id.to_string();

    assert_eq!(service.get_application(&id).await.unwrap().status, None);

    service
        .update_application_status(&id, StatusUpdate::new("rejected"))
        .await
        .expect("status updated");
    let stored = service.get_application(&id).await.unwrap();
    assert_eq!(stored.status.as_deref(), Some("rejected"));
    assert_eq!(stored.applicant_email, "b@x.com");
}

#[tokio::test]
async fn malformed_identifiers_are_validation_errors() {
    let service = service();

    for result in [
        service.get_job("zzz").await.map(|_| ()),
        service.get_application("zzz").await.map(|_| ()),
        service.applications_for_job("zzz").await.map(|_| ()),
    ] {
        assert!(matches!(
            result,
            Err(PortalError::Validation(ValidationError::InvalidId(_)))
        ));
    }
}

#[tokio::test]
async fn employer_filter_ignores_surrounding_whitespace() {
    let service = service();
    posting(&service).await;

    let listed = service.list_jobs(Some(" a@x.com ")).await.unwrap();
    assert_eq!(listed.len(), 1);

    let none = service.list_jobs(Some("nobody@x.com")).await.unwrap();
    assert!(none.is_empty());
}
