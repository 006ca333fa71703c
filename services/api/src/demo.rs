use clap::Args;
use job_portal::applications::StatusUpdate;
use job_portal::error::AppError;
use job_portal::record::Document;
use job_portal::store::InMemoryStore;
use job_portal::JobPortalService;
use serde_json::json;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Number of applicants to submit against the demo posting
    #[arg(long, default_value_t = 3)]
    pub(crate) applications: u32,
    /// Employer address that owns the demo posting
    #[arg(long, default_value = "hiring@example.com")]
    pub(crate) employer: String,
}

fn document(value: serde_json::Value) -> Document {
    match value {
        serde_json::Value::Object(map) => map,
        _ => Document::new(),
    }
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        applications,
        employer,
    } = args;

    let store = Arc::new(InMemoryStore::new());
    let service = JobPortalService::new(store.clone(), store);

    println!("Hiring round demo");
    let posted = service
        .create_job(document(json!({
            "hr_email": employer,
            "title": "Backend Engineer",
            "location": "Remote",
            "jobType": "Full-time"
        })))
        .await?;
    let job_id = posted.inserted_id.to_string();
    println!("- Posted job {} for {}", job_id, employer);

    let mut application_ids = Vec::new();
    for n in 1..=applications {
        let applicant = format!("applicant{n}@example.com");
        let ack = service
            .submit_application(document(json!({
                "job_id": job_id,
                "applicant_email": applicant,
                "status": "pending"
            })))
            .await?;
        println!("- {} applied ({})", applicant, ack.inserted_id);
        application_ids.push(ack.inserted_id.to_string());
    }

    for (index, id) in application_ids.iter().enumerate() {
        let decision = if index == 0 { "accepted" } else { "rejected" };
        service
            .update_application_status(id, StatusUpdate::new(decision))
            .await?;
    }

    let job = service.get_job(&job_id).await?;
    println!(
        "\n{} now has {} application(s)",
        job.title().unwrap_or("Posting"),
        job.application_count()
    );

    println!("Review outcome:");
    for application in service.applications_for_job(&job_id).await? {
        println!(
            "  - {}: {}",
            application.applicant_email,
            application.status.as_deref().unwrap_or("unreviewed")
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn demo_completes_with_default_arguments() {
        let args = DemoArgs {
            applications: 2,
            employer: "hiring@example.com".to_string(),
        };
        run_demo(args).await.expect("demo runs");
    }

    #[tokio::test]
    async fn rejected_posting_fails_the_demo() {
        let args = DemoArgs {
            applications: 1,
            employer: "not-an-address".to_string(),
        };
        let result = run_demo(args).await;
        assert!(matches!(result, Err(AppError::Portal(_))));
    }
}
