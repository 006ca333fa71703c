use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};

use super::domain::JobPosting;
use crate::record::{Document, InsertAcknowledgement};
use crate::router::EmailQuery;
use crate::service::{JobPortalService, PortalError};
use crate::store::{ApplicationRepository, JobRepository};

/// `GET /jobs`
pub(crate) async fn list_handler<J, A>(
    State(service): State<Arc<JobPortalService<J, A>>>,
    Query(query): Query<EmailQuery>,
) -> Result<Json<Vec<JobPosting>>, PortalError>
where
    J: JobRepository + 'static,
    A: ApplicationRepository + 'static,
{
    service.list_jobs(query.email.as_deref()).await.map(Json)
}

/// `GET /jobs/:id`
pub(crate) async fn fetch_handler<J, A>(
    State(service): State<Arc<JobPortalService<J, A>>>,
    Path(id): Path<String>,
) -> Result<Json<JobPosting>, PortalError>
where
    J: JobRepository + 'static,
    A: ApplicationRepository + 'static,
{
    service.get_job(&id).await.map(Json)
}

/// `POST /jobs`
pub(crate) async fn create_handler<J, A>(
    State(service): State<Arc<JobPortalService<J, A>>>,
    Json(body): Json<Document>,
) -> Result<Json<InsertAcknowledgement>, PortalError>
where
    J: JobRepository + 'static,
    A: ApplicationRepository + 'static,
{
    service.create_job(body).await.map(Json)
}
