use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    Extension, Json,
};

use super::domain::StatusUpdate;
use crate::auth::{AuthError, SessionClaims};
use crate::record::Document;
use crate::router::EmailQuery;
use crate::service::JobPortalService;
use crate::store::{ApplicationRepository, JobRepository};

/// `GET /job-application`, behind the session gate. The session email must match the
/// `email` query parameter exactly.
pub(crate) async fn applicant_handler<J, A>(
    State(service): State<Arc<JobPortalService<J, A>>>,
    Extension(claims): Extension<SessionClaims>,
    Query(query): Query<EmailQuery>,
) -> Response
where
    J: JobRepository + 'static,
    A: ApplicationRepository + 'static,
{
    let Some(email) = query.email.filter(|email| *email == claims.email) else {
        tracing::warn!(session = %claims.email, "applicant listing requested for another email");
        return AuthError::Forbidden.into_response();
    };

    match service.applications_for_applicant(&email).await {
        Ok(applications) => Json(applications).into_response(),
        Err(err) => err.into_response(),
    }
}

/// `GET /job-applications/jobs/:job_id`
pub(crate) async fn job_handler<J, A>(
    State(service): State<Arc<JobPortalService<J, A>>>,
    Path(job_id): Path<String>,
) -> Response
where
    J: JobRepository + 'static,
    A: ApplicationRepository + 'static,
{
    match service.applications_for_job(&job_id).await {
        Ok(applications) => Json(applications).into_response(),
        Err(err) => err.into_response(),
    }
}

/// `POST /job-application`
pub(crate) async fn submit_handler<J, A>(
    State(service): State<Arc<JobPortalService<J, A>>>,
    Json(body): Json<Document>,
) -> Response
where
    J: JobRepository + 'static,
    A: ApplicationRepository + 'static,
{
    match service.submit_application(body).await {
        Ok(ack) => Json(ack).into_response(),
        Err(err) => err.into_response(),
    }
}

/// `PATCH /job-applications/:id`
pub(crate) async fn status_handler<J, A>(
    State(service): State<Arc<JobPortalService<J, A>>>,
    Path(id): Path<String>,
    Json(update): Json<StatusUpdate>,
) -> Response
where
    J: JobRepository + 'static,
    A: ApplicationRepository + 'static,
{
    match service.update_application_status(&id, update).await {
        Ok(ack) => Json(ack).into_response(),
        Err(err) => err.into_response(),
    }
}
