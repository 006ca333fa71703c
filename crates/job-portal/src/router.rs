use std::sync::Arc;

use axum::{
    http::StatusCode,
    middleware::from_fn_with_state,
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use crate::applications::router as applications;
use crate::auth::{handlers as sessions, require_session, SessionAuthority};
use crate::jobs::router as jobs;
use crate::service::{JobPortalService, PortalError};
use crate::store::{ApplicationRepository, JobRepository, RepositoryError};

/// `?email=` filter shared by the listing routes.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct EmailQuery {
    #[serde(default)]
    pub(crate) email: Option<String>,
}

/// Router exposing the session, job, and application endpoints.
pub fn portal_router<J, A>(
    service: Arc<JobPortalService<J, A>>,
    authority: Arc<SessionAuthority>,
) -> Router
where
    J: JobRepository + 'static,
    A: ApplicationRepository + 'static,
{
    let gated = Router::new()
        .route(
            "/job-application",
            get(applications::applicant_handler::<J, A>),
        )
        .route_layer(from_fn_with_state(authority.clone(), require_session))
        .with_state(service.clone());

    let open = Router::new()
        .route(
            "/jobs",
            get(jobs::list_handler::<J, A>).post(jobs::create_handler::<J, A>),
        )
        .route("/jobs/:id", get(jobs::fetch_handler::<J, A>))
        .route(
            "/job-application",
            post(applications::submit_handler::<J, A>),
        )
        .route(
            "/job-applications/jobs/:job_id",
            get(applications::job_handler::<J, A>),
        )
        .route(
            "/job-applications/:id",
            patch(applications::status_handler::<J, A>),
        )
        .with_state(service);

    let session = Router::new()
        .route("/jwt", post(sessions::issue_session))
        .route("/logout", post(sessions::end_session))
        .with_state(authority);

    Router::new().merge(gated).merge(open).merge(session)
}

impl IntoResponse for PortalError {
    fn into_response(self) -> Response {
        let status = match &self {
            PortalError::Validation(_) => StatusCode::BAD_REQUEST,
            PortalError::NotFound { .. } | PortalError::Repository(RepositoryError::NotFound) => {
                StatusCode::NOT_FOUND
            }
            PortalError::Repository(RepositoryError::Unavailable(_)) => {
                tracing::error!(error = %self, "store request failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(json!({ "message": self.to_string() }))).into_response()
    }
}
