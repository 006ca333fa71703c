use std::sync::Arc;

use axum::{extract::State, Json};
use axum_extra::extract::CookieJar;
use serde_json::{json, Value};

use super::error::AuthError;
use super::session::SessionAuthority;
use crate::record::Document;

/// `POST /jwt`: sign the body as session claims and set the session cookie.
pub(crate) async fn issue_session(
    State(sessions): State<Arc<SessionAuthority>>,
    jar: CookieJar,
    Json(login): Json<Document>,
) -> Result<(CookieJar, Json<Value>), AuthError> {
    let (token, claims) = sessions.issue(login)?;
    tracing::info!(email = %claims.email, "session issued");
    Ok((
        jar.add(sessions.session_cookie(token)),
        Json(json!({ "success": true })),
    ))
}

/// `POST /logout`: clear the session cookie.
pub(crate) async fn end_session(
    State(sessions): State<Arc<SessionAuthority>>,
    jar: CookieJar,
) -> (CookieJar, Json<Value>) {
    (
        jar.add(sessions.removal_cookie()),
        Json(json!({ "success": true })),
    )
}
