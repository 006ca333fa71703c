use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;

use super::error::AuthError;
use super::session::{SessionAuthority, SESSION_COOKIE};

/// Reject requests without a valid session cookie; otherwise expose the
/// [`SessionClaims`](super::SessionClaims) as a request extension.
pub async fn require_session(
    State(sessions): State<Arc<SessionAuthority>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let Some(token) = jar
        .get(SESSION_COOKIE)
        .map(|cookie| cookie.value())
        .filter(|value| !value.is_empty())
    else {
        tracing::warn!(path = %request.uri().path(), "session cookie missing, access denied");
        return Err(AuthError::MissingToken);
    };

    let claims = sessions.verify(token).map_err(|err| {
        tracing::warn!(path = %request.uri().path(), "session token rejected");
        err
    })?;
    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}
