use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::record::ValidationError;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("session cookie missing")]
    MissingToken,
    #[error("session token rejected: {0}")]
    InvalidToken(#[source] jsonwebtoken::errors::Error),
    #[error("session does not belong to the requested applicant")]
    Forbidden,
    #[error("invalid login claims: {0}")]
    InvalidClaims(#[source] ValidationError),
    #[error("unable to sign session token: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AuthError::MissingToken | AuthError::InvalidToken(_) => {
                (StatusCode::UNAUTHORIZED, "Unauthorized access".to_string())
            }
            AuthError::Forbidden => (StatusCode::FORBIDDEN, "Forbidden access".to_string()),
            AuthError::InvalidClaims(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            AuthError::Signing(_) => {
                tracing::error!(error = %self, "session signing failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Unable to issue session".to_string(),
                )
            }
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_gate_semantics() {
        let cases = vec![
            (AuthError::MissingToken, StatusCode::UNAUTHORIZED),
            (
                AuthError::InvalidToken(jsonwebtoken::errors::ErrorKind::ExpiredSignature.into()),
                StatusCode::UNAUTHORIZED,
            ),
            (AuthError::Forbidden, StatusCode::FORBIDDEN),
            (
                AuthError::InvalidClaims(ValidationError::Missing("email")),
                StatusCode::BAD_REQUEST,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }
}
