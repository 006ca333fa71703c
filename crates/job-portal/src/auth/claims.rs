use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::error::AuthError;
use crate::record::{take_email, Document};

/// Claims carried by a session token. Anything supplied at login besides the email is kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionClaims {
    pub email: String,
    pub iat: i64,
    pub exp: i64,
    #[serde(flatten)]
    pub extra: Document,
}

impl SessionClaims {
    /// Build claims from a login body. Caller-supplied `iat`/`exp` are replaced.
    pub fn from_login(
        mut login: Document,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<Self, AuthError> {
        login.remove("iat");
        login.remove("exp");
        let email = take_email(&mut login, "email").map_err(AuthError::InvalidClaims)?;

        Ok(Self {
            email,
            iat: issued_at.timestamp(),
            exp: (issued_at + ttl).timestamp(),
            extra: login,
        })
    }
}
