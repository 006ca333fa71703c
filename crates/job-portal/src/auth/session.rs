use axum_extra::extract::cookie::{Cookie, SameSite};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use super::claims::SessionClaims;
use super::error::AuthError;
use crate::config::{AppEnvironment, AuthConfig};
use crate::record::Document;

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "token";

/// Issues and verifies HS256 session tokens and builds the cookies that carry them.
#[derive(Clone)]
pub struct SessionAuthority {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
    cross_site: bool,
}

impl SessionAuthority {
    pub fn new(config: &AuthConfig, environment: AppEnvironment) -> Self {
        let secret = config.jwt_secret.as_bytes();
        // Login bodies may carry their own `aud`; no audience is enforced.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_aud = false;
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            ttl: Duration::seconds(config.session_ttl_secs),
            cross_site: environment.is_production(),
        }
    }

    /// Sign the login body as session claims. No credential check happens here; the caller
    /// is trusted to have authenticated the email upstream.
    pub fn issue(&self, login: Document) -> Result<(String, SessionClaims), AuthError> {
        let claims = SessionClaims::from_login(login, Utc::now(), self.ttl)?;
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(AuthError::Signing)?;
        Ok((token, claims))
    }

    /// Check signature and expiry.
    pub fn verify(&self, token: &str) -> Result<SessionClaims, AuthError> {
        decode::<SessionClaims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|err| {
                tracing::debug!(error = %err, "session token validation failed");
                AuthError::InvalidToken(err)
            })
    }

    pub fn session_cookie(&self, token: String) -> Cookie<'static> {
        let builder = Cookie::build((SESSION_COOKIE, token))
            .path("/")
            .http_only(true);
        if self.cross_site {
            builder.secure(true).same_site(SameSite::None).build()
        } else {
            builder.same_site(SameSite::Strict).build()
        }
    }

    /// Expired, empty cookie with the same attributes as [`Self::session_cookie`].
    pub fn removal_cookie(&self) -> Cookie<'static> {
        let mut cookie = self.session_cookie(String::new());
        cookie.make_removal();
        cookie
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn authority(environment: AppEnvironment) -> SessionAuthority {
        SessionAuthority::new(
            &AuthConfig {
                jwt_secret: "unit-test-secret".to_string(),
                session_ttl_secs: 3600,
            },
            environment,
        )
    }

    fn login(email: &str) -> Document {
        serde_json::from_value(json!({ "email": email })).unwrap()
    }

    #[test]
    fn issued_tokens_verify() {
        let sessions = authority(AppEnvironment::Development);
        let (token, issued) = sessions.issue(login("b@x.com")).unwrap();

        let verified = sessions.verify(&token).expect("token verifies");
        assert_eq!(verified, issued);
        assert_eq!(verified.email, "b@x.com");
    }

    #[test]
    fn caller_supplied_registered_claims_still_verify() {
        let sessions = authority(AppEnvironment::Development);
        let login: Document = serde_json::from_value(json!({
            "email": "b@x.com",
            "aud": "web",
            "iss": "careers-portal",
            "sub": "b@x.com"
        }))
        .unwrap();
        let (token, _) = sessions.issue(login).unwrap();

        let verified = sessions.verify(&token).expect("token verifies");
        assert_eq!(verified.extra.get("aud"), Some(&json!("web")));
    }

    #[test]
    fn tokens_signed_with_another_secret_are_rejected() {
        let other = SessionAuthority::new(
            &AuthConfig {
                jwt_secret: "someone-else".to_string(),
                session_ttl_secs: 3600,
            },
            AppEnvironment::Development,
        );
        let (token, _) = other.issue(login("b@x.com")).unwrap();

        let result = authority(AppEnvironment::Development).verify(&token);
        assert!(matches!(result, Err(AuthError::InvalidToken(_))));
    }

    #[test]
    fn expired_tokens_are_rejected() {
        let sessions = authority(AppEnvironment::Development);
        let issued_at = Utc::now() - Duration::hours(3);
        let claims = SessionClaims::from_login(login("b@x.com"), issued_at, Duration::hours(1))
            .unwrap();
        let token = encode(&Header::new(Algorithm::HS256), &claims, &sessions.encoding).unwrap();

        assert!(matches!(
            sessions.verify(&token),
            Err(AuthError::InvalidToken(_))
        ));
    }

    #[test]
    fn development_cookie_is_strict_and_not_secure() {
        let cookie = authority(AppEnvironment::Development).session_cookie("abc".to_string());
        assert_eq!(cookie.name(), SESSION_COOKIE);
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Strict));
        assert_ne!(cookie.secure(), Some(true));
        assert_eq!(cookie.path(), Some("/"));
    }

    #[test]
    fn production_cookie_is_secure_and_cross_site() {
        let cookie = authority(AppEnvironment::Production).session_cookie("abc".to_string());
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::None));
    }

    #[test]
    fn removal_cookie_clears_value_with_same_attributes() {
        let cookie = authority(AppEnvironment::Production).removal_cookie();
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.max_age().map(|age| age.whole_seconds()), Some(0));
    }
}
