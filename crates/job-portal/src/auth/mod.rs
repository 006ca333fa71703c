//! Cookie-carried session tokens and the gate protecting applicant data.

mod claims;
mod error;
pub(crate) mod handlers;
mod middleware;
mod session;

pub use claims::SessionClaims;
pub use error::AuthError;
pub use middleware::require_session;
pub use session::{SessionAuthority, SESSION_COOKIE};
