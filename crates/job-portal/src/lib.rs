//! Job board backend: employers post jobs, applicants apply, employers review.
//!
//! The crate exposes the HTTP router, the service that backs it, and the repository seam
//! the service talks to. The binary in `services/api` wires these together with
//! configuration, telemetry, and operational routes.

pub mod applications;
pub mod auth;
pub mod config;
pub mod error;
pub mod jobs;
pub mod record;
pub mod router;
pub mod service;
pub mod store;
pub mod telemetry;

pub use router::portal_router;
pub use service::{JobPortalService, PortalError};
