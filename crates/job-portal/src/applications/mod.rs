//! Applications submitted against job postings and their review status.

pub mod domain;
pub mod router;

pub use domain::{JobApplication, NewJobApplication, StatusUpdate};
