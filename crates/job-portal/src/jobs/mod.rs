//! Job postings published by employers.

pub mod domain;
pub mod router;

pub use domain::{JobPosting, NewJobPosting};
