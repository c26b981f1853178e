//! # Storage Module
//!
//! Persistence for the challenge data. The domain layer only sees the
//! traits in [`traits`]; the JSON snapshot implementation lives in [`json`].

pub mod json;
pub mod traits;

pub use json::{JsonConnection, SubmissionRepository};
pub use traits::{Connection, SubmissionStorage};
