//! # JSON Storage Module
//!
//! File-based storage that keeps the whole record store in one document:
//!
//! ```text
//! data/
//! └── submissions.json
//! ```
//!
//! ```json
//! {
//!   "submissions": [
//!     { "id": 1, "participantName": "Joy", "date": "2024-01-01",
//!       "stepCount": 12000, "proofReference": null, "paid": false }
//!   ],
//!   "nextId": 2
//! }
//! ```
//!
//! Every save rewrites the full snapshot through a temporary file that is
//! renamed over the previous one.

pub mod connection;
pub mod submission_repository;

#[cfg(test)]
pub mod test_utils;

pub use connection::JsonConnection;
pub use submission_repository::SubmissionRepository;
