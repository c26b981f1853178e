//! 10K Steps Challenge tracker backend.
//!
//! Participants log daily step counts; days under the target cost a flat
//! penalty. The library exposes the layered backend (storage, domain, REST)
//! and the configuration used by the `steps-challenge-server` binary.

pub mod backend;
pub mod config;
