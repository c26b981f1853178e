//! # IO Module
//!
//! Adapter layer between clients and the domain. The only interface today
//! is the REST API in [`rest`].

pub mod rest;

pub use rest::api_router;
