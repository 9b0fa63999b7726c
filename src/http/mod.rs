//! HTTP client module
//!
//! Provides the session-backed client used by the API suite.

mod client;

pub use client::{ApiClient, HttpResponse};
