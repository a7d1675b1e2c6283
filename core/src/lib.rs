//! Synchronous typed client for the chat service REST API.
//!
//! # Overview
//! A [`Client`] binds a server URL to one credential pair and exposes one
//! method per endpoint. Every method performs exactly one HTTP round trip
//! and returns the server's [`ApiResponse`] envelope as-is: success and
//! error outcomes are both data, not exceptions. Only transport failures
//! and the three credential-fetching flows in [`auth`] surface as `Err`.
//!
//! # Design
//! - Request construction is split from execution: `build_*` helpers
//!   produce plain `HttpRequest` values that tests can inspect without a
//!   network, and `dispatch` runs them through a shared ureq agent.
//! - All parameter structs funnel through one form-encoding routine, so
//!   the wire convention (JSON-encoded arrays and objects, literal
//!   `true`/`false`, omitted `None` fields) is defined in a single place.
//! - DTOs are defined independently from the mock-server crate;
//!   integration tests catch schema drift.

pub mod auth;
pub mod channel;
pub mod client;
pub mod draft;
pub mod error;
pub mod event;
pub mod http;
pub mod message;
pub mod navigation_view;
pub(crate) mod params;
pub mod reminder;
pub mod response;
pub mod scheduled_message;
pub mod snippet;
pub mod types;
pub mod user;

pub use client::Client;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use response::{ApiResponse, NoData};
