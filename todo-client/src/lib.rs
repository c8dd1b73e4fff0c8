//! Blocking API client for the todo service.
//!
//! # Overview
//! `TodoApi` wraps a `ureq` agent and exposes the five CRUD operations the
//! server offers: create, list, get, update (upsert) and delete.
//!
//! # Design
//! - `TodoApi` holds only a base URL and an agent; no state is carried
//!   between calls.
//! - Status interpretation is the client's job: the agent is configured to
//!   return 4xx/5xx responses as data, and `ApiError` gives 404 and 400
//!   dedicated variants because callers treat "does not exist" and
//!   "rejected input" differently from any other failure.
//! - Types are defined independently from the server crate; integration
//!   tests catch schema drift.

pub mod api;
pub mod error;
pub mod types;

pub use api::TodoApi;
pub use error::ApiError;
pub use types::TodoItem;
