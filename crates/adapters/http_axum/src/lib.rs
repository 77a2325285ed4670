//! # hbnb-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the **JSON REST API** under `/api/v1`
//!   (`/states`, `/cities/{id}/places`, `/places_search`, …)
//! - Turn request bodies into typed patches, rejecting non-object bodies,
//!   missing required keys and keys outside the allow-list
//! - Map application results into HTTP responses, and [`HbnbError`]s into
//!   status codes with a `{"error": …}` body
//!
//! ## Dependency rule
//! Depends on `hbnb-app` (for port traits and services) and `hbnb-domain`
//! (for domain types used in request/response mapping). Never leaks axum types
//! into the domain.
//!
//! [`HbnbError`]: hbnb_domain::error::HbnbError

pub mod api;
pub mod error;
mod request;
mod response;
pub mod router;
pub mod state;
