//! # hbnb-domain
//!
//! Pure domain model for the hbnb rental listing service.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define the location hierarchy: **States** own **Cities**, which own **Places**
//! - Define **Users** (place owners) and **Amenities** (linked to places)
//! - Define the typed **patches** that are the only way clients mutate records
//! - Contain all invariant enforcement and domain logic
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod record;
pub mod time;

pub mod amenity;
pub mod city;
pub mod place;
pub mod search;
pub mod state;
pub mod user;
