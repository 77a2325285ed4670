//! # hbnb-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `Repository<T>`: CRUD for any record kind
//!   - `CityRepository`: cities of a state
//!   - `PlaceRepository`: places of a city, of a user, offering an amenity
//! - Define **driving/inbound ports** as use-case structs:
//!   - `StateService`, `CityService`: location hierarchy, with cascading deletes
//!   - `UserService`: registration with argon2 password hashing
//!   - `AmenityService`: amenity catalogue
//!   - `PlaceService`: listings, search, amenity links
//! - Provide **in-process infrastructure** (the in-memory repository) that doesn't need IO
//!
//! ## Dependency rule
//! Depends on `hbnb-domain` only (plus `tokio::sync` for locks and argon2 for hashing).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod memory;
pub mod ports;
pub mod services;
