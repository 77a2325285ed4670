//! Place search criteria.

use crate::id::{AmenityId, CityId, StateId};

/// Filters for a place search.
///
/// States and cities widen the scope (their union is searched); amenities
/// narrow it (every listed amenity must be offered).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaceSearch {
    pub states: Vec<StateId>,
    pub cities: Vec<CityId>,
    pub amenities: Vec<AmenityId>,
    /// Set when the request listed states or cities, including entries that
    /// could not be parsed into `states`/`cities`.
    pub scoped: bool,
}

impl PlaceSearch {
    /// Whether neither states nor cities were asked for, i.e. every place is
    /// in scope.
    #[must_use]
    pub fn is_unscoped(&self) -> bool {
        !self.scoped && self.states.is_empty() && self.cities.is_empty()
    }
}
