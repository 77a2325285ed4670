//! Shared application state for axum handlers.

use std::sync::Arc;

use hbnb_app::ports::{
    AmenityRepository, CityRepository, PlaceRepository, StateRepository, UserRepository,
};
use hbnb_app::services::amenity_service::AmenityService;
use hbnb_app::services::city_service::CityService;
use hbnb_app::services::place_service::PlaceService;
use hbnb_app::services::state_service::StateService;
use hbnb_app::services::user_service::UserService;

/// Application state shared across all axum handlers.
///
/// Generic over the five repository types to avoid dynamic dispatch.
/// `Clone` is implemented manually so the underlying types themselves do not
/// need to be `Clone`, only the `Arc` wrappers are cloned.
pub struct AppState<SR, CR, UR, AR, PR> {
    /// State CRUD service.
    pub state_service: Arc<StateService<SR, CR, PR>>,
    /// City CRUD service.
    pub city_service: Arc<CityService<SR, CR, PR>>,
    /// User CRUD service.
    pub user_service: Arc<UserService<UR, PR>>,
    /// Amenity CRUD service.
    pub amenity_service: Arc<AmenityService<AR, PR>>,
    /// Place CRUD, search and amenity links.
    pub place_service: Arc<PlaceService<CR, UR, AR, PR>>,
}

impl<SR, CR, UR, AR, PR> Clone for AppState<SR, CR, UR, AR, PR> {
    fn clone(&self) -> Self {
        Self {
            state_service: Arc::clone(&self.state_service),
            city_service: Arc::clone(&self.city_service),
            user_service: Arc::clone(&self.user_service),
            amenity_service: Arc::clone(&self.amenity_service),
            place_service: Arc::clone(&self.place_service),
        }
    }
}

impl<SR, CR, UR, AR, PR> AppState<SR, CR, UR, AR, PR>
where
    SR: StateRepository + 'static,
    CR: CityRepository + 'static,
    UR: UserRepository + 'static,
    AR: AmenityRepository + 'static,
    PR: PlaceRepository + 'static,
{
    /// Create a new application state from service instances.
    pub fn new(
        state_service: StateService<SR, CR, PR>,
        city_service: CityService<SR, CR, PR>,
        user_service: UserService<UR, PR>,
        amenity_service: AmenityService<AR, PR>,
        place_service: PlaceService<CR, UR, AR, PR>,
    ) -> Self {
        Self {
            state_service: Arc::new(state_service),
            city_service: Arc::new(city_service),
            user_service: Arc::new(user_service),
            amenity_service: Arc::new(amenity_service),
            place_service: Arc::new(place_service),
        }
    }
}

impl<SR, CR, UR, AR, PR> AppState<SR, CR, UR, AR, PR>
where
    SR: StateRepository + Clone + 'static,
    CR: CityRepository + Clone + 'static,
    UR: UserRepository + Clone + 'static,
    AR: AmenityRepository + Clone + 'static,
    PR: PlaceRepository + Clone + 'static,
{
    /// Wire every service from one set of repositories.
    ///
    /// Repositories are cloned into each service that needs them, so they
    /// must share their backing store on clone (a pool, an `Arc`).
    pub fn from_repositories(states: SR, cities: CR, users: UR, amenities: AR, places: PR) -> Self {
        Self::new(
            StateService::new(states.clone(), cities.clone(), places.clone()),
            CityService::new(states, cities.clone(), places.clone()),
            UserService::new(users.clone(), places.clone()),
            AmenityService::new(amenities.clone(), places.clone()),
            PlaceService::new(cities, users, amenities, places),
        )
    }
}
