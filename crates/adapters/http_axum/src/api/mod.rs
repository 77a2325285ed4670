//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod amenities;
#[allow(clippy::missing_errors_doc)]
pub mod cities;
#[allow(clippy::missing_errors_doc)]
pub mod index;
#[allow(clippy::missing_errors_doc)]
pub mod place_amenities;
#[allow(clippy::missing_errors_doc)]
pub mod places;
#[allow(clippy::missing_errors_doc)]
pub mod states;
#[allow(clippy::missing_errors_doc)]
pub mod users;

use axum::Router;
use axum::routing::{get, post};

use hbnb_app::ports::{
    AmenityRepository, CityRepository, PlaceRepository, StateRepository, UserRepository,
};

use crate::state::AppState;

/// Build the `/api/v1` sub-router.
pub fn routes<SR, CR, UR, AR, PR>() -> Router<AppState<SR, CR, UR, AR, PR>>
where
    SR: StateRepository + 'static,
    CR: CityRepository + 'static,
    UR: UserRepository + 'static,
    AR: AmenityRepository + 'static,
    PR: PlaceRepository + 'static,
{
    Router::new()
        .route("/status", get(index::status))
        .route("/stats", get(index::stats::<SR, CR, UR, AR, PR>))
        // States
        .route(
            "/states",
            get(states::list::<SR, CR, UR, AR, PR>).post(states::create::<SR, CR, UR, AR, PR>),
        )
        .route(
            "/states/{state_id}",
            get(states::get::<SR, CR, UR, AR, PR>)
                .put(states::update::<SR, CR, UR, AR, PR>)
                .delete(states::delete::<SR, CR, UR, AR, PR>),
        )
        // Cities
        .route(
            "/states/{state_id}/cities",
            get(cities::list::<SR, CR, UR, AR, PR>).post(cities::create::<SR, CR, UR, AR, PR>),
        )
        .route(
            "/cities/{city_id}",
            get(cities::get::<SR, CR, UR, AR, PR>)
                .put(cities::update::<SR, CR, UR, AR, PR>)
                .delete(cities::delete::<SR, CR, UR, AR, PR>),
        )
        // Users
        .route(
            "/users",
            get(users::list::<SR, CR, UR, AR, PR>).post(users::create::<SR, CR, UR, AR, PR>),
        )
        .route(
            "/users/{user_id}",
            get(users::get::<SR, CR, UR, AR, PR>)
                .put(users::update::<SR, CR, UR, AR, PR>)
                .delete(users::delete::<SR, CR, UR, AR, PR>),
        )
        // Amenities
        .route(
            "/amenities",
            get(amenities::list::<SR, CR, UR, AR, PR>)
                .post(amenities::create::<SR, CR, UR, AR, PR>),
        )
        .route(
            "/amenities/{amenity_id}",
            get(amenities::get::<SR, CR, UR, AR, PR>)
                .put(amenities::update::<SR, CR, UR, AR, PR>)
                .delete(amenities::delete::<SR, CR, UR, AR, PR>),
        )
        // Places
        .route(
            "/cities/{city_id}/places",
            get(places::list::<SR, CR, UR, AR, PR>).post(places::create::<SR, CR, UR, AR, PR>),
        )
        .route(
            "/places/{place_id}",
            get(places::get::<SR, CR, UR, AR, PR>)
                .put(places::update::<SR, CR, UR, AR, PR>)
                .delete(places::delete::<SR, CR, UR, AR, PR>),
        )
        .route(
            "/places_search",
            post(places::search::<SR, CR, UR, AR, PR>),
        )
        // Place amenities
        .route(
            "/places/{place_id}/amenities",
            get(place_amenities::list::<SR, CR, UR, AR, PR>),
        )
        .route(
            "/places/{place_id}/amenities/{amenity_id}",
            post(place_amenities::link::<SR, CR, UR, AR, PR>)
                .delete(place_amenities::unlink::<SR, CR, UR, AR, PR>),
        )
}
