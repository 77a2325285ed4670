//! Service status and record counts.

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use hbnb_app::ports::{
    AmenityRepository, CityRepository, PlaceRepository, StateRepository, UserRepository,
};

use crate::error::ApiError;
use crate::state::AppState;

/// Body of `GET /api/v1/status`.
#[derive(Debug, Serialize)]
pub struct Status {
    pub status: &'static str,
}

/// Body of `GET /api/v1/stats`: how many records of each kind are stored.
#[derive(Debug, Serialize)]
pub struct Stats {
    pub amenities: usize,
    pub cities: usize,
    pub places: usize,
    pub states: usize,
    pub users: usize,
}

/// `GET /api/v1/status`
pub async fn status() -> Json<Status> {
    Json(Status { status: "OK" })
}

/// `GET /api/v1/stats`
pub async fn stats<SR, CR, UR, AR, PR>(
    State(state): State<AppState<SR, CR, UR, AR, PR>>,
) -> Result<Json<Stats>, ApiError>
where
    SR: StateRepository + 'static,
    CR: CityRepository + 'static,
    UR: UserRepository + 'static,
    AR: AmenityRepository + 'static,
    PR: PlaceRepository + 'static,
{
    Ok(Json(Stats {
        amenities: state.amenity_service.count_amenities().await?,
        cities: state.city_service.count_cities().await?,
        places: state.place_service.count_places().await?,
        states: state.state_service.count_states().await?,
        users: state.user_service.count_users().await?,
    }))
}
