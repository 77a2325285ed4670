//! JSON REST handlers for cities.

use axum::Json;
use axum::extract::{Path, State};

use hbnb_app::ports::{
    AmenityRepository, CityRepository, PlaceRepository, StateRepository, UserRepository,
};
use hbnb_domain::city::{City, CityPatch};
use hbnb_domain::id::StateId;

use crate::error::ApiError;
use crate::request::{self, Payload};
use crate::response::{CreateResponse, DeleteResponse, GetResponse, ListResponse};
use crate::state::AppState;

/// Keys stripped from city bodies before they are read.
const PROTECTED: [&str; 4] = ["id", "state_id", "created_at", "updated_at"];

/// `GET /api/v1/states/{state_id}/cities`
pub async fn list<SR, CR, UR, AR, PR>(
    State(state): State<AppState<SR, CR, UR, AR, PR>>,
    Path(state_id): Path<String>,
) -> Result<ListResponse<City>, ApiError>
where
    SR: StateRepository + 'static,
    CR: CityRepository + 'static,
    UR: UserRepository + 'static,
    AR: AmenityRepository + 'static,
    PR: PlaceRepository + 'static,
{
    let state_id = request::parse_id(&state_id, "State")?;
    let cities = state.city_service.list_cities(state_id).await?;
    Ok(ListResponse::Ok(Json(cities)))
}

/// `GET /api/v1/cities/{city_id}`
pub async fn get<SR, CR, UR, AR, PR>(
    State(state): State<AppState<SR, CR, UR, AR, PR>>,
    Path(id): Path<String>,
) -> Result<GetResponse<City>, ApiError>
where
    SR: StateRepository + 'static,
    CR: CityRepository + 'static,
    UR: UserRepository + 'static,
    AR: AmenityRepository + 'static,
    PR: PlaceRepository + 'static,
{
    let city_id = request::parse_id(&id, "City")?;
    let city = state.city_service.get_city(city_id).await?;
    Ok(GetResponse::Ok(Json(city)))
}

/// `POST /api/v1/states/{state_id}/cities`
pub async fn create<SR, CR, UR, AR, PR>(
    State(state): State<AppState<SR, CR, UR, AR, PR>>,
    Path(state_id): Path<String>,
    payload: Payload,
) -> Result<CreateResponse<City>, ApiError>
where
    SR: StateRepository + 'static,
    CR: CityRepository + 'static,
    UR: UserRepository + 'static,
    AR: AmenityRepository + 'static,
    PR: PlaceRepository + 'static,
{
    let state_id: StateId = request::parse_id(&state_id, "State")?;
    let parent = state.state_service.get_state(state_id).await?;

    let body = request::object(payload)?;
    request::require(&body, "name")?;
    let patch: CityPatch = request::patch(body, &PROTECTED)?;

    let mut builder = City::builder().state_id(parent.id);
    if let Some(name) = patch.name {
        builder = builder.name(name);
    }
    let created = state.city_service.create_city(builder.build()?).await?;
    Ok(CreateResponse::Created(Json(created)))
}

/// `PUT /api/v1/cities/{city_id}`
pub async fn update<SR, CR, UR, AR, PR>(
    State(state): State<AppState<SR, CR, UR, AR, PR>>,
    Path(id): Path<String>,
    payload: Payload,
) -> Result<GetResponse<City>, ApiError>
where
    SR: StateRepository + 'static,
    CR: CityRepository + 'static,
    UR: UserRepository + 'static,
    AR: AmenityRepository + 'static,
    PR: PlaceRepository + 'static,
{
    let city_id = request::parse_id(&id, "City")?;
    let city = state.city_service.get_city(city_id).await?;

    let body = request::object(payload)?;
    let patch: CityPatch = request::patch(body, &PROTECTED)?;
    let updated = state.city_service.update_city(city.id, patch).await?;
    Ok(GetResponse::Ok(Json(updated)))
}

/// `DELETE /api/v1/cities/{city_id}`
pub async fn delete<SR, CR, UR, AR, PR>(
    State(state): State<AppState<SR, CR, UR, AR, PR>>,
    Path(id): Path<String>,
) -> Result<DeleteResponse, ApiError>
where
    SR: StateRepository + 'static,
    CR: CityRepository + 'static,
    UR: UserRepository + 'static,
    AR: AmenityRepository + 'static,
    PR: PlaceRepository + 'static,
{
    let city_id = request::parse_id(&id, "City")?;
    state.city_service.delete_city(city_id).await?;
    Ok(DeleteResponse::Ok)
}
