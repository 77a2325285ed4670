//! JSON REST handlers for places and place search.

use axum::Json;
use axum::extract::{Path, State};
use serde_json::Value;

use hbnb_app::ports::{
    AmenityRepository, CityRepository, PlaceRepository, StateRepository, UserRepository,
};
use hbnb_domain::error::NotFoundError;
use hbnb_domain::id::{AmenityId, UserId};
use hbnb_domain::place::{Place, PlacePatch};
use hbnb_domain::search::PlaceSearch;

use crate::error::ApiError;
use crate::request::{self, Payload};
use crate::response::{CreateResponse, DeleteResponse, GetResponse, ListResponse};
use crate::state::AppState;

/// Keys stripped from place bodies before they are read. Ownership is set
/// from the route and the creating user, never from a patch.
const PROTECTED: [&str; 5] = ["id", "city_id", "user_id", "created_at", "updated_at"];

/// `GET /api/v1/cities/{city_id}/places`
pub async fn list<SR, CR, UR, AR, PR>(
    State(state): State<AppState<SR, CR, UR, AR, PR>>,
    Path(city_id): Path<String>,
) -> Result<ListResponse<Place>, ApiError>
where
    SR: StateRepository + 'static,
    CR: CityRepository + 'static,
    UR: UserRepository + 'static,
    AR: AmenityRepository + 'static,
    PR: PlaceRepository + 'static,
{
    let city_id = request::parse_id(&city_id, "City")?;
    let places = state.place_service.list_places(city_id).await?;
    Ok(ListResponse::Ok(Json(places)))
}

/// `GET /api/v1/places/{place_id}`
pub async fn get<SR, CR, UR, AR, PR>(
    State(state): State<AppState<SR, CR, UR, AR, PR>>,
    Path(id): Path<String>,
) -> Result<GetResponse<Place>, ApiError>
where
    SR: StateRepository + 'static,
    CR: CityRepository + 'static,
    UR: UserRepository + 'static,
    AR: AmenityRepository + 'static,
    PR: PlaceRepository + 'static,
{
    let place_id = request::parse_id(&id, "Place")?;
    let place = state.place_service.get_place(place_id).await?;
    Ok(GetResponse::Ok(Json(place)))
}

/// `POST /api/v1/cities/{city_id}/places`
///
/// Checks run in a fixed order: the city must exist, the body must be a JSON
/// object carrying `user_id` then `name`, and the user must exist. A null
/// `user_id` names no user.
pub async fn create<SR, CR, UR, AR, PR>(
    State(state): State<AppState<SR, CR, UR, AR, PR>>,
    Path(city_id): Path<String>,
    payload: Payload,
) -> Result<CreateResponse<Place>, ApiError>
where
    SR: StateRepository + 'static,
    CR: CityRepository + 'static,
    UR: UserRepository + 'static,
    AR: AmenityRepository + 'static,
    PR: PlaceRepository + 'static,
{
    let city_id = request::parse_id(&city_id, "City")?;
    let city = state.city_service.get_city(city_id).await?;

    let mut body = request::object(payload)?;
    request::present(&body, "user_id")?;
    request::require(&body, "name")?;

    let raw_user_id = body.remove("user_id").unwrap_or_default();
    let user_id: UserId = match raw_user_id {
        Value::String(raw) => request::parse_id(&raw, "User")?,
        other => return Err(NotFoundError::new("User", other).into()),
    };
    let (amenities, rejected) = request::id_list::<AmenityId>(&body, "amenities")?;
    if rejected > 0 {
        return Err(NotFoundError::new("Amenity", "malformed id").into());
    }
    body.remove("amenities");
    let patch: PlacePatch = request::patch(body, &PROTECTED)?;

    let mut builder = Place::builder()
        .city_id(city.id)
        .user_id(user_id)
        .patch(patch);
    for amenity_id in amenities {
        builder = builder.amenity(amenity_id);
    }
    let created = state.place_service.create_place(builder.build()?).await?;
    Ok(CreateResponse::Created(Json(created)))
}

/// `PUT /api/v1/places/{place_id}`
pub async fn update<SR, CR, UR, AR, PR>(
    State(state): State<AppState<SR, CR, UR, AR, PR>>,
    Path(id): Path<String>,
    payload: Payload,
) -> Result<GetResponse<Place>, ApiError>
where
    SR: StateRepository + 'static,
    CR: CityRepository + 'static,
    UR: UserRepository + 'static,
    AR: AmenityRepository + 'static,
    PR: PlaceRepository + 'static,
{
    let place_id = request::parse_id(&id, "Place")?;
    let place = state.place_service.get_place(place_id).await?;

    let body = request::object(payload)?;
    let patch: PlacePatch = request::patch(body, &PROTECTED)?;
    let updated = state.place_service.update_place(place.id, patch).await?;
    Ok(GetResponse::Ok(Json(updated)))
}

/// `DELETE /api/v1/places/{place_id}`
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
    let place_id = request::parse_id(&id, "Place")?;
    state.place_service.delete_place(place_id).await?;
    Ok(DeleteResponse::Ok)
}

/// `POST /api/v1/places_search`
///
/// Malformed state or city ids match nothing and are skipped. A malformed
/// amenity id can never be offered, so it empties the result.
pub async fn search<SR, CR, UR, AR, PR>(
    State(state): State<AppState<SR, CR, UR, AR, PR>>,
    payload: Payload,
) -> Result<ListResponse<Place>, ApiError>
where
    SR: StateRepository + 'static,
    CR: CityRepository + 'static,
    UR: UserRepository + 'static,
    AR: AmenityRepository + 'static,
    PR: PlaceRepository + 'static,
{
    let body = request::object(payload)?;
    let (states, bad_states) = request::id_list(&body, "states")?;
    let (cities, bad_cities) = request::id_list(&body, "cities")?;
    let (amenities, rejected) = request::id_list(&body, "amenities")?;
    if rejected > 0 {
        return Ok(ListResponse::Ok(Json(Vec::new())));
    }

    let search = PlaceSearch {
        scoped: bad_states + bad_cities > 0,
        states,
        cities,
        amenities,
    };
    let places = state.place_service.search_places(&search).await?;
    Ok(ListResponse::Ok(Json(places)))
}
