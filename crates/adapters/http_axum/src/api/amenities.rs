//! JSON REST handlers for amenities.

use axum::Json;
use axum::extract::{Path, State};

use hbnb_app::ports::{
    AmenityRepository, CityRepository, PlaceRepository, StateRepository, UserRepository,
};
use hbnb_domain::amenity::{Amenity, AmenityPatch};

use crate::error::ApiError;
use crate::request::{self, Payload, SERVER_MANAGED};
use crate::response::{CreateResponse, DeleteResponse, GetResponse, ListResponse};
use crate::state::AppState;

/// `GET /api/v1/amenities`
pub async fn list<SR, CR, UR, AR, PR>(
    State(state): State<AppState<SR, CR, UR, AR, PR>>,
) -> Result<ListResponse<Amenity>, ApiError>
where
    SR: StateRepository + 'static,
    CR: CityRepository + 'static,
    UR: UserRepository + 'static,
    AR: AmenityRepository + 'static,
    PR: PlaceRepository + 'static,
{
    let amenities = state.amenity_service.list_amenities().await?;
    Ok(ListResponse::Ok(Json(amenities)))
}

/// `GET /api/v1/amenities/{amenity_id}`
pub async fn get<SR, CR, UR, AR, PR>(
    State(state): State<AppState<SR, CR, UR, AR, PR>>,
    Path(id): Path<String>,
) -> Result<GetResponse<Amenity>, ApiError>
where
    SR: StateRepository + 'static,
    CR: CityRepository + 'static,
    UR: UserRepository + 'static,
    AR: AmenityRepository + 'static,
    PR: PlaceRepository + 'static,
{
    let amenity_id = request::parse_id(&id, "Amenity")?;
    let amenity = state.amenity_service.get_amenity(amenity_id).await?;
    Ok(GetResponse::Ok(Json(amenity)))
}

/// `POST /api/v1/amenities`
pub async fn create<SR, CR, UR, AR, PR>(
    State(state): State<AppState<SR, CR, UR, AR, PR>>,
    payload: Payload,
) -> Result<CreateResponse<Amenity>, ApiError>
where
    SR: StateRepository + 'static,
    CR: CityRepository + 'static,
    UR: UserRepository + 'static,
    AR: AmenityRepository + 'static,
    PR: PlaceRepository + 'static,
{
    let body = request::object(payload)?;
    request::require(&body, "name")?;
    let patch: AmenityPatch = request::patch(body, &SERVER_MANAGED)?;

    let mut builder = Amenity::builder();
    if let Some(name) = patch.name {
        builder = builder.name(name);
    }
    let created = state
        .amenity_service
        .create_amenity(builder.build()?)
        .await?;
    Ok(CreateResponse::Created(Json(created)))
}

/// `PUT /api/v1/amenities/{amenity_id}`
pub async fn update<SR, CR, UR, AR, PR>(
    State(state): State<AppState<SR, CR, UR, AR, PR>>,
    Path(id): Path<String>,
    payload: Payload,
) -> Result<GetResponse<Amenity>, ApiError>
where
    SR: StateRepository + 'static,
    CR: CityRepository + 'static,
    UR: UserRepository + 'static,
    AR: AmenityRepository + 'static,
    PR: PlaceRepository + 'static,
{
    let amenity_id = request::parse_id(&id, "Amenity")?;
    let amenity = state.amenity_service.get_amenity(amenity_id).await?;

    let body = request::object(payload)?;
    let patch: AmenityPatch = request::patch(body, &SERVER_MANAGED)?;
    let updated = state
        .amenity_service
        .update_amenity(amenity.id, patch)
        .await?;
    Ok(GetResponse::Ok(Json(updated)))
}

/// `DELETE /api/v1/amenities/{amenity_id}`
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
    let amenity_id = request::parse_id(&id, "Amenity")?;
    state.amenity_service.delete_amenity(amenity_id).await?;
    Ok(DeleteResponse::Ok)
}
