//! JSON REST handlers for the amenities a place offers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use hbnb_app::ports::{
    AmenityRepository, CityRepository, PlaceRepository, StateRepository, UserRepository,
};
use hbnb_app::services::place_service::AmenityLink;
use hbnb_domain::amenity::Amenity;

use crate::error::ApiError;
use crate::request;
use crate::response::{DeleteResponse, ListResponse};
use crate::state::AppState;

/// Possible responses from the link endpoint.
pub enum LinkResponse {
    /// The amenity was linked by this request.
    Created(Json<Amenity>),
    /// The amenity was already linked.
    Ok(Json<Amenity>),
}

impl IntoResponse for LinkResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
            Self::Ok(json) => json.into_response(),
        }
    }
}

impl From<AmenityLink> for LinkResponse {
    fn from(link: AmenityLink) -> Self {
        match link {
            AmenityLink::Created(amenity) => Self::Created(Json(amenity)),
            AmenityLink::Existing(amenity) => Self::Ok(Json(amenity)),
        }
    }
}

/// `GET /api/v1/places/{place_id}/amenities`
pub async fn list<SR, CR, UR, AR, PR>(
    State(state): State<AppState<SR, CR, UR, AR, PR>>,
    Path(place_id): Path<String>,
) -> Result<ListResponse<Amenity>, ApiError>
where
    SR: StateRepository + 'static,
    CR: CityRepository + 'static,
    UR: UserRepository + 'static,
    AR: AmenityRepository + 'static,
    PR: PlaceRepository + 'static,
{
    let place_id = request::parse_id(&place_id, "Place")?;
    let amenities = state.place_service.list_place_amenities(place_id).await?;
    Ok(ListResponse::Ok(Json(amenities)))
}

/// `POST /api/v1/places/{place_id}/amenities/{amenity_id}`
pub async fn link<SR, CR, UR, AR, PR>(
    State(state): State<AppState<SR, CR, UR, AR, PR>>,
    Path((place_id, amenity_id)): Path<(String, String)>,
) -> Result<LinkResponse, ApiError>
where
    SR: StateRepository + 'static,
    CR: CityRepository + 'static,
    UR: UserRepository + 'static,
    AR: AmenityRepository + 'static,
    PR: PlaceRepository + 'static,
{
    let place_id = request::parse_id(&place_id, "Place")?;
    let amenity_id = request::parse_id(&amenity_id, "Amenity")?;
    let link = state
        .place_service
        .link_amenity(place_id, amenity_id)
        .await?;
    Ok(link.into())
}

/// `DELETE /api/v1/places/{place_id}/amenities/{amenity_id}`
pub async fn unlink<SR, CR, UR, AR, PR>(
    State(state): State<AppState<SR, CR, UR, AR, PR>>,
    Path((place_id, amenity_id)): Path<(String, String)>,
) -> Result<DeleteResponse, ApiError>
where
    SR: StateRepository + 'static,
    CR: CityRepository + 'static,
    UR: UserRepository + 'static,
    AR: AmenityRepository + 'static,
    PR: PlaceRepository + 'static,
{
    let place_id = request::parse_id(&place_id, "Place")?;
    let amenity_id = request::parse_id(&amenity_id, "Amenity")?;
    state
        .place_service
        .unlink_amenity(place_id, amenity_id)
        .await?;
    Ok(DeleteResponse::Ok)
}
