//! JSON REST handlers for states.

use axum::Json;
use axum::extract::{Path, State};

use hbnb_app::ports::{
    AmenityRepository, CityRepository, PlaceRepository, StateRepository, UserRepository,
};
use hbnb_domain::state::{State as Region, StatePatch};

use crate::error::ApiError;
use crate::request::{self, Payload, SERVER_MANAGED};
use crate::response::{CreateResponse, DeleteResponse, GetResponse, ListResponse};
use crate::state::AppState;

/// `GET /api/v1/states`
pub async fn list<SR, CR, UR, AR, PR>(
    State(state): State<AppState<SR, CR, UR, AR, PR>>,
) -> Result<ListResponse<Region>, ApiError>
where
    SR: StateRepository + 'static,
    CR: CityRepository + 'static,
    UR: UserRepository + 'static,
    AR: AmenityRepository + 'static,
    PR: PlaceRepository + 'static,
{
    let states = state.state_service.list_states().await?;
    Ok(ListResponse::Ok(Json(states)))
}

/// `GET /api/v1/states/{state_id}`
pub async fn get<SR, CR, UR, AR, PR>(
    State(state): State<AppState<SR, CR, UR, AR, PR>>,
    Path(id): Path<String>,
) -> Result<GetResponse<Region>, ApiError>
where
    SR: StateRepository + 'static,
    CR: CityRepository + 'static,
    UR: UserRepository + 'static,
    AR: AmenityRepository + 'static,
    PR: PlaceRepository + 'static,
{
    let state_id = request::parse_id(&id, "State")?;
    let found = state.state_service.get_state(state_id).await?;
    Ok(GetResponse::Ok(Json(found)))
}

/// `POST /api/v1/states`
pub async fn create<SR, CR, UR, AR, PR>(
    State(state): State<AppState<SR, CR, UR, AR, PR>>,
    payload: Payload,
) -> Result<CreateResponse<Region>, ApiError>
where
    SR: StateRepository + 'static,
    CR: CityRepository + 'static,
    UR: UserRepository + 'static,
    AR: AmenityRepository + 'static,
    PR: PlaceRepository + 'static,
{
    let body = request::object(payload)?;
    request::require(&body, "name")?;
    let patch: StatePatch = request::patch(body, &SERVER_MANAGED)?;

    let mut builder = Region::builder();
    if let Some(name) = patch.name {
        builder = builder.name(name);
    }
    let created = state.state_service.create_state(builder.build()?).await?;
    Ok(CreateResponse::Created(Json(created)))
}

/// `PUT /api/v1/states/{state_id}`
///
/// The body is checked before the state is looked up.
pub async fn update<SR, CR, UR, AR, PR>(
    State(state): State<AppState<SR, CR, UR, AR, PR>>,
    Path(id): Path<String>,
    payload: Payload,
) -> Result<GetResponse<Region>, ApiError>
where
    SR: StateRepository + 'static,
    CR: CityRepository + 'static,
    UR: UserRepository + 'static,
    AR: AmenityRepository + 'static,
    PR: PlaceRepository + 'static,
{
    let body = request::object(payload)?;
    let patch: StatePatch = request::patch(body, &SERVER_MANAGED)?;
    let state_id = request::parse_id(&id, "State")?;
    let updated = state.state_service.update_state(state_id, patch).await?;
    Ok(GetResponse::Ok(Json(updated)))
}

/// `DELETE /api/v1/states/{state_id}`
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
    let state_id = request::parse_id(&id, "State")?;
    state.state_service.delete_state(state_id).await?;
    Ok(DeleteResponse::Ok)
}
