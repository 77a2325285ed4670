//! JSON REST handlers for users.
//!
//! Representations never carry the password or its hash.

use axum::Json;
use axum::extract::{Path, State};

use hbnb_app::ports::{
    AmenityRepository, CityRepository, PlaceRepository, StateRepository, UserRepository,
};
use hbnb_domain::user::{NewUser, User, UserPatch};

use crate::error::ApiError;
use crate::request::{self, Payload, SERVER_MANAGED};
use crate::response::{CreateResponse, DeleteResponse, GetResponse, ListResponse};
use crate::state::AppState;

/// Keys stripped from update bodies; the email is fixed at registration.
const PROTECTED: [&str; 4] = ["id", "email", "created_at", "updated_at"];

/// `GET /api/v1/users`
pub async fn list<SR, CR, UR, AR, PR>(
    State(state): State<AppState<SR, CR, UR, AR, PR>>,
) -> Result<ListResponse<User>, ApiError>
where
    SR: StateRepository + 'static,
    CR: CityRepository + 'static,
    UR: UserRepository + 'static,
    AR: AmenityRepository + 'static,
    PR: PlaceRepository + 'static,
{
    let users = state.user_service.list_users().await?;
    Ok(ListResponse::Ok(Json(users)))
}

/// `GET /api/v1/users/{user_id}`
pub async fn get<SR, CR, UR, AR, PR>(
    State(state): State<AppState<SR, CR, UR, AR, PR>>,
    Path(id): Path<String>,
) -> Result<GetResponse<User>, ApiError>
where
    SR: StateRepository + 'static,
    CR: CityRepository + 'static,
    UR: UserRepository + 'static,
    AR: AmenityRepository + 'static,
    PR: PlaceRepository + 'static,
{
    let user_id = request::parse_id(&id, "User")?;
    let user = state.user_service.get_user(user_id).await?;
    Ok(GetResponse::Ok(Json(user)))
}

/// `POST /api/v1/users`
pub async fn create<SR, CR, UR, AR, PR>(
    State(state): State<AppState<SR, CR, UR, AR, PR>>,
    payload: Payload,
) -> Result<CreateResponse<User>, ApiError>
where
    SR: StateRepository + 'static,
    CR: CityRepository + 'static,
    UR: UserRepository + 'static,
    AR: AmenityRepository + 'static,
    PR: PlaceRepository + 'static,
{
    let body = request::object(payload)?;
    request::require(&body, "email")?;
    request::require(&body, "password")?;
    let new_user: NewUser = request::patch(body, &SERVER_MANAGED)?;

    let created = state.user_service.create_user(new_user).await?;
    Ok(CreateResponse::Created(Json(created)))
}

/// `PUT /api/v1/users/{user_id}`
pub async fn update<SR, CR, UR, AR, PR>(
    State(state): State<AppState<SR, CR, UR, AR, PR>>,
    Path(id): Path<String>,
    payload: Payload,
) -> Result<GetResponse<User>, ApiError>
where
    SR: StateRepository + 'static,
    CR: CityRepository + 'static,
    UR: UserRepository + 'static,
    AR: AmenityRepository + 'static,
    PR: PlaceRepository + 'static,
{
    let user_id = request::parse_id(&id, "User")?;
    let user = state.user_service.get_user(user_id).await?;

    let body = request::object(payload)?;
    let patch: UserPatch = request::patch(body, &PROTECTED)?;
    let updated = state.user_service.update_user(user.id, patch).await?;
    Ok(GetResponse::Ok(Json(updated)))
}

/// `DELETE /api/v1/users/{user_id}`
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
    let user_id = request::parse_id(&id, "User")?;
    state.user_service.delete_user(user_id).await?;
    Ok(DeleteResponse::Ok)
}
