//! Axum router assembly.

use axum::Router;
use axum::http::HeaderValue;
use axum::http::header::InvalidHeaderValue;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use hbnb_app::ports::{
    AmenityRepository, CityRepository, PlaceRepository, StateRepository, UserRepository,
};

use crate::error::ApiError;
use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Nests API routes under `/api/v1` and answers every other path with a JSON
/// `404`. Includes a [`TraceLayer`] that logs each HTTP request/response at the
/// `DEBUG` level using the `tracing` ecosystem.
pub fn build<SR, CR, UR, AR, PR>(state: AppState<SR, CR, UR, AR, PR>) -> Router
where
    SR: StateRepository + 'static,
    CR: CityRepository + 'static,
    UR: UserRepository + 'static,
    AR: AmenityRepository + 'static,
    PR: PlaceRepository + 'static,
{
    Router::new()
        .nest("/api/v1", crate::api::routes())
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// CORS policy for the given origins; `*` allows any origin.
///
/// # Errors
///
/// Returns [`InvalidHeaderValue`] when an origin is not a valid header value.
pub fn cors(allowed_origins: &[String]) -> Result<CorsLayer, InvalidHeaderValue> {
    let origin = if allowed_origins.iter().any(|origin| origin == "*") {
        AllowOrigin::any()
    } else {
        let origins = allowed_origins
            .iter()
            .map(|origin| HeaderValue::from_str(origin))
            .collect::<Result<Vec<_>, _>>()?;
        AllowOrigin::list(origins)
    };

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(Any)
        .allow_headers(Any))
}

async fn not_found() -> ApiError {
    ApiError::no_route()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use hbnb_app::memory::InMemoryRepository;
    use hbnb_domain::amenity::Amenity;
    use hbnb_domain::city::City;
    use hbnb_domain::place::Place;
    use hbnb_domain::state::State;
    use hbnb_domain::user::User;
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn app() -> Router {
        build(AppState::from_repositories(
            InMemoryRepository::<State>::new(),
            InMemoryRepository::<City>::new(),
            InMemoryRepository::<User>::new(),
            InMemoryRepository::<Amenity>::new(),
            InMemoryRepository::<Place>::new(),
        ))
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    #[tokio::test]
    async fn should_report_status_ok() {
        let (status, body) = send(&app(), "GET", "/api/v1/status", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "OK"}));
    }

    #[tokio::test]
    async fn should_answer_unknown_route_with_json_not_found() {
        let (status, body) = send(&app(), "GET", "/api/v1/nope", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"error": "Not found"}));
    }

    #[tokio::test]
    async fn should_walk_state_lifecycle() {
        let app = app();

        let (status, created) =
            send(&app, "POST", "/api/v1/states", Some(json!({"name": "California"}))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["name"], "California");
        let id = created["id"].as_str().unwrap().to_string();
        assert!(!created["created_at"].as_str().unwrap().is_empty());

        let uri = format!("/api/v1/states/{id}");
        let (status, fetched) = send(&app, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched, created);

        let (status, body) = send(&app, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({}));

        let (status, _) = send(&app, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn should_reject_state_without_name() {
        let (status, body) =
            send(&app(), "POST", "/api/v1/states", Some(json!({"label": "x"}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Missing name"}));
    }

    #[tokio::test]
    async fn should_reject_body_that_is_not_json() {
        let (status, body) = send(&app(), "POST", "/api/v1/states", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Not a JSON"}));
    }

    #[tokio::test]
    async fn should_check_state_update_body_before_lookup() {
        let app = app();
        let missing = format!("/api/v1/states/{}", hbnb_domain::id::StateId::new());

        let (status, _) = send(&app, "PUT", &missing, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(&app, "PUT", &missing, Some(json!({"name": "x"}))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn should_treat_malformed_path_id_as_not_found() {
        let (status, body) = send(&app(), "GET", "/api/v1/places/not-a-uuid", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"error": "Not found"}));
    }

    #[tokio::test]
    async fn should_report_place_creation_errors_in_order() {
        let app = app();
        let (_, state) = send(&app, "POST", "/api/v1/states", Some(json!({"name": "CA"}))).await;
        let (_, city) = send(
            &app,
            "POST",
            &format!("/api/v1/states/{}/cities", state["id"].as_str().unwrap()),
            Some(json!({"name": "SF"})),
        )
        .await;
        let places = format!("/api/v1/cities/{}/places", city["id"].as_str().unwrap());

        let bad_city = format!("/api/v1/cities/{}/places", hbnb_domain::id::CityId::new());
        let (status, _) = send(&app, "POST", &bad_city, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = send(&app, "POST", &places, None).await;
        assert_eq!((status, body), (StatusCode::BAD_REQUEST, json!({"error": "Not a JSON"})));

        let (status, body) = send(&app, "POST", &places, Some(json!({"name": "Loft"}))).await;
        assert_eq!(
            (status, body),
            (StatusCode::BAD_REQUEST, json!({"error": "Missing user_id"}))
        );

        let unknown_user = hbnb_domain::id::UserId::new().to_string();
        let (status, body) =
            send(&app, "POST", &places, Some(json!({"user_id": unknown_user}))).await;
        assert_eq!(
            (status, body),
            (StatusCode::BAD_REQUEST, json!({"error": "Missing name"}))
        );

        let (status, _) = send(
            &app,
            "POST",
            &places,
            Some(json!({"user_id": unknown_user, "name": "Loft"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(
            &app,
            "POST",
            &places,
            Some(json!({"user_id": null, "name": "Loft"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn should_find_nothing_when_every_searched_id_is_malformed() {
        let app = app();
        let (_, state) = send(&app, "POST", "/api/v1/states", Some(json!({"name": "CA"}))).await;
        let (_, city) = send(
            &app,
            "POST",
            &format!("/api/v1/states/{}/cities", state["id"].as_str().unwrap()),
            Some(json!({"name": "SF"})),
        )
        .await;
        let (_, user) = send(
            &app,
            "POST",
            "/api/v1/users",
            Some(json!({"email": "a@b.c", "password": "pwd"})),
        )
        .await;
        let (status, _) = send(
            &app,
            "POST",
            &format!("/api/v1/cities/{}/places", city["id"].as_str().unwrap()),
            Some(json!({"user_id": user["id"], "name": "Loft"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        for criteria in [
            json!({"states": ["bogus"]}),
            json!({"cities": [42]}),
            json!({"states": [hbnb_domain::id::StateId::new().to_string()]}),
        ] {
            let (status, body) =
                send(&app, "POST", "/api/v1/places_search", Some(criteria.clone())).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body, json!([]), "searching {criteria}");
        }

        let (_, body) = send(
            &app,
            "POST",
            "/api/v1/places_search",
            Some(json!({"states": ["bogus"], "cities": [city["id"]]})),
        )
        .await;
        assert_eq!(body.as_array().map(Vec::len), Some(1));
    }

    #[test]
    fn should_reject_invalid_cors_origin() {
        assert!(cors(&["bad\norigin".to_string()]).is_err());
        assert!(cors(&["https://hbnb.io".to_string()]).is_ok());
        assert!(cors(&["*".to_string()]).is_ok());
    }
}
