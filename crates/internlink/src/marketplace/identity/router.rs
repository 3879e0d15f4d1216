use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{NewUserInput, ProfilePatch, UserId};
use super::store::{IdentityError, IdentityStore};
use crate::marketplace::persistence::PersistenceAdapter;

/// Router exposing login, registration, session, and user endpoints.
pub fn identity_router<P>(store: Arc<IdentityStore<P>>) -> Router
where
    P: PersistenceAdapter + 'static,
{
    Router::new()
        .route("/api/login", post(login_handler::<P>))
        .route("/api/register", post(register_handler::<P>))
        .route(
            "/api/session",
            get(session_handler::<P>).delete(logout_handler::<P>),
        )
        .route("/api/users", get(list_users_handler::<P>))
        .route(
            "/api/users/:user_id",
            get(get_user_handler::<P>).put(update_user_handler::<P>),
        )
        .with_state(store)
}

#[derive(Debug, Deserialize)]
pub(crate) struct LoginRequest {
    pub(crate) email: String,
    pub(crate) password: String,
}

pub(crate) async fn login_handler<P>(
    State(store): State<Arc<IdentityStore<P>>>,
    axum::Json(request): axum::Json<LoginRequest>,
) -> Response
where
    P: PersistenceAdapter + 'static,
{
    match store.login(&request.email, &request.password) {
        Ok(user) => (StatusCode::OK, axum::Json(user)).into_response(),
        Err(IdentityError::UnknownEmail(_)) => {
            let payload = json!({ "error": "invalid credentials" });
            (StatusCode::UNAUTHORIZED, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn register_handler<P>(
    State(store): State<Arc<IdentityStore<P>>>,
    axum::Json(input): axum::Json<NewUserInput>,
) -> Response
where
    P: PersistenceAdapter + 'static,
{
    match store.register(input) {
        Ok(user) => (StatusCode::CREATED, axum::Json(user)).into_response(),
        Err(IdentityError::DuplicateEmail(email)) => {
            let payload = json!({ "error": format!("an account already exists for '{email}'") });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn session_handler<P>(State(store): State<Arc<IdentityStore<P>>>) -> Response
where
    P: PersistenceAdapter + 'static,
{
    match store.session() {
        Some(user) => (StatusCode::OK, axum::Json(user)).into_response(),
        None => (StatusCode::NO_CONTENT, ()).into_response(),
    }
}

pub(crate) async fn logout_handler<P>(State(store): State<Arc<IdentityStore<P>>>) -> Response
where
    P: PersistenceAdapter + 'static,
{
    match store.logout() {
        Ok(()) => (StatusCode::NO_CONTENT, ()).into_response(),
        Err(err) => {
            let payload = json!({ "error": err.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn list_users_handler<P>(State(store): State<Arc<IdentityStore<P>>>) -> Response
where
    P: PersistenceAdapter + 'static,
{
    (StatusCode::OK, axum::Json(store.users())).into_response()
}

pub(crate) async fn get_user_handler<P>(
    State(store): State<Arc<IdentityStore<P>>>,
    Path(user_id): Path<String>,
) -> Response
where
    P: PersistenceAdapter + 'static,
{
    match store.user(&UserId(user_id)) {
        Some(user) => (StatusCode::OK, axum::Json(user)).into_response(),
        None => {
            let payload = json!({ "error": "user not found" });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn update_user_handler<P>(
    State(store): State<Arc<IdentityStore<P>>>,
    Path(user_id): Path<String>,
    axum::Json(patch): axum::Json<ProfilePatch>,
) -> Response
where
    P: PersistenceAdapter + 'static,
{
    match store.update_profile(&UserId(user_id), patch) {
        Ok(user) => (StatusCode::OK, axum::Json(user)).into_response(),
        Err(IdentityError::UnknownUser(id)) => {
            let payload = json!({ "error": format!("user '{id}' does not exist") });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
