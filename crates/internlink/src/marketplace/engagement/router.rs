use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{
    ApplicationId, ApplicationStatus, InternshipId, InternshipPatch, NewApplicationInput,
    NewInternshipInput,
};
use super::store::{EngagementError, EngagementStore};
use crate::marketplace::identity::UserId;
use crate::marketplace::persistence::PersistenceAdapter;

/// Router exposing internship and application endpoints, mirroring the
/// remote-backend REST contract.
pub fn engagement_router<P>(store: Arc<EngagementStore<P>>) -> Router
where
    P: PersistenceAdapter + 'static,
{
    Router::new()
        .route(
            "/api/internships",
            get(list_internships_handler::<P>).post(create_internship_handler::<P>),
        )
        .route(
            "/api/internships/:internship_id",
            get(get_internship_handler::<P>)
                .put(update_internship_handler::<P>)
                .delete(delete_internship_handler::<P>),
        )
        .route(
            "/api/internships/:internship_id/selections",
            post(select_student_handler::<P>),
        )
        .route(
            "/api/internships/mentor/:mentor_id",
            get(internships_by_mentor_handler::<P>),
        )
        .route(
            "/api/applications",
            get(list_applications_handler::<P>).post(create_application_handler::<P>),
        )
        .route(
            "/api/applications/:application_id/status",
            put(update_application_status_handler::<P>),
        )
        .route(
            "/api/applications/student/:student_id",
            get(applications_by_student_handler::<P>),
        )
        .route(
            "/api/applications/internship/:internship_id",
            get(applications_by_internship_handler::<P>),
        )
        .with_state(store)
}

fn error_response(error: &EngagementError) -> Response {
    let status = match error {
        EngagementError::InternshipNotFound(_) | EngagementError::ApplicationNotFound(_) => {
            StatusCode::NOT_FOUND
        }
        EngagementError::DuplicateApplication { .. } => StatusCode::CONFLICT,
        EngagementError::CapacityExceeded { .. } | EngagementError::NotAnApplicant { .. } => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        EngagementError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}

pub(crate) async fn list_internships_handler<P>(
    State(store): State<Arc<EngagementStore<P>>>,
) -> Response
where
    P: PersistenceAdapter + 'static,
{
    (StatusCode::OK, axum::Json(store.internships())).into_response()
}

pub(crate) async fn create_internship_handler<P>(
    State(store): State<Arc<EngagementStore<P>>>,
    axum::Json(input): axum::Json<NewInternshipInput>,
) -> Response
where
    P: PersistenceAdapter + 'static,
{
    match store.add_internship(input) {
        Ok(internship) => (StatusCode::CREATED, axum::Json(internship)).into_response(),
        Err(error) => error_response(&error),
    }
}

pub(crate) async fn get_internship_handler<P>(
    State(store): State<Arc<EngagementStore<P>>>,
    Path(internship_id): Path<String>,
) -> Response
where
    P: PersistenceAdapter + 'static,
{
    match store.internship(&InternshipId(internship_id)) {
        Some(internship) => (StatusCode::OK, axum::Json(internship)).into_response(),
        None => {
            let payload = json!({ "error": "internship not found" });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn update_internship_handler<P>(
    State(store): State<Arc<EngagementStore<P>>>,
    Path(internship_id): Path<String>,
    axum::Json(patch): axum::Json<InternshipPatch>,
) -> Response
where
    P: PersistenceAdapter + 'static,
{
    match store.update_internship(&InternshipId(internship_id), patch) {
        Ok(internship) => (StatusCode::OK, axum::Json(internship)).into_response(),
        Err(error) => error_response(&error),
    }
}

pub(crate) async fn delete_internship_handler<P>(
    State(store): State<Arc<EngagementStore<P>>>,
    Path(internship_id): Path<String>,
) -> Response
where
    P: PersistenceAdapter + 'static,
{
    match store.delete_internship(&InternshipId(internship_id)) {
        Ok(()) => (StatusCode::NO_CONTENT, ()).into_response(),
        Err(error) => error_response(&error),
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct SelectStudentRequest {
    pub(crate) student_id: UserId,
}

pub(crate) async fn select_student_handler<P>(
    State(store): State<Arc<EngagementStore<P>>>,
    Path(internship_id): Path<String>,
    axum::Json(request): axum::Json<SelectStudentRequest>,
) -> Response
where
    P: PersistenceAdapter + 'static,
{
    match store.select_student(&InternshipId(internship_id), &request.student_id) {
        Ok(internship) => (StatusCode::OK, axum::Json(internship)).into_response(),
        Err(error) => error_response(&error),
    }
}

pub(crate) async fn internships_by_mentor_handler<P>(
    State(store): State<Arc<EngagementStore<P>>>,
    Path(mentor_id): Path<String>,
) -> Response
where
    P: PersistenceAdapter + 'static,
{
    let internships = store.internships_by_mentor(&UserId(mentor_id));
    (StatusCode::OK, axum::Json(internships)).into_response()
}

pub(crate) async fn list_applications_handler<P>(
    State(store): State<Arc<EngagementStore<P>>>,
) -> Response
where
    P: PersistenceAdapter + 'static,
{
    (StatusCode::OK, axum::Json(store.applications())).into_response()
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreateApplicationRequest {
    pub(crate) internship_id: InternshipId,
    pub(crate) student_id: UserId,
    pub(crate) student_name: String,
    pub(crate) cover_letter: String,
    #[serde(default)]
    pub(crate) resume: Option<String>,
}

pub(crate) async fn create_application_handler<P>(
    State(store): State<Arc<EngagementStore<P>>>,
    axum::Json(request): axum::Json<CreateApplicationRequest>,
) -> Response
where
    P: PersistenceAdapter + 'static,
{
    let CreateApplicationRequest {
        internship_id,
        student_id,
        student_name,
        cover_letter,
        resume,
    } = request;
    let input = NewApplicationInput {
        student_id,
        student_name,
        cover_letter,
        resume,
    };

    match store.apply_to_internship(&internship_id, input) {
        Ok(application) => (StatusCode::CREATED, axum::Json(application)).into_response(),
        Err(error) => error_response(&error),
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct UpdateStatusRequest {
    pub(crate) status: ApplicationStatus,
}

pub(crate) async fn update_application_status_handler<P>(
    State(store): State<Arc<EngagementStore<P>>>,
    Path(application_id): Path<String>,
    axum::Json(request): axum::Json<UpdateStatusRequest>,
) -> Response
where
    P: PersistenceAdapter + 'static,
{
    match store.update_application_status(&ApplicationId(application_id), request.status) {
        Ok(application) => (StatusCode::OK, axum::Json(application)).into_response(),
        Err(error) => error_response(&error),
    }
}

pub(crate) async fn applications_by_student_handler<P>(
    State(store): State<Arc<EngagementStore<P>>>,
    Path(student_id): Path<String>,
) -> Response
where
    P: PersistenceAdapter + 'static,
{
    let applications = store.applications_by_student(&UserId(student_id));
    (StatusCode::OK, axum::Json(applications)).into_response()
}

pub(crate) async fn applications_by_internship_handler<P>(
    State(store): State<Arc<EngagementStore<P>>>,
    Path(internship_id): Path<String>,
) -> Response
where
    P: PersistenceAdapter + 'static,
{
    let applications = store.applications_by_internship(&InternshipId(internship_id));
    (StatusCode::OK, axum::Json(applications)).into_response()
}
