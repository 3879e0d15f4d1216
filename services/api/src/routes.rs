use crate::infra::AppState;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json, Router};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use internlink::marketplace::{
    admin_overview, company_rollup, department_rollup, engagement_router, identity_router,
    mentor_overview, student_overview, AdminOverview, CompanyCount, DepartmentCount,
    EngagementStore, IdentityStore, MentorOverview, PersistenceAdapter, StudentOverview, UserId,
};

/// Compose the marketplace resource routers with the dashboard and
/// operational endpoints.
pub(crate) fn marketplace_routes<P>(
    identity: Arc<IdentityStore<P>>,
    engagement: Arc<EngagementStore<P>>,
) -> Router
where
    P: PersistenceAdapter + 'static,
{
    identity_router(identity.clone())
        .merge(engagement_router(engagement.clone()))
        .merge(dashboard_router(DashboardState {
            identity,
            engagement,
        }))
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) struct DashboardState<P> {
    pub(crate) identity: Arc<IdentityStore<P>>,
    pub(crate) engagement: Arc<EngagementStore<P>>,
}

impl<P> Clone for DashboardState<P> {
    fn clone(&self) -> Self {
        Self {
            identity: self.identity.clone(),
            engagement: self.engagement.clone(),
        }
    }
}

fn dashboard_router<P>(state: DashboardState<P>) -> Router
where
    P: PersistenceAdapter + 'static,
{
    Router::new()
        .route("/api/dashboard/admin", get(admin_dashboard_endpoint::<P>))
        .route(
            "/api/dashboard/mentor/:mentor_id",
            get(mentor_dashboard_endpoint::<P>),
        )
        .route(
            "/api/dashboard/student/:student_id",
            get(student_dashboard_endpoint::<P>),
        )
        .with_state(state)
}

#[derive(Debug, Serialize)]
pub(crate) struct AdminDashboardResponse {
    pub(crate) overview: AdminOverview,
    pub(crate) departments: Vec<DepartmentCount>,
    pub(crate) companies: Vec<CompanyCount>,
}

pub(crate) async fn admin_dashboard_endpoint<P>(
    State(state): State<DashboardState<P>>,
) -> Json<AdminDashboardResponse>
where
    P: PersistenceAdapter + 'static,
{
    let users = state.identity.users();
    let internships = state.engagement.internships();
    let applications = state.engagement.applications();

    Json(AdminDashboardResponse {
        overview: admin_overview(&users, &internships, &applications),
        departments: department_rollup(&users),
        companies: company_rollup(&internships),
    })
}

#[derive(Debug, Serialize)]
pub(crate) struct MentorDashboardResponse {
    pub(crate) overview: MentorOverview,
}

pub(crate) async fn mentor_dashboard_endpoint<P>(
    State(state): State<DashboardState<P>>,
    Path(mentor_id): Path<String>,
) -> Json<MentorDashboardResponse>
where
    P: PersistenceAdapter + 'static,
{
    let internships = state.engagement.internships();
    let applications = state.engagement.applications();

    Json(MentorDashboardResponse {
        overview: mentor_overview(&UserId(mentor_id), &internships, &applications),
    })
}

#[derive(Debug, Serialize)]
pub(crate) struct StudentDashboardResponse {
    pub(crate) overview: StudentOverview,
}

pub(crate) async fn student_dashboard_endpoint<P>(
    State(state): State<DashboardState<P>>,
    Path(student_id): Path<String>,
) -> Json<StudentDashboardResponse>
where
    P: PersistenceAdapter + 'static,
{
    let internships = state.engagement.internships();
    let applications = state.engagement.applications();

    Json(StudentDashboardResponse {
        overview: student_overview(&UserId(student_id), &internships, &applications),
    })
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use internlink::marketplace::{EngagementPolicy, MemoryAdapter};

    fn dashboard_state() -> DashboardState<MemoryAdapter> {
        let adapter = Arc::new(MemoryAdapter::default());
        let identity = Arc::new(IdentityStore::open(adapter.clone()).expect("identity opens"));
        let engagement = Arc::new(
            EngagementStore::open(adapter, EngagementPolicy::default())
                .expect("engagement opens"),
        );
        DashboardState {
            identity,
            engagement,
        }
    }

    #[tokio::test]
    async fn admin_dashboard_reflects_seeded_collections() {
        let Json(body) = admin_dashboard_endpoint(State(dashboard_state())).await;

        assert_eq!(body.overview.total_users, 3);
        assert_eq!(body.overview.total_students, 1);
        assert_eq!(body.overview.total_mentors, 1);
        assert_eq!(body.overview.total_internships, 2);
        assert_eq!(body.overview.active_internships, 2);
        assert_eq!(body.overview.pending_applications, 1);
        assert_eq!(body.companies.len(), 2);
    }

    #[tokio::test]
    async fn mentor_dashboard_scopes_to_the_mentor() {
        let Json(body) = mentor_dashboard_endpoint(
            State(dashboard_state()),
            Path("2".to_string()),
        )
        .await;

        assert_eq!(body.overview.total_postings, 2);
        assert_eq!(body.overview.applications_received, 1);
        assert_eq!(body.overview.students_selected, 0);
    }

    #[tokio::test]
    async fn student_dashboard_counts_own_applications() {
        let Json(body) = student_dashboard_endpoint(
            State(dashboard_state()),
            Path("3".to_string()),
        )
        .await;

        assert_eq!(body.overview.open_internships, 2);
        assert_eq!(body.overview.applications_submitted, 1);
        assert_eq!(body.overview.applications_accepted, 0);
    }
}
