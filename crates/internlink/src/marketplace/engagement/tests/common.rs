use std::sync::Arc;

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::marketplace::engagement::domain::{
    InternshipStatus, NewApplicationInput, NewInternshipInput, WorkMode,
};
use crate::marketplace::engagement::store::{EngagementPolicy, EngagementStore};
use crate::marketplace::identity::UserId;
use crate::marketplace::persistence::{MemoryAdapter, PersistenceAdapter, StorageError};

/// Open a seeded store with the faithful default policy.
pub(super) fn open_store() -> (EngagementStore<MemoryAdapter>, Arc<MemoryAdapter>) {
    open_store_with(EngagementPolicy::default())
}

pub(super) fn open_store_with(
    policy: EngagementPolicy,
) -> (EngagementStore<MemoryAdapter>, Arc<MemoryAdapter>) {
    let adapter = Arc::new(MemoryAdapter::default());
    let store = EngagementStore::open(adapter.clone(), policy).expect("store opens");
    (store, adapter)
}

pub(super) fn posting_input(mentor_id: &str, mentor_name: &str) -> NewInternshipInput {
    NewInternshipInput {
        title: "Backend Developer Intern".to_string(),
        company: "Tech Solutions Inc.".to_string(),
        description: "Build and operate the services behind the marketplace.".to_string(),
        requirements: vec!["Rust".to_string(), "SQL".to_string()],
        duration: "6 months".to_string(),
        location: "Remote".to_string(),
        work_mode: WorkMode::Remote,
        mentor_id: UserId(mentor_id.to_string()),
        mentor_name: mentor_name.to_string(),
        deadline: NaiveDate::from_ymd_opt(2024, 3, 1).expect("valid date"),
        status: InternshipStatus::Active,
        max_students: 2,
        tags: vec!["Backend".to_string(), "Rust".to_string()],
        salary: Some("$2200/month".to_string()),
    }
}

pub(super) fn application_input(student_id: &str, student_name: &str) -> NewApplicationInput {
    NewApplicationInput {
        student_id: UserId(student_id.to_string()),
        student_name: student_name.to_string(),
        cover_letter: "I would like to join this internship.".to_string(),
        resume: None,
    }
}

/// Adapter whose writes always fail, for exercising the no-partial-mutation
/// guarantee.
pub(super) struct UnavailableAdapter;

impl PersistenceAdapter for UnavailableAdapter {
    fn load(&self, _key: &str) -> Result<Option<Value>, StorageError> {
        Ok(None)
    }

    fn save(&self, _key: &str, _value: &Value) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("storage offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
