use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::marketplace::identity::domain::{NewUserInput, Role};
use crate::marketplace::identity::store::IdentityStore;
use crate::marketplace::persistence::{MemoryAdapter, PersistenceAdapter, StorageError};

/// Open a seeded store over a fresh in-memory adapter, returning both so
/// tests can reopen against the same backend.
pub(super) fn open_store() -> (IdentityStore<MemoryAdapter>, Arc<MemoryAdapter>) {
    let adapter = Arc::new(MemoryAdapter::default());
    let store = IdentityStore::open(adapter.clone()).expect("store opens");
    (store, adapter)
}

pub(super) fn student_input(email: &str) -> NewUserInput {
    NewUserInput {
        email: email.to_string(),
        name: "Jordan Lee".to_string(),
        role: Role::Student,
        password: "hunter2".to_string(),
        avatar: None,
        department: Some("Computer Science".to_string()),
        company: None,
        bio: None,
        skills: vec!["Rust".to_string(), "SQL".to_string()],
        experience: None,
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
