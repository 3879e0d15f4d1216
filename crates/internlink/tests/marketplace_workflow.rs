//! Integration specifications for the marketplace stores.
//!
//! Scenarios run end-to-end through the public store facades against shared
//! persistence backends, covering the register/login/apply/review flow and
//! the durability guarantees that must survive a reload.

mod common {
    use std::sync::Arc;

    use internlink::marketplace::{
        EngagementPolicy, EngagementStore, IdentityStore, MemoryAdapter, NewApplicationInput,
        NewUserInput, Role, UserId,
    };

    pub(super) fn open_stores() -> (
        IdentityStore<MemoryAdapter>,
        EngagementStore<MemoryAdapter>,
        Arc<MemoryAdapter>,
    ) {
        let adapter = Arc::new(MemoryAdapter::default());
        let identity = IdentityStore::open(adapter.clone()).expect("identity store opens");
        let engagement = EngagementStore::open(adapter.clone(), EngagementPolicy::default())
            .expect("engagement store opens");
        (identity, engagement, adapter)
    }

    pub(super) fn registration(email: &str, name: &str) -> NewUserInput {
        NewUserInput {
            email: email.to_string(),
            name: name.to_string(),
            role: Role::Student,
            password: "pw".to_string(),
            avatar: None,
            department: None,
            company: None,
            bio: None,
            skills: Vec::new(),
            experience: None,
        }
    }

    pub(super) fn application(student: &UserId, name: &str) -> NewApplicationInput {
        NewApplicationInput {
            student_id: student.clone(),
            student_name: name.to_string(),
            cover_letter: "I am a strong fit for this role.".to_string(),
            resume: None,
        }
    }
}

use std::sync::Arc;

use common::*;
use internlink::marketplace::{
    ApplicationStatus, EngagementPolicy, EngagementStore, IdentityStore, InternshipId,
    JsonFileAdapter, ProfilePatch,
};

#[test]
fn student_journey_from_registration_to_review() {
    let (identity, engagement, _adapter) = open_stores();

    let student = identity
        .register(registration("a@x.com", "A"))
        .expect("registration succeeds");

    let logged_in = identity
        .login("a@x.com", "pw")
        .expect("login succeeds");
    assert_eq!(logged_in.id, student.id);
    assert_eq!(logged_in.name, "A");

    let internship_id = InternshipId("1".to_string());
    engagement
        .apply_to_internship(&internship_id, application(&student.id, "A"))
        .expect("apply succeeds");

    let mine = engagement.applications_by_student(&student.id);
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].status, ApplicationStatus::Pending);

    // Mentor review: acceptance is visible on the next query but never
    // promotes the student into the selection.
    engagement
        .update_application_status(&mine[0].id, ApplicationStatus::Accepted)
        .expect("status update succeeds");

    let mine = engagement.applications_by_student(&student.id);
    assert_eq!(mine[0].status, ApplicationStatus::Accepted);

    let internship = engagement
        .internship(&internship_id)
        .expect("internship present");
    assert!(internship.selected_students.is_empty());

    engagement
        .select_student(&internship_id, &student.id)
        .expect("explicit selection succeeds");
    let internship = engagement
        .internship(&internship_id)
        .expect("internship present");
    assert_eq!(internship.selected_students, vec![student.id]);
}

#[test]
fn mentor_rename_does_not_rewrite_posted_snapshots() {
    let (identity, engagement, _adapter) = open_stores();

    let mentor = identity
        .users()
        .into_iter()
        .find(|u| u.email == "mentor@company.com")
        .expect("seeded mentor present");

    identity
        .update_profile(
            &mentor.id,
            ProfilePatch {
                name: Some("Sarah Johnson-Wright".to_string()),
                ..ProfilePatch::default()
            },
        )
        .expect("rename succeeds");

    // The denormalized name on existing postings is a point-in-time copy.
    for internship in engagement.internships_by_mentor(&mentor.id) {
        assert_eq!(internship.mentor_name, "Sarah Johnson");
    }
}

#[test]
fn marketplace_state_survives_reload_on_shared_files() {
    let dir = tempfile::tempdir().expect("temp dir");

    let (student_id, application_id) = {
        let adapter = Arc::new(JsonFileAdapter::new(dir.path()).expect("adapter opens"));
        let identity = IdentityStore::open(adapter.clone()).expect("identity store opens");
        let engagement = EngagementStore::open(adapter, EngagementPolicy::default())
            .expect("engagement store opens");

        let student = identity
            .register(registration("persist@x.com", "Persisted"))
            .expect("registration succeeds");
        identity.login("persist@x.com", "pw").expect("login succeeds");

        let application = engagement
            .apply_to_internship(
                &InternshipId("2".to_string()),
                application(&student.id, "Persisted"),
            )
            .expect("apply succeeds");
        (student.id, application.id)
    };

    // Fresh handles over the same data directory: everything reloads.
    let adapter = Arc::new(JsonFileAdapter::new(dir.path()).expect("adapter reopens"));
    let identity = IdentityStore::open(adapter.clone()).expect("identity store reopens");
    let engagement = EngagementStore::open(adapter, EngagementPolicy::default())
        .expect("engagement store reopens");

    assert_eq!(
        identity.session().map(|u| u.id),
        Some(student_id.clone()),
        "session snapshot survives reload"
    );

    let mine = engagement.applications_by_student(&student_id);
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].id, application_id);

    let internship = engagement
        .internship(&InternshipId("2".to_string()))
        .expect("internship present");
    assert!(internship.applicants.contains(&student_id));
}

#[test]
fn profile_update_survives_reload_for_session_user() {
    let dir = tempfile::tempdir().expect("temp dir");

    {
        let adapter = Arc::new(JsonFileAdapter::new(dir.path()).expect("adapter opens"));
        let identity = IdentityStore::open(adapter).expect("identity store opens");

        let user = identity
            .login("student@university.edu", "pw")
            .expect("login succeeds");
        identity
            .update_profile(
                &user.id,
                ProfilePatch {
                    name: Some("X".to_string()),
                    ..ProfilePatch::default()
                },
            )
            .expect("update succeeds");
        assert_eq!(identity.session().map(|u| u.name), Some("X".to_string()));
    }

    let adapter = Arc::new(JsonFileAdapter::new(dir.path()).expect("adapter reopens"));
    let identity = IdentityStore::open(adapter).expect("identity store reopens");
    assert_eq!(identity.session().map(|u| u.name), Some("X".to_string()));
    assert!(identity.users().iter().any(|u| u.name == "X"));
}

#[test]
fn cascade_delete_is_durable() {
    let dir = tempfile::tempdir().expect("temp dir");

    {
        let adapter = Arc::new(JsonFileAdapter::new(dir.path()).expect("adapter opens"));
        let engagement = EngagementStore::open(adapter, EngagementPolicy::default())
            .expect("engagement store opens");
        engagement
            .delete_internship(&InternshipId("1".to_string()))
            .expect("delete succeeds");
    }

    let adapter = Arc::new(JsonFileAdapter::new(dir.path()).expect("adapter reopens"));
    let engagement = EngagementStore::open(adapter, EngagementPolicy::default())
        .expect("engagement store reopens");

    assert!(engagement
        .internship(&InternshipId("1".to_string()))
        .is_none());
    assert!(engagement
        .applications_by_internship(&InternshipId("1".to_string()))
        .is_empty());
    assert_eq!(engagement.internships().len(), 1);
}
