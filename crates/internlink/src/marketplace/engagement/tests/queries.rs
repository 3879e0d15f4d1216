use super::common::*;
use crate::marketplace::engagement::domain::{ApplicationStatus, InternshipId};
use crate::marketplace::identity::UserId;

#[test]
fn internships_by_mentor_filters_ownership() {
    let (store, _adapter) = open_store();

    store
        .add_internship(posting_input("5", "Dana Flores"))
        .expect("posting succeeds");

    let sarah = store.internships_by_mentor(&UserId("2".to_string()));
    assert_eq!(sarah.len(), 2);
    assert!(sarah.iter().all(|i| i.mentor_id == UserId("2".to_string())));

    let dana = store.internships_by_mentor(&UserId("5".to_string()));
    assert_eq!(dana.len(), 1);

    assert!(store
        .internships_by_mentor(&UserId("9".to_string()))
        .is_empty());
}

#[test]
fn applications_by_student_reflects_latest_mutation() {
    let (store, _adapter) = open_store();
    let student = UserId("3".to_string());

    let mine = store.applications_by_student(&student);
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].status, ApplicationStatus::Pending);

    store
        .update_application_status(&mine[0].id, ApplicationStatus::Accepted)
        .expect("update succeeds");

    // No caching layer: the next read sees the new status.
    let mine = store.applications_by_student(&student);
    assert_eq!(mine[0].status, ApplicationStatus::Accepted);
}

#[test]
fn applications_by_internship_scopes_to_one_posting() {
    let (store, _adapter) = open_store();

    store
        .apply_to_internship(
            &InternshipId("2".to_string()),
            application_input("3", "Alex Chen"),
        )
        .expect("apply succeeds");
    store
        .apply_to_internship(
            &InternshipId("2".to_string()),
            application_input("4", "Riley Park"),
        )
        .expect("apply succeeds");

    assert_eq!(
        store
            .applications_by_internship(&InternshipId("1".to_string()))
            .len(),
        1
    );
    assert_eq!(
        store
            .applications_by_internship(&InternshipId("2".to_string()))
            .len(),
        2
    );
    assert!(store
        .applications_by_internship(&InternshipId("99".to_string()))
        .is_empty());
}
