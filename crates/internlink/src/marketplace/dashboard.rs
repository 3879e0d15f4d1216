//! Derived dashboard aggregation.
//!
//! Pure functions over collection snapshots, recomputed on every call and
//! never persisted. Each view is consistent with the snapshot it was computed
//! from and nothing else.

use std::collections::BTreeMap;

use serde::Serialize;

use super::engagement::{Application, ApplicationStatus, Internship, InternshipStatus};
use super::identity::{Role, User, UserId};

/// Platform-wide counters for the admin dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminOverview {
    pub total_users: usize,
    pub total_students: usize,
    pub total_mentors: usize,
    pub total_internships: usize,
    pub active_internships: usize,
    pub total_applications: usize,
    pub pending_applications: usize,
}

pub fn admin_overview(
    users: &[User],
    internships: &[Internship],
    applications: &[Application],
) -> AdminOverview {
    AdminOverview {
        total_users: users.len(),
        total_students: users.iter().filter(|u| u.role == Role::Student).count(),
        total_mentors: users.iter().filter(|u| u.role == Role::Mentor).count(),
        total_internships: internships.len(),
        active_internships: internships
            .iter()
            .filter(|i| i.status == InternshipStatus::Active)
            .count(),
        total_applications: applications.len(),
        pending_applications: applications
            .iter()
            .filter(|a| a.status == ApplicationStatus::Pending)
            .count(),
    }
}

/// Per-mentor posting and pipeline counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MentorOverview {
    pub total_postings: usize,
    pub active_postings: usize,
    pub applications_received: usize,
    pub students_selected: usize,
}

pub fn mentor_overview(
    mentor_id: &UserId,
    internships: &[Internship],
    applications: &[Application],
) -> MentorOverview {
    let postings: Vec<&Internship> = internships
        .iter()
        .filter(|i| &i.mentor_id == mentor_id)
        .collect();

    let applications_received = applications
        .iter()
        .filter(|a| postings.iter().any(|i| i.id == a.internship_id))
        .count();
    let students_selected = postings.iter().map(|i| i.selected_students.len()).sum();

    MentorOverview {
        total_postings: postings.len(),
        active_postings: postings
            .iter()
            .filter(|i| i.status == InternshipStatus::Active)
            .count(),
        applications_received,
        students_selected,
    }
}

/// Per-student marketplace counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudentOverview {
    pub open_internships: usize,
    pub applications_submitted: usize,
    pub applications_accepted: usize,
}

pub fn student_overview(
    student_id: &UserId,
    internships: &[Internship],
    applications: &[Application],
) -> StudentOverview {
    let mine: Vec<&Application> = applications
        .iter()
        .filter(|a| &a.student_id == student_id)
        .collect();

    StudentOverview {
        open_internships: internships
            .iter()
            .filter(|i| i.status == InternshipStatus::Active)
            .count(),
        applications_submitted: mine.len(),
        applications_accepted: mine
            .iter()
            .filter(|a| a.status == ApplicationStatus::Accepted)
            .count(),
    }
}

/// Users per department. Users without a department are skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DepartmentCount {
    pub department: String,
    pub users: usize,
}

pub fn department_rollup(users: &[User]) -> Vec<DepartmentCount> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for user in users {
        if let Some(department) = user.department.as_deref() {
            *counts.entry(department).or_default() += 1;
        }
    }

    counts
        .into_iter()
        .map(|(department, users)| DepartmentCount {
            department: department.to_string(),
            users,
        })
        .collect()
}

/// Postings per company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompanyCount {
    pub company: String,
    pub postings: usize,
    pub active_postings: usize,
}

pub fn company_rollup(internships: &[Internship]) -> Vec<CompanyCount> {
    let mut counts: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
    for internship in internships {
        let entry = counts.entry(internship.company.as_str()).or_default();
        entry.0 += 1;
        if internship.status == InternshipStatus::Active {
            entry.1 += 1;
        }
    }

    counts
        .into_iter()
        .map(|(company, (postings, active_postings))| CompanyCount {
            company: company.to_string(),
            postings,
            active_postings,
        })
        .collect()
}
