use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::marketplace::identity::UserId;

/// Identifier wrapper for internship postings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InternshipId(pub String);

impl fmt::Display for InternshipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier wrapper for submitted applications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicationId(pub String);

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Where the internship work happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkMode {
    Remote,
    Onsite,
    Hybrid,
}

impl WorkMode {
    pub const fn label(self) -> &'static str {
        match self {
            WorkMode::Remote => "remote",
            WorkMode::Onsite => "onsite",
            WorkMode::Hybrid => "hybrid",
        }
    }
}

/// Lifecycle of a posting. Any status may move to any other; there is no
/// transition graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InternshipStatus {
    Draft,
    Active,
    Closed,
}

impl InternshipStatus {
    pub const fn label(self) -> &'static str {
        match self {
            InternshipStatus::Draft => "draft",
            InternshipStatus::Active => "active",
            InternshipStatus::Closed => "closed",
        }
    }
}

/// Review state of an application. Transitions are unconstrained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Interview,
    Accepted,
    Rejected,
}

impl ApplicationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Interview => "interview",
            ApplicationStatus::Accepted => "accepted",
            ApplicationStatus::Rejected => "rejected",
        }
    }
}

/// An internship posting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Internship {
    pub id: InternshipId,
    pub title: String,
    pub company: String,
    pub description: String,
    pub requirements: Vec<String>,
    pub duration: String,
    pub location: String,
    #[serde(rename = "type")]
    pub work_mode: WorkMode,
    pub mentor_id: UserId,
    /// Mentor display name captured at posting time; not re-synced when the
    /// mentor later renames their profile.
    pub mentor_name: String,
    pub posted_date: NaiveDate,
    pub deadline: NaiveDate,
    pub status: InternshipStatus,
    /// Student ids with a live application for this posting. Set semantics,
    /// insertion ordered.
    #[serde(default)]
    pub applicants: Vec<UserId>,
    /// Students chosen for the posting; always a subset of `applicants`.
    #[serde(default)]
    pub selected_students: Vec<UserId>,
    pub max_students: u32,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<String>,
}

/// A student's bid for one internship.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub id: ApplicationId,
    pub internship_id: InternshipId,
    pub student_id: UserId,
    /// Student display name captured at apply time; a point-in-time copy like
    /// [`Internship::mentor_name`].
    pub student_name: String,
    pub applied_date: NaiveDate,
    pub status: ApplicationStatus,
    pub cover_letter: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume: Option<String>,
}

/// Payload for posting a new internship. The mentor id and display name are
/// supplied by the caller; the store never derives the denormalized name.
#[derive(Debug, Clone, Deserialize)]
pub struct NewInternshipInput {
    pub title: String,
    pub company: String,
    pub description: String,
    #[serde(default)]
    pub requirements: Vec<String>,
    pub duration: String,
    pub location: String,
    #[serde(rename = "type")]
    pub work_mode: WorkMode,
    pub mentor_id: UserId,
    pub mentor_name: String,
    pub deadline: NaiveDate,
    pub status: InternshipStatus,
    pub max_students: u32,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub salary: Option<String>,
}

/// Partial update of a posting's content fields. Absent fields are left
/// untouched. `applicants` and `selected_students` are not patchable; they
/// move only through the apply and select operations.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InternshipPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub requirements: Option<Vec<String>>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default, rename = "type")]
    pub work_mode: Option<WorkMode>,
    #[serde(default)]
    pub deadline: Option<NaiveDate>,
    #[serde(default)]
    pub status: Option<InternshipStatus>,
    #[serde(default)]
    pub max_students: Option<u32>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub salary: Option<String>,
}

/// Payload for applying to an internship. The target posting id is passed to
/// the operation itself; id, date, and the initial pending status are stamped
/// by the store.
#[derive(Debug, Clone, Deserialize)]
pub struct NewApplicationInput {
    pub student_id: UserId,
    pub student_name: String,
    pub cover_letter: String,
    #[serde(default)]
    pub resume: Option<String>,
}

impl Internship {
    /// Merge `patch` into the posting, keeping any field the patch omits.
    pub(crate) fn apply_patch(&mut self, patch: InternshipPatch) {
        let InternshipPatch {
            title,
            company,
            description,
            requirements,
            duration,
            location,
            work_mode,
            deadline,
            status,
            max_students,
            tags,
            salary,
        } = patch;

        if let Some(title) = title {
            self.title = title;
        }
        if let Some(company) = company {
            self.company = company;
        }
        if let Some(description) = description {
            self.description = description;
        }
        if let Some(requirements) = requirements {
            self.requirements = requirements;
        }
        if let Some(duration) = duration {
            self.duration = duration;
        }
        if let Some(location) = location {
            self.location = location;
        }
        if let Some(work_mode) = work_mode {
            self.work_mode = work_mode;
        }
        if let Some(deadline) = deadline {
            self.deadline = deadline;
        }
        if let Some(status) = status {
            self.status = status;
        }
        if let Some(max_students) = max_students {
            self.max_students = max_students;
        }
        if let Some(tags) = tags {
            self.tags = tags;
        }
        if let Some(salary) = salary {
            self.salary = Some(salary);
        }
    }
}
