use std::sync::{Arc, Mutex};

use chrono::Local;
use tracing::info;

use super::domain::{
    Application, ApplicationId, ApplicationStatus, Internship, InternshipId, InternshipPatch,
    NewApplicationInput, NewInternshipInput,
};
use crate::marketplace::identity::store::next_numeric_id;
use crate::marketplace::identity::UserId;
use crate::marketplace::persistence::{
    keys, read_snapshot, write_snapshot, PersistenceAdapter, StorageError,
};
use crate::marketplace::seed;

/// Behavior switches for rules the marketplace historically left unenforced.
/// Defaults reproduce the historical behavior; flipping a switch opts into
/// the hardened rule.
#[derive(Debug, Clone, Copy)]
pub struct EngagementPolicy {
    /// Cap `selected_students` at `max_students` per posting.
    pub strict_capacity: bool,
    /// Permit a student to file more than one application for the same
    /// posting.
    pub allow_duplicate_applications: bool,
}

impl Default for EngagementPolicy {
    fn default() -> Self {
        Self {
            strict_capacity: false,
            allow_duplicate_applications: true,
        }
    }
}

/// Owns the `Internship` and `Application` collections and their
/// cross-references. Every mutation persists the affected collections before
/// the in-memory commit, so a storage failure leaves observable state
/// untouched.
pub struct EngagementStore<P> {
    adapter: Arc<P>,
    policy: EngagementPolicy,
    state: Mutex<EngagementState>,
}

struct EngagementState {
    internships: Vec<Internship>,
    applications: Vec<Application>,
    next_internship_id: u64,
    next_application_id: u64,
}

/// Error raised by engagement operations.
#[derive(Debug, thiserror::Error)]
pub enum EngagementError {
    #[error("internship '{0}' does not exist")]
    InternshipNotFound(InternshipId),
    #[error("application '{0}' does not exist")]
    ApplicationNotFound(ApplicationId),
    #[error("student '{student}' already applied to internship '{internship}'")]
    DuplicateApplication {
        internship: InternshipId,
        student: UserId,
    },
    #[error("internship '{internship}' already has its {max_students} students selected")]
    CapacityExceeded {
        internship: InternshipId,
        max_students: u32,
    },
    #[error("student '{student}' has not applied to internship '{internship}'")]
    NotAnApplicant {
        internship: InternshipId,
        student: UserId,
    },
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl<P> EngagementStore<P>
where
    P: PersistenceAdapter,
{
    /// Open the store against `adapter`, loading persisted collections or
    /// falling back to the built-in seed dataset on first run.
    pub fn open(adapter: Arc<P>, policy: EngagementPolicy) -> Result<Self, StorageError> {
        let internships: Vec<Internship> = match read_snapshot(adapter.as_ref(), keys::INTERNSHIPS)?
        {
            Some(internships) => internships,
            None => seed::internships(),
        };
        let applications: Vec<Application> =
            match read_snapshot(adapter.as_ref(), keys::APPLICATIONS)? {
                Some(applications) => applications,
                None => seed::applications(),
            };

        let next_internship_id = next_numeric_id(internships.iter().map(|i| i.id.0.as_str()));
        let next_application_id = next_numeric_id(applications.iter().map(|a| a.id.0.as_str()));

        Ok(Self {
            adapter,
            policy,
            state: Mutex::new(EngagementState {
                internships,
                applications,
                next_internship_id,
                next_application_id,
            }),
        })
    }

    /// Post a new internship. The store stamps the id, today's posting date,
    /// and empty applicant/selection lists; everything else, including the
    /// denormalized mentor name, comes from the caller.
    pub fn add_internship(&self, input: NewInternshipInput) -> Result<Internship, EngagementError> {
        let mut state = self.state.lock().expect("engagement store mutex poisoned");

        let NewInternshipInput {
            title,
            company,
            description,
            requirements,
            duration,
            location,
            work_mode,
            mentor_id,
            mentor_name,
            deadline,
            status,
            max_students,
            tags,
            salary,
        } = input;

        let internship = Internship {
            id: InternshipId(state.next_internship_id.to_string()),
            title,
            company,
            description,
            requirements,
            duration,
            location,
            work_mode,
            mentor_id,
            mentor_name,
            posted_date: Local::now().date_naive(),
            deadline,
            status,
            applicants: Vec::new(),
            selected_students: Vec::new(),
            max_students,
            tags,
            salary,
        };

        let mut internships = state.internships.clone();
        internships.push(internship.clone());
        write_snapshot(self.adapter.as_ref(), keys::INTERNSHIPS, &internships)?;

        state.internships = internships;
        state.next_internship_id += 1;
        info!(internship = %internship.id, mentor = %internship.mentor_id, "posted internship");
        Ok(internship)
    }

    /// Merge-patch a posting's content fields. Status may move to any other
    /// status.
    pub fn update_internship(
        &self,
        internship_id: &InternshipId,
        patch: InternshipPatch,
    ) -> Result<Internship, EngagementError> {
        let mut state = self.state.lock().expect("engagement store mutex poisoned");

        let mut internships = state.internships.clone();
        let internship = internships
            .iter_mut()
            .find(|internship| &internship.id == internship_id)
            .ok_or_else(|| EngagementError::InternshipNotFound(internship_id.clone()))?;
        internship.apply_patch(patch);
        let updated = internship.clone();

        write_snapshot(self.adapter.as_ref(), keys::INTERNSHIPS, &internships)?;
        state.internships = internships;
        Ok(updated)
    }

    /// Remove a posting and every application referencing it. Both collection
    /// snapshots go out in the same persisted write, so no application can
    /// survive its internship.
    pub fn delete_internship(&self, internship_id: &InternshipId) -> Result<(), EngagementError> {
        let mut state = self.state.lock().expect("engagement store mutex poisoned");

        if !state
            .internships
            .iter()
            .any(|internship| &internship.id == internship_id)
        {
            return Err(EngagementError::InternshipNotFound(internship_id.clone()));
        }

        let internships: Vec<Internship> = state
            .internships
            .iter()
            .filter(|internship| &internship.id != internship_id)
            .cloned()
            .collect();
        let applications: Vec<Application> = state
            .applications
            .iter()
            .filter(|application| &application.internship_id != internship_id)
            .cloned()
            .collect();

        write_snapshot(self.adapter.as_ref(), keys::INTERNSHIPS, &internships)?;
        write_snapshot(self.adapter.as_ref(), keys::APPLICATIONS, &applications)?;

        state.internships = internships;
        state.applications = applications;
        info!(internship = %internship_id, "deleted internship and its applications");
        Ok(())
    }

    /// File an application for `internship_id`. Stamps the id, today's date,
    /// and the initial pending status, and inserts the student into the
    /// posting's applicant set in the same persisted write.
    pub fn apply_to_internship(
        &self,
        internship_id: &InternshipId,
        input: NewApplicationInput,
    ) -> Result<Application, EngagementError> {
        let mut state = self.state.lock().expect("engagement store mutex poisoned");

        if !state
            .internships
            .iter()
            .any(|internship| &internship.id == internship_id)
        {
            return Err(EngagementError::InternshipNotFound(internship_id.clone()));
        }

        if !self.policy.allow_duplicate_applications
            && state.applications.iter().any(|application| {
                &application.internship_id == internship_id
                    && application.student_id == input.student_id
            })
        {
            return Err(EngagementError::DuplicateApplication {
                internship: internship_id.clone(),
                student: input.student_id,
            });
        }

        let NewApplicationInput {
            student_id,
            student_name,
            cover_letter,
            resume,
        } = input;

        let application = Application {
            id: ApplicationId(state.next_application_id.to_string()),
            internship_id: internship_id.clone(),
            student_id,
            student_name,
            applied_date: Local::now().date_naive(),
            status: ApplicationStatus::Pending,
            cover_letter,
            resume,
        };

        let mut internships = state.internships.clone();
        if let Some(internship) = internships
            .iter_mut()
            .find(|internship| &internship.id == internship_id)
        {
            if !internship.applicants.contains(&application.student_id) {
                internship.applicants.push(application.student_id.clone());
            }
        }
        let mut applications = state.applications.clone();
        applications.push(application.clone());

        write_snapshot(self.adapter.as_ref(), keys::INTERNSHIPS, &internships)?;
        write_snapshot(self.adapter.as_ref(), keys::APPLICATIONS, &applications)?;

        state.internships = internships;
        state.applications = applications;
        state.next_application_id += 1;
        info!(
            application = %application.id,
            internship = %internship_id,
            student = %application.student_id,
            "filed application"
        );
        Ok(application)
    }

    /// Set an application's status. All transitions are legal; accepting an
    /// application never selects the student (selection is a separate step).
    pub fn update_application_status(
        &self,
        application_id: &ApplicationId,
        status: ApplicationStatus,
    ) -> Result<Application, EngagementError> {
        let mut state = self.state.lock().expect("engagement store mutex poisoned");

        let mut applications = state.applications.clone();
        let application = applications
            .iter_mut()
            .find(|application| &application.id == application_id)
            .ok_or_else(|| EngagementError::ApplicationNotFound(application_id.clone()))?;
        application.status = status;
        let updated = application.clone();

        write_snapshot(self.adapter.as_ref(), keys::APPLICATIONS, &applications)?;
        state.applications = applications;
        Ok(updated)
    }

    /// Add a student to a posting's selection. The student must already be an
    /// applicant; with `strict_capacity` the selection is also bounded by
    /// `max_students`.
    pub fn select_student(
        &self,
        internship_id: &InternshipId,
        student_id: &UserId,
    ) -> Result<Internship, EngagementError> {
        let mut state = self.state.lock().expect("engagement store mutex poisoned");

        let mut internships = state.internships.clone();
        let internship = internships
            .iter_mut()
            .find(|internship| &internship.id == internship_id)
            .ok_or_else(|| EngagementError::InternshipNotFound(internship_id.clone()))?;

        if !internship.applicants.contains(student_id) {
            return Err(EngagementError::NotAnApplicant {
                internship: internship_id.clone(),
                student: student_id.clone(),
            });
        }
        if !internship.selected_students.contains(student_id) {
            if self.policy.strict_capacity
                && internship.selected_students.len() as u32 >= internship.max_students
            {
                return Err(EngagementError::CapacityExceeded {
                    internship: internship_id.clone(),
                    max_students: internship.max_students,
                });
            }
            internship.selected_students.push(student_id.clone());
        }
        let updated = internship.clone();

        write_snapshot(self.adapter.as_ref(), keys::INTERNSHIPS, &internships)?;
        state.internships = internships;
        Ok(updated)
    }

    /// Snapshot of the full internship collection.
    pub fn internships(&self) -> Vec<Internship> {
        let state = self.state.lock().expect("engagement store mutex poisoned");
        state.internships.clone()
    }

    /// Snapshot of the full application collection.
    pub fn applications(&self) -> Vec<Application> {
        let state = self.state.lock().expect("engagement store mutex poisoned");
        state.applications.clone()
    }

    /// Look up a single posting by id.
    pub fn internship(&self, internship_id: &InternshipId) -> Option<Internship> {
        let state = self.state.lock().expect("engagement store mutex poisoned");
        state
            .internships
            .iter()
            .find(|internship| &internship.id == internship_id)
            .cloned()
    }

    /// Postings owned by `mentor_id`, computed over the live collection.
    pub fn internships_by_mentor(&self, mentor_id: &UserId) -> Vec<Internship> {
        let state = self.state.lock().expect("engagement store mutex poisoned");
        state
            .internships
            .iter()
            .filter(|internship| &internship.mentor_id == mentor_id)
            .cloned()
            .collect()
    }

    /// Applications filed by `student_id`, computed over the live collection.
    pub fn applications_by_student(&self, student_id: &UserId) -> Vec<Application> {
        let state = self.state.lock().expect("engagement store mutex poisoned");
        state
            .applications
            .iter()
            .filter(|application| &application.student_id == student_id)
            .cloned()
            .collect()
    }

    /// Applications received by `internship_id`, computed over the live
    /// collection.
    pub fn applications_by_internship(&self, internship_id: &InternshipId) -> Vec<Application> {
        let state = self.state.lock().expect("engagement store mutex poisoned");
        state
            .applications
            .iter()
            .filter(|application| &application.internship_id == internship_id)
            .cloned()
            .collect()
    }
}
