//! Internship postings, student applications, and their cross-references.

pub mod domain;
pub mod router;
pub mod store;

#[cfg(test)]
mod tests;

pub use domain::{
    Application, ApplicationId, ApplicationStatus, Internship, InternshipId, InternshipPatch,
    InternshipStatus, NewApplicationInput, NewInternshipInput, WorkMode,
};
pub use router::engagement_router;
pub use store::{EngagementError, EngagementPolicy, EngagementStore};
