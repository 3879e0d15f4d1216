//! Marketplace core: identity and engagement stores, durable persistence,
//! and derived dashboard aggregation.

pub mod dashboard;
pub mod engagement;
pub mod identity;
pub mod persistence;
pub(crate) mod seed;

pub use dashboard::{
    admin_overview, company_rollup, department_rollup, mentor_overview, student_overview,
    AdminOverview, CompanyCount, DepartmentCount, MentorOverview, StudentOverview,
};
pub use engagement::{
    engagement_router, Application, ApplicationId, ApplicationStatus, EngagementError,
    EngagementPolicy, EngagementStore, Internship, InternshipId, InternshipPatch,
    InternshipStatus, NewApplicationInput, NewInternshipInput, WorkMode,
};
pub use identity::{
    identity_router, IdentityError, IdentityStore, NewUserInput, ProfilePatch, Role, User, UserId,
};
pub use persistence::{JsonFileAdapter, MemoryAdapter, PersistenceAdapter, StorageError};
