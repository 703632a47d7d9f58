//! Priority-ordered seat allocation.
//!
//! A run takes a full [`Roster`] snapshot by value and returns a new one. The engine keeps
//! no state between runs; [`AllocationService`] adds the single-writer discipline needed
//! when a roster is shared between callers.

pub mod domain;
pub mod engine;
pub mod import;
pub mod report;
pub mod repository;
pub mod router;
mod sample;
pub mod service;
pub mod validation;

#[cfg(test)]
mod tests;

pub use domain::{
    AllocationStats, Applicant, ApplicantId, ApplicantRecord, ApplicantStatus, Credential,
    Facility, FacilityId, Placement, Roster,
};
pub use engine::{
    compute_stats, AllocationConfig, AllocationEngine, AllocationOutcome, SeatDecision,
    SeatOutcome, TieBreak,
};
pub use import::{RosterImportError, RosterImporter};
pub use report::{AllocationSummary, ApplicantOutcomeView, FacilityFillView, StatusBreakdown};
pub use repository::{RepositoryError, RosterRepository};
pub use router::{allocation_router, PreferenceSubmission};
pub use service::{
    AllocationRunRecord, AllocationService, AllocationServiceError, PreferenceError,
    PreferencePolicy, RunId,
};
pub use validation::{validate_roster, ValidationError};
