mod summary;
pub mod views;

pub use views::{
    AllocationSummary, ApplicantOutcomeView, FacilityFillView, FacilityRef, StatusBreakdown,
};
