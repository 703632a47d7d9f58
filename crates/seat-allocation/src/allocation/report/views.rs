use serde::Serialize;

use super::super::domain::{AllocationStats, ApplicantId, ApplicantStatus, FacilityId};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FacilityFillView {
    pub id: FacilityId,
    pub name: String,
    pub location: String,
    pub capacity: u32,
    pub allocated: u32,
    pub remaining: u32,
    pub utilization: f64,
    pub is_full: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusBreakdown {
    pub pending: usize,
    pub submitted: usize,
    pub allocated: usize,
    pub unallocated: usize,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllocationSummary {
    pub total_capacity: u64,
    pub stats: AllocationStats,
    pub status_breakdown: StatusBreakdown,
    pub facilities: Vec<FacilityFillView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacilityRef {
    pub id: FacilityId,
    pub name: String,
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplicantOutcomeView {
    pub applicant_id: ApplicantId,
    pub name: String,
    pub priority_rank: i64,
    pub status: ApplicantStatus,
    pub status_label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facility: Option<FacilityRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preference_rank: Option<usize>,
}
