use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::validation::ValidationError;

/// Identifier wrapper for seat pools.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FacilityId(pub String);

impl FacilityId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FacilityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier wrapper for applicants.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicantId(pub String);

impl ApplicantId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ApplicantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A physical seat pool with a hard ceiling on simultaneous assignments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Facility {
    pub id: FacilityId,
    pub name: String,
    pub location: String,
    pub capacity: u32,
    #[serde(default, alias = "allocated")]
    pub allocated_count: u32,
}

impl Facility {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        location: impl Into<String>,
        capacity: u32,
    ) -> Self {
        Self {
            id: FacilityId::new(id),
            name: name.into(),
            location: location.into(),
            capacity,
            allocated_count: 0,
        }
    }

    pub fn has_spare_seat(&self) -> bool {
        self.allocated_count < self.capacity
    }

    pub fn remaining(&self) -> u32 {
        self.capacity.saturating_sub(self.allocated_count)
    }
}

/// Lifecycle status exposed on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicantStatus {
    Pending,
    Submitted,
    Allocated,
    Unallocated,
}

impl ApplicantStatus {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::Pending,
            Self::Submitted,
            Self::Allocated,
            Self::Unallocated,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending Action",
            Self::Submitted => "Preferences Submitted",
            Self::Allocated => "Allocated",
            Self::Unallocated => "Not Allocated",
        }
    }
}

/// Combined status and seat reference. A seat exists only on `Allocated`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Placement {
    #[default]
    Pending,
    Submitted,
    Allocated(FacilityId),
    Unallocated,
}

impl Placement {
    pub fn status(&self) -> ApplicantStatus {
        match self {
            Self::Pending => ApplicantStatus::Pending,
            Self::Submitted => ApplicantStatus::Submitted,
            Self::Allocated(_) => ApplicantStatus::Allocated,
            Self::Unallocated => ApplicantStatus::Unallocated,
        }
    }

    pub fn facility(&self) -> Option<&FacilityId> {
        match self {
            Self::Allocated(facility_id) => Some(facility_id),
            _ => None,
        }
    }
}

/// Opaque secret owned by the authentication collaborator.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credential(String);

impl Credential {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// A candidate competing for a seat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ApplicantRecord", into = "ApplicantRecord")]
pub struct Applicant {
    pub id: ApplicantId,
    pub name: String,
    pub credential: Option<Credential>,
    /// Lower value wins.
    pub priority_rank: i64,
    pub preferences: Vec<FacilityId>,
    pub placement: Placement,
}

impl Applicant {
    pub fn new(id: impl Into<String>, name: impl Into<String>, priority_rank: i64) -> Self {
        Self {
            id: ApplicantId::new(id),
            name: name.into(),
            credential: None,
            priority_rank,
            preferences: Vec::new(),
            placement: Placement::Pending,
        }
    }

    /// Record a preference list and mark the applicant eligible for the next run.
    pub fn with_preferences<I, S>(mut self, preferences: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.preferences = preferences.into_iter().map(FacilityId::new).collect();
        self.placement = Placement::Submitted;
        self
    }

    pub fn status(&self) -> ApplicantStatus {
        self.placement.status()
    }

    pub fn assigned_facility(&self) -> Option<&FacilityId> {
        self.placement.facility()
    }

    /// 1-based position of the assigned facility within the preference list.
    pub fn preference_rank(&self) -> Option<usize> {
        let assigned = self.assigned_facility()?;
        self.preferences
            .iter()
            .position(|candidate| candidate == assigned)
            .map(|index| index + 1)
    }
}

/// Flat wire shape for an applicant, with status and seat as separate fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicantRecord {
    pub id: ApplicantId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "password")]
    pub credential: Option<Credential>,
    #[serde(alias = "meritRank")]
    pub priority_rank: i64,
    #[serde(default, alias = "preferences")]
    pub preference_list: Vec<FacilityId>,
    #[serde(default, alias = "allocatedCenterId")]
    pub assigned_facility_id: Option<FacilityId>,
    pub status: ApplicantStatus,
}

impl TryFrom<ApplicantRecord> for Applicant {
    type Error = ValidationError;

    fn try_from(mut record: ApplicantRecord) -> Result<Self, Self::Error> {
        // Only an allocated record holds a seat; the next reset would release any other.
        if record.status != ApplicantStatus::Allocated {
            if let Some(stale) = record.assigned_facility_id.take() {
                debug!(
                    applicant = %record.id,
                    facility = %stale,
                    status = ?record.status,
                    "discarding seat reference on non-allocated record"
                );
            }
        }

        let placement = match (record.status, record.assigned_facility_id) {
            (ApplicantStatus::Allocated, Some(facility_id)) => Placement::Allocated(facility_id),
            (ApplicantStatus::Pending, None) => Placement::Pending,
            (ApplicantStatus::Submitted, None) => Placement::Submitted,
            (ApplicantStatus::Unallocated, None) => Placement::Unallocated,
            (status, _) => {
                return Err(ValidationError::InconsistentPlacement {
                    applicant_id: record.id,
                    status,
                })
            }
        };

        Ok(Self {
            id: record.id,
            name: record.name,
            credential: record.credential,
            priority_rank: record.priority_rank,
            preferences: record.preference_list,
            placement,
        })
    }
}

impl From<Applicant> for ApplicantRecord {
    fn from(applicant: Applicant) -> Self {
        let status = applicant.status();
        let assigned_facility_id = match applicant.placement {
            Placement::Allocated(facility_id) => Some(facility_id),
            _ => None,
        };

        Self {
            id: applicant.id,
            name: applicant.name,
            credential: applicant.credential,
            priority_rank: applicant.priority_rank,
            preference_list: applicant.preferences,
            assigned_facility_id,
            status,
        }
    }
}

/// Full input or output snapshot handed between the caller and the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    pub facilities: Vec<Facility>,
    pub applicants: Vec<Applicant>,
}

impl Roster {
    pub fn new(facilities: Vec<Facility>, applicants: Vec<Applicant>) -> Self {
        Self {
            facilities,
            applicants,
        }
    }

    pub fn facility(&self, id: &FacilityId) -> Option<&Facility> {
        self.facilities.iter().find(|facility| &facility.id == id)
    }

    pub fn applicant(&self, id: &ApplicantId) -> Option<&Applicant> {
        self.applicants.iter().find(|applicant| &applicant.id == id)
    }

    pub fn total_capacity(&self) -> u64 {
        self.facilities
            .iter()
            .map(|facility| u64::from(facility.capacity))
            .sum()
    }
}

/// Aggregate counters computed after a run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationStats {
    pub total_allocated: usize,
    pub total_unallocated: usize,
    pub capacity_utilization: f64,
}
