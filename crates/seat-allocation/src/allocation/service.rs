use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::domain::{AllocationStats, Applicant, ApplicantId, FacilityId, Placement, Roster};
use super::engine::{AllocationConfig, AllocationEngine, AllocationOutcome};
use super::report::{AllocationSummary, ApplicantOutcomeView};
use super::repository::{RepositoryError, RosterRepository};
use super::validation::ValidationError;

/// Identifier for a completed allocation run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(pub String);

/// Bookkeeping for the most recent run against the stored roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationRunRecord {
    pub run_id: RunId,
    pub completed_at: DateTime<Utc>,
    pub stats: AllocationStats,
}

#[derive(Debug, Default)]
struct RunLedger {
    runs: u64,
    last: Option<AllocationRunRecord>,
}

impl RunLedger {
    fn record(&mut self, stats: AllocationStats) -> AllocationRunRecord {
        self.runs += 1;
        let record = AllocationRunRecord {
            run_id: RunId(format!("run-{:06}", self.runs)),
            completed_at: Utc::now(),
            stats,
        };
        self.last = Some(record.clone());
        record
    }
}

/// Intake rules for preference submissions. The engine itself accepts any list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferencePolicy {
    pub max_preferences: usize,
}

impl Default for PreferencePolicy {
    fn default() -> Self {
        Self { max_preferences: 3 }
    }
}

/// Service composing the roster repository and the allocation engine.
///
/// Runs and preference submissions take the same lock for their whole load-mutate-save
/// cycle, so a reset can never interleave with another caller's assignment pass.
pub struct AllocationService<R> {
    repository: Arc<R>,
    engine: Arc<AllocationEngine>,
    policy: PreferencePolicy,
    ledger: Mutex<RunLedger>,
}

impl<R> AllocationService<R>
where
    R: RosterRepository + 'static,
{
    pub fn new(repository: Arc<R>, config: AllocationConfig) -> Self {
        Self {
            repository,
            engine: Arc::new(AllocationEngine::new(config)),
            policy: PreferencePolicy::default(),
            ledger: Mutex::new(RunLedger::default()),
        }
    }

    pub fn with_preference_policy(mut self, policy: PreferencePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn engine(&self) -> &AllocationEngine {
        &self.engine
    }

    fn lock(&self) -> MutexGuard<'_, RunLedger> {
        self.ledger.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run the engine over the stored roster and publish the result as the new roster.
    pub fn run_allocation(&self) -> Result<AllocationRunRecord, AllocationServiceError> {
        let mut ledger = self.lock();
        let roster = self.repository.load()?;
        let outcome = self.engine.run(roster)?;
        let stats = outcome.stats;

        self.repository.save(outcome.into_roster())?;
        let record = ledger.record(stats);
        info!(run_id = %record.run_id.0, allocated = stats.total_allocated, "allocation published");
        Ok(record)
    }

    /// Run the engine over a caller-supplied snapshot without touching the stored roster.
    pub fn simulate(&self, roster: Roster) -> Result<AllocationOutcome, AllocationServiceError> {
        Ok(self.engine.run(roster)?)
    }

    pub fn last_run(&self) -> Option<AllocationRunRecord> {
        self.lock().last.clone()
    }

    /// Replace an applicant's preference list and queue them for the next run.
    pub fn submit_preferences(
        &self,
        applicant_id: &ApplicantId,
        preferences: Vec<FacilityId>,
    ) -> Result<Applicant, AllocationServiceError> {
        let _ledger = self.lock();
        let mut roster = self.repository.load()?;
        let position = roster
            .applicants
            .iter()
            .position(|applicant| &applicant.id == applicant_id)
            .ok_or_else(|| AllocationServiceError::ApplicantNotFound(applicant_id.clone()))?;
        check_preferences(&roster, &preferences, self.policy.max_preferences)?;

        let previous = std::mem::replace(
            &mut roster.applicants[position].placement,
            Placement::Submitted,
        );
        if let Placement::Allocated(facility_id) = previous {
            release_seat(&mut roster, &facility_id);
        }
        roster.applicants[position].preferences = preferences;

        let updated = roster.applicants[position].clone();
        self.repository.save(roster)?;
        info!(applicant = %applicant_id, count = updated.preferences.len(), "preferences submitted");
        Ok(updated)
    }

    pub fn applicant_outcome(
        &self,
        applicant_id: &ApplicantId,
    ) -> Result<ApplicantOutcomeView, AllocationServiceError> {
        let roster = self.repository.load()?;
        let applicant = roster
            .applicant(applicant_id)
            .ok_or_else(|| AllocationServiceError::ApplicantNotFound(applicant_id.clone()))?;
        Ok(applicant.to_outcome_view(&roster))
    }

    pub fn summary(&self) -> Result<AllocationSummary, AllocationServiceError> {
        let roster = self.repository.load()?;
        Ok(AllocationSummary::from_roster(&roster))
    }
}

fn check_preferences(
    roster: &Roster,
    preferences: &[FacilityId],
    max_preferences: usize,
) -> Result<(), PreferenceError> {
    if preferences.len() > max_preferences {
        return Err(PreferenceError::TooMany {
            submitted: preferences.len(),
            max: max_preferences,
        });
    }

    let mut seen = HashSet::with_capacity(preferences.len());
    for facility_id in preferences {
        if !seen.insert(facility_id) {
            return Err(PreferenceError::Duplicate(facility_id.clone()));
        }
        if roster.facility(facility_id).is_none() {
            return Err(PreferenceError::UnknownFacility(facility_id.clone()));
        }
    }

    Ok(())
}

fn release_seat(roster: &mut Roster, facility_id: &FacilityId) {
    match roster
        .facilities
        .iter_mut()
        .find(|facility| &facility.id == facility_id)
    {
        Some(facility) => facility.allocated_count = facility.allocated_count.saturating_sub(1),
        None => warn!(facility = %facility_id, "released seat at unknown facility"),
    }
}

/// Rejection reasons for a preference submission.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PreferenceError {
    #[error("at most {max} preferences may be submitted, got {submitted}")]
    TooMany { submitted: usize, max: usize },
    #[error("facility '{0}' is listed more than once")]
    Duplicate(FacilityId),
    #[error("facility '{0}' does not exist")]
    UnknownFacility(FacilityId),
}

/// Error raised by the allocation service.
#[derive(Debug, thiserror::Error)]
pub enum AllocationServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Preference(#[from] PreferenceError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("applicant '{0}' not found")]
    ApplicantNotFound(ApplicantId),
}
