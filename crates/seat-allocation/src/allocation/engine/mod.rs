mod aggregate;
mod assignment;
mod config;
mod ordering;
mod reset;

pub use aggregate::compute_stats;
pub use assignment::{SeatDecision, SeatOutcome};
pub use config::{AllocationConfig, TieBreak};

use serde::{Deserialize, Serialize};
use tracing::info;

use super::domain::{AllocationStats, Applicant, Facility, Roster};
use super::validation::{validate_roster, ValidationError};

/// Stateless allocator: every call is a complete run over the snapshot it is handed.
#[derive(Debug, Clone, Default)]
pub struct AllocationEngine {
    config: AllocationConfig,
}

impl AllocationEngine {
    pub fn new(config: AllocationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AllocationConfig {
        &self.config
    }

    /// Validate the snapshot, then reset, order, assign and aggregate.
    ///
    /// An invalid snapshot is returned untouched as an error; there is no partial result.
    pub fn run(&self, roster: Roster) -> Result<AllocationOutcome, ValidationError> {
        validate_roster(&roster, &self.config)?;

        let mut roster = reset::reset_roster(roster);
        let order = ordering::active_order(&roster.applicants, self.config.tie_break);
        let decisions =
            assignment::assign_seats(&mut roster.applicants, &mut roster.facilities, &order);
        let stats = compute_stats(&roster);

        info!(
            active = order.len(),
            allocated = stats.total_allocated,
            unallocated = stats.total_unallocated,
            utilization = stats.capacity_utilization,
            tie_break = %self.config.tie_break,
            "allocation run completed"
        );

        let Roster {
            facilities,
            applicants,
        } = roster;

        Ok(AllocationOutcome {
            facilities,
            applicants,
            stats,
            decisions,
        })
    }
}

/// Output snapshot of a run plus the per-applicant audit trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationOutcome {
    pub facilities: Vec<Facility>,
    pub applicants: Vec<Applicant>,
    pub stats: AllocationStats,
    /// Decisions in processing order.
    pub decisions: Vec<SeatDecision>,
}

impl AllocationOutcome {
    pub fn roster(&self) -> Roster {
        Roster::new(self.facilities.clone(), self.applicants.clone())
    }

    /// Feed the result straight into the next run.
    pub fn into_roster(self) -> Roster {
        Roster::new(self.facilities, self.applicants)
    }
}
