use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::super::domain::{Applicant, ApplicantId, Facility, FacilityId, Placement};

/// What happened to one applicant during the assignment pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatDecision {
    pub applicant_id: ApplicantId,
    pub priority_rank: i64,
    pub outcome: SeatOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SeatOutcome {
    /// `choice` is the 0-based index into the applicant's preference list.
    Seated {
        facility_id: FacilityId,
        choice: usize,
    },
    Unseated,
}

/// Serial dictatorship over the ordered active set.
///
/// Each applicant, in turn, takes the first listed facility that still has a free seat.
/// Nothing is revisited afterwards.
pub(crate) fn assign_seats(
    applicants: &mut [Applicant],
    facilities: &mut [Facility],
    order: &[usize],
) -> Vec<SeatDecision> {
    let index: HashMap<FacilityId, usize> = facilities
        .iter()
        .enumerate()
        .map(|(position, facility)| (facility.id.clone(), position))
        .collect();

    let mut decisions = Vec::with_capacity(order.len());
    for &applicant_index in order {
        let applicant = &mut applicants[applicant_index];
        let seat = claim_first_free(applicant, facilities, &index);

        let outcome = match seat {
            Some((facility_id, choice)) => {
                applicant.placement = Placement::Allocated(facility_id.clone());
                SeatOutcome::Seated {
                    facility_id,
                    choice,
                }
            }
            None => {
                applicant.placement = Placement::Unallocated;
                SeatOutcome::Unseated
            }
        };

        debug!(applicant = %applicant.id, rank = applicant.priority_rank, ?outcome, "seat decision");
        decisions.push(SeatDecision {
            applicant_id: applicant.id.clone(),
            priority_rank: applicant.priority_rank,
            outcome,
        });
    }

    decisions
}

fn claim_first_free(
    applicant: &Applicant,
    facilities: &mut [Facility],
    index: &HashMap<FacilityId, usize>,
) -> Option<(FacilityId, usize)> {
    for (choice, preferred) in applicant.preferences.iter().enumerate() {
        let Some(&position) = index.get(preferred) else {
            debug!(applicant = %applicant.id, facility = %preferred, "skipping unknown facility");
            continue;
        };

        let facility = &mut facilities[position];
        if facility.has_spare_seat() {
            facility.allocated_count += 1;
            return Some((facility.id.clone(), choice));
        }
    }

    None
}
