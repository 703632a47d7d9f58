use std::collections::{HashMap, HashSet};

use super::domain::{ApplicantId, ApplicantStatus, FacilityId, Roster};
use super::engine::{AllocationConfig, TieBreak};

/// Structural problems that stop a run before any record is touched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{collection}[{index}] is missing required field '{field}'")]
    MissingField {
        collection: &'static str,
        index: usize,
        field: &'static str,
    },
    #[error("facility id '{id}' appears more than once")]
    DuplicateFacilityId { id: FacilityId },
    #[error("applicant id '{id}' appears more than once")]
    DuplicateApplicantId { id: ApplicantId },
    #[error("priority rank {rank} is shared by applicants '{first}' and '{second}'")]
    DuplicatePriorityRank {
        rank: i64,
        first: ApplicantId,
        second: ApplicantId,
    },
    #[error("applicant '{applicant_id}' has status {status:?} but no assigned facility")]
    InconsistentPlacement {
        applicant_id: ApplicantId,
        status: ApplicantStatus,
    },
}

/// Check the snapshot for structural validity.
///
/// Unknown preference references, empty preference lists, and repeated entries within one
/// list are tolerated here; the assignment pass resolves them to "no seat".
pub fn validate_roster(roster: &Roster, config: &AllocationConfig) -> Result<(), ValidationError> {
    let mut facility_ids = HashSet::with_capacity(roster.facilities.len());
    for (index, facility) in roster.facilities.iter().enumerate() {
        if facility.id.as_str().trim().is_empty() {
            return Err(ValidationError::MissingField {
                collection: "facilities",
                index,
                field: "id",
            });
        }
        if !facility_ids.insert(&facility.id) {
            return Err(ValidationError::DuplicateFacilityId {
                id: facility.id.clone(),
            });
        }
    }

    let mut applicant_ids = HashSet::with_capacity(roster.applicants.len());
    let mut ranks: HashMap<i64, &ApplicantId> = HashMap::new();
    for (index, applicant) in roster.applicants.iter().enumerate() {
        if applicant.id.as_str().trim().is_empty() {
            return Err(ValidationError::MissingField {
                collection: "applicants",
                index,
                field: "id",
            });
        }
        if !applicant_ids.insert(&applicant.id) {
            return Err(ValidationError::DuplicateApplicantId {
                id: applicant.id.clone(),
            });
        }
        let active = applicant.status() != ApplicantStatus::Pending;
        if config.tie_break == TieBreak::Reject && active {
            if let Some(first) = ranks.insert(applicant.priority_rank, &applicant.id) {
                return Err(ValidationError::DuplicatePriorityRank {
                    rank: applicant.priority_rank,
                    first: first.clone(),
                    second: applicant.id.clone(),
                });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocation::domain::{Applicant, Facility};

    fn roster() -> Roster {
        Roster::new(
            vec![
                Facility::new("c1", "Downtown Tech Campus", "City Center", 2),
                Facility::new("c2", "Northside Science Hub", "North District", 1),
            ],
            vec![
                Applicant::new("s1", "Alice Johnson", 1).with_preferences(["c1", "missing"]),
                Applicant::new("s2", "Bob Smith", 1).with_preferences(["c2", "c2"]),
                Applicant::new("s3", "Charlie Davis", 4),
            ],
        )
    }

    #[test]
    fn tolerated_issues_pass_validation() {
        assert_eq!(validate_roster(&roster(), &AllocationConfig::default()), Ok(()));
    }

    #[test]
    fn duplicate_facility_ids_are_rejected() {
        let mut roster = roster();
        roster
            .facilities
            .push(Facility::new("c1", "Shadow Campus", "Nowhere", 9));

        assert_eq!(
            validate_roster(&roster, &AllocationConfig::default()),
            Err(ValidationError::DuplicateFacilityId {
                id: FacilityId::new("c1")
            })
        );
    }

    #[test]
    fn duplicate_applicant_ids_are_rejected() {
        let mut roster = roster();
        roster.applicants.push(Applicant::new("s2", "Bob Again", 9));

        assert!(matches!(
            validate_roster(&roster, &AllocationConfig::default()),
            Err(ValidationError::DuplicateApplicantId { id }) if id.as_str() == "s2"
        ));
    }

    #[test]
    fn blank_ids_report_their_position() {
        let mut roster = roster();
        roster.applicants[2].id = ApplicantId::new("  ");

        assert_eq!(
            validate_roster(&roster, &AllocationConfig::default()),
            Err(ValidationError::MissingField {
                collection: "applicants",
                index: 2,
                field: "id",
            })
        );
    }

    #[test]
    fn shared_ranks_only_fail_under_reject_policy() {
        let config = AllocationConfig {
            tie_break: TieBreak::Reject,
        };

        match validate_roster(&roster(), &config) {
            Err(ValidationError::DuplicatePriorityRank { rank, first, second }) => {
                assert_eq!(rank, 1);
                assert_eq!(first.as_str(), "s1");
                assert_eq!(second.as_str(), "s2");
            }
            other => panic!("expected duplicate rank error, got {other:?}"),
        }
    }

    #[test]
    fn pending_applicants_do_not_count_as_ties() {
        let config = AllocationConfig {
            tie_break: TieBreak::Reject,
        };
        let mut roster = roster();
        roster.applicants[1].priority_rank = 2;
        roster.applicants.push(Applicant::new("s4", "Diana Evans", 4));

        assert_eq!(validate_roster(&roster, &config), Ok(()));
    }
}
