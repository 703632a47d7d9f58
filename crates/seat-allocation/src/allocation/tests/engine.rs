use super::common::*;
use crate::allocation::domain::{ApplicantStatus, FacilityId, Placement, Roster};
use crate::allocation::{
    AllocationConfig, AllocationEngine, SeatOutcome, TieBreak, ValidationError,
};

fn seat_of(roster: &Roster, applicant: &str) -> Option<String> {
    roster
        .applicants
        .iter()
        .find(|candidate| candidate.id.as_str() == applicant)
        .and_then(|candidate| candidate.assigned_facility())
        .map(|facility| facility.as_str().to_string())
}

#[test]
fn sample_roster_matches_expected_assignment() {
    let outcome = AllocationEngine::default()
        .run(Roster::sample())
        .expect("sample roster is valid");

    assert_eq!(outcome.stats.total_allocated, 9);
    assert_eq!(outcome.stats.total_unallocated, 0);
    assert_eq!(outcome.stats.capacity_utilization, 45.0);

    let roster = outcome.roster();
    let expected = [
        ("s6", "c1"),
        ("s4", "c1"),
        ("s10", "c2"),
        ("s2", "c1"),
        ("s8", "c4"),
        ("s5", "c3"),
        ("s9", "c1"),
        ("s3", "c2"),
        ("s7", "c5"),
    ];
    for (applicant, facility) in expected {
        assert_eq!(
            seat_of(&roster, applicant).as_deref(),
            Some(facility),
            "{applicant} should sit at {facility}"
        );
    }

    let processed: Vec<_> = outcome
        .decisions
        .iter()
        .map(|decision| decision.priority_rank)
        .collect();
    assert_eq!(processed, vec![2, 3, 4, 5, 6, 8, 10, 12, 15]);

    let counts: Vec<_> = outcome
        .facilities
        .iter()
        .map(|facility| (facility.id.as_str(), facility.allocated_count))
        .collect();
    assert_eq!(
        counts,
        vec![("c1", 4), ("c2", 2), ("c3", 1), ("c4", 1), ("c5", 1)]
    );
}

#[test]
fn pending_applicant_passes_through_untouched() {
    let input = Roster::sample();
    let alice_before = input.applicants[0].clone();

    let outcome = AllocationEngine::default()
        .run(input)
        .expect("sample roster is valid");

    assert_eq!(outcome.applicants[0], alice_before);
    assert_eq!(outcome.applicants[0].status(), ApplicantStatus::Pending);
    assert!(outcome
        .decisions
        .iter()
        .all(|decision| decision.applicant_id.as_str() != "s1"));
}

#[test]
fn output_keeps_input_order() {
    let input = Roster::sample();
    let ids: Vec<_> = input.applicants.iter().map(|a| a.id.clone()).collect();

    let outcome = AllocationEngine::default().run(input).expect("valid");

    let after: Vec<_> = outcome.applicants.iter().map(|a| a.id.clone()).collect();
    assert_eq!(ids, after);
}

#[test]
fn second_run_reproduces_first() {
    let engine = AllocationEngine::default();
    let first = engine.run(Roster::sample()).expect("valid");
    let second = engine.run(first.roster()).expect("valid");

    assert_eq!(first.facilities, second.facilities);
    assert_eq!(first.applicants, second.applicants);
    assert_eq!(first.stats, second.stats);
    assert_eq!(first.decisions, second.decisions);
}

#[test]
fn stale_counters_from_input_are_discarded() {
    let mut roster = contested_roster();
    roster.facilities[0].allocated_count = 1;
    roster.applicants[0].placement = Placement::Allocated(FacilityId::new("north"));

    let outcome = AllocationEngine::default().run(roster).expect("valid");

    assert_eq!(seat_of(&outcome.roster(), "early").as_deref(), Some("north"));
    assert_eq!(seat_of(&outcome.roster(), "late").as_deref(), Some("south"));
    assert_eq!(
        outcome.applicants[2].placement,
        Placement::Unallocated,
        "middle loses north to early and lists nothing else"
    );
    assert_eq!(outcome.facilities[0].allocated_count, 1);
}

#[test]
fn higher_priority_can_take_the_seat_a_later_applicant_needed() {
    let outcome = AllocationEngine::default()
        .run(contested_roster())
        .expect("valid");

    let middle = outcome
        .decisions
        .iter()
        .find(|decision| decision.applicant_id.as_str() == "middle")
        .expect("middle processed");
    assert_eq!(middle.outcome, SeatOutcome::Unseated);
    assert_eq!(outcome.stats.total_unallocated, 1);
    assert_eq!(outcome.stats.capacity_utilization, 100.0);
}

#[test]
fn invalid_roster_is_refused_before_any_change() {
    let mut roster = contested_roster();
    roster.applicants[1].id = roster.applicants[0].id.clone();

    let err = AllocationEngine::default()
        .run(roster)
        .expect_err("duplicate ids refused");
    assert!(matches!(err, ValidationError::DuplicateApplicantId { .. }));
}

#[test]
fn applicant_id_tie_break_changes_winner_of_shared_rank() {
    let mut roster = contested_roster();
    for applicant in &mut roster.applicants {
        applicant.priority_rank = 1;
    }

    let input_order = AllocationEngine::default()
        .run(roster.clone())
        .expect("valid");
    assert_eq!(seat_of(&input_order.roster(), "late").as_deref(), Some("north"));

    let by_id = AllocationEngine::new(AllocationConfig {
        tie_break: TieBreak::ApplicantId,
    })
    .run(roster.clone())
    .expect("valid");
    assert_eq!(seat_of(&by_id.roster(), "early").as_deref(), Some("north"));
    assert_eq!(seat_of(&by_id.roster(), "late").as_deref(), Some("south"));

    let rejected = AllocationEngine::new(AllocationConfig {
        tie_break: TieBreak::Reject,
    })
    .run(roster);
    assert!(matches!(
        rejected,
        Err(ValidationError::DuplicatePriorityRank { rank: 1, .. })
    ));
}

#[test]
fn empty_roster_runs_cleanly() {
    let outcome = AllocationEngine::default()
        .run(Roster::default())
        .expect("empty roster is valid");
    assert_eq!(outcome.stats.total_allocated, 0);
    assert_eq!(outcome.stats.capacity_utilization, 0.0);
    assert!(outcome.decisions.is_empty());
}
