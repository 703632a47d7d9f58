use super::super::domain::{Applicant, Placement};
use super::config::TieBreak;

/// Indices of the active set, highest priority first.
///
/// Only `Submitted` applicants take part. `sort_by` is stable, so under
/// [`TieBreak::InputOrder`] equal ranks keep their roster order.
pub(crate) fn active_order(applicants: &[Applicant], tie_break: TieBreak) -> Vec<usize> {
    let mut order: Vec<usize> = applicants
        .iter()
        .enumerate()
        .filter(|(_, applicant)| applicant.placement == Placement::Submitted)
        .map(|(index, _)| index)
        .collect();

    order.sort_by(|&left, &right| {
        let left = &applicants[left];
        let right = &applicants[right];
        let by_rank = left.priority_rank.cmp(&right.priority_rank);
        match tie_break {
            TieBreak::ApplicantId => by_rank.then_with(|| left.id.cmp(&right.id)),
            TieBreak::InputOrder | TieBreak::Reject => by_rank,
        }
    });

    order
}
