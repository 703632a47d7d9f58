use super::super::domain::{Placement, Roster};

/// Clear every effect of a previous run.
///
/// Seat counters drop to zero and seat references are released. Applicants that were already
/// processed go back to `Submitted`; `Pending` applicants stay out of the next run.
pub(crate) fn reset_roster(mut roster: Roster) -> Roster {
    for facility in &mut roster.facilities {
        facility.allocated_count = 0;
    }

    for applicant in &mut roster.applicants {
        applicant.placement = match applicant.placement {
            Placement::Pending => Placement::Pending,
            Placement::Submitted | Placement::Allocated(_) | Placement::Unallocated => {
                Placement::Submitted
            }
        };
    }

    roster
}
