use super::super::domain::{AllocationStats, ApplicantStatus, Roster};

/// Summary counters over a roster. Utilization is a percentage of total capacity and is 0
/// when no capacity exists.
pub fn compute_stats(roster: &Roster) -> AllocationStats {
    let (total_allocated, total_unallocated) =
        roster
            .applicants
            .iter()
            .fold((0, 0), |(allocated, unallocated), applicant| {
                match applicant.status() {
                    ApplicantStatus::Allocated => (allocated + 1, unallocated),
                    ApplicantStatus::Unallocated => (allocated, unallocated + 1),
                    ApplicantStatus::Pending | ApplicantStatus::Submitted => {
                        (allocated, unallocated)
                    }
                }
            });

    let total_capacity = roster.total_capacity();
    let capacity_utilization = if total_capacity > 0 {
        total_allocated as f64 / total_capacity as f64 * 100.0
    } else {
        0.0
    };

    AllocationStats {
        total_allocated,
        total_unallocated,
        capacity_utilization,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocation::domain::{Applicant, Facility, FacilityId, Placement};

    #[test]
    fn zero_capacity_reports_zero_utilization() {
        let mut applicant = Applicant::new("s1", "Alice Johnson", 1).with_preferences(["c1"]);
        applicant.placement = Placement::Unallocated;
        let roster = Roster::new(
            vec![Facility::new("c1", "Closed Wing", "Nowhere", 0)],
            vec![applicant],
        );

        let stats = compute_stats(&roster);

        assert_eq!(stats.total_unallocated, 1);
        assert_eq!(stats.capacity_utilization, 0.0);
        assert!(!stats.capacity_utilization.is_nan());
    }

    #[test]
    fn utilization_is_a_percentage() {
        let mut seated = Applicant::new("s1", "Alice Johnson", 1).with_preferences(["c1"]);
        seated.placement = Placement::Allocated(FacilityId::new("c1"));
        let pending = Applicant::new("s2", "Bob Smith", 2);
        let mut facility = Facility::new("c1", "Downtown Tech Campus", "City Center", 4);
        facility.allocated_count = 1;

        let stats = compute_stats(&Roster::new(vec![facility], vec![seated, pending]));

        assert_eq!(stats.total_allocated, 1);
        assert_eq!(stats.total_unallocated, 0);
        assert_eq!(stats.capacity_utilization, 25.0);
    }
}
