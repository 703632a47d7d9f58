use super::super::domain::{Applicant, ApplicantStatus, Facility, Roster};
use super::super::engine::compute_stats;
use super::views::{
    AllocationSummary, ApplicantOutcomeView, FacilityFillView, FacilityRef, StatusBreakdown,
};

impl AllocationSummary {
    pub fn from_roster(roster: &Roster) -> Self {
        let facilities = roster.facilities.iter().map(Facility::to_fill_view).collect();

        Self {
            total_capacity: roster.total_capacity(),
            stats: compute_stats(roster),
            status_breakdown: StatusBreakdown::from_applicants(&roster.applicants),
            facilities,
        }
    }
}

impl StatusBreakdown {
    pub fn from_applicants(applicants: &[Applicant]) -> Self {
        let mut breakdown = Self {
            total: applicants.len(),
            ..Self::default()
        };

        for applicant in applicants {
            match applicant.status() {
                ApplicantStatus::Pending => breakdown.pending += 1,
                ApplicantStatus::Submitted => breakdown.submitted += 1,
                ApplicantStatus::Allocated => breakdown.allocated += 1,
                ApplicantStatus::Unallocated => breakdown.unallocated += 1,
            }
        }

        breakdown
    }
}

impl Facility {
    pub fn to_fill_view(&self) -> FacilityFillView {
        let utilization = if self.capacity > 0 {
            f64::from(self.allocated_count) / f64::from(self.capacity) * 100.0
        } else {
            0.0
        };

        FacilityFillView {
            id: self.id.clone(),
            name: self.name.clone(),
            location: self.location.clone(),
            capacity: self.capacity,
            allocated: self.allocated_count,
            remaining: self.remaining(),
            utilization,
            is_full: !self.has_spare_seat(),
        }
    }

    pub fn to_ref(&self) -> FacilityRef {
        FacilityRef {
            id: self.id.clone(),
            name: self.name.clone(),
            location: self.location.clone(),
        }
    }
}

impl Applicant {
    /// Outcome as the applicant sees it, resolving the seat against `roster`.
    pub fn to_outcome_view(&self, roster: &Roster) -> ApplicantOutcomeView {
        let status = self.status();
        let facility = self
            .assigned_facility()
            .and_then(|facility_id| roster.facility(facility_id))
            .map(Facility::to_ref);

        ApplicantOutcomeView {
            applicant_id: self.id.clone(),
            name: self.name.clone(),
            priority_rank: self.priority_rank,
            status,
            status_label: status.label(),
            facility,
            preference_rank: self.preference_rank(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocation::engine::AllocationEngine;

    #[test]
    fn summary_reports_fill_per_facility() {
        let outcome = AllocationEngine::default()
            .run(Roster::sample())
            .expect("sample roster is valid");
        let summary = AllocationSummary::from_roster(&outcome.roster());

        assert_eq!(summary.total_capacity, 20);
        assert_eq!(
            summary.status_breakdown,
            StatusBreakdown {
                pending: 1,
                submitted: 0,
                allocated: 9,
                unallocated: 0,
                total: 10,
            }
        );

        let c1 = &summary.facilities[0];
        assert_eq!((c1.allocated, c1.remaining, c1.is_full), (4, 1, false));
        assert_eq!(c1.utilization, 80.0);
    }

    #[test]
    fn outcome_view_resolves_seat_and_choice() {
        let roster = AllocationEngine::default()
            .run(Roster::sample())
            .expect("sample roster is valid")
            .into_roster();

        let jane = roster
            .applicants
            .iter()
            .find(|applicant| applicant.id.as_str() == "s10")
            .expect("s10 present");
        let view = jane.to_outcome_view(&roster);

        assert_eq!(view.status_label, "Allocated");
        assert_eq!(view.preference_rank, Some(1));
        assert_eq!(
            view.facility.map(|facility| facility.name),
            Some("Northside Science Hub".to_string())
        );

        let alice = roster.applicants[0].to_outcome_view(&roster);
        assert_eq!(alice.status, ApplicantStatus::Pending);
        assert!(alice.facility.is_none());
    }
}
