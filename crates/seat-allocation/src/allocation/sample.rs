use super::domain::{Applicant, Facility, Roster};

impl Roster {
    /// Five centers with 20 seats in total and ten applicants, one of whom has not submitted
    /// preferences yet. Used for demos and as the server's fallback roster.
    pub fn sample() -> Self {
        let facilities = vec![
            Facility::new("c1", "Downtown Tech Campus", "City Center", 5),
            Facility::new("c2", "Northside Science Hub", "North District", 3),
            Facility::new("c3", "West End Arts Block", "West End", 4),
            Facility::new("c4", "Eastern Engineering Wing", "East Side", 6),
            Facility::new("c5", "South Medical Annex", "South Bay", 2),
        ];

        let applicants = vec![
            Applicant::new("s1", "Alice Johnson", 1),
            Applicant::new("s2", "Bob Smith", 5).with_preferences(["c1", "c2", "c3"]),
            Applicant::new("s3", "Charlie Davis", 12).with_preferences(["c2", "c1", "c5"]),
            Applicant::new("s4", "Diana Evans", 3).with_preferences(["c1", "c5", "c4"]),
            Applicant::new("s5", "Ethan Hunt", 8).with_preferences(["c3", "c4", "c1"]),
            Applicant::new("s6", "Fiona Green", 2).with_preferences(["c1", "c2", "c3"]),
            Applicant::new("s7", "George Hall", 15).with_preferences(["c5", "c2", "c1"]),
            Applicant::new("s8", "Hannah Lee", 6).with_preferences(["c4", "c3", "c2"]),
            Applicant::new("s9", "Ian Wright", 10).with_preferences(["c1", "c4", "c3"]),
            Applicant::new("s10", "Jane Doe", 4).with_preferences(["c2", "c5", "c1"]),
        ];

        Self::new(facilities, applicants)
    }
}

#[cfg(test)]
mod tests {
    use crate::allocation::domain::{ApplicantStatus, Roster};

    #[test]
    fn sample_has_one_pending_applicant() {
        let roster = Roster::sample();
        assert_eq!(roster.total_capacity(), 20);
        let pending: Vec<_> = roster
            .applicants
            .iter()
            .filter(|applicant| applicant.status() == ApplicantStatus::Pending)
            .map(|applicant| applicant.id.as_str())
            .collect();
        assert_eq!(pending, vec!["s1"]);
    }
}
