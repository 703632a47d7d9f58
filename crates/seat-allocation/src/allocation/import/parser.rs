use serde::{Deserialize, Deserializer};
use std::io::Read;

use super::super::domain::{
    Applicant, ApplicantId, ApplicantRecord, ApplicantStatus, Facility, FacilityId,
};
use super::RosterImportError;

const PREFERENCE_SEPARATOR: char = '|';

#[derive(Debug, Deserialize)]
struct FacilityRow {
    id: String,
    name: String,
    #[serde(default)]
    location: String,
    capacity: u32,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    allocated: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApplicantRow {
    id: String,
    name: String,
    priority_rank: i64,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    preferences: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    status: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    assigned_facility_id: Option<String>,
}

fn reader_for<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader)
}

/// Data rows start on line 2, after the header.
fn line_of(index: usize) -> usize {
    index + 2
}

pub(crate) fn parse_facilities<R: Read>(reader: R) -> Result<Vec<Facility>, RosterImportError> {
    let mut facilities = Vec::new();

    for (index, row) in reader_for(reader).deserialize::<FacilityRow>().enumerate() {
        let row = row?;
        let allocated_count = match row.allocated {
            Some(raw) => raw.parse::<u32>().map_err(|_| RosterImportError::InvalidRow {
                line: line_of(index),
                reason: format!("allocated count '{raw}' is not a non-negative integer"),
            })?,
            None => 0,
        };

        facilities.push(Facility {
            id: FacilityId::new(row.id),
            name: row.name,
            location: row.location,
            capacity: row.capacity,
            allocated_count,
        });
    }

    Ok(facilities)
}

pub(crate) fn parse_applicants<R: Read>(reader: R) -> Result<Vec<Applicant>, RosterImportError> {
    let mut applicants = Vec::new();

    for (index, row) in reader_for(reader).deserialize::<ApplicantRow>().enumerate() {
        let row = row?;
        let line = line_of(index);
        let preference_list: Vec<FacilityId> = row
            .preferences
            .as_deref()
            .map(split_preferences)
            .unwrap_or_default();

        let status = match row.status.as_deref() {
            Some(raw) => parse_status(raw).ok_or_else(|| RosterImportError::InvalidRow {
                line,
                reason: format!("unknown status '{raw}'"),
            })?,
            None if preference_list.is_empty() => ApplicantStatus::Pending,
            None => ApplicantStatus::Submitted,
        };

        let record = ApplicantRecord {
            id: ApplicantId::new(row.id),
            name: row.name,
            credential: None,
            priority_rank: row.priority_rank,
            preference_list,
            assigned_facility_id: row.assigned_facility_id.map(FacilityId::new),
            status,
        };

        let applicant = Applicant::try_from(record).map_err(|err| RosterImportError::InvalidRow {
            line,
            reason: err.to_string(),
        })?;
        applicants.push(applicant);
    }

    Ok(applicants)
}

fn split_preferences(raw: &str) -> Vec<FacilityId> {
    raw.split(PREFERENCE_SEPARATOR)
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(FacilityId::new)
        .collect()
}

fn parse_status(raw: &str) -> Option<ApplicantStatus> {
    match raw.trim().to_ascii_uppercase().as_str() {
        "PENDING" => Some(ApplicantStatus::Pending),
        "SUBMITTED" => Some(ApplicantStatus::Submitted),
        "ALLOCATED" => Some(ApplicantStatus::Allocated),
        "UNALLOCATED" => Some(ApplicantStatus::Unallocated),
        _ => None,
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.and_then(|raw| {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }))
}
