mod parser;

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use tracing::debug;

use super::domain::Roster;

/// Failure while reading a roster snapshot from disk or a request body.
#[derive(Debug, thiserror::Error)]
pub enum RosterImportError {
    #[error("failed to read roster: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid roster CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid roster JSON data: {0}")]
    Json(#[from] serde_json::Error),
    #[error("line {line}: {reason}")]
    InvalidRow { line: usize, reason: String },
}

/// Loads roster snapshots from JSON documents or a pair of CSV exports.
pub struct RosterImporter;

impl RosterImporter {
    pub fn from_json_path<P: AsRef<Path>>(path: P) -> Result<Roster, RosterImportError> {
        let file = File::open(path.as_ref())?;
        debug!(path = %path.as_ref().display(), "loading roster snapshot");
        Self::from_json_reader(BufReader::new(file))
    }

    pub fn from_json_reader<R: Read>(reader: R) -> Result<Roster, RosterImportError> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_csv_paths<F, A>(facilities: F, applicants: A) -> Result<Roster, RosterImportError>
    where
        F: AsRef<Path>,
        A: AsRef<Path>,
    {
        let facilities = File::open(facilities)?;
        let applicants = File::open(applicants)?;
        Self::from_csv_readers(facilities, applicants)
    }

    pub fn from_csv_readers<F, A>(facilities: F, applicants: A) -> Result<Roster, RosterImportError>
    where
        F: Read,
        A: Read,
    {
        let facilities = parser::parse_facilities(facilities)?;
        let applicants = parser::parse_applicants(applicants)?;
        debug!(
            facilities = facilities.len(),
            applicants = applicants.len(),
            "parsed roster CSV exports"
        );
        Ok(Roster::new(facilities, applicants))
    }
}
