// libs/doctor-cell/src/services/roster.rs
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{debug, info, warn};

use crate::models::{DoctorRecord, RosterError};
use crate::services::matching::normalize_text;

/// A record with its searchable fields pre-normalized.
#[derive(Debug, Clone)]
pub struct RosterEntry {
    pub record: DoctorRecord,
    pub name_key: String,
    pub specialty_key: String,
    pub governorate_key: String,
    pub practice_mode_key: String,
}

impl From<DoctorRecord> for RosterEntry {
    fn from(record: DoctorRecord) -> Self {
        Self {
            name_key: normalize_text(&record.full_name),
            specialty_key: normalize_text(&record.specialty),
            governorate_key: normalize_text(&record.governorate),
            practice_mode_key: normalize_text(&record.practice_mode),
            record,
        }
    }
}

/// The in-memory doctor table. Built once at start-up and only read afterwards.
#[derive(Debug, Clone, Default)]
pub struct DoctorRoster {
    entries: Vec<RosterEntry>,
}

impl DoctorRoster {
    pub fn from_records(records: Vec<DoctorRecord>) -> Self {
        Self {
            entries: records.into_iter().map(RosterEntry::from).collect(),
        }
    }

    /// Loads the roster CSV at `path`. The first row is a header; columns are
    /// read by position.
    pub fn load_csv(path: impl AsRef<Path>) -> Result<Self, RosterError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(RosterError::NotFound(path.to_path_buf()));
        }

        let file = File::open(path).map_err(|source| RosterError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let roster = Self::from_reader(file)?;
        if roster.is_empty() {
            warn!("Roster file {} contains no doctor records", path.display());
        } else {
            info!("Loaded {} doctor records from {}", roster.len(), path.display());
        }
        Ok(roster)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, RosterError> {
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(reader);

        let mut records = Vec::new();
        for (index, row) in csv_reader.records().enumerate() {
            let row = row?;
            if row.iter().all(str::is_empty) {
                // data rows start on line 2
                debug!("Skipping empty roster row at line {}", index + 2);
                continue;
            }
            records.push(record_from_row(&row));
        }

        Ok(Self::from_records(records))
    }

    pub fn entries(&self) -> &[RosterEntry] {
        &self.entries
    }

    pub fn records(&self) -> impl Iterator<Item = &DoctorRecord> {
        self.entries.iter().map(|entry| &entry.record)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn record_from_row(row: &StringRecord) -> DoctorRecord {
    let cell = |index: usize| row.get(index).unwrap_or_default().to_string();

    DoctorRecord {
        full_name: cell(0),
        specialty: cell(1),
        practice_mode: cell(2),
        professional_address: cell(3),
        phone: cell(4),
        governorate: cell(5),
    }
}
