// libs/doctor-cell/src/services/search.rs
use tracing::debug;

use shared_config::AppConfig;

use crate::models::{DoctorRecord, Pagination, SearchCriteria, SearchPage};
use crate::services::matching::{normalize_text, NameMatcher};
use crate::services::roster::{DoctorRoster, RosterEntry};

pub struct DoctorSearchService<'a> {
    roster: &'a DoctorRoster,
    matcher: NameMatcher,
    required_practice_mode: Option<String>,
}

impl<'a> DoctorSearchService<'a> {
    pub fn new(roster: &'a DoctorRoster, config: &AppConfig) -> Self {
        Self {
            roster,
            matcher: NameMatcher::new(config.fuzzy_threshold),
            required_practice_mode: config
                .required_practice_mode
                .as_deref()
                .map(normalize_text)
                .filter(|mode| !mode.is_empty()),
        }
    }

    /// Ranked, paginated search.
    ///
    /// With a name criterion candidates are ordered by descending score; equal
    /// scores keep roster order. Without one, roster order is kept as is.
    pub fn search(&self, criteria: &SearchCriteria, pagination: Pagination) -> SearchPage {
        let mut candidates: Vec<(&DoctorRecord, u8)> = self
            .roster
            .entries()
            .iter()
            .filter_map(|entry| self.evaluate(entry, criteria).map(|score| (&entry.record, score)))
            .collect();

        if criteria.name.is_some() {
            // stable: ties stay in load order
            candidates.sort_by(|a, b| b.1.cmp(&a.1));
        }

        let total = candidates.len();
        let doctors: Vec<DoctorRecord> = candidates
            .into_iter()
            .skip(pagination.offset())
            .take(pagination.size)
            .map(|(record, _)| record.clone())
            .collect();

        debug!(
            "Search matched {} of {} records, returning {} on page {}",
            total,
            self.roster.len(),
            doctors.len(),
            pagination.page
        );

        SearchPage { doctors, total }
    }

    /// True when at least one record satisfies every provided criterion.
    /// With no criteria at all this is true iff some record passes the
    /// required practice mode, i.e. iff the roster is non-empty when no
    /// mode is configured.
    pub fn exists(&self, criteria: &SearchCriteria) -> bool {
        self.roster
            .entries()
            .iter()
            .any(|entry| self.evaluate(entry, criteria).is_some())
    }

    /// `None` when the entry is filtered out, otherwise its name score
    /// (100 when no name was asked for).
    fn evaluate(&self, entry: &RosterEntry, criteria: &SearchCriteria) -> Option<u8> {
        if let Some(mode) = &self.required_practice_mode {
            if !entry.practice_mode_key.contains(mode.as_str()) {
                return None;
            }
        }

        if let Some(specialty) = &criteria.specialty {
            if !entry.specialty_key.contains(specialty.as_str()) {
                return None;
            }
        }

        if let Some(governorate) = &criteria.governorate {
            if !entry.governorate_key.contains(governorate.as_str()) {
                return None;
            }
        }

        match &criteria.name {
            Some(name) => self.matcher.score(name, &entry.name_key),
            None => Some(100),
        }
    }
}
