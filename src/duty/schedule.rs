//! HTS schedule table and prefix lookup
//!
//! The schedule is loaded once and read-only for the life of the process.
//! Normalized codes are computed at construction, never during a query.

use tracing::debug;

use super::normalize::normalize_hts;

/// One row of the HTS schedule table
#[derive(Debug, Clone)]
pub struct ScheduleEntry {
    /// Code as printed in the schedule, e.g. "3923.50.0000"
    pub hts_number: String,
    pub description: String,
    /// Free-form "General Rate of Duty" text, parsed per query
    pub general_rate: Option<String>,
    /// Free-form "Additional Duties" text, display only
    pub additional_duties: Option<String>,
    normalized: String,
}

impl ScheduleEntry {
    pub fn new(
        hts_number: String,
        description: String,
        general_rate: Option<String>,
        additional_duties: Option<String>,
    ) -> Self {
        let normalized = normalize_hts(&hts_number);
        ScheduleEntry {
            hts_number,
            description,
            general_rate,
            additional_duties,
            normalized,
        }
    }

    /// Digits-only form of the stored code
    pub fn normalized_code(&self) -> &str {
        &self.normalized
    }
}

/// Immutable HTS schedule, ordered as in the source file
#[derive(Debug, Clone, Default)]
pub struct Schedule {
    entries: Vec<ScheduleEntry>,
}

impl Schedule {
    pub fn new(entries: Vec<ScheduleEntry>) -> Self {
        Schedule { entries }
    }

    /// Find the first entry whose normalized code starts with `prefix`.
    ///
    /// Partial codes are accepted by design; when several rows share the
    /// prefix, the first in table order wins. That choice matches the
    /// published schedule's layout (heading rows precede their
    /// subdivisions) but is an approximation, not a guarantee.
    pub fn find_prefix(&self, prefix: &str) -> Option<&ScheduleEntry> {
        // starts_with("") is true for every row; an empty query must
        // match nothing instead of silently returning the first row.
        if prefix.is_empty() {
            return None;
        }

        let hit = self
            .entries
            .iter()
            .find(|entry| entry.normalized.starts_with(prefix));

        debug!(prefix, found = hit.is_some(), "schedule lookup");
        hit
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
