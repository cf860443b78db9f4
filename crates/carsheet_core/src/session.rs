use std::collections::BTreeSet;

use crate::entry::{column_names, ListingEntry};

/// Identifies one scrape run. Bumped by the state machine whenever a run
/// starts or the session is reset, so events from an abandoned run can be
/// told apart from the current one.
pub type RunId = u64;

/// Where the dashboard is in the scrape lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrapePhase {
    #[default]
    Idle,
    Running,
    /// Stop was requested; the page in flight will still be merged.
    Stopping,
    Complete,
}

/// Why a scrape run ended early. Recorded on the session, shown by the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeFailure {
    pub page: u32,
    pub message: String,
}

/// In-memory accumulation of listing entries across one scrape run.
///
/// Append-only while a run is active; only ever cleared wholesale, by being
/// replaced with a fresh session on reset. Insertion order is page order,
/// then in-page order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScrapeSession {
    entries: Vec<ListingEntry>,
    pages_fetched: u32,
    last_error: Option<ScrapeFailure>,
}

impl ScrapeSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// The full ordered entry sequence.
    pub fn entries(&self) -> &[ListingEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of successful page fetches, counting a trailing empty page.
    pub fn pages_fetched(&self) -> u32 {
        self.pages_fetched
    }

    pub fn last_error(&self) -> Option<&ScrapeFailure> {
        self.last_error.as_ref()
    }

    /// Merge one fetched page into the table.
    pub fn record_page(&mut self, entries: Vec<ListingEntry>) {
        self.pages_fetched += 1;
        self.entries.extend(entries);
    }

    /// Record the failure that ended the run. Entries gathered so far stay.
    pub fn record_failure(&mut self, failure: ScrapeFailure) {
        self.last_error = Some(failure);
    }

    /// Distinct brand values present in the table, sorted. Entries whose
    /// brand column was blank on the source page are skipped.
    pub fn brands(&self) -> Vec<String> {
        let distinct: BTreeSet<&String> = self
            .entries
            .iter()
            .filter(|e| !e.brand.is_empty())
            .map(|e| &e.brand)
            .collect();
        distinct.into_iter().cloned().collect()
    }

    /// Union of column names observed across the table.
    pub fn column_names(&self) -> Vec<String> {
        column_names(&self.entries)
    }
}
