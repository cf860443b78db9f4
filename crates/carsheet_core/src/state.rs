use std::mem;

use crate::session::{RunId, ScrapeFailure, ScrapePhase, ScrapeSession};
use crate::view_model::DashboardViewModel;

/// Dashboard state. The session table is owned here and only ever mutated
/// through [`update`](crate::update); presentation code reads it via
/// [`AppState::session`] and [`AppState::view`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    session: ScrapeSession,
    phase: ScrapePhase,
    run: RunId,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> &ScrapeSession {
        &self.session
    }

    pub fn phase(&self) -> ScrapePhase {
        self.phase
    }

    /// Hand the finished session to the caller, leaving a fresh one behind.
    pub fn take_session(&mut self) -> ScrapeSession {
        mem::take(&mut self.session)
    }

    /// Status readout plus the derived brand index.
    pub fn view(&self) -> DashboardViewModel {
        DashboardViewModel {
            phase: self.phase,
            entry_count: self.session.len(),
            pages_fetched: self.session.pages_fetched(),
            last_error: self
                .session
                .last_error()
                .map(|f| format!("page {}: {}", f.page, f.message)),
            brands: self.session.brands(),
            dirty: self.dirty,
        }
    }

    /// True once since the last state change; lets hosts coalesce redraws.
    pub fn consume_dirty(&mut self) -> bool {
        mem::take(&mut self.dirty)
    }

    pub(crate) fn is_current(&self, run: RunId) -> bool {
        self.run == run
    }

    pub(crate) fn begin_run(&mut self) -> RunId {
        self.run += 1;
        self.session = ScrapeSession::new();
        self.phase = ScrapePhase::Running;
        self.dirty = true;
        self.run
    }

    pub(crate) fn merge_page(&mut self, entries: Vec<crate::ListingEntry>) {
        self.session.record_page(entries);
        self.dirty = true;
    }

    pub(crate) fn fail_run(&mut self, failure: ScrapeFailure) {
        self.session.record_failure(failure);
        self.phase = ScrapePhase::Complete;
        self.dirty = true;
    }

    pub(crate) fn complete_run(&mut self) {
        self.phase = ScrapePhase::Complete;
        self.dirty = true;
    }

    pub(crate) fn request_stop(&mut self) {
        self.phase = ScrapePhase::Stopping;
        self.dirty = true;
    }

    pub(crate) fn reset(&mut self) {
        self.run += 1;
        self.session = ScrapeSession::new();
        self.phase = ScrapePhase::Idle;
        self.dirty = true;
    }
}
