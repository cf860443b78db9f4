use crate::session::RunId;

/// Side effects requested by `update`, executed by the host against the
/// engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    StartScrape { run: RunId, max_pages: u32 },
    /// Stop the active run after the page currently in flight.
    StopScrape,
}
