use crate::entry::ListingEntry;
use crate::session::{RunId, ScrapeFailure};

/// Messages consumed by [`update`](crate::update).
#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User asked for a fresh scrape run.
    ScrapeClicked { max_pages: u32 },
    /// Engine fetched and parsed one listing page.
    PageScraped {
        run: RunId,
        page: u32,
        entries: Vec<ListingEntry>,
        has_more: bool,
    },
    /// Engine hit a recoverable fetch failure; the run is over, the entries
    /// gathered so far stay.
    ScrapeFailed { run: RunId, failure: ScrapeFailure },
    /// Engine ran out of pages, hit the page cap, or honoured a stop.
    ScrapeCompleted { run: RunId, pages_fetched: u32 },
    /// User clicked Stop: finish the page in flight, keep what we have.
    StopClicked,
    /// User discarded the session table.
    ResetClicked,
}
