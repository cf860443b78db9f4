use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::time::Duration;

use carsheet_core::{RunId, ScrapeSession};
use scrape_logging::{scrape_info, scrape_warn};

use crate::source::PageSource;
use crate::types::ScrapeEvent;

/// Page range and pacing for one scrape run.
#[derive(Debug, Clone)]
pub struct ScrapeOptions {
    pub max_pages: u32,
    /// Pause between consecutive page fetches, to be polite to the source
    /// site. Zero disables pacing.
    pub page_delay: Duration,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            max_pages: 50,
            page_delay: Duration::from_secs(1),
        }
    }
}

/// Receives progress while a run is in flight. Implementations must not
/// block: the loop calls this between page fetches.
pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: ScrapeEvent);
}

/// Sink for callers that don't watch progress.
pub struct NullSink;

impl ProgressSink for NullSink {
    fn emit(&self, _event: ScrapeEvent) {}
}

/// Forwards events over an mpsc channel; send failures are ignored because a
/// host that dropped its receiver no longer cares.
pub struct ChannelSink {
    tx: mpsc::Sender<ScrapeEvent>,
}

impl ChannelSink {
    pub fn new(tx: mpsc::Sender<ScrapeEvent>) -> Self {
        Self { tx }
    }
}

impl ProgressSink for ChannelSink {
    fn emit(&self, event: ScrapeEvent) {
        let _ = self.tx.send(event);
    }
}

/// Cooperative stop signal, honoured between page fetches only; there is no
/// mid-fetch cancellation.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn clear(&self) {
        self.0.store(false, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Drive the page source across consecutive page indices, merging every page
/// into one session.
///
/// The loop is strictly sequential, starting at page 1. It stops when a page
/// reports no further data, when `max_pages` is reached, when a stop is
/// requested, or when a fetch fails. A failure ends the run but keeps the
/// partial table; the error is recorded on the session instead of
/// propagating to the caller.
pub async fn run_scrape(
    source: &dyn PageSource,
    options: &ScrapeOptions,
    run: RunId,
    sink: &dyn ProgressSink,
    cancel: &CancelFlag,
) -> ScrapeSession {
    let mut session = ScrapeSession::new();
    let max_pages = options.max_pages.max(1);
    let mut page = 1u32;

    loop {
        match source.listing_page(page).await {
            Ok(listing) => {
                session.record_page(listing.entries.clone());
                scrape_info!(
                    "page {page}: {} entries ({} total)",
                    listing.entries.len(),
                    session.len()
                );
                sink.emit(ScrapeEvent::PageScraped {
                    run,
                    page,
                    entries: listing.entries,
                    has_more: listing.has_more,
                });
                if !listing.has_more {
                    scrape_info!("last page reached");
                    break;
                }
            }
            Err(err) => {
                scrape_warn!("page {page}: {err}");
                let failure = err.into_failure(page);
                session.record_failure(failure.clone());
                sink.emit(ScrapeEvent::ScrapeFailed { run, failure });
                return session;
            }
        }

        if page >= max_pages {
            scrape_info!("page cap {max_pages} reached");
            break;
        }
        if cancel.is_cancelled() {
            scrape_info!("stop requested, keeping {} entries", session.len());
            break;
        }

        page += 1;
        if !options.page_delay.is_zero() {
            tokio::time::sleep(options.page_delay).await;
        }
    }

    sink.emit(ScrapeEvent::ScrapeCompleted {
        run,
        pages_fetched: session.pages_fetched(),
    });
    session
}
