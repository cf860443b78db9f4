use scrape_logging::{scrape_debug, scrape_info};

use crate::decode::decode_listing_html;
use crate::fetch::{FetchSettings, Fetcher, ReqwestFetcher};
use crate::parse::parse_listing_page;
use crate::types::{FailureKind, FetchError, ListingPage};

/// One listing page, ready for accumulation.
///
/// This is the seam the scrape loop runs against: production uses
/// [`HttpPageSource`], tests substitute a scripted implementation.
#[async_trait::async_trait]
pub trait PageSource: Send + Sync {
    async fn listing_page(&self, page: u32) -> Result<ListingPage, FetchError>;
}

/// Fetch, decode and parse against the real site.
pub struct HttpPageSource {
    fetcher: ReqwestFetcher,
}

impl HttpPageSource {
    pub fn new(settings: FetchSettings) -> Result<Self, FetchError> {
        Ok(Self {
            fetcher: ReqwestFetcher::new(settings)?,
        })
    }
}

#[async_trait::async_trait]
impl PageSource for HttpPageSource {
    async fn listing_page(&self, page: u32) -> Result<ListingPage, FetchError> {
        let output = match self.fetcher.fetch(page).await {
            Ok(output) => output,
            // An error status page has no listings for us: treat it as the
            // end of pagination so everything fetched so far is kept.
            Err(err) if matches!(err.kind, FailureKind::HttpStatus(_)) => {
                scrape_info!("page {page}: {err}, treating as end of data");
                return Ok(ListingPage::end());
            }
            Err(err) => return Err(err),
        };

        let decoded = decode_listing_html(&output.bytes, output.content_type.as_deref());
        let listing = parse_listing_page(&decoded.html);
        scrape_debug!(
            "page {page}: {} entries, has_more={}, encoding {}",
            listing.entries.len(),
            listing.has_more,
            decoded.encoding
        );
        Ok(listing)
    }
}
