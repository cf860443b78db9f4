//! Carsheet engine: fetch, parse and accumulate listing pages; export the table.
mod decode;
mod engine;
mod export;
mod fetch;
mod parse;
mod persist;
mod run;
mod source;
mod types;

pub use decode::{decode_listing_html, DecodedHtml};
pub use engine::EngineHandle;
pub use export::{export_sheet, ExportError, ExportOptions, ExportSummary};
pub use fetch::{FetchOutput, FetchSettings, Fetcher, ReqwestFetcher, DEFAULT_BASE_URL};
pub use parse::parse_listing_page;
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use run::{run_scrape, CancelFlag, ChannelSink, NullSink, ProgressSink, ScrapeOptions};
pub use source::{HttpPageSource, PageSource};
pub use types::{FailureKind, FetchError, ListingPage, ScrapeEvent};
