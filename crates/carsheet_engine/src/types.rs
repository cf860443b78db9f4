use std::fmt;

use carsheet_core::{ListingEntry, RunId, ScrapeFailure};

/// Entries extracted from one listing page, plus the continuation signal.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListingPage {
    pub entries: Vec<ListingEntry>,
    pub has_more: bool,
}

impl ListingPage {
    /// The end-of-pagination page: nothing to add, nothing after it.
    pub fn end() -> Self {
        Self::default()
    }
}

/// Recoverable failure while retrieving one listing page. Halts the current
/// run; the caller keeps whatever was gathered before it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Session-level record of this failure, as shown to the user.
    pub fn into_failure(self, page: u32) -> ScrapeFailure {
        ScrapeFailure {
            page,
            message: self.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    RedirectLimitExceeded,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    UnsupportedContentType { content_type: String },
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::RedirectLimitExceeded => write!(f, "redirect limit exceeded"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::UnsupportedContentType { content_type } => {
                write!(f, "unsupported content type {content_type}")
            }
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

/// Progress notifications emitted while a scrape run is in flight. Every
/// event echoes the run id so hosts can discard stragglers from an abandoned
/// run.
#[derive(Debug, Clone, PartialEq)]
pub enum ScrapeEvent {
    PageScraped {
        run: RunId,
        page: u32,
        entries: Vec<ListingEntry>,
        has_more: bool,
    },
    ScrapeFailed {
        run: RunId,
        failure: ScrapeFailure,
    },
    ScrapeCompleted {
        run: RunId,
        pages_fetched: u32,
    },
}
