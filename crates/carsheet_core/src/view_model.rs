use crate::entry::ListingEntry;
use crate::session::ScrapePhase;

/// Snapshot of everything the dashboard shows outside the table itself:
/// pages fetched, entry count, last error, and the brand index.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DashboardViewModel {
    pub phase: ScrapePhase,
    pub entry_count: usize,
    pub pages_fetched: u32,
    pub last_error: Option<String>,
    pub brands: Vec<String>,
    pub dirty: bool,
}

/// Case-insensitive substring filter over one column.
///
/// A pure projection: borrows the matching entries in table order and never
/// touches the session. Entries lacking the column are excluded.
pub fn filter_entries<'a>(
    entries: &'a [ListingEntry],
    column: &str,
    needle: &str,
) -> Vec<&'a ListingEntry> {
    let needle = needle.to_lowercase();
    entries
        .iter()
        .filter(|entry| {
            entry
                .field(column)
                .is_some_and(|value| value.to_lowercase().contains(&needle))
        })
        .collect()
}
