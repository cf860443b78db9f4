use carsheet_core::ListingEntry;
use scraper::{ElementRef, Html, Selector};
use scrape_logging::scrape_debug;

use crate::types::ListingPage;

/// Extract the listing entries from one page of the source site.
///
/// The listings are a DataTables-style table: column labels in `thead th`,
/// one car per `tbody tr`. A page without a table, or with an empty body, is
/// the end of pagination. Extraction is tolerant per field: a cell that is
/// missing or unreadable leaves that field absent and keeps the entry.
pub fn parse_listing_page(html: &str) -> ListingPage {
    let (Ok(table_sel), Ok(label_sel), Ok(row_sel), Ok(cell_sel)) = (
        Selector::parse("table"),
        Selector::parse("thead th"),
        Selector::parse("tbody tr"),
        Selector::parse("td"),
    ) else {
        return ListingPage::end();
    };

    let doc = Html::parse_document(html);
    let Some(table) = doc.select(&table_sel).next() else {
        return ListingPage::end();
    };

    let labels: Vec<String> = table.select(&label_sel).map(cell_text).collect();
    let rows: Vec<ElementRef> = table.select(&row_sel).collect();
    if rows.is_empty() {
        return ListingPage::end();
    }

    let entries = rows
        .into_iter()
        .map(|row| entry_from_row(&labels, &cell_sel, row))
        .collect();
    ListingPage {
        entries,
        has_more: next_page_enabled(&doc),
    }
}

enum Column {
    Brand,
    Model,
    Year,
    Spec,
}

fn classify(label: &str) -> Column {
    if label.eq_ignore_ascii_case("make")
        || label.eq_ignore_ascii_case("brand")
        || label.eq_ignore_ascii_case("manufacturer")
    {
        Column::Brand
    } else if label.eq_ignore_ascii_case("model") {
        Column::Model
    } else if label.eq_ignore_ascii_case("year") {
        Column::Year
    } else {
        Column::Spec
    }
}

fn entry_from_row(labels: &[String], cell_sel: &Selector, row: ElementRef) -> ListingEntry {
    let mut entry = ListingEntry::new("", "", None);
    for (idx, cell) in row.select(cell_sel).enumerate() {
        let value = cell_text(cell);
        if value.is_empty() {
            continue;
        }
        let label = labels.get(idx).map(String::as_str).unwrap_or("");
        match classify(label) {
            Column::Brand => entry.brand = value,
            Column::Model => entry.model = value,
            Column::Year => entry.year = parse_year(&value),
            Column::Spec => {
                if label.is_empty() {
                    // Nothing to key the cell by; drop it rather than guess.
                    scrape_debug!("skipping unlabeled cell {idx} with value {value:?}");
                } else {
                    entry.specs.insert(label.to_string(), value);
                }
            }
        }
    }
    entry
}

fn parse_year(value: &str) -> Option<i32> {
    match value.parse() {
        Ok(year) => Some(year),
        Err(_) => {
            scrape_debug!("unparsable year cell {value:?}, leaving year absent");
            None
        }
    }
}

/// Text content of a cell with whitespace collapsed, so nested markup and
/// formatting newlines don't leak into field values.
fn cell_text(el: ElementRef) -> String {
    let raw: String = el.text().collect();
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// The source paginates with a DataTables next button; the last page renders
/// it disabled (or, on some listings, not at all).
fn next_page_enabled(doc: &Html) -> bool {
    let Ok(next_sel) = Selector::parse("li.paginate_button.page-item.next") else {
        return false;
    };
    match doc.select(&next_sel).next() {
        Some(button) => !button
            .value()
            .attr("class")
            .map(|classes| classes.split_whitespace().any(|c| c == "disabled"))
            .unwrap_or(false),
        None => false,
    }
}
