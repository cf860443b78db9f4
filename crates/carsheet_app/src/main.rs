mod cli;
mod logging;

use std::thread;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;

use carsheet_core::{
    filter_entries, update, AppState, Effect, ListingEntry, Msg, ScrapePhase,
};
use carsheet_engine::{
    export_sheet, EngineHandle, ExportError, ExportOptions, FetchSettings, HttpPageSource,
    ScrapeEvent, ScrapeOptions,
};
use scrape_logging::{scrape_info, scrape_warn};

use crate::cli::Args;
use crate::logging::LogDestination;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::initialize(if args.log_file {
        LogDestination::Both
    } else {
        LogDestination::Terminal
    });

    let mut settings = FetchSettings::default();
    if let Some(base_url) = &args.base_url {
        settings.base_url = base_url.clone();
    }
    let source = HttpPageSource::new(settings).context("building the page source")?;
    let engine = EngineHandle::new(source);

    let mut state = AppState::new();
    let (next, effects) = update(
        state,
        Msg::ScrapeClicked {
            max_pages: args.max_pages,
        },
    );
    state = next;
    dispatch(&engine, &args, effects);

    // Drain engine events into the state machine until the run ends. The
    // session table fills page by page, so an interactive host could render
    // it here mid-run; this CLI just waits for the end.
    while matches!(state.phase(), ScrapePhase::Running | ScrapePhase::Stopping) {
        match engine.try_recv() {
            Some(event) => {
                let (next, effects) = update(state, msg_from_event(event));
                state = next;
                dispatch(&engine, &args, effects);
            }
            None => thread::sleep(Duration::from_millis(20)),
        }
    }

    let view = state.view();
    if let Some(error) = &view.last_error {
        scrape_warn!("scrape ended early: {error}");
    }
    scrape_info!(
        "scraped {} entries across {} pages ({} brands)",
        view.entry_count,
        view.pages_fetched,
        view.brands.len()
    );

    let session = state.take_session();
    let rows: Vec<ListingEntry> = match args.parsed_filter()? {
        Some((column, needle)) => {
            let matched = filter_entries(session.entries(), &column, &needle);
            scrape_info!(
                "filter {column} ~ {needle:?}: {} of {} rows",
                matched.len(),
                session.len()
            );
            matched.into_iter().cloned().collect()
        }
        None => session.entries().to_vec(),
    };

    print_preview(&rows);

    if let Some(json_path) = &args.json {
        let json = serde_json::to_string_pretty(&rows)?;
        std::fs::write(json_path, json)
            .with_context(|| format!("writing {}", json_path.display()))?;
        scrape_info!("wrote {} entries to {}", rows.len(), json_path.display());
    }

    let out = args.output_path();
    match export_sheet(&rows, &out, &ExportOptions::default()) {
        Ok(summary) => scrape_info!(
            "saved {} rows x {} columns to {}",
            summary.rows,
            summary.columns,
            summary.path.display()
        ),
        Err(ExportError::NoRows) => scrape_warn!("nothing to export"),
        Err(err) => return Err(err).context("exporting the session table"),
    }

    Ok(())
}

fn dispatch(engine: &EngineHandle, args: &Args, effects: Vec<Effect>) {
    for effect in effects {
        match effect {
            Effect::StartScrape { run, max_pages } => engine.start_scrape(
                run,
                ScrapeOptions {
                    max_pages,
                    page_delay: Duration::from_millis(args.delay_ms),
                },
            ),
            Effect::StopScrape => engine.stop(),
        }
    }
}

fn msg_from_event(event: ScrapeEvent) -> Msg {
    match event {
        ScrapeEvent::PageScraped {
            run,
            page,
            entries,
            has_more,
        } => Msg::PageScraped {
            run,
            page,
            entries,
            has_more,
        },
        ScrapeEvent::ScrapeFailed { run, failure } => Msg::ScrapeFailed { run, failure },
        ScrapeEvent::ScrapeCompleted { run, pages_fetched } => {
            Msg::ScrapeCompleted { run, pages_fetched }
        }
    }
}

fn print_preview(rows: &[ListingEntry]) {
    const PREVIEW_ROWS: usize = 10;
    for (idx, entry) in rows.iter().take(PREVIEW_ROWS).enumerate() {
        let year = entry
            .year
            .map(|y| y.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!("{:>3}. {} {} ({year})", idx + 1, entry.brand, entry.model);
    }
    if rows.len() > PREVIEW_ROWS {
        println!("     ... and {} more rows", rows.len() - PREVIEW_ROWS);
    }
}
