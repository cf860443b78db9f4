use std::path::PathBuf;

use chrono::Local;
use clap::Parser;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Carsheet listing scraper and exporter")]
pub struct Args {
    /// Maximum number of listing pages to fetch
    #[clap(short, long, default_value_t = 50)]
    pub max_pages: u32,

    /// Output spreadsheet path (defaults to carsheet_data_<timestamp>.csv)
    #[clap(short, long)]
    pub out: Option<PathBuf>,

    /// Listing URL to paginate (the page parameter is appended per request)
    #[clap(long)]
    pub base_url: Option<String>,

    /// Keep only rows whose COLUMN contains NEEDLE, case-insensitive
    #[clap(short, long, value_name = "COLUMN=NEEDLE")]
    pub filter: Option<String>,

    /// Also dump the rows as pretty-printed JSON
    #[clap(long, value_name = "PATH")]
    pub json: Option<PathBuf>,

    /// Pause between page fetches, in milliseconds
    #[clap(long, default_value_t = 1000)]
    pub delay_ms: u64,

    /// Also write logs to ./carsheet.log
    #[clap(long)]
    pub log_file: bool,
}

impl Args {
    pub fn output_path(&self) -> PathBuf {
        self.out.clone().unwrap_or_else(|| {
            PathBuf::from(format!(
                "carsheet_data_{}.csv",
                Local::now().format("%Y%m%d_%H%M")
            ))
        })
    }

    /// Split `--filter COLUMN=NEEDLE` into its parts.
    pub fn parsed_filter(&self) -> anyhow::Result<Option<(String, String)>> {
        let Some(raw) = &self.filter else {
            return Ok(None);
        };
        match raw.split_once('=') {
            Some((column, needle)) if !column.trim().is_empty() => {
                Ok(Some((column.trim().to_string(), needle.trim().to_string())))
            }
            _ => anyhow::bail!("filter must look like COLUMN=NEEDLE, got {raw:?}"),
        }
    }
}
