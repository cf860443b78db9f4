//! Carsheet core: the session table, pure state machine and view-model helpers.
mod effect;
mod entry;
mod msg;
mod session;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use entry::{column_names, ListingEntry, BRAND_COLUMN, MODEL_COLUMN, YEAR_COLUMN};
pub use msg::Msg;
pub use session::{RunId, ScrapeFailure, ScrapePhase, ScrapeSession};
pub use state::AppState;
pub use update::update;
pub use view_model::{filter_entries, DashboardViewModel};
