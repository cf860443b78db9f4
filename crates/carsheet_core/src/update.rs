use crate::{AppState, Effect, Msg, ScrapePhase};

/// Pure update function: applies a message to state and returns any effects.
///
/// Events from the engine carry the run id they belong to; anything from a
/// run that is no longer current (the user reset or restarted in between) is
/// dropped here instead of being merged into the new session.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::ScrapeClicked { max_pages } => match state.phase() {
            ScrapePhase::Running | ScrapePhase::Stopping => Vec::new(),
            ScrapePhase::Idle | ScrapePhase::Complete => {
                let run = state.begin_run();
                vec![Effect::StartScrape { run, max_pages }]
            }
        },
        Msg::PageScraped { run, entries, .. } => {
            if state.is_current(run) && run_active(&state) {
                state.merge_page(entries);
            }
            Vec::new()
        }
        Msg::ScrapeFailed { run, failure } => {
            if state.is_current(run) && run_active(&state) {
                state.fail_run(failure);
            }
            Vec::new()
        }
        Msg::ScrapeCompleted { run, .. } => {
            if state.is_current(run) && run_active(&state) {
                state.complete_run();
            }
            Vec::new()
        }
        Msg::StopClicked => {
            if state.phase() == ScrapePhase::Running {
                state.request_stop();
                vec![Effect::StopScrape]
            } else {
                Vec::new()
            }
        }
        Msg::ResetClicked => {
            let was_active = run_active(&state);
            state.reset();
            if was_active {
                vec![Effect::StopScrape]
            } else {
                Vec::new()
            }
        }
    };

    (state, effects)
}

fn run_active(state: &AppState) -> bool {
    matches!(state.phase(), ScrapePhase::Running | ScrapePhase::Stopping)
}
