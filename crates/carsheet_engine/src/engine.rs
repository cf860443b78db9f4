use std::sync::mpsc;
use std::thread;

use carsheet_core::RunId;

use crate::run::{run_scrape, CancelFlag, ChannelSink, ScrapeOptions};
use crate::source::PageSource;
use crate::types::ScrapeEvent;

enum EngineCommand {
    StartScrape { run: RunId, options: ScrapeOptions },
}

/// Handle for driving scrapes from a synchronous host such as the CLI loop.
///
/// Owns a worker thread with its own tokio runtime; commands go in, progress
/// events come out. Runs execute one at a time in command order; the state
/// machine in `carsheet_core` never issues an overlapping run.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<ScrapeEvent>,
    cancel: CancelFlag,
}

impl EngineHandle {
    pub fn new(source: impl PageSource + 'static) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let cancel = CancelFlag::new();
        let worker_cancel = cancel.clone();

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            while let Ok(command) = cmd_rx.recv() {
                match command {
                    EngineCommand::StartScrape { run, options } => {
                        let sink = ChannelSink::new(event_tx.clone());
                        // The session itself is discarded here: hosts on this
                        // path rebuild it from the event stream.
                        let _ = runtime.block_on(run_scrape(
                            &source,
                            &options,
                            run,
                            &sink,
                            &worker_cancel,
                        ));
                    }
                }
            }
        });

        Self {
            cmd_tx,
            event_rx,
            cancel,
        }
    }

    /// Begin a scrape run identified by `run`.
    pub fn start_scrape(&self, run: RunId, options: ScrapeOptions) {
        self.cancel.clear();
        let _ = self.cmd_tx.send(EngineCommand::StartScrape { run, options });
    }

    /// Ask the active run to stop after the page currently in flight.
    pub fn stop(&self) {
        self.cancel.cancel();
    }

    /// Non-blocking event poll for the host loop.
    pub fn try_recv(&self) -> Option<ScrapeEvent> {
        self.event_rx.try_recv().ok()
    }
}
