use std::sync::{mpsc, Arc};
use std::thread;

use safetyboard_logging::board_error;

use crate::fetch::{ChannelProgressSink, FetchSettings, Fetcher, ReqwestFetcher};
use crate::load::{load_sources, panic_message};
use crate::{EngineEvent, FailureKind, LoadError, SourceSet};

enum EngineCommand {
    Load { sources: SourceSet },
}

/// Runs loads on a background tokio runtime and reports back over a channel.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: FetchSettings) -> Self {
        Self::with_fetcher(Arc::new(ReqwestFetcher::new(settings)))
    }

    pub fn with_fetcher(fetcher: Arc<dyn Fetcher>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    // Dropping the event sender tells the host no event will come.
                    board_error!("Failed to start tokio runtime: {}", err);
                    return;
                }
            };
            while let Ok(command) = cmd_rx.recv() {
                let fetcher = fetcher.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(supervise(fetcher, command, event_tx));
            }
        });

        Self { cmd_tx, event_rx }
    }

    pub fn load(&self, sources: SourceSet) {
        let _ = self.cmd_tx.send(EngineCommand::Load { sources });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Blocks until the next event; `None` once the engine has shut down.
    /// Every `load` is answered by exactly one `LoadCompleted`, even when
    /// the load task panics.
    pub fn recv(&self) -> Option<EngineEvent> {
        self.event_rx.recv().ok()
    }
}

/// Runs `command` on its own task so that a panic still ends in a
/// `LoadCompleted` event.
async fn supervise(
    fetcher: Arc<dyn Fetcher>,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Load { sources } => {
            let task_tx = event_tx.clone();
            let task = tokio::spawn(async move {
                let sink = ChannelProgressSink::new(task_tx);
                load_sources(fetcher.as_ref(), &sources, &sink).await
            });
            let result = match task.await {
                Ok(result) => result,
                Err(err) => {
                    let message = if err.is_panic() {
                        panic_message(&*err.into_panic())
                    } else {
                        err.to_string()
                    };
                    board_error!("Load task died: {}", message);
                    Err(LoadError::engine(FailureKind::Panicked, message))
                }
            };
            let _ = event_tx.send(EngineEvent::LoadCompleted(result));
        }
    }
}
